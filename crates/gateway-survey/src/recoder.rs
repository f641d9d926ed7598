//! Mapping of numeric codes to typed labels

use gateway_core::{
    codebook, AgeAtFirstUse, Error, EverUsed, Field, RawRecord, RawTable, Respondent, Result,
    Substance, Survey,
};
use tracing::{info, instrument};

fn ever_label(field: Field, code: i64) -> Result<EverUsed> {
    match code {
        codebook::EVER_YES => Ok(EverUsed::Yes),
        codebook::EVER_NO => Ok(EverUsed::No),
        _ => Err(Error::invalid_code(field, code)),
    }
}

fn age_label(field: Field, code: i64) -> Result<AgeAtFirstUse> {
    if code == codebook::AGE_NEVER_USED {
        return Ok(AgeAtFirstUse::Never);
    }
    if codebook::AGE_NON_RESPONSE_CODES.contains(&code) {
        return Err(Error::invalid_code(field, code));
    }
    u16::try_from(code)
        .map(AgeAtFirstUse::Years)
        .map_err(|_| Error::invalid_code(field, code))
}

/// Recode a single cleaned row
pub fn recode_record(row: &RawRecord) -> Result<Respondent> {
    let mut ever = [EverUsed::No; 4];
    let mut age = [AgeAtFirstUse::Never; 4];
    for substance in Substance::ALL {
        let i = substance.index();
        let ever_field = Field::Ever(substance);
        let age_field = Field::Age(substance);
        ever[i] = ever_label(ever_field, row.get(ever_field))?;
        age[i] = age_label(age_field, row.get(age_field))?;
    }
    Ok(Respondent::new(ever, age))
}

/// Replace use codes with yes/no and the never-used age code with `Never`
///
/// Row count and order are preserved. Any code the cleaner should have
/// removed yields [`Error::InvalidCode`].
#[instrument(skip_all, fields(rows = table.len()))]
pub fn recode(table: &RawTable) -> Result<Survey> {
    let survey = table.iter().map(recode_record).collect::<Result<Survey>>()?;
    info!("recoded survey extract");
    Ok(survey)
}
