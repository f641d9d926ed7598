//! Common test utilities for gateway-survey tests

#![allow(dead_code)]

use gateway_core::{codebook, Field, RawRecord, Substance};

pub const HEADER: &str = "MJEVER\tMJAGE\tCOCEVER\tCOCAGE\tHEREVER\tHERAGE\tMETHAMEVR\tMETHAMAGE";

/// Render rows as a TSV document with the standard header
pub fn to_tsv(rows: &[RawRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        let cells: Vec<String> = Substance::ALL
            .into_iter()
            .flat_map(|s| [row.get(Field::Ever(s)), row.get(Field::Age(s))])
            .map(|code| code.to_string())
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// A respondent who used marijuana at `mj_age` and nothing else
pub fn marijuana_only(mj_age: i64) -> RawRecord {
    RawRecord::new(
        [codebook::EVER_YES, codebook::EVER_NO, codebook::EVER_NO, codebook::EVER_NO],
        [mj_age, codebook::AGE_NEVER_USED, codebook::AGE_NEVER_USED, codebook::AGE_NEVER_USED],
    )
}

/// A respondent who never used any of the four substances
pub fn abstainer() -> RawRecord {
    RawRecord::new(
        [codebook::EVER_NO; 4],
        [codebook::AGE_NEVER_USED; 4],
    )
}
