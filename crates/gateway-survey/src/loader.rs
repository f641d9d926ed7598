//! Tab-separated survey reader

use csv::{ReaderBuilder, StringRecord};
use gateway_core::{Error, Field, RawRecord, RawTable, Result, Substance};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Position of each required column within the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    ever: [usize; 4],
    age: [usize; 4],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let position = |field: Field| {
            headers
                .iter()
                .position(|name| name.trim() == field.column())
                .ok_or_else(|| Error::SchemaMismatch {
                    column: field.column().to_string(),
                })
        };

        let mut ever = [0; 4];
        let mut age = [0; 4];
        for substance in Substance::ALL {
            ever[substance.index()] = position(Field::Ever(substance))?;
            age[substance.index()] = position(Field::Age(substance))?;
        }
        Ok(Self { ever, age })
    }

    fn parse(&self, record: &StringRecord, line: u64) -> Result<RawRecord> {
        let mut ever = [0; 4];
        let mut age = [0; 4];
        for substance in Substance::ALL {
            let i = substance.index();
            ever[i] = parse_code(record, self.ever[i], Field::Ever(substance), line)?;
            age[i] = parse_code(record, self.age[i], Field::Age(substance), line)?;
        }
        Ok(RawRecord::new(ever, age))
    }
}

fn parse_code(record: &StringRecord, position: usize, field: Field, line: u64) -> Result<i64> {
    let raw = record.get(position).ok_or_else(|| Error::Malformed {
        line,
        reason: format!("row has no value for `{field}`"),
    })?;
    let trimmed = raw.trim();

    if let Ok(code) = trimmed.parse::<i64>() {
        return Ok(code);
    }
    // Some exports write integral codes as floats ("16.0")
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(Error::Malformed {
            line,
            reason: format!("`{field}` holds non-integer value {trimmed:?}"),
        }),
    }
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::Malformed { line, reason },
    }
}

/// Read a tab-separated survey extract, keeping only the eight required columns
///
/// The first row must be a header naming every column of
/// [`codebook::required_columns`](gateway_core::codebook::required_columns);
/// any other columns are ignored.
pub fn read_tsv<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let index = ColumnIndex::from_headers(&headers)?;
    debug!(columns = headers.len(), "resolved required columns");

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        let line = record.position().map_or(0, |p| p.line());
        rows.push(index.parse(&record, line)?);
    }

    info!(rows = rows.len(), "loaded survey extract");
    Ok(RawTable::new(rows))
}

/// Open `path` and read it with [`read_tsv`]
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_tsv(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    read_tsv(file)
}
