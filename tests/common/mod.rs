//! Common test utilities for the report tests

#![allow(dead_code)]

use gateway_stats::{codebook, Field, RawRecord, RawTable, Substance};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

const NEVER: i64 = codebook::AGE_NEVER_USED;
const YES: i64 = codebook::EVER_YES;
const NO: i64 = codebook::EVER_NO;

/// Synthetic extract with a known marijuana/cocaine overlap
///
/// After cleaning: 12 used both (marijuana at 15, cocaine 2 to 5 years
/// later), 28 used only marijuana (at 16), 18 used only cocaine and 42 used
/// nothing. Five more rows carry non-response codes and are removed.
pub fn gateway_table() -> RawTable {
    let mut rows = Vec::new();
    for i in 0..12 {
        rows.push(RawRecord::new(
            [YES, YES, NO, NO],
            [15, 17 + (i % 4), NEVER, NEVER],
        ));
    }
    for _ in 0..28 {
        rows.push(RawRecord::new([YES, NO, NO, NO], [16, NEVER, NEVER, NEVER]));
    }
    for _ in 0..18 {
        rows.push(RawRecord::new([NO, YES, NO, NO], [NEVER, 20, NEVER, NEVER]));
    }
    for _ in 0..42 {
        rows.push(RawRecord::new([NO; 4], [NEVER; 4]));
    }

    // Don't-know answer to MJEVER
    for _ in 0..3 {
        rows.push(RawRecord::new([94, NO, NO, NO], [NEVER; 4]));
    }
    // Refused COCAGE
    for _ in 0..2 {
        rows.push(RawRecord::new(
            [YES, YES, NO, NO],
            [15, codebook::AGE_REFUSED, NEVER, NEVER],
        ));
    }
    rows.into_iter().collect()
}

/// Render rows as a TSV document with an extra leading column
pub fn to_tsv(table: &RawTable) -> String {
    let mut header = vec!["QUESTID2".to_string()];
    header.extend(
        Substance::ALL
            .into_iter()
            .flat_map(|s| [s.ever_column(), s.age_column()])
            .map(str::to_string),
    );
    let mut out = header.join("\t");
    out.push('\n');

    for (i, row) in table.iter().enumerate() {
        let mut cells = vec![format!("{}", 10_000 + i)];
        cells.extend(
            Substance::ALL
                .into_iter()
                .flat_map(|s| [row.get(Field::Ever(s)), row.get(Field::Age(s))])
                .map(|code| code.to_string()),
        );
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

/// Write `contents` to `extract.tsv` in a fresh temp directory
pub fn write_extract(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extract.tsv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}
