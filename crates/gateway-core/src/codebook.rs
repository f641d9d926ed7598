//! Response codes from the NSDUH 2018 codebook
//!
//! The survey stores every answer as an integer. Use indicators take
//! `1`/`2` for yes/no, age questions store the age in years unless one of
//! the reserved codes below applies.

use crate::{Field, Substance};

/// Respondent reports lifetime use
pub const EVER_YES: i64 = 1;

/// Respondent reports no lifetime use
pub const EVER_NO: i64 = 2;

/// The only codes a use indicator may take after cleaning
pub const VALID_EVER_CODES: [i64; 2] = [EVER_YES, EVER_NO];

/// Age question skipped because the substance was never used
pub const AGE_NEVER_USED: i64 = 991;

/// Logically inconsistent answer
pub const AGE_BAD_DATA: i64 = 985;

/// Respondent did not know
pub const AGE_DONT_KNOW: i64 = 994;

/// Respondent refused to answer
pub const AGE_REFUSED: i64 = 997;

/// Answer left blank
pub const AGE_BLANK: i64 = 998;

/// Non-response codes removed from every age column during cleaning
pub const AGE_NON_RESPONSE_CODES: [i64; 4] = [AGE_BAD_DATA, AGE_DONT_KNOW, AGE_REFUSED, AGE_BLANK];

/// The eight columns every input file must provide, in codebook order
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    Substance::ALL
        .into_iter()
        .flat_map(|s| [Field::Ever(s).column(), Field::Age(s).column()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_order() {
        let columns: Vec<_> = required_columns().collect();
        assert_eq!(
            columns,
            vec![
                "MJEVER", "MJAGE", "COCEVER", "COCAGE", "HEREVER", "HERAGE", "METHAMEVR",
                "METHAMAGE"
            ]
        );
    }

    #[test]
    fn test_never_code_is_not_a_non_response() {
        assert!(!AGE_NON_RESPONSE_CODES.contains(&AGE_NEVER_USED));
    }
}
