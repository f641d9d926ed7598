//! Substances covered by the survey and the columns that describe them

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A substance with an "ever used" and an "age at first use" question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substance {
    Marijuana,
    Cocaine,
    Heroin,
    Methamphetamine,
}

impl Substance {
    /// All substances in codebook order
    pub const ALL: [Substance; 4] = [
        Substance::Marijuana,
        Substance::Cocaine,
        Substance::Heroin,
        Substance::Methamphetamine,
    ];

    /// The substances compared against marijuana
    pub const HARD_DRUGS: [Substance; 3] = [
        Substance::Cocaine,
        Substance::Heroin,
        Substance::Methamphetamine,
    ];

    /// Position of this substance in per-record arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Marijuana => 0,
            Self::Cocaine => 1,
            Self::Heroin => 2,
            Self::Methamphetamine => 3,
        }
    }

    /// Column holding the "ever used" indicator
    pub const fn ever_column(self) -> &'static str {
        match self {
            Self::Marijuana => "MJEVER",
            Self::Cocaine => "COCEVER",
            Self::Heroin => "HEREVER",
            Self::Methamphetamine => "METHAMEVR",
        }
    }

    /// Column holding the age at first use
    pub const fn age_column(self) -> &'static str {
        match self {
            Self::Marijuana => "MJAGE",
            Self::Cocaine => "COCAGE",
            Self::Heroin => "HERAGE",
            Self::Methamphetamine => "METHAMAGE",
        }
    }

    /// Abbreviation used on chart axes
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Marijuana => "MJ",
            Self::Cocaine => "COC",
            Self::Heroin => "HER",
            Self::Methamphetamine => "METH",
        }
    }

    pub const fn is_hard_drug(self) -> bool {
        !matches!(self, Self::Marijuana)
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Marijuana => "Marijuana",
            Self::Cocaine => "Cocaine",
            Self::Heroin => "Heroin",
            Self::Methamphetamine => "Methamphetamine",
        };
        f.write_str(name)
    }
}

/// One of the eight survey columns the analysis reads
///
/// Serialized as its column name (`"MJEVER"`, `"COCAGE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    /// "Ever used" indicator
    Ever(Substance),
    /// Age at first use
    Age(Substance),
}

impl Field {
    /// Every field, ever indicators first
    pub fn all() -> impl Iterator<Item = Field> {
        Substance::ALL
            .into_iter()
            .map(Field::Ever)
            .chain(Substance::ALL.into_iter().map(Field::Age))
    }

    pub const fn column(self) -> &'static str {
        match self {
            Self::Ever(s) => s.ever_column(),
            Self::Age(s) => s.age_column(),
        }
    }

    pub const fn substance(self) -> Substance {
        match self {
            Self::Ever(s) | Self::Age(s) => s,
        }
    }

    /// Look up a field by its column name
    pub fn from_column(name: &str) -> Option<Field> {
        Field::all().find(|field| field.column() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl TryFrom<String> for Field {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Field::from_column(&value).ok_or(Error::SchemaMismatch { column: value })
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.column().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_codebook_order() {
        for (i, substance) in Substance::ALL.iter().enumerate() {
            assert_eq!(substance.index(), i);
        }
    }

    #[test]
    fn test_hard_drugs_exclude_marijuana() {
        assert!(!Substance::Marijuana.is_hard_drug());
        assert!(Substance::HARD_DRUGS.iter().all(|s| s.is_hard_drug()));
    }

    #[test]
    fn test_field_column_lookup() {
        for field in Field::all() {
            assert_eq!(Field::from_column(field.column()), Some(field));
        }
        assert_eq!(Field::from_column("NOTACOLUMN"), None);
        assert_eq!(Field::all().count(), 8);
    }

    #[test]
    fn test_field_serializes_as_column_name() {
        let json = serde_json::to_string(&Field::Age(Substance::Methamphetamine)).unwrap();
        assert_eq!(json, "\"METHAMAGE\"");

        let field: Field = serde_json::from_str("\"HEREVER\"").unwrap();
        assert_eq!(field, Field::Ever(Substance::Heroin));

        assert!(serde_json::from_str::<Field>("\"BOGUS\"").is_err());
    }
}
