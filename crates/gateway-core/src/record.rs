//! Raw and recoded survey records

use crate::{Field, Substance};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight integer codes of one survey row, exactly as read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawRecord {
    ever: [i64; 4],
    age: [i64; 4],
}

impl RawRecord {
    /// Create a record from per-substance codes in codebook order
    pub fn new(ever: [i64; 4], age: [i64; 4]) -> Self {
        Self { ever, age }
    }

    /// Code stored in `field`
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::Ever(s) => self.ever[s.index()],
            Field::Age(s) => self.age[s.index()],
        }
    }

    /// Replace the code stored in `field`
    pub fn with(mut self, field: Field, code: i64) -> Self {
        match field {
            Field::Ever(s) => self.ever[s.index()] = code,
            Field::Age(s) => self.age[s.index()] = code,
        }
        self
    }
}

/// An ordered collection of raw records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawRecord> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<RawRecord> {
        self.rows
    }
}

impl FromIterator<RawRecord> for RawTable {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Recoded "ever used" indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EverUsed {
    Yes,
    No,
}

impl EverUsed {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl fmt::Display for EverUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recoded age at first use
///
/// Replaces the mixed numeric/"Never" column of the raw extract: numeric
/// work has to match on `Years`, so `Never` can never leak into a mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeAtFirstUse {
    Years(u16),
    Never,
}

impl AgeAtFirstUse {
    pub const fn years(self) -> Option<u16> {
        match self {
            Self::Years(years) => Some(years),
            Self::Never => None,
        }
    }

    pub const fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for AgeAtFirstUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{years}"),
            Self::Never => f.write_str("Never"),
        }
    }
}

/// One surveyed individual after recoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Respondent {
    ever: [EverUsed; 4],
    age: [AgeAtFirstUse; 4],
}

impl Respondent {
    pub fn new(ever: [EverUsed; 4], age: [AgeAtFirstUse; 4]) -> Self {
        Self { ever, age }
    }

    pub fn ever(&self, substance: Substance) -> EverUsed {
        self.ever[substance.index()]
    }

    pub fn age(&self, substance: Substance) -> AgeAtFirstUse {
        self.age[substance.index()]
    }

    /// Number of hard drugs this respondent reports having used (0..=3)
    pub fn hard_drug_count(&self) -> u32 {
        Substance::HARD_DRUGS
            .iter()
            .filter(|&&s| self.ever(s).is_yes())
            .count() as u32
    }

    /// `age(other) - age(base)` when both ages are known
    pub fn age_gap(&self, base: Substance, other: Substance) -> Option<f64> {
        let base_age = self.age(base).years()?;
        let other_age = self.age(other).years()?;
        Some(f64::from(other_age) - f64::from(base_age))
    }
}

/// The cleaned and recoded survey
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    respondents: Vec<Respondent>,
}

impl Survey {
    pub fn new(respondents: Vec<Respondent>) -> Self {
        Self { respondents }
    }

    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    pub fn respondents(&self) -> &[Respondent] {
        &self.respondents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Respondent> {
        self.respondents.iter()
    }

    /// Number of respondents answering `answer` for `substance`
    pub fn count_ever(&self, substance: Substance, answer: EverUsed) -> usize {
        self.iter().filter(|r| r.ever(substance) == answer).count()
    }

    /// Known ages at first use of `substance`, `Never` rows excluded
    pub fn known_ages(&self, substance: Substance) -> Vec<f64> {
        self.iter()
            .filter_map(|r| r.age(substance).years())
            .map(f64::from)
            .collect()
    }
}

impl FromIterator<Respondent> for Survey {
    fn from_iter<I: IntoIterator<Item = Respondent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
