//! Row filters removing invalid and non-response codes

use gateway_core::{codebook, Error, Field, RawRecord, RawTable, Result, Substance};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Which codes a column may hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFilter {
    /// Keep rows whose code is one of these
    Keep(Vec<i64>),
    /// Drop rows whose code is one of these
    Drop(Vec<i64>),
}

impl CodeFilter {
    pub fn accepts(&self, code: i64) -> bool {
        match self {
            Self::Keep(codes) => codes.contains(&code),
            Self::Drop(codes) => !codes.contains(&code),
        }
    }
}

/// A code filter bound to one survey column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub field: Field,
    #[serde(flatten)]
    pub filter: CodeFilter,
}

impl ColumnFilter {
    pub fn keep(field: Field, codes: impl Into<Vec<i64>>) -> Self {
        Self {
            field,
            filter: CodeFilter::Keep(codes.into()),
        }
    }

    pub fn exclude(field: Field, codes: impl Into<Vec<i64>>) -> Self {
        Self {
            field,
            filter: CodeFilter::Drop(codes.into()),
        }
    }

    pub fn admits(&self, row: &RawRecord) -> bool {
        self.filter.accepts(row.get(self.field))
    }
}

/// Ordered set of column filters applied to the raw table
///
/// A row survives only if every filter admits it. Filters only remove rows,
/// so the order they run in does not change the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleaningRules {
    filters: Vec<ColumnFilter>,
}

impl CleaningRules {
    pub fn new(filters: Vec<ColumnFilter>) -> Self {
        Self { filters }
    }

    /// Codebook rules: use indicators must be yes/no, age columns must not
    /// hold a non-response code
    pub fn codebook() -> Self {
        let keep_answers = Substance::ALL
            .into_iter()
            .map(|s| ColumnFilter::keep(Field::Ever(s), codebook::VALID_EVER_CODES));
        let drop_non_response = Substance::ALL
            .into_iter()
            .map(|s| ColumnFilter::exclude(Field::Age(s), codebook::AGE_NON_RESPONSE_CODES));
        Self::new(keep_answers.chain(drop_non_response).collect())
    }

    /// Append a filter
    pub fn with_filter(mut self, filter: ColumnFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn admits(&self, row: &RawRecord) -> bool {
        self.filters.iter().all(|f| f.admits(row))
    }

    /// Drop every row that fails a filter
    ///
    /// Returns [`Error::EmptyResultSet`] when no row survives.
    #[instrument(skip_all, fields(rows_in = table.len()))]
    pub fn apply(&self, table: &RawTable) -> Result<RawTable> {
        let mut rows = table.rows().to_vec();
        for filter in &self.filters {
            let before = rows.len();
            rows.retain(|row| filter.admits(row));
            debug!(
                column = filter.field.column(),
                removed = before - rows.len(),
                "applied column filter"
            );
        }

        if rows.is_empty() {
            return Err(Error::empty_result("cleaning"));
        }
        info!(rows_out = rows.len(), removed = table.len() - rows.len(), "cleaned survey extract");
        Ok(RawTable::new(rows))
    }
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self::codebook()
    }
}

/// Apply `rules` to `table`
pub fn clean(table: &RawTable, rules: &CleaningRules) -> Result<RawTable> {
    rules.apply(table)
}
