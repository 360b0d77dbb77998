//! Extraction output types and the persisted per-document record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Amount columns recognized on a payroll/tax line.
///
/// Amounts are kept exactly as they appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAmounts {
    #[serde(rename = "This Period")]
    pub this_period: String,
    #[serde(rename = "YTD")]
    pub year_to_date: String,
}

impl FinancialAmounts {
    pub fn new(this_period: impl Into<String>, year_to_date: impl Into<String>) -> Self {
        Self {
            this_period: this_period.into(),
            year_to_date: year_to_date.into(),
        }
    }
}

/// Everything extracted from a single document's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Canonical field key -> value.
    pub matched: IndexMap<String, String>,
    /// Surface label -> value, for pairs no canonical field claimed.
    pub fallback: IndexMap<String, String>,
    /// Financial category -> amounts.
    pub financial: IndexMap<String, FinancialAmounts>,
}

impl ExtractionResult {
    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty() && self.fallback.is_empty() && self.financial.is_empty()
    }
}

/// How many configured fields were found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub total_expected: usize,
    pub matched: usize,
    /// Configured keys with no value, in configuration order.
    pub missing_fields: Vec<String>,
}

/// The JSON record written for each input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub clio_fields: IndexMap<String, String>,
    pub unmapped_fields: IndexMap<String, String>,
    pub financial_data: IndexMap<String, FinancialAmounts>,
    pub field_report: MatchReport,
}

impl ExtractionRecord {
    pub fn new(result: ExtractionResult, report: MatchReport) -> Self {
        Self {
            clio_fields: result.matched,
            unmapped_fields: result.fallback,
            financial_data: result.financial,
            field_report: report,
        }
    }
}
