//! Payroll and tax lines split into "This Period" and "YTD" amounts.

use super::patterns::COLUMN_GAP;
use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};
use crate::models::record::FinancialAmounts;

/// Categories recognized at the start of a payroll line.
///
/// Longer names come before their prefixes so "State Income Tax" is not read
/// as "State Tax".
pub const FINANCIAL_CATEGORIES: &[&str] = &[
    "Federal Income Tax",
    "State Income Tax",
    "Local Income Tax",
    "Social Security Tax",
    "Medicare Tax",
    "State Disability Insurance",
    "State Unemployment Insurance",
    "Gross Pay",
    "Net Pay",
    "Regular Pay",
    "Overtime Pay",
    "Holiday Pay",
    "Vacation Pay",
    "Sick Pay",
    "Bonus",
    "Commission",
    "401(k)",
    "Health Insurance",
    "Dental Insurance",
    "Vision Insurance",
    "Total Deductions",
];

/// Splits lines that start with a known category on runs of two or more
/// whitespace characters. Column 1 is "This Period" and column 2 is "YTD".
pub struct FinancialLines {
    categories: &'static [&'static str],
}

impl FinancialLines {
    pub fn new() -> Self {
        Self {
            categories: FINANCIAL_CATEGORIES,
        }
    }

    fn category_of(&self, line: &str) -> Option<&'static str> {
        let lower = line.to_lowercase();
        self.categories
            .iter()
            .copied()
            .find(|category| {
                lower
                    .strip_prefix(&category.to_lowercase())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
            })
    }
}

impl Default for FinancialLines {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStrategy for FinancialLines {
    fn name(&self) -> &'static str {
        "financial-line"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        let mut hits = Vec::new();

        for line in doc.lines() {
            let line = line.trim();
            let Some(category) = self.category_of(line) else {
                continue;
            };
            if found.has_financial(category) {
                continue;
            }

            let columns: Vec<&str> = COLUMN_GAP
                .split(line)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            if columns.len() < 3 {
                continue;
            }

            hits.push(FieldHit::Financial {
                category: category.to_string(),
                amounts: FinancialAmounts::new(columns[1], columns[2]),
            });
        }

        hits
    }
}
