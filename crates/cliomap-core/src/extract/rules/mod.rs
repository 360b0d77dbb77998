//! Rule-based matching strategies, in the order the pipeline runs them.

pub mod configured;
pub mod dates;
pub mod entities;
pub mod financial;
pub mod generic;
pub mod overlays;
pub mod patterns;
pub mod stacked;

pub use configured::ConfiguredLabels;
pub use entities::EntityBackfill;
pub use financial::{FinancialLines, FINANCIAL_CATEGORIES};
pub use generic::LabelValueLines;
pub use overlays::FixedPatterns;
pub use stacked::StackedLabelLines;

/// Trim a surface label and drop a trailing `:` or `-`.
pub fn clean_label(label: &str) -> String {
    label
        .trim()
        .trim_end_matches([':', '-'])
        .trim_end()
        .to_string()
}
