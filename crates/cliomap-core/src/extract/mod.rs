//! Field extraction: an ordered pipeline of matching strategies.
//!
//! Each [`MatchStrategy`] looks at the document text plus everything found so
//! far and proposes [`FieldHit`]s. The pipeline applies hits with
//! insert-if-absent semantics, so a strategy can only fill gaps left by the
//! strategies that ran before it.

mod pipeline;
pub mod rules;

pub use pipeline::{ExtractionState, FieldExtractor};

use crate::models::fields::FieldConfig;
use crate::models::record::FinancialAmounts;

/// A single proposed value from a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldHit {
    /// A canonical Clio field. `line` is the index of the source line, if the
    /// value was read from a single line.
    Matched {
        key: String,
        value: String,
        line: Option<usize>,
    },
    /// A label/value pair with no canonical destination.
    Fallback { label: String, value: String },
    /// A recognized payroll/tax line.
    Financial {
        category: String,
        amounts: FinancialAmounts,
    },
}

impl FieldHit {
    pub fn matched(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Matched {
            key: key.into(),
            value: value.into(),
            line: None,
        }
    }

    pub fn fallback(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Fallback {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Document text prepared once and shared by every strategy.
pub struct DocumentText<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
    line_starts: Vec<usize>,
    config: &'a FieldConfig,
}

impl<'a> DocumentText<'a> {
    pub fn new(text: &'a str, config: &'a FieldConfig) -> Self {
        let mut lines = Vec::new();
        let mut line_starts = Vec::new();
        let mut offset = 0;

        for line in text.split('\n') {
            line_starts.push(offset);
            lines.push(line.strip_suffix('\r').unwrap_or(line));
            offset += line.len() + 1;
        }

        Self {
            text,
            lines,
            line_starts,
            config,
        }
    }

    /// The full text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Raw lines, in order, including blank ones.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn config(&self) -> &'a FieldConfig {
        self.config
    }

    /// Index of the line containing byte `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Trimmed, non-blank lines with later duplicates removed.
    pub fn distinct_lines(&self) -> Vec<&'a str> {
        let mut seen = std::collections::HashSet::new();
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .filter(|l| seen.insert(*l))
            .collect()
    }
}

/// A matching strategy in the extraction pipeline.
pub trait MatchStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Propose values given the document and everything found so far.
    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_offsets() {
        let config = FieldConfig::default();
        let doc = DocumentText::new("first\r\nsecond\n\nfourth", &config);

        assert_eq!(doc.lines(), ["first", "second", "", "fourth"]);
        assert_eq!(doc.line_of(0), 0);
        assert_eq!(doc.line_of(3), 0);
        assert_eq!(doc.line_of(7), 1);
        assert_eq!(doc.line_of(doc.text().len() - 1), 3);
    }

    #[test]
    fn test_distinct_lines() {
        let config = FieldConfig::default();
        let doc = DocumentText::new("  A \n\nB\nA\n  \nC", &config);
        assert_eq!(doc.distinct_lines(), vec!["A", "B", "C"]);
    }
}
