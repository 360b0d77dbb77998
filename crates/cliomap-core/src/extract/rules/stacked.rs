//! Fallback scan for a label on one line and its value on the next.

use super::clean_label;
use super::patterns::{BARE_LABEL, COLUMN_GAP};
use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};

/// Pairs a bare label line with the line that follows it.
///
/// Works over the distinct non-blank lines, so every adjacent pair is a
/// candidate. Lines split by column gaps are table rows, not labels.
pub struct StackedLabelLines;

impl StackedLabelLines {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StackedLabelLines {
    fn default() -> Self {
        Self::new()
    }
}

fn is_bare_label(line: &str) -> bool {
    BARE_LABEL.is_match(line) && !COLUMN_GAP.is_match(line)
}

impl MatchStrategy for StackedLabelLines {
    fn name(&self) -> &'static str {
        "stacked-label"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        let config = doc.config();
        let mut hits: Vec<FieldHit> = Vec::new();

        for pair in doc.distinct_lines().windows(2) {
            let (line, next) = (pair[0], pair[1]);
            if !is_bare_label(line) {
                continue;
            }

            let label = clean_label(line);
            let taken = hits
                .iter()
                .any(|hit| matches!(hit, FieldHit::Fallback { label: l, .. } if *l == label));
            if taken || config.is_configured_label(&label) || found.has_fallback(&label) {
                continue;
            }

            hits.push(FieldHit::fallback(label, next));
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldConfig;
    use pretty_assertions::assert_eq;

    fn run(config: &FieldConfig, text: &str) -> Vec<FieldHit> {
        let doc = DocumentText::new(text, config);
        StackedLabelLines::new().attempt(&doc, &ExtractionState::default())
    }

    #[test]
    fn test_employer_name_on_next_line() {
        let hits = run(&FieldConfig::default(), "Employer Name\nAcme Corp");
        assert_eq!(hits, vec![FieldHit::fallback("Employer Name", "Acme Corp")]);
    }

    #[test]
    fn test_configured_label_is_not_paired() {
        let config = FieldConfig::from_pairs([("Matter.Custom.Employer", vec!["Employer Name"])]);
        assert!(run(&config, "Employer Name\nAcme Corp").is_empty());
    }

    #[test]
    fn test_blank_lines_between_label_and_value() {
        let hits = run(&FieldConfig::default(), "Department:\n\n   \nWarehouse");
        assert_eq!(hits, vec![FieldHit::fallback("Department", "Warehouse")]);
    }

    #[test]
    fn test_every_adjacent_pair_is_considered() {
        let hits = run(&FieldConfig::default(), "Employer Name\nAcme Corp\nShift Type\nNight");
        assert_eq!(
            hits,
            vec![
                FieldHit::fallback("Employer Name", "Acme Corp"),
                FieldHit::fallback("Acme Corp", "Shift Type"),
                FieldHit::fallback("Shift Type", "Night"),
            ]
        );
    }

    #[test]
    fn test_label_with_digits() {
        let hits = run(&FieldConfig::default(), "Address Line 2\nSuite 400");
        assert_eq!(hits, vec![FieldHit::fallback("Address Line 2", "Suite 400")]);
    }

    #[test]
    fn test_label_value_line_can_be_a_value() {
        let hits = run(&FieldConfig::default(), "Employer Name\nNote: see file");
        assert_eq!(hits, vec![FieldHit::fallback("Employer Name", "Note: see file")]);
    }

    #[test]
    fn test_amount_rows_are_not_labels() {
        let text = "Federal Income Tax   123.45   6789.00\nMedicare Tax   20.00   310.00";
        assert!(run(&FieldConfig::default(), text).is_empty());
    }

    #[test]
    fn test_existing_fallback_is_kept() {
        let config = FieldConfig::default();
        let doc = DocumentText::new("Shift Type\nNight", &config);
        let mut state = ExtractionState::default();
        state.absorb(FieldHit::fallback("Shift Type", "Day"));
        assert!(StackedLabelLines::new().attempt(&doc, &state).is_empty());
    }

    #[test]
    fn test_repeated_label_keeps_first_value() {
        let hits = run(&FieldConfig::default(), "Shift Type\nNight\nShift Type\nDay");
        assert_eq!(hits[0], FieldHit::fallback("Shift Type", "Night"));
        assert_eq!(
            hits.iter()
                .filter(|h| matches!(h, FieldHit::Fallback { label, .. } if label == "Shift Type"))
                .count(),
            1
        );
    }
}
