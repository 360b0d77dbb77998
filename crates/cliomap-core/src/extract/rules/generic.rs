//! Fallback scan for "Label: value" lines with no canonical destination.

use super::clean_label;
use super::patterns::LABEL_VALUE;
use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};

/// Records every `Label: value` / `Label - value` line the earlier strategies
/// did not consume. Configured labels are never recorded here.
pub struct LabelValueLines;

impl LabelValueLines {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LabelValueLines {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStrategy for LabelValueLines {
    fn name(&self) -> &'static str {
        "label-value"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        let config = doc.config();
        let mut hits = Vec::new();

        for (idx, line) in doc.lines().iter().enumerate() {
            if found.is_line_consumed(idx) {
                continue;
            }

            let Some(caps) = LABEL_VALUE.captures(line.trim()) else {
                continue;
            };

            let label = clean_label(&caps[1]);
            if config.is_configured_label(&label) || found.has_fallback(&label) {
                continue;
            }

            hits.push(FieldHit::fallback(label, caps[2].trim()));
        }

        hits
    }
}
