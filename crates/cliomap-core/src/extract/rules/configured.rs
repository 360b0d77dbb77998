//! Labels from the field configuration, searched across the whole text.

use regex::Regex;
use tracing::{trace, warn};

use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};
use crate::models::fields::FieldConfig;

/// Matches each configured key by trying its labels in order.
///
/// A label matches case-insensitively and may be followed by `:` or `-`; the
/// rest of that line is the value. The first label that yields a value wins
/// for its key.
pub struct ConfiguredLabels {
    fields: Vec<(String, Vec<Regex>)>,
}

impl ConfiguredLabels {
    /// Compile label patterns for every key in `config`.
    pub fn new(config: &FieldConfig) -> Self {
        let fields = config
            .iter()
            .map(|(key, labels)| {
                let patterns = labels
                    .iter()
                    .filter(|label| !label.trim().is_empty())
                    .filter_map(|label| match label_pattern(label) {
                        Ok(re) => Some(re),
                        Err(e) => {
                            warn!("Skipping label {:?} for {}: {}", label, key, e);
                            None
                        }
                    })
                    .collect();
                (key.to_string(), patterns)
            })
            .collect();

        Self { fields }
    }
}

/// Build the pattern for one label.
///
/// Word boundaries are only added on sides where the label itself ends in a
/// word character, so labels like `Claim #` still match.
fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    let label = label.trim();
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');

    let lead = if is_word(label.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(label.chars().last()) { r"\b" } else { "" };

    Regex::new(&format!(
        r"(?i){lead}{}{trail}[ \t]*[:\-]?[ \t]*(\S[^\r\n]*)",
        regex::escape(label)
    ))
}

impl MatchStrategy for ConfiguredLabels {
    fn name(&self) -> &'static str {
        "configured-label"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        let mut hits = Vec::new();

        for (key, patterns) in &self.fields {
            if found.has_field(key) {
                continue;
            }

            let hit = patterns.iter().find_map(|re| {
                let caps = re.captures(doc.text())?;
                let value = caps[1].trim();
                if value.is_empty() {
                    return None;
                }
                let line = doc.line_of(caps.get(0)?.start());
                Some(FieldHit::Matched {
                    key: key.clone(),
                    value: value.to_string(),
                    line: Some(line),
                })
            });

            if let Some(hit) = hit {
                trace!("Configured label matched {}", key);
                hits.push(hit);
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(config: &FieldConfig, text: &str) -> Vec<FieldHit> {
        let strategy = ConfiguredLabels::new(config);
        let doc = DocumentText::new(text, config);
        strategy.attempt(&doc, &ExtractionState::default())
    }

    #[test]
    fn test_label_with_colon() {
        let config = FieldConfig::from_pairs([("Matter.Client.Name", vec!["Name"])]);
        let hits = run(&config, "Header\nName: Jane Doe  \nOther");
        assert_eq!(
            hits,
            vec![FieldHit::Matched {
                key: "Matter.Client.Name".into(),
                value: "Jane Doe".into(),
                line: Some(1),
            }]
        );
    }

    #[test]
    fn test_label_with_dash_and_case() {
        let config = FieldConfig::from_pairs([("Matter.Custom.ClaimNumber", vec!["claim number"])]);
        let hits = run(&config, "CLAIM NUMBER - WC-2024-0042");
        assert_eq!(hits, vec![FieldHit::Matched {
            key: "Matter.Custom.ClaimNumber".into(),
            value: "WC-2024-0042".into(),
            line: Some(0),
        }]);
    }

    #[test]
    fn test_label_order_decides() {
        let config = FieldConfig::from_pairs([(
            "Matter.Client.Name",
            vec!["Client Name", "Name"],
        )]);
        let hits = run(&config, "Name: Second\nClient Name: First");
        assert!(matches!(&hits[0], FieldHit::Matched { value, .. } if value == "First"));
    }

    #[test]
    fn test_value_must_be_on_same_line() {
        let config = FieldConfig::from_pairs([("Matter.Custom.Employer", vec!["Employer Name"])]);
        assert!(run(&config, "Employer Name\nAcme Corp").is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        let config = FieldConfig::from_pairs([("Matter.Client.Name", vec!["Name"])]);
        assert!(run(&config, "Names listed below").is_empty());
        assert!(run(&config, "Surname Smith").is_empty());
    }

    #[test]
    fn test_symbol_label() {
        let config = FieldConfig::from_pairs([("Matter.Custom.PolicyNumber", vec!["Policy #"])]);
        let hits = run(&config, "Policy #: PX-9");
        assert!(matches!(&hits[0], FieldHit::Matched { value, .. } if value == "PX-9"));
    }

    #[test]
    fn test_already_matched_key_is_skipped() {
        let config = FieldConfig::from_pairs([("Matter.Client.Name", vec!["Name"])]);
        let strategy = ConfiguredLabels::new(&config);
        let doc = DocumentText::new("Name: Jane", &config);

        let mut state = ExtractionState::default();
        for hit in strategy.attempt(&doc, &state) {
            state.absorb(hit);
        }
        assert!(strategy.attempt(&doc, &state).is_empty());
    }
}
