//! Fixed regex overlays that run regardless of the field configuration.

use regex::Regex;

use super::dates::{parse_month_name_date, parse_numeric_date, to_iso};
use super::patterns::{DATE_OF_BIRTH, DATE_OF_LOSS, EMAIL, HOURS_WORKED, PHONE, STREET_ADDRESS};
use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};
use crate::models::fields;

/// How a raw capture becomes a stored value.
#[derive(Clone, Copy)]
enum Normalize {
    /// Keep the trimmed text as-is.
    Verbatim,
    /// Month-name date to ISO; drop on failure.
    MonthNameDate,
    /// Numeric date to ISO; drop on failure.
    NumericDate,
}

struct Overlay {
    key: &'static str,
    pattern: &'static Regex,
    /// Capture group holding the value; 0 for the whole match.
    group: usize,
    normalize: Normalize,
}

const OVERLAY_KEYS: &[&str] = &[
    fields::DATE_OF_BIRTH,
    fields::PHONE,
    fields::EMAIL,
    fields::ADDRESS,
    fields::DATE_OF_LOSS,
    fields::HOURS_WORKED,
];

/// Date of birth, phone, email, street address, date of loss and hours worked.
///
/// Each overlay fires only when its key is still unset, and only on its first
/// occurrence in the text.
pub struct FixedPatterns {
    overlays: Vec<Overlay>,
}

impl FixedPatterns {
    pub fn new() -> Self {
        let overlays = vec![
            Overlay {
                key: fields::DATE_OF_BIRTH,
                pattern: &DATE_OF_BIRTH,
                group: 1,
                normalize: Normalize::MonthNameDate,
            },
            Overlay {
                key: fields::PHONE,
                pattern: &PHONE,
                group: 0,
                normalize: Normalize::Verbatim,
            },
            Overlay {
                key: fields::EMAIL,
                pattern: &EMAIL,
                group: 0,
                normalize: Normalize::Verbatim,
            },
            Overlay {
                key: fields::ADDRESS,
                pattern: &STREET_ADDRESS,
                group: 0,
                normalize: Normalize::Verbatim,
            },
            Overlay {
                key: fields::DATE_OF_LOSS,
                pattern: &DATE_OF_LOSS,
                group: 1,
                normalize: Normalize::NumericDate,
            },
            Overlay {
                key: fields::HOURS_WORKED,
                pattern: &HOURS_WORKED,
                group: 1,
                normalize: Normalize::Verbatim,
            },
        ];
        Self { overlays }
    }

    /// Every key an overlay can produce.
    pub fn keys() -> &'static [&'static str] {
        OVERLAY_KEYS
    }
}

impl Default for FixedPatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStrategy for FixedPatterns {
    fn name(&self) -> &'static str {
        "fixed-pattern"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        self.overlays
            .iter()
            .filter(|overlay| !found.has_field(overlay.key))
            .filter_map(|overlay| {
                let caps = overlay.pattern.captures(doc.text())?;
                let raw = caps.get(overlay.group)?;

                let value = match overlay.normalize {
                    Normalize::Verbatim => raw.as_str().trim().to_string(),
                    Normalize::MonthNameDate => to_iso(parse_month_name_date(raw.as_str())?),
                    Normalize::NumericDate => to_iso(parse_numeric_date(raw.as_str())?),
                };

                Some(FieldHit::Matched {
                    key: overlay.key.to_string(),
                    value,
                    line: Some(doc.line_of(raw.start())),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::FieldConfig;
    use pretty_assertions::assert_eq;

    fn values(text: &str) -> Vec<(String, String)> {
        let config = FieldConfig::default();
        let doc = DocumentText::new(text, &config);
        FixedPatterns::new()
            .attempt(&doc, &ExtractionState::default())
            .into_iter()
            .filter_map(|hit| match hit {
                FieldHit::Matched { key, value, .. } => Some((key, value)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_date_of_birth_to_iso() {
        assert_eq!(
            values("DOB: March 3, 1985"),
            vec![(fields::DATE_OF_BIRTH.to_string(), "1985-03-03".to_string())]
        );
        assert_eq!(
            values("born on 14 July 1990"),
            vec![(fields::DATE_OF_BIRTH.to_string(), "1990-07-14".to_string())]
        );
    }

    #[test]
    fn test_unparseable_date_of_birth_is_dropped() {
        assert!(values("DOB: February 31, 1985").is_empty());
    }

    #[test]
    fn test_contact_overlays() {
        let found = values("Reach me at jane.doe@example.com or 555-123-4567.\n12 Oak Street");
        assert_eq!(
            found,
            vec![
                (fields::PHONE.to_string(), "555-123-4567".to_string()),
                (fields::EMAIL.to_string(), "jane.doe@example.com".to_string()),
                (fields::ADDRESS.to_string(), "12 Oak Street".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_of_loss_and_hours() {
        let found = values("Date of Incident: 03/15/2024\nTotal Hours Worked: 38.50");
        assert_eq!(
            found,
            vec![
                (fields::DATE_OF_LOSS.to_string(), "2024-03-15".to_string()),
                (fields::HOURS_WORKED.to_string(), "38.50".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_of_loss_at_sentence_end() {
        let found = values("Date of Loss: 03/15/2024. Claim opened next day.");
        assert_eq!(
            found,
            vec![(fields::DATE_OF_LOSS.to_string(), "2024-03-15".to_string())]
        );
    }

    #[test]
    fn test_overlay_skips_matched_key() {
        let config = FieldConfig::default();
        let doc = DocumentText::new("Phone: 555-123-4567", &config);
        let mut state = ExtractionState::default();
        state.absorb(FieldHit::matched(fields::PHONE, "(555) 000-0000"));

        assert!(FixedPatterns::new().attempt(&doc, &state).is_empty());
    }

    #[test]
    fn test_overlay_hits_carry_line() {
        let config = FieldConfig::default();
        let doc = DocumentText::new("header\nDOB: Jan 2, 2001", &config);
        let hits = FixedPatterns::new().attempt(&doc, &ExtractionState::default());
        assert!(matches!(hits[0], FieldHit::Matched { line: Some(1), .. }));
    }
}
