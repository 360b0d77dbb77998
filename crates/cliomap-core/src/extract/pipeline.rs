//! The extraction pipeline that runs strategies in priority order.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::models::fields::FieldConfig;
use crate::models::record::{ExtractionResult, MatchReport};
use crate::ner::{EntityRecognizer, HeuristicRecognizer};
use crate::report::Reporter;

use super::rules::{
    ConfiguredLabels, EntityBackfill, FinancialLines, FixedPatterns, LabelValueLines,
    StackedLabelLines,
};
use super::{DocumentText, FieldHit, MatchStrategy};

/// Everything found so far for one document.
#[derive(Debug, Default)]
pub struct ExtractionState {
    result: ExtractionResult,
    consumed_lines: HashSet<usize>,
}

impl ExtractionState {
    pub fn has_field(&self, key: &str) -> bool {
        self.result.matched.contains_key(key)
    }

    pub fn has_fallback(&self, label: &str) -> bool {
        self.result.fallback.contains_key(label)
    }

    pub fn has_financial(&self, category: &str) -> bool {
        self.result.financial.contains_key(category)
    }

    /// Whether a canonical field was read from line `idx`.
    pub fn is_line_consumed(&self, idx: usize) -> bool {
        self.consumed_lines.contains(&idx)
    }

    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    /// Apply a hit unless its slot is already taken. Returns whether it was stored.
    pub(crate) fn absorb(&mut self, hit: FieldHit) -> bool {
        match hit {
            FieldHit::Matched { key, value, line } => {
                if self.result.matched.contains_key(&key) {
                    return false;
                }
                if let Some(idx) = line {
                    self.consumed_lines.insert(idx);
                }
                self.result.matched.insert(key, value);
                true
            }
            FieldHit::Fallback { label, value } => {
                if self.result.fallback.contains_key(&label) {
                    return false;
                }
                self.result.fallback.insert(label, value);
                true
            }
            FieldHit::Financial { category, amounts } => {
                if self.result.financial.contains_key(&category) {
                    return false;
                }
                self.result.financial.insert(category, amounts);
                true
            }
        }
    }

    fn into_result(self) -> ExtractionResult {
        self.result
    }
}

/// Extracts Clio fields from document text.
///
/// Holds the field configuration and the strategy list for the lifetime of a
/// run; both are read-only during extraction, so one extractor can serve any
/// number of documents.
pub struct FieldExtractor {
    config: FieldConfig,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl FieldExtractor {
    /// Create an extractor with the built-in heuristic entity recognizer.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_recognizer(config, Box::new(HeuristicRecognizer::new()))
    }

    /// Create an extractor with the standard strategy order and a caller-supplied
    /// entity recognizer.
    pub fn with_recognizer(config: FieldConfig, recognizer: Box<dyn EntityRecognizer>) -> Self {
        let strategies: Vec<Box<dyn MatchStrategy>> = vec![
            Box::new(ConfiguredLabels::new(&config)),
            Box::new(FixedPatterns::new()),
            Box::new(LabelValueLines::new()),
            Box::new(StackedLabelLines::new()),
            Box::new(FinancialLines::new()),
            Box::new(EntityBackfill::new(recognizer)),
        ];
        Self { config, strategies }
    }

    /// Create an extractor with an explicit strategy list, run in the given order.
    pub fn with_strategies(config: FieldConfig, strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { config, strategies }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Names of the strategies in the order they run.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run every strategy over `text`.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let doc = DocumentText::new(text, &self.config);
        let mut state = ExtractionState::default();

        info!("Extracting fields from {} characters of text", text.len());

        for strategy in &self.strategies {
            let hits = strategy.attempt(&doc, &state);
            let proposed = hits.len();
            let mut stored = 0;

            for hit in hits {
                trace!("{} proposed {:?}", strategy.name(), hit);
                if state.absorb(hit) {
                    stored += 1;
                }
            }

            debug!("{}: {} proposed, {} stored", strategy.name(), proposed, stored);
        }

        let result = state.into_result();
        debug!(
            "Extracted {} matched, {} fallback, {} financial in {}ms",
            result.matched.len(),
            result.fallback.len(),
            result.financial.len(),
            start.elapsed().as_millis()
        );
        result
    }

    /// Extract and summarize against this extractor's configuration.
    pub fn extract_with_report(&self, text: &str) -> (ExtractionResult, MatchReport) {
        let result = self.extract(text);
        let report = Reporter::summarize(&result.matched, &self.config);
        (result, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::{CLIENT_NAME, PROVIDER};
    use crate::models::record::FinancialAmounts;
    use crate::ner::{Entity, EntityKind};
    use pretty_assertions::assert_eq;

    const PAYSTUB: &str = "
        ACME LOGISTICS INC
        Employee Earnings Statement

        Name: Jane Doe
        Phone: (555) 123-4567
        DOB: March 3, 1985
        Employer Name
        Acme Corp
        Pay Period: Weekly

        Federal Income Tax   123.45   6789.00
        Medicare Tax\t20.00\t310.00
        Total Hours Worked this period 40.00
    ";

    struct FixedRecognizer(Vec<Entity>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Vec<Entity> {
            self.0.clone()
        }
    }

    fn entity(text: &str, kind: EntityKind) -> Entity {
        Entity {
            text: text.to_string(),
            kind,
            start: 0,
            end: text.len(),
        }
    }

    #[test]
    fn test_strategy_order() {
        let extractor = FieldExtractor::new(FieldConfig::default());
        assert_eq!(
            extractor.strategy_names(),
            vec![
                "configured-label",
                "fixed-pattern",
                "label-value",
                "stacked-label",
                "financial-line",
                "entity-backfill",
            ]
        );
    }

    #[test]
    fn test_name_line_maps_to_client_name() {
        let extractor = FieldExtractor::new(FieldConfig::default());
        let result = extractor.extract("Name: Jane Doe");
        assert_eq!(result.matched.get(CLIENT_NAME).map(String::as_str), Some("Jane Doe"));
    }

    #[test]
    fn test_full_paystub() {
        let extractor = FieldExtractor::new(FieldConfig::default());
        let result = extractor.extract(PAYSTUB);

        assert_eq!(result.matched[CLIENT_NAME], "Jane Doe");
        assert_eq!(result.matched["Contact.Client.Phone"], "(555) 123-4567");
        assert_eq!(result.matched["Matter.Client.DateOfBirth"], "1985-03-03");
        assert_eq!(result.matched["Matter.Client.HoursWorked"], "40.00");

        assert_eq!(result.fallback["Employer Name"], "Acme Corp");
        assert_eq!(result.fallback["Pay Period"], "Weekly");
        assert!(!result.fallback.contains_key("Name"));
        assert!(!result.fallback.contains_key("Phone"));

        assert_eq!(
            result.financial["Federal Income Tax"],
            FinancialAmounts::new("123.45", "6789.00")
        );
        assert_eq!(
            result.financial["Medicare Tax"],
            FinancialAmounts::new("20.00", "310.00")
        );
    }

    #[test]
    fn test_matched_keys_stay_within_known_set() {
        let config = FieldConfig::default();
        let extractor = FieldExtractor::new(config.clone());
        let result = extractor.extract(PAYSTUB);

        let overlay_keys = FixedPatterns::keys();
        for key in result.matched.keys() {
            assert!(
                config.contains_key(key) || overlay_keys.contains(&key.as_str()) || key == CLIENT_NAME,
                "unexpected key {key}"
            );
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = FieldExtractor::new(FieldConfig::default());
        let first = serde_json::to_string(&extractor.extract(PAYSTUB)).unwrap();
        let second = serde_json::to_string(&extractor.extract(PAYSTUB)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configured_label_beats_entity() {
        let recognizer = FixedRecognizer(vec![entity("John Roe", EntityKind::Person)]);
        let extractor =
            FieldExtractor::with_recognizer(FieldConfig::default(), Box::new(recognizer));

        let result = extractor.extract("Patient Name: Jane Doe");
        assert_eq!(result.matched[CLIENT_NAME], "Jane Doe");
    }

    #[test]
    fn test_entities_fill_gaps() {
        let recognizer = FixedRecognizer(vec![
            entity("Mercy General Hospital", EntityKind::Organization),
            entity("John Roe", EntityKind::Person),
            entity("Other Clinic", EntityKind::Organization),
        ]);
        let extractor =
            FieldExtractor::with_recognizer(FieldConfig::default(), Box::new(recognizer));

        let result = extractor.extract("nothing labeled here");
        assert_eq!(result.matched[CLIENT_NAME], "John Roe");
        assert_eq!(result.fallback[PROVIDER], "Mercy General Hospital");
        assert!(!result.matched.contains_key(PROVIDER));
    }

    #[test]
    fn test_configured_stacked_label_is_not_fallback() {
        let config = FieldConfig::from_pairs([("Matter.Custom.Employer", vec!["Employer Name"])]);
        let extractor = FieldExtractor::new(config);

        let result = extractor.extract("Employer Name\nAcme Corp");
        assert!(!result.fallback.contains_key("Employer Name"));
        assert!(!result.matched.contains_key("Matter.Custom.Employer"));
    }

    #[test]
    fn test_extract_with_report() {
        let config = FieldConfig::from_pairs([
            ("A.Key", vec!["Alpha"]),
            ("B.Key", vec!["Bravo"]),
        ]);
        let extractor = FieldExtractor::with_strategies(
            config.clone(),
            vec![Box::new(ConfiguredLabels::new(&config))],
        );

        let (result, report) = extractor.extract_with_report("Alpha: one");
        assert_eq!(result.matched["A.Key"], "one");
        assert_eq!(report.total_expected, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(report.missing_fields, vec!["B.Key".to_string()]);
    }

    #[test]
    fn test_absorb_never_overwrites() {
        let mut state = ExtractionState::default();
        assert!(state.absorb(FieldHit::matched("K", "first")));
        assert!(!state.absorb(FieldHit::matched("K", "second")));
        assert!(state.absorb(FieldHit::fallback("L", "first")));
        assert!(!state.absorb(FieldHit::fallback("L", "second")));

        assert_eq!(state.result().matched["K"], "first");
        assert_eq!(state.result().fallback["L"], "first");
    }
}
