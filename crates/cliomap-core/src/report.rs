//! Match reports: how much of the configured field set a document filled.

use indexmap::IndexMap;

use crate::models::fields::FieldConfig;
use crate::models::record::MatchReport;

pub struct Reporter;

impl Reporter {
    /// Compare matched keys against the configured key set.
    ///
    /// Only configured keys count toward `matched`; overlay and entity keys
    /// that are not configured are ignored.
    pub fn summarize(matched: &IndexMap<String, String>, config: &FieldConfig) -> MatchReport {
        let missing_fields: Vec<String> = config
            .keys()
            .filter(|key| !matched.contains_key(*key))
            .map(str::to_string)
            .collect();

        MatchReport {
            total_expected: config.len(),
            matched: config.len() - missing_fields.len(),
            missing_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn five_keys() -> FieldConfig {
        FieldConfig::from_pairs([
            ("K1", vec!["One"]),
            ("K2", vec!["Two"]),
            ("K3", vec!["Three"]),
            ("K4", vec!["Four"]),
            ("K5", vec!["Five"]),
        ])
    }

    #[test]
    fn test_three_of_five() {
        let mut matched = IndexMap::new();
        matched.insert("K4".to_string(), "d".to_string());
        matched.insert("K1".to_string(), "a".to_string());
        matched.insert("K3".to_string(), "c".to_string());

        let report = Reporter::summarize(&matched, &five_keys());
        assert_eq!(
            report,
            MatchReport {
                total_expected: 5,
                matched: 3,
                missing_fields: vec!["K2".to_string(), "K5".to_string()],
            }
        );
    }

    #[test]
    fn test_unconfigured_keys_do_not_count() {
        let mut matched = IndexMap::new();
        matched.insert("Matter.Client.DateOfBirth".to_string(), "1985-03-03".to_string());

        let report = Reporter::summarize(&matched, &five_keys());
        assert_eq!(report.matched, 0);
        assert_eq!(report.missing_fields.len(), 5);
    }

    #[test]
    fn test_empty_match_set() {
        let report = Reporter::summarize(&IndexMap::new(), &FieldConfig::default());
        assert_eq!(report.total_expected, FieldConfig::default().len());
        assert_eq!(report.matched, 0);
    }
}
