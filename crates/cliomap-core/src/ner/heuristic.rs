use lazy_static::lazy_static;
use regex::Regex;

use super::{Entity, EntityKind, EntityRecognizer};

lazy_static! {
    // Capitalized words ending in a company or facility suffix
    static ref ORGANIZATION: Regex = Regex::new(
        r"\b(?:[A-Z][A-Za-z&'.\-]*[ \t]+){1,4}(?i:Inc|LLC|L\.L\.C|Corp|Corporation|Company|Co|Ltd|LLP|Hospital|Clinic|Medical[ \t]+Center|Group|Associates|Partners|University)\b"
    ).unwrap();

    // A name after an honorific: "Dr. Jane Q. Doe", "Mr John Smith"
    static ref PERSON: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Mx|Dr)\.?[ \t]+([A-Z][a-z]+(?:[ \t]+[A-Z]\.)?(?:[ \t]+[A-Z][a-z]+(?:-[A-Z][a-z]+)?)+)"
    ).unwrap();

    // "Springfield, IL 62701"
    static ref LOCATION: Regex = Regex::new(
        r"\b([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){0,2},[ \t]*[A-Z]{2})[ \t]+\d{5}(?:-\d{4})?\b"
    ).unwrap();
}

/// Regex-based recognizer for people, organizations and city/state locations.
///
/// Conservative on purpose: a person is only recognized after an honorific.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for m in ORGANIZATION.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                kind: EntityKind::Organization,
                start: m.start(),
                end: m.end(),
            });
        }

        for caps in PERSON.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                entities.push(Entity {
                    text: name.as_str().to_string(),
                    kind: EntityKind::Person,
                    start: name.start(),
                    end: name.end(),
                });
            }
        }

        for caps in LOCATION.captures_iter(text) {
            if let Some(place) = caps.get(1) {
                entities.push(Entity {
                    text: place.as_str().to_string(),
                    kind: EntityKind::Location,
                    start: place.start(),
                    end: place.end(),
                });
            }
        }

        entities.sort_by_key(|e| (e.start, e.end));
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(text: &str) -> Vec<(&'static str, String)> {
        HeuristicRecognizer::new()
            .recognize(text)
            .into_iter()
            .map(|e| {
                let kind = match e.kind {
                    EntityKind::Person => "person",
                    EntityKind::Organization => "org",
                    EntityKind::Location => "loc",
                };
                (kind, e.text)
            })
            .collect()
    }

    #[test]
    fn test_organizations() {
        assert_eq!(
            spans("Treated at Mercy General Hospital, billed by ACME LOGISTICS INC"),
            vec![
                ("org", "Mercy General Hospital".to_string()),
                ("org", "ACME LOGISTICS INC".to_string()),
            ]
        );
    }

    #[test]
    fn test_person_after_honorific() {
        assert_eq!(
            spans("Seen by Dr. Jane Q. Doe today"),
            vec![("person", "Jane Q. Doe".to_string())]
        );
        assert!(spans("Patient Name: Jane").is_empty());
    }

    #[test]
    fn test_location() {
        assert_eq!(
            spans("Springfield, IL 62701"),
            vec![("loc", "Springfield, IL".to_string())]
        );
    }

    #[test]
    fn test_entities_in_text_order() {
        let found = HeuristicRecognizer::new().recognize("Mr. John Smith works at Acme Corp");
        assert_eq!(found[0].kind, EntityKind::Person);
        assert_eq!(found[1].kind, EntityKind::Organization);
        assert!(found[0].start < found[1].start);
    }

    #[test]
    fn test_no_matches_across_lines() {
        assert!(spans("Acme\nCorp").is_empty());
    }
}
