//! Backfill from named entities once every rule-based strategy has run.

use tracing::debug;

use crate::extract::{DocumentText, ExtractionState, FieldHit, MatchStrategy};
use crate::models::fields::{CLIENT_NAME, PROVIDER};
use crate::ner::{EntityKind, EntityRecognizer};

/// Fills the client name from the first person entity and the provider from
/// the first organization entity.
///
/// The provider goes to the fallback map, never to the canonical fields.
pub struct EntityBackfill {
    recognizer: Box<dyn EntityRecognizer>,
}

impl EntityBackfill {
    pub fn new(recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }
}

impl MatchStrategy for EntityBackfill {
    fn name(&self) -> &'static str {
        "entity-backfill"
    }

    fn attempt(&self, doc: &DocumentText<'_>, found: &ExtractionState) -> Vec<FieldHit> {
        let want_provider = !found.has_fallback(PROVIDER);
        let want_client = !found.has_field(CLIENT_NAME);
        if !want_provider && !want_client {
            return Vec::new();
        }

        let entities = self.recognizer.recognize(doc.text());
        debug!("Recognizer returned {} entities", entities.len());

        let mut hits = Vec::new();

        if want_provider {
            if let Some(org) = entities.iter().find(|e| e.kind == EntityKind::Organization) {
                hits.push(FieldHit::fallback(PROVIDER, org.text.trim()));
            }
        }

        if want_client {
            if let Some(person) = entities.iter().find(|e| e.kind == EntityKind::Person) {
                hits.push(FieldHit::matched(CLIENT_NAME, person.text.trim()));
            }
        }

        hits
    }
}
