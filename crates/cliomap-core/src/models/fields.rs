//! Field label configuration: canonical Clio keys and their label synonyms.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Canonical key for the client's name.
pub const CLIENT_NAME: &str = "Matter.Client.Name";
/// Canonical key for the provider, filled from organization entities.
pub const PROVIDER: &str = "Matter.Custom.Provider";
pub const DATE_OF_BIRTH: &str = "Matter.Client.DateOfBirth";
pub const DATE_OF_LOSS: &str = "Matter.Custom.DateOfLoss";
pub const HOURS_WORKED: &str = "Matter.Client.HoursWorked";
pub const PHONE: &str = "Contact.Client.Phone";
pub const EMAIL: &str = "Contact.Client.Email";
pub const ADDRESS: &str = "Contact.Client.Address";

/// Ordered mapping from canonical field key to the labels that introduce it.
///
/// Key order and label order both matter: extraction walks keys in the order
/// they were declared and tries each key's labels in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConfig {
    fields: IndexMap<String, Vec<String>>,
}

impl FieldConfig {
    /// Build a configuration from `(key, labels)` pairs.
    pub fn from_pairs<K, L, I>(pairs: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        let fields = pairs
            .into_iter()
            .map(|(key, labels)| (key.into(), labels.into_iter().map(Into::into).collect()))
            .collect();
        Self { fields }
    }

    /// Parse a YAML document of `key: [label, ...]` entries.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;

        if config.is_empty() {
            return Err(ConfigError::Empty);
        }

        Ok(config)
    }

    /// Load a YAML field configuration from disk.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content, path)?;
        info!("Loaded {} field definitions from {}", config.len(), path.display());
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to the built-in mapping.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("No field config at {}, using built-in labels", path.display());
            Ok(Self::default())
        }
    }

    /// Number of configured keys.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Configured keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(key, labels)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether `label` is one of the configured labels for any key (case-insensitive).
    pub fn is_configured_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.fields
            .values()
            .flatten()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(label))
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::from_pairs([
            (CLIENT_NAME, vec!["Client Name", "Patient Name", "Name"]),
            (PHONE, vec!["Phone", "Telephone"]),
            (EMAIL, vec!["Email", "E-mail"]),
            (ADDRESS, vec!["Address"]),
            ("Matter.Custom.ClaimNumber", vec!["Claim Number", "Claim #"]),
            ("Matter.Custom.PolicyNumber", vec!["Policy Number", "Policy #"]),
            ("Matter.Custom.InsuranceCompany", vec!["Insurance Company", "Insurer"]),
        ])
    }
}
