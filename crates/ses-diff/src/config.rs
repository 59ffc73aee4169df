//! Diff options, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Options shared by the byte and line adapters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Edit distance at which the search gives up. `None` uses the
    /// engine default of `old_len + new_len + 2`, which never truncates.
    pub budget: Option<usize>,
    /// Compare lines with whitespace runs collapsed and ends trimmed.
    pub skip_whitespace: bool,
    /// Bound line diffs by the number of distinct lines seen in both inputs
    /// instead of `budget`. Inputs with few distinct lines but many changes
    /// come back truncated under this bound.
    pub vocabulary_budget: bool,
}

impl DiffConfig {
    /// Parse a configuration from TOML text.
    ///
    /// `budget` and `vocabulary_budget` are mutually exclusive.
    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| DiffError::Config(e.to_string()))?;
        if config.budget.is_some() && config.vocabulary_budget {
            return Err(DiffError::Config(
                "budget and vocabulary_budget cannot both be set".into(),
            ));
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> DiffResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn skipping_whitespace(mut self) -> Self {
        self.skip_whitespace = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.budget, None);
        assert!(!c.skip_whitespace);
        assert!(!c.vocabulary_budget);
    }

    #[test]
    fn parse_full_toml() {
        let c = DiffConfig::from_toml_str("budget = 64\nskip_whitespace = true\n").unwrap();
        assert_eq!(c.budget, Some(64));
        assert!(c.skip_whitespace);
        assert!(!c.vocabulary_budget);

        let c = DiffConfig::from_toml_str("vocabulary_budget = true").unwrap();
        assert!(c.vocabulary_budget);
    }

    #[test]
    fn budget_and_vocabulary_budget_conflict() {
        let err = DiffConfig::from_toml_str("budget = 64\nvocabulary_budget = true\n").unwrap_err();
        assert!(matches!(err, DiffError::Config(msg) if msg.contains("vocabulary_budget")));
    }

    #[test]
    fn missing_keys_take_defaults() {
        let c = DiffConfig::from_toml_str("skip_whitespace = true").unwrap();
        assert_eq!(c, DiffConfig::default().skipping_whitespace());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DiffConfig::from_toml_str("budgett = 3").unwrap_err();
        assert!(matches!(err, DiffError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ses.toml");
        std::fs::write(&path, "budget = 10").unwrap();
        assert_eq!(DiffConfig::load(&path).unwrap(), DiffConfig::default().with_budget(10));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiffConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DiffError::Io(_)));
    }
}
