//! Engine configuration.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::i18n::{FALLBACK_LOCALE, locales};
use crate::training::ProgressionRules;

/// Settings the engine is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "EngineConfig::default_locale")]
    pub locale: String,
    #[serde(default)]
    pub rules: ProgressionRules,
}

impl EngineConfig {
    fn default_locale() -> String {
        FALLBACK_LOCALE.to_string()
    }

    /// Load configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the locale is bundled and the rules are consistent.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !locales().any(|code| code == self.locale) {
            return Err(ConfigError::UnknownLocale(self.locale.clone()));
        }
        self.rules.validate()?;
        Ok(())
    }

    /// Same configuration with a different locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            rules: ProgressionRules::default(),
        }
    }
}
