//! Widget configuration

use icu_locale_core::{locale, Locale};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::{NumberFormat, DEFAULT_LOCALE, DEFAULT_MAX_FRACTION_DIGITS};
use crate::core::history::History;
use crate::core::undo::UndoStack;

/// Largest fractional precision an f64 can meaningfully render
pub const MAX_FRACTION_DIGITS_LIMIT: usize = 15;

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A bounded collection was given no room
    #[error("{field} must be greater than zero")]
    ZeroCapacity {
        /// Offending field name
        field: &'static str,
    },

    /// Fractional precision beyond f64 resolution
    #[error("max_fraction_digits must be at most {MAX_FRACTION_DIGITS_LIMIT}, got {0}")]
    FractionDigits(usize),

    /// Empty storage key
    #[error("{field} must not be empty")]
    EmptyKey {
        /// Offending field name
        field: &'static str,
    },

    /// Not a BCP-47 language tag
    #[error("Invalid locale tag: {0:?}")]
    Locale(String),

    /// Unparseable JSON
    #[error("Invalid config JSON: {0}")]
    Parse(String),
}

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Maximum undo snapshots
    pub undo_capacity: usize,
    /// Maximum history entries
    pub history_capacity: usize,
    /// BCP-47 tag picking separators and grouping for the result view
    pub locale: String,
    /// Fractional digits shown for non-integers
    pub max_fraction_digits: usize,
    /// Preference key holding the theme
    pub theme_key: String,
    /// Older preference key read when `theme_key` is unset
    pub legacy_theme_key: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            undo_capacity: UndoStack::DEFAULT_CAPACITY,
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            locale: DEFAULT_LOCALE.to_string(),
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
            theme_key: "theme".to_string(),
            legacy_theme_key: "calc-theme".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set undo capacity
    #[must_use]
    pub const fn with_undo_capacity(mut self, capacity: usize) -> Self {
        self.undo_capacity = capacity;
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set number locale from a BCP-47 tag such as `de-DE`
    #[must_use]
    pub fn with_locale(mut self, tag: &str) -> Self {
        self.locale = tag.to_string();
        self
    }

    /// Adopts the user agent's language when it is a usable tag
    ///
    /// A missing or malformed language keeps the current locale.
    #[must_use]
    pub fn with_user_language(self, language: Option<&str>) -> Self {
        match language.map(str::trim).filter(|tag| !tag.is_empty()) {
            Some(tag) if tag.parse::<Locale>().is_ok() => self.with_locale(tag),
            Some(tag) => {
                tracing::debug!(tag, "ignoring unparseable user language");
                self
            }
            None => self,
        }
    }

    /// Set fractional precision
    #[must_use]
    pub const fn with_max_fraction_digits(mut self, digits: usize) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// Set theme storage keys
    #[must_use]
    pub fn with_theme_keys(mut self, key: &str, legacy_key: &str) -> Self {
        self.theme_key = key.to_string();
        self.legacy_theme_key = legacy_key.to_string();
        self
    }

    /// Parses and validates a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`WidgetConfig::from_json`], taking the locale from `language`
    /// when the JSON names none
    pub fn from_json_with_language(
        json: &str,
        language: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let names_locale = value.get("locale").is_some();
        let mut config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if !names_locale {
            config = config.with_user_language(language);
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.undo_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "undo_capacity",
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "history_capacity",
            });
        }
        if self.max_fraction_digits > MAX_FRACTION_DIGITS_LIMIT {
            return Err(ConfigError::FractionDigits(self.max_fraction_digits));
        }
        if self.theme_key.is_empty() {
            return Err(ConfigError::EmptyKey { field: "theme_key" });
        }
        if self.locale.parse::<Locale>().is_err() {
            return Err(ConfigError::Locale(self.locale.clone()));
        }
        Ok(())
    }

    /// Formatter for the result view
    #[must_use]
    pub fn number_format(&self) -> NumberFormat {
        let locale = self.locale.parse::<Locale>().unwrap_or_else(|_| {
            tracing::warn!(tag = %self.locale, "invalid locale tag, using {DEFAULT_LOCALE}");
            locale!("en-US")
        });
        NumberFormat::new(locale, self.max_fraction_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::new();
        assert_eq!(config.undo_capacity, 120);
        assert_eq!(config.history_capacity, 200);
        assert_eq!(config.max_fraction_digits, 8);
        assert_eq!(config.theme_key, "theme");
        assert_eq!(config.legacy_theme_key, "calc-theme");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WidgetConfig::new()
            .with_undo_capacity(5)
            .with_history_capacity(3)
            .with_locale("de-DE")
            .with_max_fraction_digits(2)
            .with_theme_keys("t", "old-t");
        assert_eq!(config.undo_capacity, 5);
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.number_format().format(1234.567), "1.234,57");
        assert_eq!(config.theme_key, "t");
        assert_eq!(config.legacy_theme_key, "old-t");
    }

    #[test]
    fn test_validate_rejects_zero_capacities() {
        assert_eq!(
            WidgetConfig::new().with_undo_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity {
                field: "undo_capacity"
            })
        );
        assert_eq!(
            WidgetConfig::new().with_history_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity {
                field: "history_capacity"
            })
        );
    }

    #[test]
    fn test_validate_rejects_excess_precision() {
        let err = WidgetConfig::new()
            .with_max_fraction_digits(16)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::FractionDigits(16));
        assert!(err.to_string().contains("at most 15"));
    }

    #[test]
    fn test_validate_rejects_empty_theme_key() {
        let config = WidgetConfig::new().with_theme_keys("", "calc-theme");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyKey { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_locale() {
        let config = WidgetConfig::new().with_locale("not a tag");
        assert_eq!(
            config.validate(),
            Err(ConfigError::Locale("not a tag".to_string()))
        );
        assert!(matches!(
            WidgetConfig::from_json(r#"{"locale": "??"}"#),
            Err(ConfigError::Locale(_))
        ));
    }

    #[test]
    fn test_user_language() {
        let config = WidgetConfig::new().with_user_language(Some("fr-FR"));
        assert_eq!(config.locale, "fr-FR");
        assert!(config.validate().is_ok());

        let config = WidgetConfig::new().with_user_language(Some("@@"));
        assert_eq!(config.locale, "en-US");
        let config = WidgetConfig::new().with_user_language(None);
        assert_eq!(config.locale, "en-US");

        let config = WidgetConfig::new()
            .with_locale("de-DE")
            .with_user_language(Some(""));
        assert_eq!(config.locale, "de-DE");
    }

    #[test]
    fn test_from_json_with_language() {
        let config =
            WidgetConfig::from_json_with_language(r#"{"undo_capacity": 3}"#, Some("de-DE"))
                .unwrap();
        assert_eq!(config.undo_capacity, 3);
        assert_eq!(config.locale, "de-DE");

        let config =
            WidgetConfig::from_json_with_language(r#"{"locale": "fr-FR"}"#, Some("de-DE"))
                .unwrap();
        assert_eq!(config.locale, "fr-FR");

        assert!(matches!(
            WidgetConfig::from_json_with_language("[", Some("de-DE")),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_number_format_follows_locale() {
        let config = WidgetConfig::from_json(r#"{"locale": "de-DE"}"#).unwrap();
        assert_eq!(config.number_format().format(1_234_567.25), "1.234.567,25");

        let mut broken = WidgetConfig::new();
        broken.locale = "!!".to_string();
        assert_eq!(broken.number_format().locale().to_string(), "en-US");
    }

    #[test]
    fn test_from_json_partial() {
        let config = WidgetConfig::from_json(r#"{"history_capacity": 10}"#).unwrap();
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.undo_capacity, 120);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            WidgetConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"undo_capacity": 0}"#),
            Err(ConfigError::ZeroCapacity { .. })
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = WidgetConfig::new().with_history_capacity(42);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WidgetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
