//! Plugin settings with documented defaults
//!
//! The host stores settings as a flat key/value object. Keys keep the
//! spelling the host's settings template uses (`Default Roll Type`,
//! `default_from`, ...), and numeric fields accept both numbers and numeric
//! strings because the host writes every value back as text.

use crate::core::error::Result;
use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Widest `max - min` a numeric roll may cover
///
/// Wider requests (`roll 1 20000000`) get the range-too-large message
/// instead of a number.
pub const MAX_RANGE_SPAN: i64 = 10_000_000;

/// Lower bound of the default numeric roll (a six-sided die)
pub const DEFAULT_FROM: i64 = 1;

/// Upper bound of the default numeric roll
pub const DEFAULT_TO: i64 = 6;

pub const DEFAULT_YES_LABEL: &str = "Yes";
pub const DEFAULT_NO_LABEL: &str = "No";

/// File the host keeps next to the plugin executable
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// What a bare `roll` (no arguments) does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum RollType {
    /// Pick between the yes and no labels
    YesNo,
    /// Roll in `[default_from, default_to]`
    #[default]
    Number,
    /// Pick one of the configured custom labels
    CustomLabel,
}

impl FromStr for RollType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "yesno" => Ok(Self::YesNo),
            "number" | "range" => Ok(Self::Number),
            "customlabel" | "customlabels" | "labels" => Ok(Self::CustomLabel),
            _ => Err(format!("Unknown roll type: {:?}", s)),
        }
    }
}

impl From<String> for RollType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}, falling back to Number", e);
            Self::Number
        })
    }
}

impl fmt::Display for RollType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::YesNo => "Yes/No",
            Self::Number => "Number",
            Self::CustomLabel => "Custom Label",
        };
        f.write_str(name)
    }
}

/// Configuration for a single resolution call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Behavior of a query with no tokens
    #[serde(rename = "Default Roll Type", alias = "default_roll_type")]
    pub roll_type: RollType,

    /// Lower bound of the default numeric roll (reordered with `default_to`
    /// when larger)
    #[serde(deserialize_with = "lenient_int")]
    pub default_from: i64,

    /// Upper bound of the default numeric roll
    #[serde(deserialize_with = "lenient_int")]
    pub default_to: i64,

    pub yes_label: String,
    pub no_label: String,

    /// Labels for the `CustomLabel` default, in the order configured
    ///
    /// Accepts either a whitespace-separated string or a list. Repeated
    /// separators never produce empty labels.
    #[serde(deserialize_with = "label_list")]
    pub custom_labels: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roll_type: RollType::Number,
            default_from: DEFAULT_FROM,
            default_to: DEFAULT_TO,
            yes_label: DEFAULT_YES_LABEL.to_string(),
            no_label: DEFAULT_NO_LABEL.to_string(),
            custom_labels: Vec::new(),
        }
    }
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build settings from the object the host embeds in a request
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load settings from a file
    ///
    /// A missing file is not an error and yields defaults. Files ending in
    /// `.toml` are read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let settings = Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings from {:?}: {}", path, e);
            Self::default()
        });
        settings.warn_if_invalid();
        settings
    }

    /// Validate settings for internal consistency
    ///
    /// Problems are reported, never fatal; rolls still run with these values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.yes_label.trim().is_empty() || self.no_label.trim().is_empty() {
            return Err("yes_label and no_label must not be empty".into());
        }

        let span = i128::from(self.default_from) - i128::from(self.default_to);
        if span.abs() > i128::from(MAX_RANGE_SPAN) {
            return Err(format!(
                "default range {}..{} is wider than {}",
                self.default_from, self.default_to, MAX_RANGE_SPAN
            ));
        }

        if self.roll_type == RollType::CustomLabel && self.custom_labels.is_empty() {
            return Err(format!(
                "Default Roll Type is {} but custom_labels is empty",
                self.roll_type
            ));
        }

        Ok(())
    }

    pub(crate) fn warn_if_invalid(&self) {
        if let Err(msg) = self.validate() {
            tracing::warn!("Settings problem: {}", msg);
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Text(String),
}

fn lenient_int<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrText::deserialize(deserializer)? {
        IntOrText::Int(n) => Ok(n),
        IntOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer, found {:?}", s))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelsOrText {
    List(Vec<String>),
    Text(String),
}

fn label_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = match LabelsOrText::deserialize(deserializer)? {
        LabelsOrText::List(list) => list
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
        LabelsOrText::Text(text) => text.split_whitespace().map(str::to_string).collect(),
    };
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.roll_type, RollType::Number);
        assert_eq!(settings.default_from, 1);
        assert_eq!(settings.default_to, 6);
        assert_eq!(settings.yes_label, "Yes");
        assert!(settings.custom_labels.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_host_json_keys() {
        let settings = Settings::from_json_str(
            r#"{
                "Default Roll Type": "Yes/No",
                "default_from": "10",
                "default_to": 20,
                "yes_label": "Do it",
                "no_label": "Skip it"
            }"#,
        )
        .unwrap();

        assert_eq!(settings.roll_type, RollType::YesNo);
        assert_eq!(settings.default_from, 10);
        assert_eq!(settings.default_to, 20);
        assert_eq!(settings.yes_label, "Do it");
        assert_eq!(settings.no_label, "Skip it");
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let settings = Settings::from_json_str(r#"{"yes_label": "Sure"}"#).unwrap();
        assert_eq!(settings.yes_label, "Sure");
        assert_eq!(settings.no_label, "No");
        assert_eq!(settings.default_to, 6);
    }

    #[test]
    fn test_roll_type_names() {
        assert_eq!("Yes/No".parse::<RollType>(), Ok(RollType::YesNo));
        assert_eq!("yesno".parse::<RollType>(), Ok(RollType::YesNo));
        assert_eq!("Custom Labels".parse::<RollType>(), Ok(RollType::CustomLabel));
        assert_eq!("custom_label".parse::<RollType>(), Ok(RollType::CustomLabel));
        assert_eq!("NUMBER".parse::<RollType>(), Ok(RollType::Number));
        assert!("coin".parse::<RollType>().is_err());
    }

    #[test]
    fn test_unknown_roll_type_falls_back_to_number() {
        let settings = Settings::from_json_str(r#"{"Default Roll Type": "Coin"}"#).unwrap();
        assert_eq!(settings.roll_type, RollType::Number);
    }

    #[test]
    fn test_custom_labels_from_malformed_string() {
        let settings =
            Settings::from_json_str(r#"{"custom_labels": "  Joe   Kane\tJohn  \n Katie "}"#)
                .unwrap();
        assert_eq!(settings.custom_labels, vec!["Joe", "Kane", "John", "Katie"]);
    }

    #[test]
    fn test_custom_labels_from_list() {
        let settings =
            Settings::from_json_str(r#"{"custom_labels": ["Pizza Hut", "", "  Tacos "]}"#)
                .unwrap();
        assert_eq!(settings.custom_labels, vec!["Pizza Hut", "Tacos"]);
    }

    #[test]
    fn test_non_numeric_bound_is_error() {
        let result = Settings::from_json_str(r#"{"default_from": "one"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_settings() {
        let settings = Settings::from_toml_str(
            r#"
            "Default Roll Type" = "Custom Label"
            custom_labels = ["heads", "tails"]
            default_to = 100
            "#,
        )
        .unwrap();

        assert_eq!(settings.roll_type, RollType::CustomLabel);
        assert_eq!(settings.custom_labels, vec!["heads", "tails"]);
        assert_eq!(settings.default_to, 100);
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut settings = Settings::default();
        settings.roll_type = RollType::CustomLabel;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.default_from = -MAX_RANGE_SPAN;
        settings.default_to = MAX_RANGE_SPAN;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.no_label = "  ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let settings = Settings::load(Path::new("does/not/exist/settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
