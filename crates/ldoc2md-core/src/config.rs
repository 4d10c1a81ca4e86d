//! Converter configuration (`ldoc2md.toml`)
//!
//! ```toml
//! api-dir = "api"
//! pretty-file = "docs.pretty.json"
//! anchor-style = "allow-list"   # or "literal"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::resolve::AnchorStyle;

/// Errors that can occur when loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field} '{value}': must be a single path component")]
    InvalidFileName { field: &'static str, value: String },
}

/// Output layout and resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory under the output path receiving one page per module
    pub api_dir: String,
    /// File name of the indented dump copy written with `--pretty`
    pub pretty_file: String,
    /// How item anchors become URL fragments
    pub anchor_style: AnchorStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_dir: "api".to_string(),
            pretty_file: "docs.pretty.json".to_string(),
            anchor_style: AnchorStyle::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_file_name("api-dir", &self.api_dir)?;
        check_file_name("pretty-file", &self.pretty_file)
    }
}

fn check_file_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if is_single_component(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFileName {
            field,
            value: value.to_string(),
        })
    }
}

/// Whether `value` names one entry directly inside a directory
pub(crate) fn is_single_component(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_dir, "api");
        assert_eq!(config.pretty_file, "docs.pretty.json");
        assert_eq!(config.anchor_style, AnchorStyle::AllowList);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
api-dir = "reference"
pretty-file = "dump.json"
anchor-style = "literal"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.api_dir, "reference");
        assert_eq!(config.pretty_file, "dump.json");
        assert_eq!(config.anchor_style, AnchorStyle::Literal);
    }

    #[test]
    fn reject_unknown_key() {
        let err = Config::parse("output = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reject_unknown_anchor_style() {
        let err = Config::parse("anchor-style = \"fuzzy\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reject_nested_api_dir() {
        let err = Config::parse("api-dir = \"../outside\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFileName { field: "api-dir", .. }
        ));

        let err = Config::parse("pretty-file = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFileName { .. }));
    }

    #[test]
    fn single_component_names() {
        assert!(is_single_component("Signal.md"));
        assert!(!is_single_component("/Signal.md"));
        assert!(!is_single_component("nested/Signal.md"));
        assert!(!is_single_component(".."));
        assert!(!is_single_component(""));
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/ldoc2md.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
