//! Plugin options and build mode

use serde::Deserialize;

/// Options supplied once when the plugin is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonOptions {
    /// Generate a named export for every property of the JSON object
    pub named_exports: bool,
    /// Generate `JSON.parse("...")` output instead of an object literal.
    /// Takes precedence over `named_exports`.
    pub stringify: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            named_exports: true,
            stringify: false,
        }
    }
}

/// Build mode captured from the host's resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    /// Only `"production"` is a production build; custom modes count as development.
    pub fn from_mode(mode: &str) -> Self {
        if mode == "production" {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }
}

/// The part of the host's resolved configuration the plugin reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub mode: String,
}

impl ResolvedConfig {
    pub fn new(mode: impl Into<String>) -> Self {
        Self { mode: mode.into() }
    }

    pub fn build_mode(&self) -> BuildMode {
        BuildMode::from_mode(&self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_options_with_defaults() {
        let options: JsonOptions = serde_json::from_str(r#"{"stringify":true}"#).unwrap();
        assert_eq!(
            options,
            JsonOptions {
                named_exports: true,
                stringify: true
            }
        );

        let options: JsonOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, JsonOptions::default());
    }

    #[test]
    fn should_treat_custom_modes_as_development() {
        assert_eq!(BuildMode::from_mode("production"), BuildMode::Production);
        assert_eq!(BuildMode::from_mode("development"), BuildMode::Development);
        assert_eq!(BuildMode::from_mode("staging"), BuildMode::Development);
        assert_eq!(ResolvedConfig::new("production").build_mode(), BuildMode::Production);
    }
}
