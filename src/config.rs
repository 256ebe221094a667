//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/huffgen/huffgen.toml`
//! 3. Local config: `<project_dir>/.huffgen.toml`
//! 4. Environment variables: `HUFFGEN_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::SingleSymbolPolicy;

/// Unified configuration for huffgen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Longest code allowed in bits (default: unlimited)
    pub max_code_length: Option<usize>,
    /// Handling of one-symbol alphabets (default: one-digit)
    pub single_symbol: SingleSymbolPolicy,
    /// Sort input by frequency before building (default: false)
    pub sort_input: bool,
    /// Text between symbol and code in listings (default: ": ")
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_code_length: None,
            single_symbol: SingleSymbolPolicy::OneDigit,
            sort_input: false,
            separator: ": ".to_string(),
        }
    }
}

/// Raw settings for intermediate parsing.
///
/// Every field is optional so that a layer only overrides what it names.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_code_length: Option<usize>,
    pub single_symbol: Option<SingleSymbolPolicy>,
    pub sort_input: Option<bool>,
    pub separator: Option<String>,
}

/// Get the XDG config directory for huffgen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "huffgen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("huffgen.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".huffgen.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_code_length: overlay.max_code_length.or(self.max_code_length),
            single_symbol: overlay.single_symbol.unwrap_or(self.single_symbol),
            sort_input: overlay.sort_input.unwrap_or(self.sort_input),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }

    /// Load settings with full layering.
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Load a single file on top of the defaults, ignoring other layers.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let raw = load_raw_settings(path)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Apply HUFFGEN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HUFFGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("max_code_length") {
            settings.max_code_length = match val.trim() {
                "" | "none" => None,
                n => Some(n.parse().map_err(|e| ApplicationError::Config {
                    message: format!("HUFFGEN_MAX_CODE_LENGTH={val}: {e}"),
                })?),
            };
        }
        if let Ok(val) = config.get_string("single_symbol") {
            settings.single_symbol = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("HUFFGEN_SINGLE_SYMBOL: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("sort_input") {
            settings.sort_input = parse_bool(&val).ok_or_else(|| ApplicationError::Config {
                message: format!("HUFFGEN_SORT_INPUT={val}: expected true or false"),
            })?;
        }
        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# huffgen configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/huffgen/huffgen.toml
#   Local:  <project_dir>/.huffgen.toml
#   Env:    HUFFGEN_* environment variables

# Longest code allowed in bits; deeper trees are rejected
# max_code_length = 32

# One-symbol alphabets: "one-digit" (code 0) or "reject"
# single_symbol = "one-digit"

# Sort input by frequency instead of rejecting unsorted alphabets
# sort_input = false

# Text printed between a symbol and its code
# separator = ": "
"#
        .to_string()
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overrides_when_defaulting_then_unlimited_one_digit() {
        let settings = Settings::default();
        assert_eq!(settings.max_code_length, None);
        assert_eq!(settings.single_symbol, SingleSymbolPolicy::OneDigit);
        assert!(!settings.sort_input);
        assert_eq!(settings.separator, ": ");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings {
            max_code_length: Some(20),
            ..Settings::default()
        };
        let overlay = RawSettings {
            sort_input: Some(true),
            separator: Some(" => ".into()),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.max_code_length, Some(20));
        assert!(merged.sort_input);
        assert_eq!(merged.separator, " => ");
        assert_eq!(merged.single_symbol, SingleSymbolPolicy::OneDigit);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_rendered_to_toml_then_parses_back() {
        let settings = Settings {
            max_code_length: Some(12),
            single_symbol: SingleSymbolPolicy::Reject,
            sort_input: true,
            separator: "\t".into(),
        };
        let rendered = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&rendered).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
