use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::picker::state::DEFAULT_DISPLAY;
use crate::picker::view::DEFAULT_DIAL_RADIUS;

const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    pub value: String,
    pub dial_radius: f32,
    pub persist: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_DISPLAY.to_string(),
            dial_radius: DEFAULT_DIAL_RADIUS,
            persist: true,
        }
    }
}

pub fn load_picker_config(path: &Path) -> Result<PickerConfig> {
    if !path.exists() {
        log::info!("{} not found, using defaults", path.display());
        return Ok(PickerConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read config file {}", path.display()))?;
    parse_picker_config_text(&content)
}

pub fn parse_picker_config_text(content: &str) -> Result<PickerConfig> {
    let raw = serde_json::from_str::<PickerConfigFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected version {CONFIG_VERSION}",
            raw.version
        );
    }
    validate_dial_radius(raw.dial_radius)?;

    Ok(PickerConfig {
        value: raw.value,
        dial_radius: raw.dial_radius,
        persist: raw.persist,
    })
}

pub fn validate_dial_radius(radius: f32) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        bail!("dial_radius must be a positive number, got {radius}");
    }
    Ok(())
}

pub fn save_picker_config(path: &Path, config: &PickerConfig) -> Result<()> {
    let payload = PickerConfigFile {
        version: CONFIG_VERSION,
        value: config.value.clone(),
        dial_radius: config.dial_radius,
        persist: config.persist,
    };
    let text = serde_json::to_string_pretty(&payload)?;
    fs::write(path, format!("{text}\n"))
        .with_context(|| format!("unable to write config file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct PickerConfigFile {
    version: u32,
    #[serde(default = "default_value")]
    value: String,
    #[serde(default = "default_dial_radius")]
    dial_radius: f32,
    #[serde(default = "default_persist")]
    persist: bool,
}

fn default_value() -> String {
    DEFAULT_DISPLAY.to_string()
}

fn default_dial_radius() -> f32 {
    DEFAULT_DIAL_RADIUS
}

fn default_persist() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn parses_valid_config() {
        let json = r#"
{
  "version": 1,
  "value": "09:45 PM",
  "dial_radius": 90.0,
  "persist": false
}
"#;
        let config = parse_picker_config_text(json).expect("valid config");
        assert_eq!(config.value, "09:45 PM");
        assert_eq!(config.dial_radius, 90.0);
        assert!(!config.persist);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = parse_picker_config_text(r#"{ "version": 1 }"#).expect("valid config");
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn rejects_unknown_version() {
        let err = parse_picker_config_text(r#"{ "version": 2 }"#)
            .expect_err("version 2 should fail");
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = parse_picker_config_text(r#"{ "version": 1, "dial_radius": 0.0 }"#)
            .expect_err("zero radius should fail");
        assert!(err.to_string().contains("dial_radius"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_picker_config_text("{ not-json").expect_err("malformed");
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("timepicker.json");
        let config = PickerConfig {
            value: "12:05 AM".to_string(),
            dial_radius: 64.0,
            persist: true,
        };
        save_picker_config(&path, &config).expect("save");
        let loaded = load_picker_config(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_picker_config(&dir.path().join("absent.json")).expect("defaults");
        assert_eq!(loaded, PickerConfig::default());
    }
}
