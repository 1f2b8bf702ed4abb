//! Display configuration: load, deep-merge, save.
//!
//! Configuration is a JSON document merged recursively onto built-in
//! defaults, so a user file only has to name the keys it changes. A
//! missing or unparseable file falls back to the defaults with a warning,
//! never a hard failure.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Section toggles, refresh cadence and color roles.
///
/// Owned by the session; mutated only by the input handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_system_info: bool,
    pub show_ascii: bool,
    pub show_resources: bool,
    pub show_clock: bool,
    /// Seconds between refresh ticks.
    pub refresh_rate: f64,
    pub colors: ColorMap,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_system_info: true,
            show_ascii: true,
            show_resources: true,
            show_clock: true,
            refresh_rate: 1.0,
            colors: ColorMap::default(),
        }
    }
}

/// Semantic color roles mapped to color names.
///
/// Values are parsed by the renderer at session start; unknown names fall
/// back to the built-in default for that role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMap {
    pub title: String,
    pub label: String,
    pub value: String,
    pub ascii: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub warning: String,
    pub critical: String,
    pub good: String,
    pub info: String,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            title: "cyan".to_string(),
            label: "green".to_string(),
            value: "white".to_string(),
            ascii: "yellow".to_string(),
            bar_filled: "green".to_string(),
            bar_empty: "white".to_string(),
            warning: "yellow".to_string(),
            critical: "red".to_string(),
            good: "green".to_string(),
            info: "blue".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Loads configuration from `path`, deep-merged onto defaults.
    ///
    /// Any read or parse failure yields the defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config not readable, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(user) => Self::merge_onto_defaults(&user),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config not valid JSON, using defaults");
                Self::default()
            }
        }
    }

    /// Merges a user-supplied JSON document onto the built-in defaults.
    ///
    /// Objects merge key-by-key (nested `colors` entries survive a partial
    /// override); scalars replace. Unknown keys are ignored.
    pub fn merge_onto_defaults(user: &Value) -> Self {
        let mut base = serde_json::to_value(Self::default()).unwrap_or(Value::Null);
        merge_values(&mut base, user);
        match serde_json::from_value(base) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "config merge produced invalid document, using defaults");
                Self::default()
            }
        }
    }

    /// Writes the full effective configuration, human-formatted.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, text)
    }
}

/// Recursive merge: objects merge per key, everything else replaces.
fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = DisplayConfig::load(Path::new("/nonexistent/livefetch.json"));
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = DisplayConfig::merge_onto_defaults(&json!({}));
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = DisplayConfig::merge_onto_defaults(&json!({
            "show_clock": false,
            "colors": {"title": "magenta"}
        }));
        let doc = serde_json::to_value(&once).unwrap();
        let twice = DisplayConfig::merge_onto_defaults(&doc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nested_colors_merge_individually() {
        let config = DisplayConfig::merge_onto_defaults(&json!({
            "colors": {"bar_filled": "blue"}
        }));
        assert_eq!(config.colors.bar_filled, "blue");
        // Unspecified roles keep their defaults.
        assert_eq!(config.colors.title, "cyan");
        assert_eq!(config.colors.critical, "red");
    }

    #[test]
    fn test_scalar_override_and_unknown_keys() {
        let config = DisplayConfig::merge_onto_defaults(&json!({
            "refresh_rate": 2.5,
            "show_ascii": false,
            "no_such_key": {"nested": true}
        }));
        assert_eq!(config.refresh_rate, 2.5);
        assert!(!config.show_ascii);
        assert!(config.show_system_info);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DisplayConfig::default();
        config.show_system_info = false;
        config.colors.ascii = "magenta".to_string();
        config.save(&path).unwrap();

        // Saved file is indented JSON.
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));

        assert_eq!(DisplayConfig::load(&path), config);
    }

    #[test]
    fn test_invalid_json_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(DisplayConfig::load(&path), DisplayConfig::default());
    }
}
