//! Replay scripts
//!
//! A script is an ordered list of host callbacks. JSON and TOML are both
//! accepted, picked by file extension:
//!
//! ```json
//! { "steps": [
//!     { "kind": "tick", "buffs": [
//!         { "display_name": "Energized", "source": "Coffee",
//!           "remaining_ms": 20000, "effects": { "speed": 2 } } ] },
//!     { "kind": "no_data" },
//!     { "kind": "day_started" }
//! ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use buffwatch_core::Buff;
use serde::Deserialize;

/// One host callback
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A sampling tick with the buffs active at that instant
    Tick {
        #[serde(default)]
        buffs: Vec<Buff>,
    },
    /// A sampling tick where the world had no buff data yet
    NoData,
    DayStarted,
    SaveLoaded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid TOML in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|e| ScriptError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml(&contents, path)
        } else {
            Self::from_json(&contents, path)
        }
    }

    pub fn from_json(contents: &str, path: &Path) -> Result<Self, ScriptError> {
        serde_json::from_str(contents).map_err(|e| ScriptError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ScriptError> {
        toml::from_str(contents).map_err(|e| ScriptError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_script() {
        let json = r#"{ "steps": [
            { "kind": "tick", "buffs": [
                { "id": "7", "display_name": "Energized", "source": "Coffee",
                  "remaining_ms": 20000, "effects": { "speed": 2 } } ] },
            { "kind": "no_data" },
            { "kind": "tick" },
            { "kind": "day_started" },
            { "kind": "save_loaded" }
        ] }"#;

        let script = Script::from_json(json, Path::new("s.json")).unwrap();
        assert_eq!(script.steps.len(), 5);
        match &script.steps[0] {
            Step::Tick { buffs } => {
                assert_eq!(buffs[0].display_name, "Energized");
                assert_eq!(buffs[0].source.as_deref(), Some("Coffee"));
                assert_eq!(buffs[0].effects.speed, 2);
                assert_eq!(buffs[0].effects.luck, 0);
            }
            other => panic!("Expected Tick, got {other:?}"),
        }
        assert_eq!(script.steps[1], Step::NoData);
        assert_eq!(script.steps[2], Step::Tick { buffs: vec![] });
        assert_eq!(script.steps[3], Step::DayStarted);
        assert_eq!(script.steps[4], Step::SaveLoaded);
    }

    #[test]
    fn test_parse_toml_script() {
        let toml = r#"
[[steps]]
kind = "tick"

[[steps.buffs]]
display_name = "Luck"
source = "Spicy Eel"
remaining_ms = 60000
effects = { luck = 1 }

[[steps]]
kind = "day_started"
"#;

        let script = Script::from_toml(toml, Path::new("s.toml")).unwrap();
        assert_eq!(script.steps.len(), 2);
        assert!(matches!(&script.steps[0], Step::Tick { buffs } if buffs[0].effects.luck == 1));
        assert_eq!(script.steps[1], Step::DayStarted);
    }

    #[test]
    fn test_malformed_effect_values_read_as_zero() {
        let json = r#"{ "steps": [
            { "kind": "tick", "buffs": [
                { "display_name": "Energized", "source": "Coffee", "remaining_ms": 20000,
                  "effects": { "speed": 2, "luck": null, "mining": 2.5, "attack": "lots" } } ] }
        ] }"#;

        let script = Script::from_json(json, Path::new("s.json")).unwrap();
        match &script.steps[0] {
            Step::Tick { buffs } => {
                let effects = &buffs[0].effects;
                assert_eq!(effects.speed, 2);
                assert_eq!(effects.luck, 0, "null should read as no change");
                assert_eq!(effects.mining, 0, "fractional value should read as no change");
                assert_eq!(effects.attack, 0);
            }
            other => panic!("Expected Tick, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_kind_is_error() {
        let err = Script::from_json(r#"{ "steps": [ { "kind": "nap" } ] }"#, Path::new("s.json"))
            .unwrap_err();
        assert!(matches!(err, ScriptError::Json { .. }));
    }
}
