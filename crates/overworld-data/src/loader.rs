//! Reads world files from disk.
//!
//! Provides format detection (RON/JSON/TOML) and the deserialization
//! helpers behind [`load_world`] and [`parse_world`].

use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::schema::WorldFile;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a world.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A world file failed to deserialize.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// In-memory world text failed to deserialize.
    #[error("{format} parse error: {detail}")]
    ParseText { format: Format, detail: String },

    /// The world has no level that survived validation.
    #[error("world '{title}' has no levels")]
    EmptyWorld { title: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Ron => "RON",
            Format::Toml => "TOML",
            Format::Json => "JSON",
        })
    }
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn deserialize_str<T: DeserializeOwned>(format: Format, text: &str) -> Result<T, String> {
    match format {
        Format::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    }
}

/// Deserialize world text in the given format.
pub fn parse_world(format: Format, text: &str) -> Result<WorldFile, DataLoadError> {
    deserialize_str(format, text).map_err(|detail| DataLoadError::ParseText { format, detail })
}

/// Read and deserialize a world file (format detected from extension).
pub fn load_world(path: &Path) -> Result<WorldFile, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let world: WorldFile =
        deserialize_str(format, &content).map_err(|detail| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail,
        })?;

    tracing::info!(
        file = %path.display(),
        title = %world.title,
        levels = world.nodes.len(),
        "world loaded"
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overworld_core::MovementPolicy;
    use overworld_core::node::NodeState;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "overworld_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("w.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("w.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("w.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        let err = detect_format(Path::new("w.yaml")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat { .. }));
        assert!(detect_format(Path::new("world")).is_err());
    }

    // -----------------------------------------------------------------------
    // parse_world
    // -----------------------------------------------------------------------

    #[test]
    fn parse_json_world() {
        let text = r##"{
            "title": "Tiny",
            "settings": { "movement_policy": "free_roam" },
            "nodes": [
                { "id": "a", "name": "A", "position": [0.0, 0.5, 0.0],
                  "color": "#ff0000", "unlocks": ["b"], "initial_state": "unlocked" },
                { "id": "b", "name": "B", "position": [2.0, 0.5, 0.0],
                  "color": [0.0, 0.0, 1.0] }
            ]
        }"##;
        let world = parse_world(Format::Json, text).unwrap();
        assert_eq!(world.title, "Tiny");
        assert_eq!(world.settings.movement_policy, MovementPolicy::FreeRoam);
        assert_eq!(world.nodes.len(), 2);

        let (controller, issues) = world.into_controller().unwrap();
        assert!(issues.is_empty());
        assert_eq!(controller.state_of(&"b".into()), Some(NodeState::Unlocked));
    }

    #[test]
    fn parse_toml_world() {
        let text = r#"
            title = "Tiny"

            [settings.tuning]
            pop_factor = 2.0

            [[nodes]]
            id = "a"
            name = "A"
            position = [0.0, 0.5, 0.0]
            color = "lime"
            unlocks = ["b"]
            initial_state = "unlocked"

            [[nodes]]
            id = "b"
            name = "B"
            position = [2.0, 0.5, 0.0]
            color = "gold"
        "#;
        let world = parse_world(Format::Toml, text).unwrap();
        assert_eq!(world.settings.tuning.pop_factor, 2.0);
        assert_eq!(world.settings.tuning.pop_duration, 0.2);
        assert_eq!(world.settings.movement_policy, MovementPolicy::StrictAdjacency);
        assert!(world.nodes[1].is_bonus());
    }

    #[test]
    fn parse_ron_world() {
        let text = r#"(
            title: "Tiny",
            nodes: [
                (id: "a", name: "A", position: (0.0, 0.5, 0.0), color: "red", initial_state: unlocked),
            ],
        )"#;
        let world = parse_world(Format::Ron, text).unwrap();
        assert_eq!(world.nodes[0].id.as_str(), "a");
        assert!(world.description.is_empty());
    }

    #[test]
    fn parse_error_names_format() {
        let err = parse_world(Format::Json, "{ not json").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseText { format: Format::Json, .. }));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    // -----------------------------------------------------------------------
    // load_world
    // -----------------------------------------------------------------------

    #[test]
    fn load_world_from_file() {
        let dir = make_test_dir("load");
        let path = dir.join("w.json");
        fs::write(
            &path,
            r#"{ "nodes": [ { "id": "a", "name": "A", "position": [0, 0, 0], "color": "red" } ] }"#,
        )
        .unwrap();

        let world = load_world(&path).unwrap();
        assert_eq!(world.nodes.len(), 1);
        cleanup(&dir);
    }

    #[test]
    fn load_world_parse_error_names_file() {
        let dir = make_test_dir("bad");
        let path = dir.join("w.ron");
        fs::write(&path, "(nodes: [").unwrap();

        let err = load_world(&path).unwrap_err();
        match err {
            DataLoadError::Parse { file, .. } => assert_eq!(file, path),
            other => panic!("expected parse error, got {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn load_world_missing_file_is_io() {
        let err = load_world(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io(_)));
    }
}
