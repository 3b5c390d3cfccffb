//! Preferred-location configuration.
//!
//! The list is read once at startup from `--preferred <FILE>` or
//! `~/.places/preferred.json`. When neither exists the built-in demo
//! entries are used.

use super::types::{DisplayText, LatLng, PreferredLocation};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Errors raised while loading the preferred list.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The built-in preferred locations.
pub fn default_preferred() -> Vec<PreferredLocation> {
    vec![
        PreferredLocation {
            text: "Apple Campus1234, Cupertino, CA, United States".into(),
            place_id: "ChIJt00z67a1j4ARL8h-xOZ1XVo".into(),
            display: DisplayText::new("Apple", "Cupertino"),
            coordinates: Some(LatLng::new(37.3318, -122.0312)),
        },
        PreferredLocation {
            text: "Facebook HQ, Hacker Way, Menlo Park, CA, United States".into(),
            place_id: "ChIJZa6ezJa8j4AR1p1nTSaRtuQ".into(),
            display: DisplayText::new("Facebook", "Menlo Park"),
            coordinates: Some(LatLng::new(37.4848, -122.1484)),
        },
    ]
}

pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".places")
        .join("preferred.json")
}

/// Read a JSON array of preferred locations from `path`.
pub fn load_from(path: &Path) -> Result<Vec<PreferredLocation>, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the preferred list for this process.
///
/// An explicit path must exist. The default path is optional and falls back
/// to [`default_preferred`].
pub fn load(explicit: Option<&Path>) -> Result<Arc<[PreferredLocation]>, ConfigError> {
    let list = match explicit {
        Some(path) => load_from(path)?,
        None => load_or_default(&default_path())?,
    };
    tracing::debug!(count = list.len(), "preferred locations loaded");
    Ok(list.into())
}

fn load_or_default(path: &Path) -> Result<Vec<PreferredLocation>, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        Ok(default_preferred())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_have_coordinates() {
        let list = default_preferred();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|l| l.coordinates.is_some()));
        assert_eq!(list[0].display.primary, "Apple");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferred.json");
        let json = r#"[
            {
                "text": "Ferry Building, San Francisco, CA",
                "place_id": "ferry",
                "display": { "primary": "Ferry Building", "secondary": "San Francisco" },
                "coordinates": { "latitude": 37.7955, "longitude": -122.3937 }
            }
        ]"#;
        fs::write(&path, json).unwrap();

        let list = load(Some(&path)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].place_id, "ferry");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(load(Some(&path)), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_missing_default_path_uses_builtin() {
        let dir = TempDir::new().unwrap();
        let list = load_or_default(&dir.path().join("preferred.json")).unwrap();
        assert_eq!(list, default_preferred());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferred.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("preferred.json"));
    }
}
