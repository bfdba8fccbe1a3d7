use crate::domain::errors::{CopierError, CopierResult};
use crate::domain::models::{CopierConfig, DEFAULT_CONFIG_FILE};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const KNOWN_KEYS: &[&str] = &["include", "exclude"];

/// Loads the include/exclude configuration.
///
/// Without an explicit path the default `.codecopierrc.json` under `root` is used when it
/// exists, and the built-in defaults otherwise. An explicit path must exist.
pub fn load_config(config_path: Option<&Path>, root: &Path) -> CopierResult<CopierConfig> {
    let (path, explicit) = match config_path {
        Some(path) => (resolve(root, path), true),
        None => (root.join(DEFAULT_CONFIG_FILE), false),
    };

    if !path.is_file() {
        if explicit {
            return Err(CopierError::config(&path, "configuration file not found"));
        }
        info!("No configuration file at {}, using defaults", path.display());
        return Ok(CopierConfig::default());
    }

    debug!("Reading configuration from {}", path.display());
    let raw = fs::read_to_string(&path)
        .map_err(|e| CopierError::config(&path, format!("cannot read file: {}", e)))?;

    parse_config(&raw, &path)
}

/// Overrides the defaults key by key with the values found in `raw`.
pub fn parse_config(raw: &str, path: &Path) -> CopierResult<CopierConfig> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CopierError::config(path, format!("invalid JSON: {}", e)))?;

    let Value::Object(object) = value else {
        return Err(CopierError::config(path, "top level must be a JSON object"));
    };

    for key in object.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!("Ignoring unknown configuration key \"{}\"", key);
        }
    }

    let mut config = CopierConfig::default();
    if let Some(include) = string_array(&object, "include", path)? {
        config.include = include;
    }
    if let Some(exclude) = string_array(&object, "exclude", path)? {
        config.exclude = exclude;
    }

    debug!(
        "Effective configuration: include={:?}, exclude={:?}",
        config.include, config.exclude
    );
    Ok(config)
}

fn string_array(
    object: &Map<String, Value>,
    key: &str,
    path: &Path,
) -> CopierResult<Option<Vec<String>>> {
    let Some(value) = object.get(key) else {
        return Ok(None);
    };

    let not_array = || CopierError::config(path, format!("\"{}\" must be an array of strings", key));

    let items = value.as_array().ok_or_else(not_array)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(not_array))
        .collect::<CopierResult<Vec<_>>>()
        .map(Some)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
