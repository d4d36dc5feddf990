//! Locating and reading an operator-supplied defaults override file.

use std::{env, fs, path::PathBuf};

use dirs_next::config_dir;
use steeple_util::expand_tilde;

use crate::{DefaultPayloads, DefaultsError};

/// Environment variable pointing at a defaults override file.
pub const DEFAULTS_PATH_ENV: &str = "STEEPLE_DEFAULTS_PATH";

/// Path the registry checks for an override bundle.
///
/// `STEEPLE_DEFAULTS_PATH` wins when set and non-empty; otherwise the
/// platform config directory (`<config>/steeple/defaults.json`).
pub fn defaults_path() -> PathBuf {
    if let Ok(path) = env::var(DEFAULTS_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("steeple")
        .join("defaults.json")
}

/// Read and parse an override bundle from disk.
pub fn load_override(path: &PathBuf) -> Result<DefaultPayloads, DefaultsError> {
    let content = fs::read_to_string(path).map_err(|error| DefaultsError::Read {
        path: path.display().to_string(),
        reason: error.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|error| DefaultsError::Invalid(error.to_string()))
}
