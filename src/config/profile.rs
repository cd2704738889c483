//! Saved attach configurations.
//!
//! A profile is either a TOML file with a single configuration table, a JSON file
//! with a single configuration object, or a launch file with a `configurations` list.

use crate::config::AttachConfiguration;
use crate::error::Error;
use log::debug;
use serde_json::Value;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

const DEFAULT_PATH: &str = ".config/dbg-attach/attach.toml";

/// Return path to the default profile (in a user home directory).
pub fn default_path() -> Result<PathBuf, Error> {
    let home = home::home_dir().ok_or(Error::HomeNotFound)?;
    Ok(home.join(DEFAULT_PATH))
}

/// Load attach configuration from a profile file.
///
/// # Arguments
///
/// * `path`: path to a `.toml` or `.json` file
/// * `name`: name of a configuration in a launch file, if `None` the first attach
///   configuration is used
pub fn load(path: &Path, name: Option<&str>) -> Result<AttachConfiguration, Error> {
    let data = read_to_string(path)?;
    debug!(target: "profile", "load profile from {}", path.display());

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => from_toml_str(&data),
        Some("json") => from_json_str(&data, name, path),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}

pub fn from_toml_str(data: &str) -> Result<AttachConfiguration, Error> {
    Ok(toml::from_str(data)?)
}

/// Parse a JSON profile, `source` is used for error reporting only.
pub fn from_json_str(
    data: &str,
    name: Option<&str>,
    source: &Path,
) -> Result<AttachConfiguration, Error> {
    let mut value: Value = serde_json::from_str(data)?;

    let Some(Value::Array(configurations)) = value.get_mut("configurations").map(Value::take)
    else {
        return Ok(serde_json::from_value(value)?);
    };

    let field_is = |cfg: &Value, field: &str, expected: &str| {
        cfg.get(field).and_then(Value::as_str) == Some(expected)
    };

    let chosen = match name {
        Some(name) => configurations
            .into_iter()
            .find(|cfg| field_is(cfg, "name", name))
            .ok_or_else(|| Error::ConfigurationNotFound(name.to_string()))?,
        None => configurations
            .into_iter()
            .find(|cfg| field_is(cfg, "request", "attach"))
            .ok_or_else(|| Error::NoAttachConfiguration(source.to_path_buf()))?,
    };

    Ok(serde_json::from_value(chosen)?)
}
