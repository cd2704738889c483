//! Lenient (de)serialization of user-authored attach configurations.
//!
//! Configurations come from hand-written files, so a field of an unexpected shape
//! is dropped (and later defaulted) instead of failing the whole configuration.

use crate::config::{DebugOption, PathMapping};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

/// Value of a boolean-like trigger field (`django`, `redirectOutput`, ...).
///
/// Keeps the raw value so that both loose truthiness and strict `true`/`false`
/// checks can be answered.
#[derive(Clone, PartialEq, Debug)]
pub struct Toggle(Value);

impl Toggle {
    /// Return `false` for `false`, `0`, `""`, `null` and `true` for other values.
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// True only for a literal `true`.
    pub fn is_true(&self) -> bool {
        self.0 == Value::Bool(true)
    }

    /// True only for a literal `false`.
    pub fn is_false(&self) -> bool {
        self.0 == Value::Bool(false)
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Toggle(Value::Bool(value))
    }
}

impl From<Value> for Toggle {
    fn from(value: Value) -> Self {
        Toggle(value)
    }
}

impl Serialize for Toggle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Toggle(Value::deserialize(deserializer)?))
    }
}

/// `null` toggles are the same as missing ones.
pub(super) fn toggle<'de, D>(deserializer: D) -> Result<Option<Toggle>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(Some(Toggle(value))),
    }
}

/// Like [`toggle`], but an explicit `null` is kept as a present (falsy) value.
pub(super) fn present_toggle<'de, D>(deserializer: D) -> Result<Option<Toggle>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Toggle(Value::deserialize(deserializer)?)))
}

pub(super) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => {
            warn!(target: "attach", "expect a string, got `{other}`, value ignored");
            Ok(None)
        }
    }
}

pub(super) fn path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.map(PathBuf::from))
}

pub(super) fn debug_options<'de, D>(deserializer: D) -> Result<Option<Vec<DebugOption>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            warn!(target: "attach", "`debugOptions` must be a list, got `{other}`, replaced");
            return Ok(None);
        }
    };

    let options = items
        .into_iter()
        .filter_map(|item| {
            let parsed = item.as_str().and_then(|s| DebugOption::from_str(s).ok());
            if parsed.is_none() {
                warn!(target: "attach", "unknown debug option `{item}`, skipped");
            }
            parsed
        })
        .collect();
    Ok(Some(options))
}

pub(super) fn path_mappings<'de, D>(deserializer: D) -> Result<Option<Vec<PathMapping>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            warn!(target: "attach", "`pathMappings` must be a list, got `{other}`, replaced");
            return Ok(None);
        }
    };

    let mappings = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<PathMapping>(item.clone()) {
            Ok(mapping) => Some(mapping),
            Err(err) => {
                warn!(target: "attach", "invalid path mapping `{item}`: {err}, skipped");
                None
            }
        })
        .collect();
    Ok(Some(mappings))
}
