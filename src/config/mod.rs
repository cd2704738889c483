mod option;
pub mod profile;
mod ser;

pub use option::DebugOption;
pub use ser::Toggle;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Pair of roots: paths under `local_root` (editor side) correspond to paths
/// under `remote_root` (debuggee side).
///
/// Roots are kept as strings because the remote side may use another platform's path syntax.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMapping {
    pub local_root: String,
    pub remote_root: String,
}

impl PathMapping {
    pub fn new(local_root: impl Into<String>, remote_root: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            remote_root: remote_root.into(),
        }
    }
}

/// Attach request arguments as written by a user (all fields are optional).
///
/// After resolution by [`crate::resolver::AttachConfigurationResolver`] the record
/// has a host, a duplicate-free option list with exactly one client flag, and a
/// path mapping list.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachConfiguration {
    #[serde(default, deserialize_with = "ser::string", skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(
        default,
        deserialize_with = "ser::debug_options",
        skip_serializing_if = "Option::is_none"
    )]
    pub debug_options: Option<Vec<DebugOption>>,
    #[serde(default, deserialize_with = "ser::path", skip_serializing_if = "Option::is_none")]
    pub workspace_folder: Option<PathBuf>,
    #[serde(
        default,
        deserialize_with = "ser::path_mappings",
        skip_serializing_if = "Option::is_none"
    )]
    pub path_mappings: Option<Vec<PathMapping>>,

    /// Legacy single mapping, see [`AttachConfiguration::path_mappings`].
    #[serde(default, deserialize_with = "ser::string", skip_serializing_if = "Option::is_none")]
    pub local_root: Option<String>,
    /// Legacy single mapping, see [`AttachConfiguration::path_mappings`].
    #[serde(default, deserialize_with = "ser::string", skip_serializing_if = "Option::is_none")]
    pub remote_root: Option<String>,

    #[serde(default, deserialize_with = "ser::toggle", skip_serializing_if = "Option::is_none")]
    pub debug_std_lib: Option<Toggle>,
    #[serde(default, deserialize_with = "ser::toggle", skip_serializing_if = "Option::is_none")]
    pub django: Option<Toggle>,
    #[serde(default, deserialize_with = "ser::toggle", skip_serializing_if = "Option::is_none")]
    pub jinja: Option<Toggle>,
    #[serde(default, deserialize_with = "ser::toggle", skip_serializing_if = "Option::is_none")]
    pub sub_process: Option<Toggle>,
    #[serde(default, deserialize_with = "ser::toggle", skip_serializing_if = "Option::is_none")]
    pub pyramid: Option<Toggle>,
    /// Only a missing field means "not set", `null` is an explicit falsy value.
    #[serde(
        default,
        deserialize_with = "ser::present_toggle",
        skip_serializing_if = "Option::is_none"
    )]
    pub redirect_output: Option<Toggle>,

    /// Fields not interpreted by the resolver (`name`, `type`, `port`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttachConfiguration {
    /// Return debug options, empty slice if the list is absent.
    pub fn options(&self) -> &[DebugOption] {
        self.debug_options.as_deref().unwrap_or_default()
    }

    pub fn has_option(&self, opt: DebugOption) -> bool {
        self.options().contains(&opt)
    }

    /// Add an option if it is not in the list yet.
    pub fn add_option(&mut self, opt: DebugOption) {
        let options = self.debug_options.get_or_insert_with(Vec::new);
        if !options.contains(&opt) {
            options.push(opt);
        }
    }

    /// Remove all occurrences of an option.
    pub fn remove_option(&mut self, opt: DebugOption) {
        if let Some(options) = self.debug_options.as_mut() {
            options.retain(|o| *o != opt);
        }
    }

    /// Return path mappings, empty slice if the list is absent.
    pub fn mappings(&self) -> &[PathMapping] {
        self.path_mappings.as_deref().unwrap_or_default()
    }

    /// Return legacy `localRoot`/`remoteRoot` pair if both are set and not empty.
    pub fn legacy_mapping(&self) -> Option<PathMapping> {
        match (self.local_root.as_deref(), self.remote_root.as_deref()) {
            (Some(local), Some(remote)) if !local.is_empty() && !remote.is_empty() => {
                Some(PathMapping::new(local, remote))
            }
            _ => None,
        }
    }
}
