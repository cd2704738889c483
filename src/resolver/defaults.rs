//! Defaulting rules for attach configurations.
//!
//! Rules run in the order of [`PIPELINE`]: a rule may read fields set by rules before it.

use crate::config::{AttachConfiguration, DebugOption, Toggle};
use crate::resolver::is_local_host;
use crate::resolver::path_mapping::normalize_path_mappings;
use itertools::Itertools;
use log::debug;
use std::path::Path;

const DEFAULT_HOST: &str = "localhost";

/// Configuration under resolution together with the environment it is resolved for.
pub(super) struct AttachDefaults<'a> {
    pub cfg: &'a mut AttachConfiguration,
    pub workspace_root: Option<&'a Path>,
    pub is_windows: bool,
    /// Set by [`detect_local_host`].
    is_local_host: bool,
}

impl<'a> AttachDefaults<'a> {
    pub fn new(
        cfg: &'a mut AttachConfiguration,
        workspace_root: Option<&'a Path>,
        is_windows: bool,
    ) -> Self {
        Self {
            cfg,
            workspace_root,
            is_windows,
            is_local_host: false,
        }
    }

    /// Apply all rules of [`PIPELINE`].
    pub fn apply(mut self) {
        for (name, step) in PIPELINE {
            debug!(target: "attach", "apply rule: {name}");
            step(&mut self);
        }
    }
}

type Step = fn(&mut AttachDefaults);

/// Ordered defaulting rules.
const PIPELINE: &[(&str, Step)] = &[
    ("init debug options", init_debug_options),
    ("default host", default_host),
    ("workspace folder", set_workspace_folder),
    ("option triggers", apply_triggers),
    ("pyramid implies jinja", pyramid_jinja),
    ("redirect output", redirect_output),
    ("detect local host", detect_local_host),
    ("fix file path case", fix_file_path_case),
    ("client platform", client_platform),
    ("path mappings", path_mappings),
    ("dedup debug options", dedup_debug_options),
];

/// Trigger field that turns a debug option on.
struct Trigger {
    field: &'static str,
    is_on: fn(&AttachConfiguration) -> bool,
    option: DebugOption,
}

fn truthy(toggle: &Option<Toggle>) -> bool {
    toggle.as_ref().is_some_and(Toggle::is_truthy)
}

fn debug_std_lib(cfg: &AttachConfiguration) -> bool {
    truthy(&cfg.debug_std_lib)
}

fn django(cfg: &AttachConfiguration) -> bool {
    truthy(&cfg.django)
}

fn jinja(cfg: &AttachConfiguration) -> bool {
    truthy(&cfg.jinja)
}

/// Only a literal `true` enables sub process debugging.
fn sub_process(cfg: &AttachConfiguration) -> bool {
    cfg.sub_process.as_ref().is_some_and(Toggle::is_true)
}

const TRIGGERS: &[Trigger] = &[
    Trigger {
        field: "debugStdLib",
        is_on: debug_std_lib,
        option: DebugOption::DebugStdLib,
    },
    Trigger {
        field: "django",
        is_on: django,
        option: DebugOption::Django,
    },
    Trigger {
        field: "jinja",
        is_on: jinja,
        option: DebugOption::Jinja,
    },
    Trigger {
        field: "subProcess",
        is_on: sub_process,
        option: DebugOption::SubProcess,
    },
];

/// Absent (or malformed) option list becomes an empty one.
fn init_debug_options(d: &mut AttachDefaults) {
    d.cfg.debug_options.get_or_insert_with(Vec::new);
}

/// Absent or empty host means local host.
fn default_host(d: &mut AttachDefaults) {
    if d.cfg.host.as_deref().unwrap_or_default().is_empty() {
        d.cfg.host = Some(DEFAULT_HOST.to_string());
    }
}

/// Workspace folder always comes from the resolved workspace, never from user input.
fn set_workspace_folder(d: &mut AttachDefaults) {
    d.cfg.workspace_folder = d.workspace_root.map(Path::to_path_buf);
}

fn apply_triggers(d: &mut AttachDefaults) {
    for trigger in TRIGGERS {
        if (trigger.is_on)(&*d.cfg) {
            debug!(target: "attach", "`{}` enables {}", trigger.field, trigger.option);
            d.cfg.add_option(trigger.option);
        }
    }
}

/// Pyramid uses jinja templates unless `jinja` is explicitly `false`.
fn pyramid_jinja(d: &mut AttachDefaults) {
    let jinja_off = d.cfg.jinja.as_ref().is_some_and(Toggle::is_false);
    if truthy(&d.cfg.pyramid) && !d.cfg.has_option(DebugOption::Jinja) && !jinja_off {
        d.cfg.add_option(DebugOption::Jinja);
    }
}

/// Output redirection is on unless the field is present and falsy (`false`, `0`, `""`, `null`).
fn redirect_output(d: &mut AttachDefaults) {
    if d.cfg.redirect_output.is_none() || truthy(&d.cfg.redirect_output) {
        d.cfg.add_option(DebugOption::RedirectOutput);
    }
}

/// Requires: host is set.
fn detect_local_host(d: &mut AttachDefaults) {
    d.is_local_host = d.cfg.host.as_deref().is_some_and(is_local_host);
}

/// File path case is fixed only when debugger and debuggee share a file system.
fn fix_file_path_case(d: &mut AttachDefaults) {
    if d.is_windows && d.is_local_host {
        d.cfg.add_option(DebugOption::FixFilePathCase);
    }
}

/// Exactly one client flag, matching the platform.
fn client_platform(d: &mut AttachDefaults) {
    let client = DebugOption::client(d.is_windows);
    let other = DebugOption::client(!d.is_windows);
    d.cfg.remove_option(other);
    d.cfg.add_option(client);
}

/// Requires: host and workspace folder are set.
fn path_mappings(d: &mut AttachDefaults) {
    normalize_path_mappings(d.cfg, d.workspace_root);
}

/// User supplied lists may contain duplicates, first occurrence wins.
fn dedup_debug_options(d: &mut AttachDefaults) {
    if let Some(options) = d.cfg.debug_options.take() {
        d.cfg.debug_options = Some(options.into_iter().unique().collect());
    }
}
