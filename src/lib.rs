//! Attach configuration resolution for debug sessions.
//!
//! A user-authored attach configuration (any field may be missing, legacy-shaped
//! or malformed) is turned into a complete one: host, debugger option flags,
//! platform client flag, workspace folder and path mappings.

pub mod config;
pub mod error;
pub mod platform;
pub mod resolver;
pub mod source_map;
pub mod telemetry;
pub mod workspace;
