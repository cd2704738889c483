use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Flag that changes debugger behavior in an attached session.
///
/// String representation matches the names the debug adapter expects in `debugOptions`.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    EnumString,
    Display,
    IntoStaticStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum DebugOption {
    RedirectOutput,
    Django,
    Jinja,
    DebugStdLib,
    Sudo,
    Pyramid,
    FixFilePathCase,
    WindowsClient,
    UnixClient,
    StopOnEntry,
    ShowReturnValue,
    SubProcess,
}

impl DebugOption {
    /// Return client flag for a platform.
    pub fn client(is_windows: bool) -> Self {
        if is_windows {
            DebugOption::WindowsClient
        } else {
            DebugOption::UnixClient
        }
    }

    /// True for [`DebugOption::WindowsClient`] and [`DebugOption::UnixClient`].
    pub fn is_client(self) -> bool {
        matches!(self, DebugOption::WindowsClient | DebugOption::UnixClient)
    }
}
