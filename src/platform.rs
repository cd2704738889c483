use strum_macros::{Display, EnumString};

/// Host platform query.
pub trait PlatformService {
    fn is_windows(&self) -> bool;
}

/// Platform of a machine where the editor (debugger client) runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumString, Display)]
pub enum Platform {
    #[strum(serialize = "windows")]
    Windows,
    #[strum(serialize = "unix")]
    Unix,
}

impl Platform {
    /// Platform this binary is built for.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

impl PlatformService for Platform {
    fn is_windows(&self) -> bool {
        *self == Platform::Windows
    }
}
