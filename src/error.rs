use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // --------------------------------- generic errors --------------------------------------------
    #[error(transparent)]
    IO(#[from] std::io::Error),

    // --------------------------------- profile errors --------------------------------------------
    #[error("json profile parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml profile parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported profile format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("configuration \"{0}\" not found")]
    ConfigurationNotFound(String),
    #[error("no attach configuration found in {0}")]
    NoAttachConfiguration(PathBuf),
    #[error("home directory not found")]
    HomeNotFound,
}

#[macro_export]
macro_rules! _error {
    ($log_fn: path, $res: expr) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "attach", "{:#}", e);
                None
            }
        }
    };
    ($log_fn: path, $res: expr, $msg: tt) => {
        match $res {
            Ok(value) => Some(value),
            Err(e) => {
                $log_fn!(target: "attach", concat!($msg, " {:#}"), e);
                None
            }
        }
    };
}

/// Transforms `Result` into `Option` and logs an error if it occurs.
#[macro_export]
macro_rules! weak_error {
    ($res: expr) => {
        $crate::_error!(log::warn, $res)
    };
    ($res: expr, $msg: tt) => {
        $crate::_error!(log::warn, $res, $msg)
    };
}
