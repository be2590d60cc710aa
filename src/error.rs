use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the sysfs/IIO hardware backends
#[derive(Error, Debug)]
pub enum HardwareError {
    /// Reading or writing a sysfs attribute failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The attribute held something that is not a number
    #[error("unexpected value {value:?} in {}", .path.display())]
    Parse { path: PathBuf, value: String },

    /// The simulated or real device reported a failed measurement
    #[error("measurement failed: {0}")]
    Measurement(String),
}

impl HardwareError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HardwareError::Io {
            path: path.into(),
            source,
        }
    }
}
