use std::fmt;
use std::path::PathBuf;

/// Failures that end the whole run. Per-query failures are [`crate::QueryError`].
#[derive(Debug)]
pub enum StatsError {
    DescriptorDir { path: PathBuf, message: String },
    Connection { descriptor: PathBuf, message: String },
}

impl StatsError {
    pub fn descriptor_dir(path: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        Self::DescriptorDir { path: path.into(), message: err.to_string() }
    }

    pub fn connection(descriptor: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        Self::Connection { descriptor: descriptor.into(), message: err.to_string() }
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptorDir { path, message } => {
                write!(f, "Cannot read kubeconfig directory {}: {message}", path.display())
            }
            Self::Connection { descriptor, message } => {
                write!(f, "Cannot build client from {}: {message}", descriptor.display())
            }
        }
    }
}

impl std::error::Error for StatsError {}
