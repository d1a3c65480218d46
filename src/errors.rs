use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchCmpError {
    #[error("File '{path}' not found")]
    NotFound { path: String },
    #[error("File '{path}' is not a valid benchmark document: {reason}")]
    MalformedInput { path: String, reason: String },
    #[error("benchmark '{0}' has no cpu_time, real_time or time field")]
    MissingTimeMetric(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(String),
}

impl BenchCmpError {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        BenchCmpError::NotFound {
            path: path.as_ref().display().to_string(),
        }
    }

    pub fn malformed<P: AsRef<Path>, T: Into<String>>(path: P, reason: T) -> Self {
        BenchCmpError::MalformedInput {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_time<T: Into<String>>(name: T) -> Self {
        BenchCmpError::MissingTimeMetric(name.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        BenchCmpError::InvalidInput(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        BenchCmpError::Io(msg.into())
    }
}
