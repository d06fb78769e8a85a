//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported configuration version {0}, expected {1}")]
    UnsupportedVersion(u32, u32),
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("cannot resolve the connection uri: {0}")]
    MissingEnvironmentVariable(#[from] crate::environment::Error),
    #[error("invalid configuration value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}
