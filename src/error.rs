//! Defines the error type returned by the fallible functions of this crate.
use std::io;
use thiserror::Error;


/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;


/// Errors raised while reading instances, training, or (de)serializing models.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A malformed line in an instance file.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A hyperparameter or argument outside of its domain.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// What went wrong.
        message: String,
    },

    /// Training was requested on an instance set without instances.
    #[error("the instance set is empty")]
    EmptyInstanceSet,

    /// A malformed model file.
    #[error("model file, line {line}: {message}")]
    ModelFormat {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Two objects that must agree on their shape do not.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The worker pool could not be started.
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A malformed configuration file.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The temporary model file could not be moved into place.
    #[error("failed to persist the model file: {0}")]
    Persist(#[from] tempfile::PersistError),
}


impl Error {
    pub(crate) fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse { line, message: message.into() }
    }


    pub(crate) fn model_format<S: Into<String>>(line: usize, message: S)
        -> Self
    {
        Self::ModelFormat { line, message: message.into() }
    }


    pub(crate) fn invalid<S: Into<String>>(name: &'static str, message: S)
        -> Self
    {
        Self::InvalidParameter { name, message: message.into() }
    }
}
