//! The error type shared by every layer of the service.

use std::fmt;

use thiserror::Error;

/// Everything that can go wrong between an HTTP request and the data files.
///
/// Lower layers convert their own failures into this type with `?`; the
/// server maps each variant onto a status code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrainstormError {
    /// No record with this id exists.
    #[error("{entity_type} {id} does not exist")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Rejected input; the message is safe to show to the caller.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("storage I/O failed: {message}")]
    Io { message: String },

    /// A file could not be encoded or decoded.
    #[error("{format} encoding failed: {message}")]
    Serialization {
        format: DataFormat,
        message: String,
    },

    #[error("bad configuration: {0}")]
    Config(String),

    /// A bug or a panicked background task.
    #[error("unexpected failure: {0}")]
    Internal(String),
}

/// On-disk encodings the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Toml => f.write_str("TOML"),
        }
    }
}

impl BrainstormError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    fn encoding(format: DataFormat, err: impl fmt::Display) -> Self {
        Self::Serialization {
            format,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for BrainstormError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{:?}: {}", err.kind(), err))
    }
}

impl From<serde_json::Error> for BrainstormError {
    fn from(err: serde_json::Error) -> Self {
        Self::encoding(DataFormat::Json, err)
    }
}

impl From<toml::de::Error> for BrainstormError {
    fn from(err: toml::de::Error) -> Self {
        Self::encoding(DataFormat::Toml, err)
    }
}

impl From<toml::ser::Error> for BrainstormError {
    fn from(err: toml::ser::Error) -> Self {
        Self::encoding(DataFormat::Toml, err)
    }
}

pub type Result<T> = std::result::Result<T, BrainstormError>;
