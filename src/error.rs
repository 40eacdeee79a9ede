//! Classified errors surfaced by every client operation

use serde::Serialize;
use thiserror::Error;

/// Category of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing caller input, or a 4xx backend response
    Validation,
    /// Transport failure or an unclassified non-2xx status
    Network,
    /// 5xx status or an explicit `success: false` envelope
    EngineFailure,
    /// Success-status body that could not be read as the expected shape
    ParseFailure,
    /// Reserved for structural input validation
    SchemaMismatch,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::EngineFailure => "ENGINE_FAILURE",
            ErrorKind::ParseFailure => "TOON_PARSE_ERROR",
            ErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A failure classified into one [`ErrorKind`], with its message and the
/// HTTP status when one was involved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
}

impl ClientError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn engine_failure(message: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorKind::EngineFailure, message).with_status(status)
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailure, message)
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaMismatch, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
