use std::path::PathBuf;

use thiserror::Error;

use crate::model::ValidationError;

pub const ERROR_CODE_USER_INVALID_INPUT: &str = "user.invalid_input";
pub const ERROR_CODE_RUNTIME_TRANSPORT: &str = "runtime.transport_failed";
pub const ERROR_CODE_RUNTIME_UPSTREAM_STATUS: &str = "runtime.upstream_status";
pub const ERROR_CODE_RUNTIME_DECODE: &str = "runtime.decode_failed";
pub const ERROR_CODE_RUNTIME_LOCATION_NOT_FOUND: &str = "runtime.location_not_found";
pub const ERROR_CODE_RUNTIME_NO_CONDITIONS: &str = "runtime.no_condition_data";
pub const ERROR_CODE_RUNTIME_CACHE: &str = "runtime.cache_failed";
pub const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";
pub const ERROR_CODE_RUNTIME_CLIENT_INIT: &str = "runtime.client_init_failed";

/// Failures of a single lookup. None of them are retried; the next status-bar
/// tick is the retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("invalid {context}: {message}")]
    Decode { context: String, message: String },
    #[error("location not found: {0}")]
    UnknownLocation(String),
    #[error("conditions response contained no weather entries")]
    NoConditionData,
    #[error("cache file {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },
}

impl WeatherError {
    pub fn code(&self) -> &'static str {
        match self {
            WeatherError::Transport(_) => ERROR_CODE_RUNTIME_TRANSPORT,
            WeatherError::UpstreamStatus { .. } => ERROR_CODE_RUNTIME_UPSTREAM_STATUS,
            WeatherError::Decode { .. } => ERROR_CODE_RUNTIME_DECODE,
            WeatherError::UnknownLocation(_) => ERROR_CODE_RUNTIME_LOCATION_NOT_FOUND,
            WeatherError::NoConditionData => ERROR_CODE_RUNTIME_NO_CONDITIONS,
            WeatherError::Persistence { .. } => ERROR_CODE_RUNTIME_CACHE,
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        WeatherError::Persistence {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    pub fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_INPUT, value.to_string())
    }
}

impl From<WeatherError> for AppError {
    fn from(value: WeatherError) -> Self {
        Self::runtime(value.code(), value.to_string())
    }
}
