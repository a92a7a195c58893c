use std::fmt;

use thiserror::Error;

/// Machine-readable failure classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    InvalidVersionFormat,
    UnsupportedVersion,
    NoVersionAvailable,
    ActionNotFound,
    ParameterValidationFailed,
    ExecutionError,
    HealthCheckError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVersionFormat => "InvalidVersionFormat",
            ErrorCode::UnsupportedVersion => "UnsupportedVersion",
            ErrorCode::NoVersionAvailable => "NoVersionAvailable",
            ErrorCode::ActionNotFound => "ActionNotFound",
            ErrorCode::ParameterValidationFailed => "ParameterValidationFailed",
            ErrorCode::ExecutionError => "ExecutionError",
            ErrorCode::HealthCheckError => "HealthCheckError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error value handed back to callers, either inside an
/// `ExecutionResult` or as the `Err` side of the read accessors.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
#[error("{code}: {message}")]
pub struct SicsError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl SicsError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            stack: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    #[error("Invalid version range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },
}

impl From<VersionError> for SicsError {
    fn from(e: VersionError) -> Self {
        SicsError::new(ErrorCode::InvalidVersionFormat, e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No version specified and no default version found for team: {team_id}")]
    NoVersionAvailable { team_id: String },
    #[error("Version {version} is not supported for team: {team_id}")]
    UnsupportedVersion { team_id: String, version: String },
}

impl ResolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::NoVersionAvailable { .. } => ErrorCode::NoVersionAvailable,
            ResolveError::UnsupportedVersion { .. } => ErrorCode::UnsupportedVersion,
        }
    }
}

impl From<ResolveError> for SicsError {
    fn from(e: ResolveError) -> Self {
        SicsError::new(e.code(), e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Team ID is required")]
    MissingTeam,
    #[error("Version is required")]
    MissingVersion,
    #[error("Action is required")]
    MissingAction,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse config as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for environment variable {name}: {value}")]
    Env { name: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, Error)]
#[error("adapter configuration failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
