#![forbid(unsafe_code)]

//! Team-scoped, version-aware action resolution for SICS.
//!
//! Dispatching resolved actions over HTTP lives in `sics-exec`.

pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod types;
pub mod validate;
pub mod version;

pub use crate::config::{load_config_file, parse_config_str, AdapterConfig, ConfigFormat};
pub use crate::context::{generate_request_id, ExecutionContextBuilder};
pub use crate::error::{
    BuildError, ConfigError, ErrorCode, ResolveError, SicsError, ValidationError, VersionError,
    Violation,
};
pub use crate::registry::{ActionCatalog, TeamRegistry};
pub use crate::resolve::ActionResolver;
pub use crate::types::{
    Action, ActionCategory, ActionParameter, AnyValue, ExecutionContext, ExecutionResult,
    ParameterMap, TeamConfig,
};
pub use crate::validate::{validate_config, validate_parameters};
pub use crate::version::{SemanticVersion, VersionRange};
