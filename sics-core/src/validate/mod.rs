mod parameters;
mod rules;
mod validator;

use crate::config::AdapterConfig;
use crate::error::ValidationError;
use validator::Validator;

pub use parameters::validate_parameters;
pub(crate) use parameters::missing_required;

/// Collects every configuration violation instead of stopping at the first.
pub fn validate_config(config: &AdapterConfig) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_config(config);
    v.finish()
}
