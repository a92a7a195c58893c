use std::collections::BTreeMap;

pub type AnyValue = serde_json::Value;

/// Caller-supplied parameter values keyed by parameter name.
pub type ParameterMap = BTreeMap<String, AnyValue>;
