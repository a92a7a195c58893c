use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;

use crate::types::{Action, ActionParameter, ParameterMap, ParameterValidation};

// Compiled `validation.pattern`s keyed by source; `None` marks an invalid pattern.
static PATTERNS: LazyLock<RwLock<HashMap<String, Option<Regex>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn compiled_pattern(pattern: &str) -> Option<Regex> {
    if let Some(cached) = PATTERNS.read().get(pattern) {
        return cached.clone();
    }
    let compiled = match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid validation pattern");
            None
        }
    };
    PATTERNS
        .write()
        .entry(pattern.to_string())
        .or_insert(compiled)
        .clone()
}

/// Checks `parameters` against the action's declared schema.
///
/// Returns one message per violation in declaration order; an empty list means
/// the call may be dispatched. Keys the action does not declare are ignored.
pub fn validate_parameters(action: &Action, parameters: &ParameterMap) -> Vec<String> {
    let mut violations = Vec::new();
    for param in &action.parameters {
        let value = parameters.get(&param.name).filter(|v| !v.is_null());
        match value {
            None if param.required => violations.push(missing_required(param)),
            None => {}
            Some(value) => {
                if let Some(rules) = &param.validation {
                    check_constraints(&param.name, value, rules, &mut violations);
                }
            }
        }
    }
    violations
}

pub(crate) fn missing_required(param: &ActionParameter) -> String {
    format!("Required parameter '{}' is missing", param.name)
}

fn check_constraints(
    name: &str,
    value: &Value,
    rules: &ParameterValidation,
    out: &mut Vec<String>,
) {
    match value {
        Value::Number(n) => {
            let Some(num) = n.as_f64() else {
                return;
            };
            if let Some(min) = rules.min {
                if num < min {
                    out.push(format!("Parameter '{name}' value {n} is below minimum {min}"));
                }
            }
            if let Some(max) = rules.max {
                if num > max {
                    out.push(format!("Parameter '{name}' value {n} is above maximum {max}"));
                }
            }
        }
        Value::String(s) => {
            let Some(pattern) = &rules.pattern else {
                return;
            };
            match compiled_pattern(pattern) {
                Some(re) if re.is_match(s) => {}
                Some(_) => out.push(format!(
                    "Parameter '{name}' value does not match required pattern"
                )),
                None => {
                    out.push(format!("Parameter '{name}' has an invalid validation pattern"));
                }
            }
        }
        _ => {}
    }
}
