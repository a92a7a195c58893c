//! Incremental construction of [`ExecutionContext`] values.

use chrono::{DateTime, Utc};

use crate::error::BuildError;
use crate::types::{Action, AnyValue, ExecutionContext, ParameterMap};
use crate::validate::missing_required;

pub const DEFAULT_REQUEST_ID_PREFIX: &str = "sics";

/// `<prefix>_<epoch millis>_<9 base36 chars>`.
pub fn generate_request_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = std::iter::repeat_with(|| {
        let n = fastrand::u8(..36);
        if n < 10 {
            char::from(b'0' + n)
        } else {
            char::from(b'a' + n - 10)
        }
    })
    .take(9)
    .collect();
    format!("{prefix}_{millis}_{suffix}")
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionContextBuilder {
    draft: Draft,
}

/// Fields accumulated so far; see [`ExecutionContextBuilder::partial`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub team_id: Option<String>,
    pub version: Option<String>,
    pub action: Option<Action>,
    pub parameters: Option<ParameterMap>,
    pub request_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ExecutionContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.draft.team_id = Some(team_id.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.draft.version = Some(version.into());
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.draft.action = Some(action);
        self
    }

    pub fn parameters(mut self, parameters: ParameterMap) -> Self {
        self.draft.parameters = Some(parameters);
        self
    }

    pub fn add_parameter(mut self, name: impl Into<String>, value: impl Into<AnyValue>) -> Self {
        self.draft
            .parameters
            .get_or_insert_with(ParameterMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.draft.request_id = Some(request_id.into());
        self
    }

    pub fn generate_request_id(mut self, prefix: &str) -> Self {
        self.draft.request_id = Some(generate_request_id(prefix));
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.draft.timestamp = Some(timestamp);
        self
    }

    pub fn current_timestamp(self) -> Self {
        self.timestamp(Utc::now())
    }

    pub fn reset(mut self) -> Self {
        self.draft = Draft::default();
        self
    }

    pub fn partial(&self) -> &Draft {
        &self.draft
    }

    pub fn build(self) -> Result<ExecutionContext, BuildError> {
        let Draft {
            team_id,
            version,
            action,
            parameters,
            request_id,
            timestamp,
        } = self.draft;
        Ok(ExecutionContext {
            team_id: team_id.filter(|s| !s.is_empty()).ok_or(BuildError::MissingTeam)?,
            version: version.filter(|s| !s.is_empty()).ok_or(BuildError::MissingVersion)?,
            action: action.ok_or(BuildError::MissingAction)?,
            parameters: parameters.unwrap_or_default(),
            request_id: request_id
                .unwrap_or_else(|| generate_request_id(DEFAULT_REQUEST_ID_PREFIX)),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        })
    }

    /// Non-failing pre-flight check covering required fields and required parameters.
    pub fn validate(&self) -> Vec<String> {
        let d = &self.draft;
        let mut errors = Vec::new();
        if d.team_id.as_deref().map_or(true, str::is_empty) {
            errors.push(BuildError::MissingTeam.to_string());
        }
        if d.version.as_deref().map_or(true, str::is_empty) {
            errors.push(BuildError::MissingVersion.to_string());
        }
        match &d.action {
            None => errors.push(BuildError::MissingAction.to_string()),
            Some(action) => {
                if action.id.is_empty() {
                    errors.push("Action ID is required".to_string());
                }
                if action.flow_adapter_endpoint.is_empty() {
                    errors.push("Action flow adapter endpoint is required".to_string());
                }
            }
        }
        // Unset parameters build as an empty map, so check against that.
        let empty = ParameterMap::new();
        if let Some(action) = &d.action {
            let params = d.parameters.as_ref().unwrap_or(&empty);
            for param in action.parameters.iter().filter(|p| p.required) {
                if params.get(&param.name).map_or(true, AnyValue::is_null) {
                    errors.push(missing_required(param));
                }
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
