use crate::types::AnyValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    DataProcessing,
    Integration,
    Transformation,
    Validation,
    Notification,
    Utility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Date,
    File,
    Json,
    Options,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterOption {
    pub name: String,

    pub value: AnyValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declarative constraints checked before dispatch.
///
/// `min`/`max` only apply to numeric values and `pattern` only to strings.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionParameter {
    pub name: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "type")]
    pub param_type: ParameterType,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<AnyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ParameterOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ParameterValidation>,
}

impl ActionParameter {
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            param_type,
            required: false,
            description: None,
            default: None,
            options: None,
            validation: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_validation(mut self, validation: ParameterValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// A remotely executed operation and the schema of its parameters.
///
/// `team: None` makes the action global. `min_version`/`max_version` are
/// inclusive bounds on the caller version for which the action is offered.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Action {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    pub category: ActionCategory,

    #[serde(default)]
    pub parameters: Vec<ActionParameter>,

    #[serde(rename = "flowAdapterEndpoint")]
    pub flow_adapter_endpoint: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "minVersion")]
    pub min_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxVersion")]
    pub max_version: Option<String>,
}

impl Action {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ActionCategory,
        flow_adapter_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            version: "1.0.0".to_string(),
            team: None,
            category,
            parameters: Vec::new(),
            flow_adapter_endpoint: flow_adapter_endpoint.into(),
            deprecated: false,
            min_version: None,
            max_version: None,
        }
    }

    pub fn is_global(&self) -> bool {
        self.team.is_none()
    }
}

/// Partial update merged into an existing [`Action`]. `None` leaves a field untouched;
/// for the optional fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct ActionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub team: Option<Option<String>>,
    pub category: Option<ActionCategory>,
    pub parameters: Option<Vec<ActionParameter>>,
    pub flow_adapter_endpoint: Option<String>,
    pub deprecated: Option<bool>,
    pub min_version: Option<Option<String>>,
    pub max_version: Option<Option<String>>,
}

impl ActionUpdate {
    pub fn apply_to(self, action: &mut Action) {
        if let Some(v) = self.name {
            action.name = v;
        }
        if let Some(v) = self.description {
            action.description = v;
        }
        if let Some(v) = self.version {
            action.version = v;
        }
        if let Some(v) = self.team {
            action.team = v;
        }
        if let Some(v) = self.category {
            action.category = v;
        }
        if let Some(v) = self.parameters {
            action.parameters = v;
        }
        if let Some(v) = self.flow_adapter_endpoint {
            action.flow_adapter_endpoint = v;
        }
        if let Some(v) = self.deprecated {
            action.deprecated = v;
        }
        if let Some(v) = self.min_version {
            action.min_version = v;
        }
        if let Some(v) = self.max_version {
            action.max_version = v;
        }
    }
}
