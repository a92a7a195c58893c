use std::collections::BTreeMap;

use crate::types::Action;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TeamConfig {
    #[serde(rename = "teamId")]
    pub team_id: String,

    #[serde(rename = "teamName")]
    pub team_name: String,

    /// Union of npm-style range expressions, e.g. `[">=1.0.0 <2.0.0", "^3.1.0"]`.
    #[serde(rename = "supportedVersions")]
    pub supported_versions: Vec<String>,

    #[serde(rename = "defaultVersion")]
    pub default_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "customActions")]
    pub custom_actions: Option<Vec<Action>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "featureFlags")]
    pub feature_flags: Option<BTreeMap<String, bool>>,
}

impl TeamConfig {
    pub fn new(
        team_id: impl Into<String>,
        team_name: impl Into<String>,
        supported_versions: Vec<String>,
        default_version: impl Into<String>,
    ) -> Self {
        Self {
            team_id: team_id.into(),
            team_name: team_name.into(),
            supported_versions,
            default_version: default_version.into(),
            custom_actions: None,
            feature_flags: None,
        }
    }

    pub fn with_custom_actions(mut self, actions: Vec<Action>) -> Self {
        self.custom_actions = Some(actions);
        self
    }
}

/// Partial update merged into an existing [`TeamConfig`]; `team_id` is the key and never changes.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub team_name: Option<String>,
    pub supported_versions: Option<Vec<String>>,
    pub default_version: Option<String>,
    pub custom_actions: Option<Option<Vec<Action>>>,
    pub feature_flags: Option<Option<BTreeMap<String, bool>>>,
}

impl TeamUpdate {
    pub fn apply_to(self, team: &mut TeamConfig) {
        if let Some(v) = self.team_name {
            team.team_name = v;
        }
        if let Some(v) = self.supported_versions {
            team.supported_versions = v;
        }
        if let Some(v) = self.default_version {
            team.default_version = v;
        }
        if let Some(v) = self.custom_actions {
            team.custom_actions = v;
        }
        if let Some(v) = self.feature_flags {
            team.feature_flags = v;
        }
    }
}
