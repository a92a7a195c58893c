use crate::types::TeamConfig;
use crate::validate::validator::Validator;

pub(crate) fn validate_team(v: &mut Validator, team: &TeamConfig, path: &str) {
    v.require_non_empty(&format!("{path}.teamId"), &team.team_id);
    v.require_non_empty(&format!("{path}.teamName"), &team.team_name);
    if team.supported_versions.is_empty() {
        v.push(
            format!("{path}.supportedVersions"),
            "must have at least one supported version",
        );
    }
    v.require_non_empty(&format!("{path}.defaultVersion"), &team.default_version);
}
