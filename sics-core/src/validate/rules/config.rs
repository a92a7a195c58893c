use crate::config::AdapterConfig;
use crate::validate::rules::team;
use crate::validate::validator::Validator;

pub(crate) fn validate_config(v: &mut Validator, config: &AdapterConfig) {
    v.require_non_empty("$.baseUrl", &config.base_url);
    v.require_non_empty("$.apiVersion", &config.api_version);

    if config.timeout == 0 {
        v.push("$.timeout", "must be a positive number of milliseconds");
    }

    if config.teams.is_empty() {
        v.push("$.teams", "at least one team configuration is required");
    }
    for (idx, t) in config.teams.iter().enumerate() {
        team::validate_team(v, t, &format!("$.teams[{idx}]"));
    }
}
