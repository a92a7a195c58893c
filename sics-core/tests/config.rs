use std::collections::HashMap;
use std::io::Write;

use sics_core::{load_config_file, parse_config_str, AdapterConfig, ConfigError, ConfigFormat, TeamConfig};

fn minimal_yaml() -> &'static str {
    r#"
baseUrl: https://api.sics.local
apiVersion: v1
timeout: 30000
retryAttempts: 3
teams:
  - teamId: default
    teamName: Default Team
    supportedVersions: [">=1.0.0"]
    defaultVersion: 1.0.0
    featureFlags:
      enableRetry: true
globalActions:
  - id: data-transform
    name: Data Transform
    description: Transform data using predefined rules
    version: 1.0.0
    category: data_processing
    flowAdapterEndpoint: /flow/data-transform
    parameters:
      - name: input
        displayName: Input Data
        type: json
        required: true
"#
}

fn valid_config() -> AdapterConfig {
    AdapterConfig::new(
        "https://api.sics.local",
        vec![TeamConfig::new("default", "Default Team", vec![">=1.0.0".to_string()], "1.0.0")],
    )
}

#[test]
fn parse_yaml_and_validate_ok() {
    let cfg = parse_config_str(minimal_yaml(), ConfigFormat::Yaml).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.timeout, 30_000);
    assert_eq!(cfg.global_actions[0].parameters[0].name, "input");
    assert!(cfg.global_actions[0].parameters[0].required);
}

#[test]
fn parse_auto_detects_both_formats() {
    let from_yaml = parse_config_str(minimal_yaml(), ConfigFormat::Auto).unwrap();
    let json = serde_json::to_string(&from_yaml).unwrap();
    let from_json = parse_config_str(&json, ConfigFormat::Auto).unwrap();
    assert_eq!(from_yaml, from_json);
}

#[test]
fn parse_garbage_is_rejected() {
    let err = parse_config_str("not: [valid", ConfigFormat::Auto).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
    let err = parse_config_str("{ broken", ConfigFormat::Auto).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn validation_collects_every_violation() {
    let mut cfg = valid_config();
    cfg.base_url = String::new();
    cfg.api_version = "  ".to_string();
    cfg.timeout = 0;
    cfg.teams.push(TeamConfig::new("", "", vec![], ""));

    let err = cfg.validate().unwrap_err();
    let paths: Vec<_> = err.violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "$.baseUrl",
            "$.apiVersion",
            "$.timeout",
            "$.teams[1].teamId",
            "$.teams[1].teamName",
            "$.teams[1].supportedVersions",
            "$.teams[1].defaultVersion",
        ]
    );
}

#[test]
fn at_least_one_team_is_required() {
    let mut cfg = valid_config();
    cfg.teams.clear();
    let err = cfg.validate().unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "$.teams");
}

#[test]
fn env_overrides_replace_scalars() {
    let vars = HashMap::from([
        ("SICS_BASE_URL", "http://localhost:3001"),
        ("SICS_TIMEOUT", "5000"),
        ("SICS_RETRY_ATTEMPTS", "0"),
    ]);
    let cfg = valid_config()
        .with_overrides_from(|name| vars.get(name).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(cfg.base_url, "http://localhost:3001");
    assert_eq!(cfg.api_version, "v1");
    assert_eq!(cfg.timeout, 5000);
    assert_eq!(cfg.retry_attempts, 0);
}

#[test]
fn malformed_env_number_is_an_error() {
    let err = valid_config()
        .with_overrides_from(|name| (name == "SICS_RETRY_ATTEMPTS").then(|| "-1".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Env { name: "SICS_RETRY_ATTEMPTS", .. }));
}

#[test]
fn merge_concatenates_global_actions() {
    let base = parse_config_str(minimal_yaml(), ConfigFormat::Yaml).unwrap();
    let mut overlay = valid_config();
    overlay.base_url = "https://override".to_string();
    overlay.global_actions = vec![sics_core::Action::new(
        "extra",
        "Extra",
        sics_core::ActionCategory::Utility,
        "/flow/extra",
    )];

    let merged = base.merge(overlay);
    assert_eq!(merged.base_url, "https://override");
    let ids: Vec<_> = merged.global_actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["data-transform", "extra"]);
}

#[test]
fn load_config_file_reads_and_validates() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(minimal_yaml().as_bytes()).unwrap();
    let cfg = load_config_file(file.path()).unwrap();
    assert_eq!(cfg.teams[0].team_id, "default");

    let mut bad = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    bad.write_all(br#"{"baseUrl":"","apiVersion":"v1","timeout":1,"retryAttempts":0,"teams":[]}"#)
        .unwrap();
    let err = load_config_file(bad.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_config_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
