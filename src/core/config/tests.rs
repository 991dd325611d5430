use super::*;
use crate::core::errors::ModlensError;
use crate::lang::python::ReturnScope;

fn expect_config_error<T: std::fmt::Debug>(result: Result<T>) -> ModlensError {
    result.expect_err("expected configuration failure")
}

#[test]
fn default_configs_validate_successfully() {
    ModlensConfig::default().validate().expect("modlens default");
    SimilarityConfig::default()
        .validate()
        .expect("similarity default");
    IssueThresholds::default()
        .validate()
        .expect("thresholds default");
    PlannerConfig::default().validate().expect("planner default");
}

#[test]
fn empty_yaml_yields_defaults() {
    let config = ModlensConfig::from_yaml_str("   \n").expect("empty yaml");
    assert_eq!(config, ModlensConfig::default());
}

#[test]
fn partial_yaml_overrides_single_threshold() {
    let config = ModlensConfig::from_yaml_str(
        r#"
thresholds:
  max_sloc: 200
extraction:
  return_scope: own_body
"#,
    )
    .expect("partial yaml");

    assert_eq!(config.thresholds.max_sloc, 200);
    assert_eq!(config.thresholds.max_functions, 20);
    assert_eq!(config.extraction.return_scope, ReturnScope::OwnBody);
    assert!((config.similarity.duplicate_threshold - 0.70).abs() < f64::EPSILON);
}

#[test]
fn similarity_thresholds_must_be_ordered() {
    let mut config = ModlensConfig::default();
    config.similarity.duplicate_threshold = 0.9;
    config.similarity.high_similarity_threshold = 0.8;
    let err = expect_config_error(config.validate());
    assert!(matches!(err, ModlensError::Config { field: Some(ref f), .. } if f == "similarity"));
    assert!(format!("{err}").contains("duplicate_threshold"), "{err}");
}

#[test]
fn cohesion_threshold_must_be_unit_range() {
    let mut config = ModlensConfig::default();
    config.thresholds.min_cohesion = 1.5;
    let err = expect_config_error(config.validate());
    assert!(format!("{err}").contains("min_cohesion"), "{err}");
}

#[test]
fn planner_rejects_zero_functions_per_class() {
    let mut config = ModlensConfig::default();
    config.planner.functions_per_class = 0;
    let err = expect_config_error(config.validate());
    assert!(format!("{err}").contains("functions_per_class"), "{err}");
}

#[test]
fn yaml_file_round_trip_preserves_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("modlens.yml");

    let mut config = ModlensConfig::default();
    config.thresholds.max_function_lines = 80;
    config.similarity.parallel = true;
    config.to_yaml_file(&path).expect("write config");

    let loaded = ModlensConfig::from_yaml_file(&path).expect("read config");
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = expect_config_error(ModlensConfig::from_yaml_file("/definitely/not/here.yml"));
    assert!(matches!(err, ModlensError::Io { .. }));
}
