use lh_domain::config::{Config, ConfigSeverity, ROLE_ASSISTANT, ROLE_SUMMARIZER};

#[test]
fn default_thresholds() {
    let config = Config::default();
    assert_eq!(config.reduction.max_value_chars, 5_000);
    assert_eq!(config.summarizer.chunk_chars, 3_000);
    assert_eq!(config.summarizer.chunk_max_tokens, 800);
    assert_eq!(config.summarizer.fusion_max_tokens, 1_500);
    assert_eq!(config.summarizer.fusion_threshold_chars, 15_000);
    assert_eq!(config.summarizer.max_concurrency, 1);
    assert!((config.summarizer.temperature - 0.3).abs() < f32::EPSILON);
}

#[test]
fn empty_toml_matches_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.summarizer.chunk_chars, 3_000);
    assert_eq!(config.chat.max_tokens, 2_000);
    assert_eq!(config.llm.default_timeout_ms, 60_000);
    assert!(config.llm.roles.contains_key(ROLE_SUMMARIZER));
    assert!(config.llm.roles.contains_key(ROLE_ASSISTANT));
}

#[test]
fn default_config_validates_clean() {
    let config = Config::default();
    assert!(config.validate().is_empty());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let toml_str = r#"
[summarizer]
chunk_chars = 1000
max_concurrency = 4

[chat]
temperature = 1.2
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.summarizer.chunk_chars, 1_000);
    assert_eq!(config.summarizer.max_concurrency, 4);
    assert_eq!(config.summarizer.fusion_threshold_chars, 15_000);
    assert!((config.chat.temperature - 1.2).abs() < f32::EPSILON);
}

#[test]
fn zero_chunk_size_is_an_error() {
    let toml_str = r#"
[summarizer]
chunk_chars = 0
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.field == "summarizer.chunk_chars" && i.severity == ConfigSeverity::Error));
}

#[test]
fn role_with_unknown_provider_warns() {
    let toml_str = r#"
[llm.roles.summarizer]
model = "openai/gpt-4o-mini"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let issues = config.validate();
    let issue = issues
        .iter()
        .find(|i| i.field == "llm.roles.summarizer.model")
        .expect("warning for unknown provider");
    assert_eq!(issue.severity, ConfigSeverity::Warning);
    assert!(issue.to_string().starts_with("[WARN]"));
}

#[test]
fn out_of_range_chat_temperature_is_an_error() {
    let toml_str = r#"
[chat]
temperature = 2.5
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(config
        .validate()
        .iter()
        .any(|i| i.field == "chat.temperature"));
}
