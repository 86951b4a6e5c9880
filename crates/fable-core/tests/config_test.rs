use fable_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = FableConfig::from_toml("").unwrap();

    // Generation defaults
    assert_eq!(config.generation.top_k, 50);
    assert_eq!(config.generation.tokens_per_round, 50);
    assert_eq!(config.generation.target_max_length, 200);
    assert_eq!(config.generation.inter_ranking_keep, 10);
    assert_eq!(config.generation.max_rounds, 32);
    assert!(!config.generation.starting_prompts.is_empty());
    assert!(config
        .generation
        .starting_prompts
        .iter()
        .all(|p| p.ends_with('\n')));

    // Ranking defaults
    assert_eq!(config.ranking.min_divergence_chars, 10);
    assert!(!config.ranking.coherency_enabled);
    assert!(config.ranking.lexicon_path.is_none());

    // Retrieval defaults
    assert_eq!(config.retrieval.strategy, RetrievalStrategy::Lsa);
    assert_eq!(config.retrieval.images_per_story, 3);
    assert_eq!(config.retrieval.lsa_dimensions, 500);
    assert_eq!(config.retrieval.lsa_max_vocabulary, 4096);

    // Imaging defaults
    assert_eq!(config.imaging.style, StyleKind::None);
    assert_eq!(config.imaging.image_extension, "jpg");

    // Pipeline defaults
    assert_eq!(config.pipeline.max_text_samples, 10);
    assert_eq!(config.pipeline.autocomplete_num_return, 3);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[generation]
tokens_per_round = 20
starting_prompts = ["Once\n"]

[retrieval]
strategy = "joint"
joint_buffer_size = 40

[imaging]
style = "sketch"
"#;
    let config = FableConfig::from_toml(toml).unwrap();
    assert_eq!(config.generation.tokens_per_round, 20);
    assert_eq!(config.generation.starting_prompts, vec!["Once\n".to_string()]);
    // Non-overridden fields keep defaults
    assert_eq!(config.generation.top_k, 50);
    assert_eq!(config.retrieval.strategy, RetrievalStrategy::Joint);
    assert_eq!(config.retrieval.buffer_size(3), 40);
    assert_eq!(config.imaging.style, StyleKind::Sketch);
}

#[test]
fn lsa_buffer_scales_with_requested_images() {
    let config = RetrievalConfig::default();
    assert_eq!(config.buffer_size(3), 15);
    assert_eq!(config.buffer_size(1), 5);
}

#[test]
fn joint_buffer_never_smaller_than_request() {
    let config = RetrievalConfig {
        strategy: RetrievalStrategy::Joint,
        joint_buffer_size: 30,
        ..Default::default()
    };
    assert_eq!(config.buffer_size(50), 50);
}

#[test]
fn zero_tokens_per_round_is_rejected() {
    let err = FableConfig::from_toml("[generation]\ntokens_per_round = 0\n").unwrap_err();
    assert!(err.to_string().contains("tokens_per_round"));
}

#[test]
fn zero_lsa_vocabulary_is_rejected() {
    let err = FableConfig::from_toml("[retrieval]\nlsa_max_vocabulary = 0\n").unwrap_err();
    assert!(err.to_string().contains("lsa_max_vocabulary"));
}

#[test]
fn invalid_top_p_is_rejected() {
    assert!(FableConfig::from_toml("[generation]\ntop_p = 1.5\n").is_err());
}

#[test]
fn malformed_toml_is_config_error() {
    let err = FableConfig::from_toml("[generation\n").unwrap_err();
    assert!(matches!(err, fable_core::FableError::ConfigError(_)));
}

#[test]
fn config_round_trips_through_toml() {
    let config = FableConfig::default();
    let text = config.to_toml().unwrap();
    let parsed = FableConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.generation.top_k, config.generation.top_k);
    assert_eq!(parsed.retrieval.corpus_path, config.retrieval.corpus_path);
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fable.toml");
    std::fs::write(&path, "[pipeline]\nmax_text_samples = 4\n").unwrap();
    let config = FableConfig::load(&path).unwrap();
    assert_eq!(config.pipeline.max_text_samples, 4);
}

#[test]
fn missing_config_file_is_config_error() {
    let err = FableConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
