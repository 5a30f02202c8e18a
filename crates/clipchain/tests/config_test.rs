use clipchain::{ClipchainConfig, Pipeline};
use std::path::PathBuf;

#[test]
fn test_load_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[paths]
temp_dir = "/srv/clipchain/temp"
output_dir = "/srv/clipchain/output"
style_guide = "/srv/clipchain/guide.md"

[video]
endpoint = "fal-ai/veo3/fast"

[pricing]
per_second_usd = 0.25
"#,
    )
    .unwrap();

    let config = ClipchainConfig::load_file(&path).unwrap();

    assert_eq!(config.paths.temp_dir, PathBuf::from("/srv/clipchain/temp"));
    assert_eq!(config.video.endpoint, "fal-ai/veo3/fast");
    assert_eq!(config.video.queue_base_url, "https://queue.fal.run");
    assert_eq!(config.pricing.per_clip(), 2.0);
}

#[test]
fn test_missing_file_is_error() {
    let err = ClipchainConfig::load_file("/definitely/not/here.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to build configuration"));
}

#[test]
fn test_pipeline_from_bundled_config() {
    let config = ClipchainConfig::bundled().unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();

    assert_eq!(pipeline.pricing().per_clip(), 4.0);
    assert!(*pipeline.cleanup_temp());
    assert_eq!(pipeline.videos().aspect_ratio(), "16:9");
    assert_eq!(pipeline.scripts().catalog().len(), 6);
    assert_eq!(pipeline.optimizer().default_model(), "anthropic/claude-3.5-sonnet");
}

#[test]
fn test_custom_character_file() {
    let dir = tempfile::tempdir().unwrap();
    let characters = dir.path().join("characters.toml");
    std::fs::write(
        &characters,
        r#"
[[character]]
key = "chef"
name = "Chef"
description = "a chef in a tall white hat"
voice = "warm"
mannerisms = "tastes everything"
equipment = "a wooden spoon"
"#,
    )
    .unwrap();
    let overlay = format!("[paths]\ncharacters = {:?}\n", characters.display().to_string());

    let config = ClipchainConfig::from_toml_overlay(&overlay).unwrap();
    let pipeline = Pipeline::from_config(&config).unwrap();

    assert_eq!(pipeline.scripts().catalog().len(), 1);
    assert!(pipeline.scripts().catalog().get("chef").is_some());
}
