mod test_utils;

use clipchain_core::{MediaSource, Role, SystemPromptMode};
use clipchain_error::{ClipchainErrorKind, OptimizerErrorKind};
use clipchain_optimizer::{FROM_IMAGE_ORIGINAL, OptimizeRequest};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{GUIDE, MockDriver, MockReply, TEXT_MODEL, VISION_MODEL, optimizer};

fn image() -> MediaSource {
    MediaSource::Url("data:image/png;base64,iVBORw0KGgo=".to_string())
}

#[tokio::test]
async fn test_default_mode_uses_style_guide() {
    let driver = Arc::new(MockDriver::text("  A refined prompt.  "));
    let optimizer = optimizer(driver.clone());

    let result = optimizer
        .optimize(&OptimizeRequest::new("a wizard in a shop").with_character("wizard"))
        .await
        .unwrap();

    assert_eq!(result.original, "a wizard in a shop");
    assert_eq!(result.optimized, "A refined prompt.");
    assert_eq!(result.character, "wizard");
    assert!(result.is_ok());

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].system_text().as_deref(), Some(GUIDE));
    assert_eq!(requests[0].model.as_deref(), Some(VISION_MODEL));
    let user = requests[0].messages[1].text();
    assert!(user.starts_with("Original Prompt: \"a wizard in a shop\""));
    assert!(user.contains("\nCharacter: wizard"));
    assert!(!user.contains("Context:"));
}

#[tokio::test]
async fn test_replace_mode_sends_custom_prompt_only() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let req = OptimizeRequest::new("a castle")
        .with_custom_system_prompt("  Be brief.  ")
        .with_mode(SystemPromptMode::Replace);
    optimizer.optimize(&req).await.unwrap();

    assert_eq!(driver.requests()[0].system_text().as_deref(), Some("Be brief."));
}

#[tokio::test]
async fn test_append_mode_joins_with_blank_line() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let req = OptimizeRequest::new("a castle")
        .with_custom_system_prompt("Be brief.")
        .with_mode(SystemPromptMode::Append);
    optimizer.optimize(&req).await.unwrap();

    let expected = format!("{}\n\nBe brief.", GUIDE);
    assert_eq!(driver.requests()[0].system_text(), Some(expected));
}

#[tokio::test]
async fn test_blank_custom_prompt_falls_back_to_guide() {
    let optimizer = optimizer(Arc::new(MockDriver::text("ok")));

    for mode in [SystemPromptMode::Replace, SystemPromptMode::Append] {
        let prompt = optimizer.system_prompt(mode, Some("   ")).await.unwrap();
        assert_eq!(prompt, GUIDE);
        let prompt = optimizer.system_prompt(mode, None).await.unwrap();
        assert_eq!(prompt, GUIDE);
    }
}

#[tokio::test]
async fn test_empty_prompt_rejected_without_request() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let err = optimizer
        .optimize(&OptimizeRequest::new("   "))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(matches!(
        err.kind(),
        ClipchainErrorKind::Optimizer(e) if matches!(e.kind, OptimizerErrorKind::EmptyPrompt)
    ));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_image_attached_only_for_vision_models() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let vision = OptimizeRequest::new("a castle").with_image(image());
    optimizer.optimize(&vision).await.unwrap();

    let text_only = vision.clone().with_model(TEXT_MODEL);
    optimizer.optimize(&text_only).await.unwrap();

    let requests = driver.requests();
    assert!(requests[0].messages[1].has_image());
    assert!(requests[0].messages[1].text().contains("reference image"));
    assert!(!requests[1].messages[1].has_image());
    assert_eq!(requests[1].model.as_deref(), Some(TEXT_MODEL));
}

#[tokio::test]
async fn test_suggest_leaves_prompt_unchanged() {
    let driver = Arc::new(MockDriver::text("Add camera direction."));
    let optimizer = optimizer(driver.clone());

    let suggestions = optimizer
        .suggest(&OptimizeRequest::new("a robot dancing"))
        .await
        .unwrap();

    assert_eq!(suggestions.prompt, "a robot dancing");
    assert_eq!(suggestions.suggestions, "Add camera direction.");
    assert!(driver.requests()[0].messages[1]
        .text()
        .contains("\"a robot dancing\""));
}

#[tokio::test]
async fn test_generate_from_image_requires_image() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let err = optimizer
        .generate_from_image(&OptimizeRequest::default())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Image data is required"));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_generate_from_image_rejects_text_model() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver.clone());

    let req = OptimizeRequest::default()
        .with_image(image())
        .with_model(TEXT_MODEL);
    let err = optimizer.generate_from_image(&req).await.unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains(TEXT_MODEL));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test]
async fn test_generate_from_image_result() {
    let driver = Arc::new(MockDriver::text("A misty harbor at dawn."));
    let optimizer = optimizer(driver.clone());

    let result = optimizer
        .generate_from_image(&OptimizeRequest::default().with_image(image()))
        .await
        .unwrap();

    assert_eq!(result.original, FROM_IMAGE_ORIGINAL);
    assert_eq!(result.optimized, "A misty harbor at dawn.");
    assert_eq!(result.character, "");
    let requests = driver.requests();
    assert_eq!(requests[0].messages[1].role, Role::User);
    assert!(requests[0].messages[1].has_image());
}

#[tokio::test]
async fn test_batch_keeps_original_on_failure() {
    let driver = Arc::new(MockDriver::new(vec![
        MockReply::Text("first".into()),
        MockReply::Error("rate limited".into()),
        MockReply::Text("third".into()),
    ]));
    let optimizer = optimizer(driver.clone());
    let prompts = vec!["one".to_string(), "two".to_string(), "three".to_string()];

    let results = optimizer.optimize_many(&prompts, "pirate", None).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].optimized, "first");
    assert_eq!(results[1].optimized, "two");
    assert_eq!(results[1].original, "two");
    assert!(results[1].error.as_deref().unwrap().contains("rate limited"));
    assert_eq!(results[2].optimized, "third");
    assert!(results.iter().all(|r| r.character == "pirate"));

    let requests = driver.requests();
    assert!(requests[1].messages[1]
        .text()
        .contains("Context: Scene 2 of 3 in a cohesive story sequence"));
}

#[tokio::test(start_paused = true)]
async fn test_batch_delay_between_items_only() {
    let driver = Arc::new(MockDriver::text("ok"));
    let optimizer = optimizer(driver).with_batch_delay(Duration::from_secs(1));
    let prompts = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let start = tokio::time::Instant::now();
    let results = optimizer.optimize_many(&prompts, "", None).await;

    assert_eq!(results.len(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_original_system_prompt_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.md");
    std::fs::write(&path, "# Guide\nBe vivid.").unwrap();

    let optimizer = clipchain_optimizer::PromptOptimizer::new(
        Arc::new(MockDriver::text("ok")),
        clipchain_optimizer::StyleGuide::from_path(&path),
        clipchain_core::ModelCatalog::openrouter(),
        VISION_MODEL,
    );

    assert_eq!(
        optimizer.original_system_prompt().await.unwrap(),
        "# Guide\nBe vivid."
    );
}
