//! Tests for error wrapping and classification.

use clipchain_error::{
    ClipchainError, ClipchainErrorKind, ClipchainResult, ConfigError, ConfigErrorKind,
    EncoderError, EncoderErrorKind, OptimizerError, OptimizerErrorKind, ProviderError,
    ProviderErrorKind, ScriptError, ScriptErrorKind, VideoError, VideoErrorKind,
};

fn fail_with_script_error() -> ClipchainResult<()> {
    Err(ScriptError::new(ScriptErrorKind::WrongSceneCount {
        expected: 5,
        actual: 3,
    }))?
}

#[test]
fn test_question_mark_converts_into_clipchain_error() {
    let err = fail_with_script_error().unwrap_err();
    assert!(matches!(err.kind(), ClipchainErrorKind::Script(_)));
    assert_eq!(err.detail(), "Expected 5 scenes, model returned 3");
}

#[test]
fn test_location_is_captured() {
    let err = ProviderError::new(ProviderErrorKind::Http("boom".into()));
    assert!(err.file.ends_with("error_test.rs"));
    assert!(err.line > 0);
}

#[test]
fn test_validation_classification() {
    let empty: ClipchainError = ScriptError::new(ScriptErrorKind::EmptyCharacter).into();
    assert!(empty.is_validation());

    let vision: ClipchainError =
        OptimizerError::new(OptimizerErrorKind::VisionUnsupported("m".into())).into();
    assert!(vision.is_validation());

    let no_inputs: ClipchainError = EncoderError::new(EncoderErrorKind::NoInputs).into();
    assert!(no_inputs.is_validation());

    let upstream: ClipchainError = ProviderError::new(ProviderErrorKind::Api {
        status: 500,
        message: "down".into(),
    })
    .into();
    assert!(!upstream.is_validation());

    let style: ClipchainError =
        OptimizerError::new(OptimizerErrorKind::StyleGuide("missing".into())).into();
    assert!(!style.is_validation());
}

#[test]
fn test_video_error_names_scene() {
    let err = VideoError::new(VideoErrorKind::Generation {
        scene: 4,
        message: "queue timeout".into(),
    });
    assert_eq!(err.kind.scene(), Some(4));
    let wrapped: ClipchainError = err.into();
    assert!(wrapped.detail().starts_with("Scene 4"));
}

#[test]
fn test_encoder_failure_keeps_stderr_verbatim() {
    let stderr = "[concat @ 0x1] Invalid data\nclip.mp4: Invalid argument";
    let err: ClipchainError = EncoderError::new(EncoderErrorKind::Failed {
        code: Some(1),
        stderr: stderr.to_string(),
    })
    .into();
    assert!(err.detail().contains(stderr));
}

#[test]
fn test_provider_validation_joins_details() {
    let err = ProviderError::new(ProviderErrorKind::Validation {
        status: 422,
        details: vec!["prompt: too long".into(), "duration: invalid".into()],
    });
    assert!(
        err.kind
            .to_string()
            .contains("prompt: too long; duration: invalid")
    );
}

#[test]
fn test_config_detail_omits_location() {
    let err: ClipchainError =
        ConfigError::new(ConfigErrorKind::Presets("missing field `key`".into())).into();
    assert!(matches!(err.kind(), ClipchainErrorKind::Config(_)));
    assert_eq!(err.detail(), "Invalid character presets: missing field `key`");
    assert!(!err.is_validation());
}

#[test]
fn test_clip_count_mismatch_has_no_scene() {
    let err = VideoError::new(VideoErrorKind::ClipCountMismatch {
        expected: 5,
        actual: 4,
    });
    assert_eq!(err.kind.scene(), None);
    let wrapped: ClipchainError = err.into();
    assert_eq!(wrapped.detail(), "Expected 5 clips, generated 4");
}
