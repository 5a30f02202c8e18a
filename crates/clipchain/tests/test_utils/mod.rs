//! Shared fixtures: scripted providers, a fake ffmpeg, a local server.

pub mod mock_backend;
pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockOutcome};
#[allow(unused_imports)]
pub use mock_driver::{MockDriver, MockReply};

use clipchain::{
    CharacterCatalog, Concatenator, EncoderSettings, ModelCatalog, Pipeline, PromptOptimizer,
    ScriptGenerator, StyleGuide, VideoGenerator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const GUIDE: &str = "Style guide text.";

/// Reply holding three scene scripts.
#[allow(dead_code)]
pub fn scripts_reply() -> MockReply {
    let scenes = [
        "Scene 1: arrives at the shop",
        "Scene 2: tries a laptop",
        "Scene 3: leaves delighted",
    ];
    MockReply::Text(serde_json::to_string(&scenes).unwrap())
}

/// Executable that writes a placeholder to its last argument, like a
/// successful ffmpeg run.
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_ffmpeg(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ffmpeg");
    std::fs::write(
        &path,
        "#!/bin/sh\nfor last; do :; done\necho joined > \"$last\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Pipeline over scripted providers, rooted at `dir`.
#[allow(dead_code)]
pub fn pipeline(
    dir: &Path,
    driver: Arc<MockDriver>,
    backend: Arc<MockBackend>,
    ffmpeg: PathBuf,
) -> Pipeline {
    let scripts = ScriptGenerator::new(driver.clone(), CharacterCatalog::bundled().unwrap());
    let optimizer = PromptOptimizer::new(
        driver,
        StyleGuide::from_text(GUIDE),
        ModelCatalog::openrouter(),
        "openai/gpt-4o",
    )
    .with_batch_delay(Duration::ZERO);
    let videos = VideoGenerator::new(backend, dir.join("temp"));
    let settings = EncoderSettings::builder().ffmpeg(ffmpeg).build().unwrap();
    let concatenator = Concatenator::new(settings, dir.join("output"));
    Pipeline::new(scripts, optimizer, videos, concatenator)
}

/// Serve `router` on 127.0.0.1 and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
