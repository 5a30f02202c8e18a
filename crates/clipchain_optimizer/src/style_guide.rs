//! The style guide used as the optimizer's default system prompt.

use clipchain_error::{ClipchainResult, OptimizerError, OptimizerErrorKind};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{info, instrument};

/// Style guide text, read from disk on first use and then reused.
///
/// The value is immutable once loaded. A failed read is not cached, so a
/// later call retries.
///
/// # Examples
///
/// ```
/// use clipchain_optimizer::StyleGuide;
///
/// # #[tokio::main]
/// # async fn main() {
/// let guide = StyleGuide::from_text("Be vivid.");
/// assert_eq!(guide.text().await.unwrap(), "Be vivid.");
/// # }
/// ```
#[derive(Debug)]
pub struct StyleGuide {
    path: Option<PathBuf>,
    text: OnceCell<String>,
}

impl StyleGuide {
    /// A guide that will be read from `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            text: OnceCell::new(),
        }
    }

    /// A guide with fixed text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: OnceCell::from(text.into()),
        }
    }

    /// Source file, when the guide is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the text has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.text.initialized()
    }

    /// The guide text, loading it if needed.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub async fn text(&self) -> ClipchainResult<&str> {
        let text = self
            .text
            .get_or_try_init(|| async {
                let path = self.path.as_ref().ok_or_else(|| {
                    OptimizerError::new(OptimizerErrorKind::StyleGuide(
                        "no style guide configured".to_string(),
                    ))
                })?;
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    OptimizerError::new(OptimizerErrorKind::StyleGuide(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                })?;
                info!(bytes = text.len(), "Loaded style guide");
                Ok::<_, OptimizerError>(text)
            })
            .await?;
        Ok(text.as_str())
    }
}
