//! Order-preserving concatenation of scene clips with ffmpeg.

use crate::{EncoderSettings, VideoInfo};
use clipchain_error::{
    ClipchainResult, EncoderError, EncoderErrorKind, StorageError, StorageErrorKind,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::{debug, error, info, instrument};

/// Filter graph joining the video and audio of `n` inputs in input order.
///
/// ```
/// use clipchain_video::concat_filter;
///
/// assert_eq!(
///     concat_filter(2),
///     "[0:v] [0:a] [1:v] [1:a] concat=n=2:v=1:a=1 [outv] [outa]"
/// );
/// ```
pub fn concat_filter(n: usize) -> String {
    let pads = (0..n)
        .map(|i| format!("[{i}:v] [{i}:a]"))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} concat=n={}:v=1:a=1 [outv] [outa]", pads, n)
}

/// Replace every character outside `[A-Za-z0-9]` with `_`.
///
/// ```
/// use clipchain_video::sanitize_name;
///
/// assert_eq!(sanitize_name("Space Pirate!"), "Space_Pirate_");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Joins clips into the final story video.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct Concatenator {
    /// Encoding parameters
    settings: EncoderSettings,
    /// Directory receiving final videos
    output_dir: PathBuf,
}

impl Concatenator {
    /// Create a concatenator writing into `output_dir`.
    pub fn new(settings: EncoderSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            output_dir: output_dir.into(),
        }
    }

    /// Final video path for a character: `<sanitized>_story_<millis>.mp4`.
    pub fn output_path(&self, character: &str) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        self.output_dir
            .join(format!("{}_story_{}.mp4", sanitize_name(character), millis))
    }

    /// Full ffmpeg argument list for joining `inputs` into `output`.
    pub fn command_args(&self, inputs: &[PathBuf], output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into()];
        for input in inputs {
            args.push("-i".into());
            args.push(input.as_os_str().to_owned());
        }
        args.push("-filter_complex".into());
        args.push(concat_filter(inputs.len()).into());
        for label in ["[outv]", "[outa]"] {
            args.push("-map".into());
            args.push(label.into());
        }
        args.extend(self.settings.output_args().into_iter().map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Join `inputs` in order and return the output path.
    ///
    /// # Errors
    ///
    /// Fails when `inputs` is empty, when an input is missing, when ffmpeg
    /// cannot be started, or when it exits unsuccessfully. In the last case
    /// the error carries ffmpeg's stderr unchanged.
    #[instrument(skip(self, inputs), fields(clips = inputs.len()))]
    pub async fn concatenate(
        &self,
        inputs: &[PathBuf],
        character: &str,
    ) -> ClipchainResult<PathBuf> {
        if inputs.is_empty() {
            return Err(EncoderError::new(EncoderErrorKind::NoInputs).into());
        }
        for input in inputs {
            if tokio::fs::metadata(input).await.is_err() {
                return Err(EncoderError::new(EncoderErrorKind::InputMissing(
                    input.display().to_string(),
                ))
                .into());
            }
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    self.output_dir.display(),
                    e
                )))
            })?;

        let output = self.output_path(character);
        let args = self.command_args(inputs, &output);
        info!(output = %output.display(), "Concatenating clips");
        debug!(program = %self.settings.ffmpeg().display(), ?args, "Starting ffmpeg");

        let result = tokio::process::Command::new(self.settings.ffmpeg())
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                EncoderError::new(EncoderErrorKind::NotFound {
                    program: self.settings.ffmpeg().display().to_string(),
                    message: e.to_string(),
                })
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            error!(code = ?result.status.code(), "ffmpeg failed");
            return Err(EncoderError::new(EncoderErrorKind::Failed {
                code: result.status.code(),
                stderr,
            })
            .into());
        }

        info!(output = %output.display(), "Concatenation complete");
        Ok(output)
    }

    /// Probe a file with the configured ffprobe.
    pub async fn probe(&self, path: &Path) -> ClipchainResult<VideoInfo> {
        crate::probe(self.settings.ffprobe(), path).await
    }
}
