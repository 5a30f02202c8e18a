//! Encoder binaries and output encoding parameters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How concatenated videos are encoded.
///
/// # Examples
///
/// ```
/// use clipchain_video::EncoderSettings;
///
/// let settings = EncoderSettings::builder().crf(20u8).build().unwrap();
/// assert_eq!(settings.crf(), &20);
/// assert_eq!(settings.video_codec(), "libx264");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct EncoderSettings {
    /// ffmpeg binary
    ffmpeg: PathBuf,
    /// ffprobe binary
    ffprobe: PathBuf,
    /// Output video codec
    video_codec: String,
    /// Output audio codec
    audio_codec: String,
    /// Encoder speed preset
    preset: String,
    /// Constant rate factor
    crf: u8,
    /// Move the index to the front of the file for streaming
    faststart: bool,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "fast".to_string(),
            crf: 23,
            faststart: true,
        }
    }
}

impl EncoderSettings {
    /// Create a builder.
    pub fn builder() -> EncoderSettingsBuilder {
        EncoderSettingsBuilder::default()
    }

    /// Output options appended after the filter graph.
    pub fn output_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
        ];
        if self.faststart {
            args.push("-movflags".to_string());
            args.push("+faststart".to_string());
        }
        args
    }
}
