//! Media metadata via ffprobe.

use clipchain_error::{ClipchainResult, EncoderError, EncoderErrorKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tracing::{debug, instrument};

/// Container and stream summary of a media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
    /// Overall bitrate in bits per second
    pub bitrate: u64,
    /// First video stream
    pub video: Option<VideoStreamInfo>,
    /// First audio stream
    pub audio: Option<AudioStreamInfo>,
}

/// Video stream parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Codec name
    pub codec: String,
}

/// Audio stream parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStreamInfo {
    /// Codec name
    pub codec: String,
    /// Samples per second
    pub sample_rate: u32,
    /// Channel count
    pub channels: u32,
}

// ffprobe reports most numbers as strings.
#[derive(Deserialize)]
struct ProbeOutput {
    format: ProbeFormat,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
}

fn number<T: std::str::FromStr + Default>(value: Option<&String>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

/// Parse a frame rate such as `30000/1001` or `25`.
///
/// ```
/// use clipchain_video::parse_frame_rate;
///
/// assert_eq!(parse_frame_rate("30/1"), Some(30.0));
/// assert_eq!(parse_frame_rate("0/0"), None);
/// ```
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            (den > 0.0).then(|| num / den)
        }
        None => rate.trim().parse().ok(),
    }
}

/// Build a [`VideoInfo`] from ffprobe's JSON output.
pub fn parse_probe_output(json: &str) -> ClipchainResult<VideoInfo> {
    let output: ProbeOutput = serde_json::from_str(json)
        .map_err(|e| EncoderError::new(EncoderErrorKind::ProbeParse(e.to_string())))?;

    let stream = |kind: &str| {
        output
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some(kind))
    };

    let video = stream("video").map(|s| VideoStreamInfo {
        width: s.width.unwrap_or_default(),
        height: s.height.unwrap_or_default(),
        fps: s
            .r_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .unwrap_or_default(),
        codec: s.codec_name.clone().unwrap_or_default(),
    });
    let audio = stream("audio").map(|s| AudioStreamInfo {
        codec: s.codec_name.clone().unwrap_or_default(),
        sample_rate: number(s.sample_rate.as_ref()),
        channels: s.channels.unwrap_or_default(),
    });

    Ok(VideoInfo {
        duration: number(output.format.duration.as_ref()),
        size: number(output.format.size.as_ref()),
        bitrate: number(output.format.bit_rate.as_ref()),
        video,
        audio,
    })
}

/// Run ffprobe on `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn probe(ffprobe: &Path, path: &Path) -> ClipchainResult<VideoInfo> {
    let output = tokio::process::Command::new(ffprobe)
        .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            EncoderError::new(EncoderErrorKind::NotFound {
                program: ffprobe.display().to_string(),
                message: e.to_string(),
            })
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(EncoderError::new(EncoderErrorKind::ProbeFailed(stderr)).into());
    }

    let info = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
    debug!(duration = info.duration, size = info.size, "Probed media");
    Ok(info)
}
