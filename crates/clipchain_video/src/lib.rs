//! Scene clip generation and assembly.
//!
//! [`VideoGenerator`] drives a [`clipchain_interface::VideoBackend`] one
//! scene at a time and stops at the first failure. [`Concatenator`] joins
//! the clips with ffmpeg using a concat filter graph that keeps input
//! order. [`probe`], [`validate_files`] and [`cleanup`] are helpers around
//! the clip files.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod concat;
mod events;
mod files;
mod generator;
mod probe;
mod settings;

pub use concat::{Concatenator, concat_filter, sanitize_name};
pub use events::{EventSender, emit};
pub use files::{cleanup, validate_files};
pub use generator::{DEFAULT_ASPECT_RATIO, VideoGenerator, progress_percent};
pub use probe::{
    AudioStreamInfo, VideoInfo, VideoStreamInfo, parse_frame_rate, parse_probe_output, probe,
};
pub use settings::{EncoderSettings, EncoderSettingsBuilder};
