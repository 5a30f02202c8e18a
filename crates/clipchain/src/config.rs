//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! - bundled defaults (`clipchain.toml` compiled into the binary)
//! - `~/.config/clipchain/clipchain.toml`
//! - `./clipchain.toml`
//! - `CLIPCHAIN__<SECTION>__<KEY>` environment variables
//!
//! API keys never live in these files; each provider section names the
//! environment variable holding its key.

use clipchain_core::PricingPolicy;
use clipchain_error::{ClipchainError, ClipchainResult, ConfigError, ConfigErrorKind};
use clipchain_video::EncoderSettings;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../clipchain.toml");

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "CLIPCHAIN";

/// HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Port
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root for per-run clip directories
    pub temp_dir: PathBuf,
    /// Final videos, served under `/output`
    pub output_dir: PathBuf,
    /// Prompt optimizer style guide
    pub style_guide: PathBuf,
    /// Character presets replacing the bundled set
    #[serde(default)]
    pub characters: Option<PathBuf>,
}

/// Script generation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Model id
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion limit
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// Prompt optimizer model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Model used when a request names none
    pub default_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion limit
    pub max_tokens: u32,
    /// Pause between batch items in milliseconds
    pub batch_delay_ms: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// `HTTP-Referer` attribution header
    #[serde(default)]
    pub referer: Option<String>,
    /// `X-Title` attribution header
    #[serde(default)]
    pub title: Option<String>,
}

impl OptimizerConfig {
    /// Batch pause as a duration.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

/// Video generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Model endpoint on the queue
    pub endpoint: String,
    /// Queue host
    pub queue_base_url: String,
    /// Output aspect ratio
    pub aspect_ratio: String,
    /// Delay between status polls in milliseconds
    pub poll_interval_ms: u64,
    /// Give up on a clip after this many seconds
    pub max_wait_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl VideoConfig {
    /// Poll delay as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Deadline as a duration.
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

/// Run behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Delete scene clips after concatenation
    pub cleanup_temp: bool,
}

/// Complete application configuration.
///
/// # Examples
///
/// ```
/// use clipchain::ClipchainConfig;
///
/// let config = ClipchainConfig::bundled().unwrap();
/// assert_eq!(config.server.port, 3000);
/// assert_eq!(config.pricing.per_clip(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipchainConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Filesystem locations
    pub paths: PathsConfig,
    /// Script generation
    pub scripts: ScriptsConfig,
    /// Prompt optimization
    pub optimizer: OptimizerConfig,
    /// Video generation
    pub video: VideoConfig,
    /// ffmpeg settings
    pub encoder: EncoderSettings,
    /// Cost model
    pub pricing: PricingPolicy,
    /// Run behaviour
    pub pipeline: PipelineConfig,
}

fn build_error(e: config::ConfigError) -> ClipchainError {
    ConfigError::new(ConfigErrorKind::Build(e.to_string())).into()
}

fn parse_error(e: config::ConfigError) -> ClipchainError {
    ConfigError::new(ConfigErrorKind::Parse(e.to_string())).into()
}

impl ClipchainConfig {
    /// Load with the full precedence chain.
    #[instrument]
    pub fn load() -> ClipchainResult<Self> {
        debug!("Loading configuration: env > ./clipchain.toml > home > bundled");
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let user = config_dir.join("clipchain").join("clipchain.toml");
            builder = builder.add_source(File::from(user).required(false));
        }
        builder = builder.add_source(File::with_name("clipchain").required(false));
        builder = builder.add_source(env_source());

        builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Bundled defaults, overridden by one explicit file.
    pub fn load_file(path: impl AsRef<Path>) -> ClipchainResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration file");
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.to_path_buf()))
            .add_source(env_source())
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Bundled defaults with a TOML overlay, ignoring files and environment.
    pub fn from_toml_overlay(overlay: &str) -> ClipchainResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overlay, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Bundled defaults only.
    pub fn bundled() -> ClipchainResult<Self> {
        Self::from_toml_overlay("")
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
