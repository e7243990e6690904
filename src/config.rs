use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Where the attribution document lives and where artifacts go
    #[serde(default)]
    pub paths: PathsConfig,
    /// File names of the four derived artifacts
    #[serde(default)]
    pub outputs: OutputsConfig,
    /// Settings for the image fetcher
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Input and output locations
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// The hand-written attribution document
    #[serde(default = "default_source")]
    pub source: PathBuf,
    /// Directory the derived artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory images are downloaded to and renamed in
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output_dir: default_output_dir(),
            images_dir: default_images_dir(),
        }
    }
}

/// File names of the derived artifacts, relative to the output directory
#[derive(Debug, Deserialize, Clone)]
pub struct OutputsConfig {
    #[serde(default = "default_json_name")]
    pub json: String,
    #[serde(default = "default_compact_name")]
    pub compact: String,
    #[serde(default = "default_licenses_name")]
    pub licenses: String,
    #[serde(default = "default_manifest_name")]
    pub manifest: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            json: default_json_name(),
            compact: default_compact_name(),
            licenses: default_licenses_name(),
            manifest: default_manifest_name(),
        }
    }
}

impl OutputsConfig {
    pub fn manifest_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.manifest)
    }
}

/// Configuration for downloading images and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct DownloadConfig {
    /// File-path endpoint of the hosting service; the percent-encoded title is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Attempts per image, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause after each download, and base of the exponential backoff, in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Extension used when the title has none
    #[serde(default = "default_extension")]
    pub default_extension: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            default_extension: default_extension(),
            timeout_secs: default_timeout(),
        }
    }
}

impl DownloadConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_source() -> PathBuf {
    PathBuf::from("image-attributions.md")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_json_name() -> String {
    "image-attributions.json".to_string()
}

fn default_compact_name() -> String {
    "image-attributions-compact.md".to_string()
}

fn default_licenses_name() -> String {
    "image-attributions-licenses.md".to_string()
}

fn default_manifest_name() -> String {
    "image-download-manifest.csv".to_string()
}

pub(crate) fn default_endpoint() -> String {
    "https://commons.wikimedia.org/wiki/Special:FilePath".to_string()
}

fn default_user_agent() -> String {
    "ApothecaryRecipesAttributionBot/1.0".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    1500
}

fn default_extension() -> String {
    ".jpg".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HERBS__ prefix
    /// 2. attributions.toml in the current directory, or `file` when given
    /// 3. Default values
    ///
    /// Environment variable format: HERBS__DOWNLOAD__MAX_ATTEMPTS
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        load_config(file)
    }
}

/// Load configuration, see [`AppConfig::load`]
pub fn load_config(file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file_source = match file {
        // An explicitly requested file must exist
        Some(path) => File::from(path).required(true),
        None => File::with_name("attributions").required(false),
    };

    let settings = Config::builder()
        .add_source(file_source)
        // Use double underscore for nested: HERBS__PATHS__SOURCE
        .add_source(
            Environment::with_prefix("HERBS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
