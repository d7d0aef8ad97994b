use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use plateshot_core::{GenerationConfig, ImageResolution, PhotoStyle};
use plateshot_engine::ClientSettings;
use plateshot_logging::shot_info;
use serde::{Deserialize, Serialize};

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "plateshot.ron";

/// Settings read from a RON file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub style: PhotoStyle,
    #[serde(with = "resolution_tag")]
    pub resolution: ImageResolution,
    pub output_dir: PathBuf,
    pub base_url: String,
    pub generate_model: String,
    pub edit_model: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let generation = GenerationConfig::default();
        Self {
            style: generation.style,
            resolution: generation.resolution,
            output_dir: PathBuf::from("plateshot-output"),
            base_url: client.base_url,
            generate_model: client.generate_model,
            edit_model: client.edit_model,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            style: self.style,
            resolution: self.resolution,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            generate_model: self.generate_model.clone(),
            edit_model: self.edit_model.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

pub fn parse_config(text: &str) -> Result<AppConfig, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Loads `explicit` if given (it must exist), else `plateshot.ron` from the
/// working directory if present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !fallback.is_file() {
                return Ok(AppConfig::default());
            }
            fallback
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    shot_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

// RON identifiers cannot start with a digit, so the tag is stored as a string.
mod resolution_tag {
    use plateshot_core::ImageResolution;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &ImageResolution, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.tag())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ImageResolution, D::Error> {
        let tag = String::deserialize(d)?;
        tag.parse().map_err(D::Error::custom)
    }
}
