use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStyle {
    Rustic,
    #[default]
    Modern,
    Social,
}

impl PhotoStyle {
    pub const ALL: [PhotoStyle; 3] = [PhotoStyle::Rustic, PhotoStyle::Modern, PhotoStyle::Social];

    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            PhotoStyle::Rustic => "Rustic/Dark",
            PhotoStyle::Modern => "Bright/Modern",
            PhotoStyle::Social => "Social Media (Flat Lay)",
        }
    }

    /// Short keyword accepted on the command line and in config files.
    pub fn keyword(self) -> &'static str {
        match self {
            PhotoStyle::Rustic => "rustic",
            PhotoStyle::Modern => "modern",
            PhotoStyle::Social => "social",
        }
    }
}

impl fmt::Display for PhotoStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingParseError {
    #[error("unknown style '{0}' (expected rustic, modern or social)")]
    UnknownStyle(String),
    #[error("unknown resolution '{0}' (expected 1K, 2K or 4K)")]
    UnknownResolution(String),
}

impl FromStr for PhotoStyle {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PhotoStyle::ALL
            .into_iter()
            .find(|style| {
                style.keyword().eq_ignore_ascii_case(wanted)
                    || style.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SettingParseError::UnknownStyle(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageResolution {
    #[default]
    Res1K,
    Res2K,
    Res4K,
}

impl ImageResolution {
    pub const ALL: [ImageResolution; 3] = [
        ImageResolution::Res1K,
        ImageResolution::Res2K,
        ImageResolution::Res4K,
    ];

    /// Literal size tag sent to the image service.
    pub fn tag(self) -> &'static str {
        match self {
            ImageResolution::Res1K => "1K",
            ImageResolution::Res2K => "2K",
            ImageResolution::Res4K => "4K",
        }
    }
}

impl fmt::Display for ImageResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ImageResolution {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ImageResolution::ALL
            .into_iter()
            .find(|res| res.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SettingParseError::UnknownResolution(wanted.to_string()))
    }
}

/// Settings applied to whichever dishes a generation picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationConfig {
    pub style: PhotoStyle,
    pub resolution: ImageResolution,
}
