use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// An image carried as its media type plus base64 text, i.e. a data URI split in two.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ImageDecodeError {
    #[error("not a data uri")]
    NotDataUri,
    #[error("data uri is not base64 encoded")]
    NotBase64Uri,
    #[error("data uri has no media type")]
    MissingMediaType,
    #[error("invalid base64 payload: {0}")]
    InvalidPayload(String),
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encodes raw image bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Splits `data:<mime>;base64,<payload>` into its parts.
    pub fn parse_data_uri(uri: &str) -> Result<Self, ImageDecodeError> {
        let rest = uri
            .trim()
            .strip_prefix(DATA_PREFIX)
            .ok_or(ImageDecodeError::NotDataUri)?;
        let (mime_type, data) = rest
            .split_once(BASE64_MARKER)
            .ok_or(ImageDecodeError::NotBase64Uri)?;
        if mime_type.is_empty() {
            return Err(ImageDecodeError::MissingMediaType);
        }
        Ok(Self::new(mime_type, data))
    }

    pub fn to_data_uri(&self) -> String {
        format!("{DATA_PREFIX}{}{BASE64_MARKER}{}", self.mime_type, self.data)
    }

    /// Decodes the payload back into bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ImageDecodeError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|err| ImageDecodeError::InvalidPayload(err.to_string()))
    }

    /// Approximate decoded size, without decoding.
    pub fn byte_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }

    /// File extension matching the media type.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

impl FromStr for EncodedImage {
    type Err = ImageDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_data_uri(s)
    }
}

// Payloads run to megabytes; keep them out of debug output.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}
