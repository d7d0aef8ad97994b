use std::fmt;

use plateshot_core::{
    CredentialPurpose, DishId, EditTicket, EncodedImage, GenerationConfig, GenerationOrigin,
    ImageDecodeError, ImageResolution, PhotoStyle,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub name: String,
    pub description: String,
    pub style: PhotoStyle,
    pub resolution: ImageResolution,
}

impl GenerationRequest {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            style: config.style,
            resolution: config.resolution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub image: EncodedImage,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CredentialChecked {
        purpose: CredentialPurpose,
        result: Result<(), CredentialError>,
    },
    GenerationFinished {
        dish_id: DishId,
        origin: GenerationOrigin,
        result: Result<EncodedImage, GenerationError>,
    },
    EditFinished {
        dish_id: DishId,
        ticket: EditTicket,
        result: Result<EncodedImage, EditError>,
    },
}

/// Failure talking to the image service, shared by generate and edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceFailure {
    #[error("no access credential available")]
    MissingCredential,
    /// Non-success status. `message` is the service's own text when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("No image generated")]
    NoImage,
    #[error(transparent)]
    Service(#[from] ServiceFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("No edited image returned")]
    NoImage,
    #[error("source image unusable: {0}")]
    InvalidImage(#[from] ImageDecodeError),
    #[error(transparent)]
    Service(#[from] ServiceFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("no access credential available")]
    Unavailable,
    #[error("credential selection failed: {0}")]
    Selection(String),
}

/// An API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Blank keys are treated as absent.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        (!key.is_empty()).then_some(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
