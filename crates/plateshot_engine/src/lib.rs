//! Plateshot engine: image-service client, credential pre-flight, effect
//! execution and export.
mod client;
mod credential;
mod engine;
mod export;
mod filename;
mod persist;
mod prompt;
mod types;
mod wire;

pub use client::{ClientSettings, GeminiClient, ImageGenerator};
pub use credential::{
    ensure_access_credential, CredentialProvider, StaticCredentials, API_KEY_ENV_VARS,
};
pub use engine::EngineHandle;
pub use export::{export_images, ExportError, ExportSummary, ExportedImage, MANIFEST_FILENAME};
pub use filename::image_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use plateshot_core::EncodedImage;
pub use prompt::{build_prompt, style_policy, StylePolicy};
pub use types::{
    ApiKey, CredentialError, EditError, EditRequest, EngineEvent, GenerationError,
    GenerationRequest, ServiceFailure,
};
