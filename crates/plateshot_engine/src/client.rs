use std::sync::Arc;
use std::time::Duration;

use plateshot_core::EncodedImage;
use plateshot_logging::shot_debug;
use reqwest::header::CONTENT_TYPE;

use crate::prompt::{build_prompt, style_policy};
use crate::wire::{
    ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfigBody,
    ImageConfigBody, Part,
};
use crate::{
    CredentialProvider, EditError, EditRequest, GenerationError, GenerationRequest, ServiceFailure,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub generate_model: String,
    pub edit_model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            generate_model: "gemini-3-pro-image-preview".to_string(),
            edit_model: "gemini-2.5-flash-image".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The external image service: text-to-image and instruction-guided edits.
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<EncodedImage, GenerationError>;

    async fn edit(&self, request: &EditRequest) -> Result<EncodedImage, EditError>;
}

/// [`ImageGenerator`] backed by the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    settings: ClientSettings,
    credentials: Arc<dyn CredentialProvider>,
}

impl GeminiClient {
    pub fn new(settings: ClientSettings, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // Built per call so a key selected in the meantime is picked up.
    fn build_client(&self) -> Result<reqwest::Client, ServiceFailure> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ServiceFailure::Transport(err.to_string()))
    }

    fn endpoint(&self, model: &str) -> Result<reqwest::Url, ServiceFailure> {
        let base = self.settings.base_url.trim_end_matches('/');
        let raw = format!("{base}/v1beta/models/{model}:generateContent");
        reqwest::Url::parse(&raw)
            .map_err(|err| ServiceFailure::Transport(format!("invalid endpoint {raw}: {err}")))
    }

    async fn call(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ServiceFailure> {
        let key = self
            .credentials
            .current()
            .ok_or(ServiceFailure::MissingCredential)?;
        let url = self.endpoint(model)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| ServiceFailure::InvalidResponse(err.to_string()))?;
        let client = self.build_client()?;

        shot_debug!("POST {} ({} bytes)", url, payload.len());
        let response = client
            .post(url)
            .header(API_KEY_HEADER, key.expose())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(ServiceFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ServiceFailure::InvalidResponse(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<EncodedImage, GenerationError> {
        let policy = style_policy(request.style);
        let prompt = build_prompt(&request.name, &request.description, request.style);
        let mut body = GenerateContentRequest::from_parts(vec![Part::text(prompt)]);
        body.generation_config = Some(GenerationConfigBody {
            image_config: ImageConfigBody {
                aspect_ratio: policy.aspect_ratio.to_string(),
                image_size: request.resolution.tag().to_string(),
            },
        });

        let response = self.call(&self.settings.generate_model, &body).await?;
        response.into_first_image().ok_or(GenerationError::NoImage)
    }

    async fn edit(&self, request: &EditRequest) -> Result<EncodedImage, EditError> {
        // The source payload must be valid base64.
        request.image.decode()?;
        let body = GenerateContentRequest::from_parts(vec![
            Part::text(request.instruction.clone()),
            Part::image(&request.image),
        ]);

        let response = self.call(&self.settings.edit_model, &body).await?;
        response.into_first_image().ok_or(EditError::NoImage)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceFailure {
    if err.is_timeout() {
        return ServiceFailure::Timeout;
    }
    ServiceFailure::Transport(err.to_string())
}
