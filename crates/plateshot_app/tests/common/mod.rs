use std::sync::{Arc, Mutex};

use plateshot_app::platform::app::App;
use plateshot_core::GenerationConfig;
use plateshot_engine::{
    ApiKey, EditError, EditRequest, EncodedImage, EngineHandle, GenerationError,
    GenerationRequest, ImageGenerator, ServiceFailure, StaticCredentials,
};

/// Fails any dish whose name contains "burnt"; records request names in order.
#[derive(Default)]
pub struct FakeGenerator {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<EncodedImage, GenerationError> {
        self.calls.lock().unwrap().push(request.name.clone());
        if request.name.contains("burnt") {
            return Err(ServiceFailure::Status {
                status: 500,
                message: "kitchen on fire".to_string(),
            }
            .into());
        }
        Ok(EncodedImage::from_bytes("image/png", request.name.as_bytes()))
    }

    async fn edit(&self, request: &EditRequest) -> Result<EncodedImage, EditError> {
        if request.instruction.contains("impossible") {
            return Err(EditError::NoImage);
        }
        Ok(EncodedImage::from_bytes("image/png", request.instruction.as_bytes()))
    }
}

pub fn start_app(key: Option<&str>) -> (App, Arc<FakeGenerator>) {
    plateshot_logging::initialize_for_tests();
    let generator = Arc::new(FakeGenerator::default());
    let credentials = Arc::new(StaticCredentials::new(key.and_then(ApiKey::new)));
    let engine = EngineHandle::new(generator.clone(), credentials).expect("engine starts");
    (App::new(engine, GenerationConfig::default()), generator)
}
