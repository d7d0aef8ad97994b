use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use plateshot_core::{CredentialPurpose, DishId, EditTicket, GenerationOrigin};
use plateshot_logging::{shot_debug, shot_info, shot_warn};

use crate::credential::{ensure_access_credential, CredentialProvider};
use crate::{EditRequest, EngineEvent, GenerationRequest, ImageGenerator};

enum EngineCommand {
    EnsureCredential {
        purpose: CredentialPurpose,
    },
    Generate {
        dish_id: DishId,
        origin: GenerationOrigin,
        request: GenerationRequest,
    },
    Edit {
        dish_id: DishId,
        ticket: EditTicket,
        request: EditRequest,
    },
}

/// Runs image-service calls on a background runtime.
///
/// Every command becomes its own task and reports one [`EngineEvent`]. The
/// engine does no sequencing; callers decide what is in flight.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("plateshot-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let generator = generator.clone();
                    let credentials = credentials.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event =
                            handle_command(generator.as_ref(), credentials.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                shot_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn ensure_credential(&self, purpose: CredentialPurpose) {
        self.send(EngineCommand::EnsureCredential { purpose });
    }

    pub fn generate(&self, dish_id: DishId, origin: GenerationOrigin, request: GenerationRequest) {
        self.send(EngineCommand::Generate {
            dish_id,
            origin,
            request,
        });
    }

    pub fn edit(&self, dish_id: DishId, ticket: EditTicket, request: EditRequest) {
        self.send(EngineCommand::Edit {
            dish_id,
            ticket,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            shot_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    generator: &dyn ImageGenerator,
    credentials: &dyn CredentialProvider,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::EnsureCredential { purpose } => {
            let result = ensure_access_credential(credentials).await;
            EngineEvent::CredentialChecked { purpose, result }
        }
        EngineCommand::Generate {
            dish_id,
            origin,
            request,
        } => {
            shot_info!(
                "Generating dish={} name='{}' style={} resolution={} origin={:?}",
                dish_id.short(),
                request.name,
                request.style.keyword(),
                request.resolution,
                origin
            );
            let result = generator.generate(&request).await;
            match &result {
                Ok(image) => shot_info!(
                    "Generated dish={} mime={} bytes={}",
                    dish_id.short(),
                    image.mime_type,
                    image.byte_len()
                ),
                Err(err) => shot_warn!("Generation failed dish={}: {}", dish_id.short(), err),
            }
            EngineEvent::GenerationFinished {
                dish_id,
                origin,
                result,
            }
        }
        EngineCommand::Edit {
            dish_id,
            ticket,
            request,
        } => {
            shot_info!(
                "Editing dish={} instruction_len={}",
                dish_id.short(),
                request.instruction.len()
            );
            let result = generator.edit(&request).await;
            if let Err(err) = &result {
                shot_warn!("Edit failed dish={}: {}", dish_id.short(), err);
            }
            EngineEvent::EditFinished {
                dish_id,
                ticket,
                result,
            }
        }
    }
}
