use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use plateshot_core::{Effect, Msg};
use plateshot_engine::{EditRequest, EngineEvent, EngineHandle, GenerationRequest};
use plateshot_logging::{shot_debug, shot_info};

const EVENT_POLL: Duration = Duration::from_millis(50);

/// Hands core effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::EnsureCredential { purpose } => {
                    shot_debug!("EnsureCredential purpose={:?}", purpose);
                    self.engine.ensure_credential(purpose);
                }
                Effect::Generate {
                    dish_id,
                    origin,
                    name,
                    description,
                    config,
                } => {
                    shot_info!("Generate dish={} name='{}' origin={:?}", dish_id.short(), name, origin);
                    let request = GenerationRequest::new(name, description, config);
                    self.engine.generate(dish_id, origin, request);
                }
                Effect::EditImage {
                    dish_id,
                    ticket,
                    image,
                    instruction,
                } => {
                    shot_info!("EditImage dish={} ticket={:?}", dish_id.short(), ticket);
                    self.engine.edit(dish_id, ticket, EditRequest { image, instruction });
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(EVENT_POLL) else {
                continue;
            };
            if msg_tx.send(event_to_msg(event)).is_err() {
                shot_debug!("Message receiver dropped; event loop exiting");
                break;
            }
        });
    }
}

/// Errors cross into the core as their display text.
pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CredentialChecked { purpose, result } => Msg::CredentialChecked {
            purpose,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::GenerationFinished {
            dish_id,
            origin,
            result,
        } => Msg::GenerationFinished {
            dish_id,
            origin,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::EditFinished {
            dish_id,
            ticket,
            result,
        } => Msg::EditFinished {
            dish_id,
            ticket,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
