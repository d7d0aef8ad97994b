use std::sync::mpsc;
use std::time::Duration;

use plateshot_core::{update, AppState, AppViewModel, DishId, GenerationConfig, Msg};
use plateshot_engine::EngineHandle;
use plateshot_logging::{shot_debug, shot_warn};

use super::effects::EffectRunner;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Owns the core state and drives it with user and engine messages.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl App {
    pub fn new(engine: EngineHandle, config: GenerationConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            state: AppState::with_config(config),
            runner: EffectRunner::new(engine, msg_tx),
            msg_rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Id of the dish shown at 1-based `position`.
    pub fn dish_at(&self, position: usize) -> Option<DishId> {
        position
            .checked_sub(1)
            .and_then(|index| self.state.registry().id_at(index))
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if !effects.is_empty() {
            shot_debug!("Dispatching {} effect(s)", effects.len());
        }
        self.runner.enqueue(effects);
    }

    /// Feeds engine messages into the core until nothing is in flight.
    /// `on_change` sees the view after every change.
    pub fn settle(&mut self, mut on_change: impl FnMut(&AppViewModel)) {
        self.state.consume_dirty();
        while !self.state.is_quiescent() {
            match self.msg_rx.recv_timeout(TICK_INTERVAL) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => self.dispatch(Msg::Tick),
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    shot_warn!("Engine event loop stopped while work was in flight");
                    return;
                }
            }
            if self.state.consume_dirty() {
                on_change(&self.state.view());
            }
        }
    }
}
