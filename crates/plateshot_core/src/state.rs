use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, DishCardView, EditView};
use crate::{BulkPass, DishId, DishRegistry, DishStatus, EditTicket, GenerationConfig};

pub const EDIT_FAILED_NOTICE: &str = "Failed to edit image. Please try again.";

/// An edit submitted and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub ticket: EditTicket,
    pub instruction: String,
}

/// The single editor session. Only one dish is edited at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub dish_id: DishId,
    pub pending: Option<PendingEdit>,
    pub error: Option<String>,
}

impl EditSession {
    pub(crate) fn new(dish_id: DishId) -> Self {
        Self {
            dish_id,
            pending: None,
            error: None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// True if `ticket` is the submission this session is waiting on.
    pub fn awaits(&self, ticket: EditTicket) -> bool {
        self.pending.as_ref().is_some_and(|p| p.ticket == ticket)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) registry: DishRegistry,
    pub(crate) config: GenerationConfig,
    pub(crate) menu_input: String,
    pub(crate) pass: BulkPass,
    pub(crate) retry_checks: BTreeSet<DishId>,
    pub(crate) edit: Option<EditSession>,
    pub(crate) last_edit_ticket: EditTicket,
    pub(crate) notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GenerationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &DishRegistry {
        &self.registry
    }

    pub fn config(&self) -> GenerationConfig {
        self.config
    }

    pub fn is_processing(&self) -> bool {
        self.pass.is_processing()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// True when nothing is running or waiting on the engine.
    pub fn is_quiescent(&self) -> bool {
        !self.pass.is_processing()
            && self.retry_checks.is_empty()
            && !self.edit.as_ref().is_some_and(EditSession::is_in_flight)
            && self
                .registry
                .iter()
                .all(|entry| entry.status != DishStatus::Generating)
    }

    pub fn view(&self) -> AppViewModel {
        let pending_count = self.registry.pending_count();
        let processing = self.pass.is_processing();
        let generate_label = if processing {
            "Processing Studio Queue...".to_string()
        } else {
            let plural = if pending_count == 1 { "" } else { "s" };
            format!("Generate {pending_count} Photo{plural}")
        };

        let dishes = self
            .registry
            .iter()
            .enumerate()
            .map(|(index, entry)| DishCardView {
                position: index + 1,
                dish_id: entry.id,
                name: entry.name.clone(),
                description: entry.description.clone(),
                status: entry.status,
                image_bytes: entry.image.as_ref().map(|image| image.byte_len()),
                error: entry.error.clone(),
                can_retry: entry.status.is_pending(),
                can_edit: entry.status == DishStatus::Completed && entry.image.is_some(),
            })
            .collect();

        let edit = self.edit.as_ref().map(|session| EditView {
            dish_id: session.dish_id,
            dish_name: self
                .registry
                .get(session.dish_id)
                .map(|entry| entry.name.clone())
                .unwrap_or_default(),
            in_flight: session.is_in_flight(),
            error: session.error.clone(),
        });

        AppViewModel {
            dishes,
            menu_input: self.menu_input.clone(),
            can_add: !self.menu_input.trim().is_empty(),
            style: self.config.style,
            resolution: self.config.resolution,
            processing,
            pending_count,
            generate_label,
            can_generate_all: !processing && pending_count > 0,
            edit,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn issue_edit_ticket(&mut self) -> EditTicket {
        self.last_edit_ticket = self.last_edit_ticket.next();
        self.last_edit_ticket
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
