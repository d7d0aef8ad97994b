use crate::queue::{apply_generation_result, start_generation};
use crate::state::{EditSession, PendingEdit, EDIT_FAILED_NOTICE};
use crate::{
    parse_menu, AppState, CredentialPurpose, DishPatch, DishStatus, EditTicket, Effect,
    GenerationOrigin, Msg,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::MenuInputChanged(text) => {
            if state.menu_input != text {
                state.menu_input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MenuSubmitted => {
            let dishes = parse_menu(&state.menu_input);
            if dishes.is_empty() {
                return (state, Vec::new());
            }
            state.registry.append(dishes);
            state.menu_input.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::StyleSelected(style) => {
            if state.config.style != style {
                state.config.style = style;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResolutionSelected(resolution) => {
            if state.config.resolution != resolution {
                state.config.resolution = resolution;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::GenerateAllClicked => {
            let pending = state.registry.pending_ids();
            if state.pass.begin(pending) {
                state.notice = None;
                state.mark_dirty();
                vec![Effect::EnsureCredential {
                    purpose: CredentialPurpose::BulkPass,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RetryClicked { dish_id } => {
            let eligible = state
                .registry
                .get(dish_id)
                .is_some_and(|entry| entry.status.is_pending());
            if eligible && state.retry_checks.insert(dish_id) {
                state.mark_dirty();
                vec![Effect::EnsureCredential {
                    purpose: CredentialPurpose::Retry(dish_id),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::DeleteClicked { dish_id } => {
            if state.registry.remove(dish_id).is_some() {
                state.retry_checks.remove(&dish_id);
                if state.edit.as_ref().is_some_and(|s| s.dish_id == dish_id) {
                    state.edit = None;
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearAllClicked => {
            if !state.registry.is_empty() {
                state.registry.clear();
                state.retry_checks.clear();
                state.edit = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditOpened { dish_id } => {
            let editable = state.registry.get(dish_id).is_some_and(|entry| {
                entry.status == DishStatus::Completed && entry.image.is_some()
            });
            if editable {
                state.edit = Some(EditSession::new(dish_id));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditClosed => {
            if state.edit.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditSubmitted { instruction } => {
            let instruction = instruction.trim();
            let accepts = state
                .edit
                .as_ref()
                .is_some_and(|session| !session.is_in_flight());
            if instruction.is_empty() || !accepts {
                return (state, Vec::new());
            }
            let ticket = state.issue_edit_ticket();
            if let Some(session) = state.edit.as_mut() {
                session.pending = Some(PendingEdit {
                    ticket,
                    instruction: instruction.to_string(),
                });
                session.error = None;
            }
            state.mark_dirty();
            vec![Effect::EnsureCredential {
                purpose: CredentialPurpose::Edit(ticket),
            }]
        }
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CredentialChecked { purpose, result } => {
            state.mark_dirty();
            match purpose {
                CredentialPurpose::BulkPass => on_pass_credential(&mut state, result),
                CredentialPurpose::Retry(dish_id) => {
                    if !state.retry_checks.remove(&dish_id) {
                        return (state, Vec::new());
                    }
                    match result {
                        Ok(()) => start_generation(
                            &mut state.registry,
                            dish_id,
                            GenerationOrigin::Retry,
                            state.config,
                        )
                        .into_iter()
                        .collect(),
                        Err(message) => {
                            // A bulk call may own the entry by now; its own result settles it.
                            let generating = state
                                .registry
                                .get(dish_id)
                                .is_some_and(|entry| entry.status == DishStatus::Generating);
                            if !generating {
                                apply_generation_result(&mut state.registry, dish_id, Err(message));
                            }
                            Vec::new()
                        }
                    }
                }
                CredentialPurpose::Edit(ticket) => on_edit_credential(&mut state, ticket, result),
            }
        }
        Msg::GenerationFinished {
            dish_id,
            origin,
            result,
        } => {
            apply_generation_result(&mut state.registry, dish_id, result);
            state.mark_dirty();
            if origin == GenerationOrigin::BulkPass && state.pass.settle(dish_id) {
                state
                    .pass
                    .advance(&mut state.registry, state.config)
                    .into_iter()
                    .collect()
            } else {
                Vec::new()
            }
        }
        Msg::EditFinished {
            dish_id,
            ticket,
            result,
        } => {
            let session_matches = state
                .edit
                .as_ref()
                .is_some_and(|s| s.dish_id == dish_id && s.awaits(ticket));
            if !session_matches {
                return (state, Vec::new());
            }
            match result {
                Ok(image) => {
                    state
                        .registry
                        .patch(dish_id, DishPatch::ImageReplaced(image));
                    state.edit = None;
                }
                Err(_) => {
                    if let Some(session) = state.edit.as_mut() {
                        session.pending = None;
                        session.error = Some(EDIT_FAILED_NOTICE.to_string());
                    }
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn on_pass_credential(state: &mut AppState, result: Result<(), String>) -> Vec<Effect> {
    if !state.pass.is_awaiting_credential() {
        return Vec::new();
    }
    match result {
        Ok(()) => state
            .pass
            .advance(&mut state.registry, state.config)
            .into_iter()
            .collect(),
        Err(message) => {
            state.pass.abort();
            state.notice = Some(format!("Queue processing stopped: {message}"));
            Vec::new()
        }
    }
}

fn on_edit_credential(
    state: &mut AppState,
    ticket: EditTicket,
    result: Result<(), String>,
) -> Vec<Effect> {
    let Some(session) = state.edit.as_mut() else {
        return Vec::new();
    };
    let Some(pending) = session.pending.as_ref().filter(|p| p.ticket == ticket) else {
        return Vec::new();
    };
    let dish_id = session.dish_id;
    let instruction = pending.instruction.clone();
    let image = state
        .registry
        .get(dish_id)
        .and_then(|entry| entry.image.clone());
    match (result, image) {
        (Ok(()), Some(image)) => vec![Effect::EditImage {
            dish_id,
            ticket,
            image,
            instruction,
        }],
        _ => {
            session.pending = None;
            session.error = Some(EDIT_FAILED_NOTICE.to_string());
            Vec::new()
        }
    }
}
