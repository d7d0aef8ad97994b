use plateshot_core::{
    update, AppState, CredentialPurpose, DishId, DishStatus, EditTicket, Effect, EncodedImage,
    GenerationOrigin, Msg, EDIT_FAILED_NOTICE,
};
use pretty_assertions::assert_eq;

fn image(tag: &str) -> EncodedImage {
    EncodedImage::new("image/png", tag)
}

/// One dish, generated successfully.
fn completed_dish() -> (AppState, DishId) {
    let (state, _) = update(AppState::new(), Msg::MenuInputChanged("Tiramisu\n".into()));
    let (state, _) = update(state, Msg::MenuSubmitted);
    let id = state.view().dishes[0].dish_id;
    let (state, _) = update(state, Msg::GenerateAllClicked);
    let (state, _) = update(
        state,
        Msg::CredentialChecked {
            purpose: CredentialPurpose::BulkPass,
            result: Ok(()),
        },
    );
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            dish_id: id,
            origin: GenerationOrigin::BulkPass,
            result: Ok(image("original")),
        },
    );
    (state, id)
}

/// Opens the editor, submits `instruction` and passes the credential check.
fn submit_edit(
    state: AppState,
    id: DishId,
    instruction: &str,
) -> (AppState, Vec<Effect>, EditTicket) {
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, ticket) = request_edit(state, instruction);
    let (state, effects) = update(
        state,
        Msg::CredentialChecked {
            purpose: CredentialPurpose::Edit(ticket),
            result: Ok(()),
        },
    );
    (state, effects, ticket)
}

/// Submits into the open editor and returns the ticket of the credential check.
fn request_edit(state: AppState, instruction: &str) -> (AppState, EditTicket) {
    let (state, effects) = update(
        state,
        Msg::EditSubmitted {
            instruction: instruction.to_string(),
        },
    );
    let [Effect::EnsureCredential {
        purpose: CredentialPurpose::Edit(ticket),
    }] = effects.as_slice()
    else {
        panic!("expected an edit credential check, got {effects:?}");
    };
    (state, *ticket)
}

fn finish_edit(
    state: AppState,
    id: DishId,
    ticket: EditTicket,
    result: Result<EncodedImage, String>,
) -> AppState {
    update(
        state,
        Msg::EditFinished {
            dish_id: id,
            ticket,
            result,
        },
    )
    .0
}

#[test]
fn successful_edit_replaces_image_and_keeps_status() {
    let (state, id) = completed_dish();
    let (state, effects, ticket) = submit_edit(state, id, "  Add steam rising from the dish ");
    assert_eq!(
        effects,
        vec![Effect::EditImage {
            dish_id: id,
            ticket,
            image: image("original"),
            instruction: "Add steam rising from the dish".to_string(),
        }]
    );
    assert!(!state.is_quiescent());

    let state = finish_edit(state, id, ticket, Ok(image("edited")));
    let dish = state.registry().get(id).unwrap();
    assert_eq!(dish.status, DishStatus::Completed);
    assert_eq!(dish.image, Some(image("edited")));
    assert!(state.edit_session().is_none());
}

#[test]
fn failed_edit_keeps_last_good_image() {
    let (state, id) = completed_dish();
    let (state, _, ticket) = submit_edit(state, id, "Make the lighting warmer");
    let state = finish_edit(state, id, ticket, Err("No edited image returned".into()));

    let dish = state.registry().get(id).unwrap();
    assert_eq!(dish.status, DishStatus::Completed);
    assert_eq!(dish.image, Some(image("original")));
    let view = state.view();
    let edit = view.edit.expect("editor stays open");
    assert_eq!(edit.error.as_deref(), Some(EDIT_FAILED_NOTICE));
    assert!(!edit.in_flight);
}

#[test]
fn blank_instruction_is_ignored() {
    let (state, id) = completed_dish();
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, effects) = update(
        state,
        Msg::EditSubmitted {
            instruction: "   ".into(),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.edit_session().unwrap().is_in_flight());
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let (state, id) = completed_dish();
    let (state, _, _) = submit_edit(state, id, "Add basil");
    let (_state, effects) = update(
        state,
        Msg::EditSubmitted {
            instruction: "Add more basil".into(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn only_completed_dishes_can_be_edited() {
    let (state, _) = update(AppState::new(), Msg::MenuInputChanged("Soup\n".into()));
    let (state, _) = update(state, Msg::MenuSubmitted);
    let id = state.view().dishes[0].dish_id;
    assert!(!state.view().dishes[0].can_edit);

    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    assert!(state.edit_session().is_none());
}

#[test]
fn edit_result_after_close_is_dropped() {
    let (state, id) = completed_dish();
    let (state, _, ticket) = submit_edit(state, id, "Add steam");
    let (state, _) = update(state, Msg::EditClosed);
    let state = finish_edit(state, id, ticket, Ok(image("edited")));
    assert_eq!(
        state.registry().get(id).unwrap().image,
        Some(image("original"))
    );
}

#[test]
fn earlier_edit_result_does_not_answer_a_newer_submission() {
    let (state, id) = completed_dish();
    let (state, _, steam) = submit_edit(state, id, "Add steam");
    let (state, _) = update(state, Msg::EditClosed);
    let (state, effects, blue) = submit_edit(state, id, "Make it blue");
    assert_ne!(steam, blue);
    assert_eq!(effects.len(), 1);

    let state = finish_edit(state, id, steam, Ok(image("steam")));
    assert_eq!(
        state.registry().get(id).unwrap().image,
        Some(image("original"))
    );
    assert!(state.edit_session().unwrap().is_in_flight());

    let state = finish_edit(state, id, blue, Ok(image("blue")));
    assert_eq!(state.registry().get(id).unwrap().image, Some(image("blue")));
    assert!(state.edit_session().is_none());
}

#[test]
fn stale_edit_credential_check_sends_nothing() {
    let (state, id) = completed_dish();
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, steam) = request_edit(state, "Add steam");
    let (state, _) = update(state, Msg::EditClosed);
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, blue) = request_edit(state, "Make it blue");

    let (state, effects) = update(
        state,
        Msg::CredentialChecked {
            purpose: CredentialPurpose::Edit(steam),
            result: Ok(()),
        },
    );
    assert!(effects.is_empty());

    let (_state, effects) = update(
        state,
        Msg::CredentialChecked {
            purpose: CredentialPurpose::Edit(blue),
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::EditImage {
            dish_id: id,
            ticket: blue,
            image: image("original"),
            instruction: "Make it blue".to_string(),
        }]
    );
}

#[test]
fn deleting_the_edited_dish_closes_the_editor() {
    let (state, id) = completed_dish();
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, _) = update(state, Msg::DeleteClicked { dish_id: id });
    assert!(state.edit_session().is_none());
    assert!(state.view().edit.is_none());
}

#[test]
fn edit_credential_failure_surfaces_generic_notice() {
    let (state, id) = completed_dish();
    let (state, _) = update(state, Msg::EditOpened { dish_id: id });
    let (state, ticket) = request_edit(state, "Add steam");
    let (state, effects) = update(
        state,
        Msg::CredentialChecked {
            purpose: CredentialPurpose::Edit(ticket),
            result: Err("no key".into()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.edit_session().unwrap().error.as_deref(),
        Some(EDIT_FAILED_NOTICE)
    );
    assert!(state.is_quiescent());
}
