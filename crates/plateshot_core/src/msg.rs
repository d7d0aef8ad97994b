use crate::{
    CredentialPurpose, DishId, EditTicket, EncodedImage, GenerationOrigin, ImageResolution,
    PhotoStyle,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the menu text box.
    MenuInputChanged(String),
    /// User submitted the current menu text for parsing.
    MenuSubmitted,
    StyleSelected(PhotoStyle),
    ResolutionSelected(ImageResolution),
    /// User asked to generate every pending dish.
    GenerateAllClicked,
    RetryClicked { dish_id: DishId },
    DeleteClicked { dish_id: DishId },
    ClearAllClicked,
    /// User opened the editor on a completed dish.
    EditOpened { dish_id: DishId },
    EditClosed,
    EditSubmitted { instruction: String },
    NoticeDismissed,
    /// Engine finished a credential pre-flight.
    CredentialChecked {
        purpose: CredentialPurpose,
        result: Result<(), String>,
    },
    /// Engine finished a generation call.
    GenerationFinished {
        dish_id: DishId,
        origin: GenerationOrigin,
        result: Result<EncodedImage, String>,
    },
    /// Engine finished an edit call.
    EditFinished {
        dish_id: DishId,
        ticket: EditTicket,
        result: Result<EncodedImage, String>,
    },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
