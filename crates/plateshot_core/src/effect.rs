use crate::{DishId, EncodedImage, GenerationConfig};

/// IO the core asks the engine to perform. Results come back as [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make sure an access credential is available before calling the image service.
    EnsureCredential { purpose: CredentialPurpose },
    /// Generate a photo for one dish.
    Generate {
        dish_id: DishId,
        origin: GenerationOrigin,
        name: String,
        description: String,
        config: GenerationConfig,
    },
    /// Apply a natural-language edit to a dish's current photo.
    EditImage {
        dish_id: DishId,
        ticket: EditTicket,
        image: EncodedImage,
        instruction: String,
    },
}

/// What a credential check gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPurpose {
    BulkPass,
    Retry(DishId),
    Edit(EditTicket),
}

/// Identifies one edit submission, so a late answer to an earlier submission
/// is never taken for the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditTicket(u64);

impl EditTicket {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}


/// Which entry point submitted a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOrigin {
    BulkPass,
    Retry,
}
