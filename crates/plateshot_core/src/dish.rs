use std::fmt;

use uuid::Uuid;

use crate::EncodedImage;

/// Opaque identifier of one dish entry. Unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DishId(Uuid);

impl DishId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell entries apart in a listing.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for DishId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DishStatus {
    #[default]
    Idle,
    Generating,
    Completed,
    Failed,
}

impl DishStatus {
    /// Eligible for (re)enqueue by a bulk pass.
    pub fn is_pending(self) -> bool {
        matches!(self, DishStatus::Idle | DishStatus::Failed)
    }

    pub fn label(self) -> &'static str {
        match self {
            DishStatus::Idle => "idle",
            DishStatus::Generating => "generating",
            DishStatus::Completed => "completed",
            DishStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One requested photograph and its current outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishEntry {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub status: DishStatus,
    pub image: Option<EncodedImage>,
    pub error: Option<String>,
}

impl DishEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: DishId::new(),
            name: name.into(),
            description: description.into(),
            status: DishStatus::Idle,
            image: None,
            error: None,
        }
    }

    /// Applies a patch. Each variant names exactly the fields it touches.
    pub(crate) fn apply(&mut self, patch: DishPatch) {
        match patch {
            DishPatch::Generating => {
                self.status = DishStatus::Generating;
                self.error = None;
            }
            DishPatch::Completed(image) => {
                self.status = DishStatus::Completed;
                self.image = Some(image);
                self.error = None;
            }
            DishPatch::Failed(message) => {
                // The last good image is kept so a failed regeneration does not
                // throw away a usable photo.
                self.status = DishStatus::Failed;
                self.error = Some(message);
            }
            DishPatch::ImageReplaced(image) => {
                self.image = Some(image);
            }
        }
    }
}

/// A partial update to a [`DishEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishPatch {
    /// Picked up for generation; clears any previous error.
    Generating,
    /// Generation succeeded.
    Completed(EncodedImage),
    /// Generation failed with a human readable message.
    Failed(String),
    /// An edit produced a new image; status is left alone.
    ImageReplaced(EncodedImage),
}
