use crate::{DishId, DishStatus, ImageResolution, PhotoStyle};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub dishes: Vec<DishCardView>,
    pub menu_input: String,
    pub can_add: bool,
    pub style: PhotoStyle,
    pub resolution: ImageResolution,
    pub processing: bool,
    pub pending_count: usize,
    pub generate_label: String,
    pub can_generate_all: bool,
    pub edit: Option<EditView>,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishCardView {
    /// 1-based position in the gallery.
    pub position: usize,
    pub dish_id: DishId,
    pub name: String,
    pub description: String,
    pub status: DishStatus,
    pub image_bytes: Option<usize>,
    pub error: Option<String>,
    pub can_retry: bool,
    pub can_edit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub dish_id: DishId,
    pub dish_name: String,
    pub in_flight: bool,
    pub error: Option<String>,
}
