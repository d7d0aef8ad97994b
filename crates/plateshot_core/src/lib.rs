//! Plateshot core: dish registry, menu parsing and the generation queue as a
//! pure state machine.
mod config;
mod dish;
mod effect;
mod image;
mod msg;
mod parse;
mod queue;
mod registry;
mod state;
mod update;
mod view_model;

pub use config::{GenerationConfig, ImageResolution, PhotoStyle, SettingParseError};
pub use dish::{DishEntry, DishId, DishPatch, DishStatus};
pub use effect::{CredentialPurpose, EditTicket, Effect, GenerationOrigin};
pub use image::{EncodedImage, ImageDecodeError};
pub use msg::Msg;
pub use parse::parse_menu;
pub use queue::{apply_generation_result, start_generation, BulkPass};
pub use registry::DishRegistry;
pub use state::{AppState, EditSession, PendingEdit, EDIT_FAILED_NOTICE};
pub use update::update;
pub use view_model::{AppViewModel, DishCardView, EditView};
