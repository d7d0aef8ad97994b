//! Generation queue: the sequential bulk pass and single-entry retries.
//!
//! A bulk pass snapshots the pending ids when it starts and submits them one
//! at a time. The next entry is only marked `generating` after the previous
//! one has settled, so at most one bulk generation is ever in flight.
//! Retries bypass the pass entirely; an entry that is already `generating`
//! is never submitted a second time by either path.

use std::collections::VecDeque;

use crate::{
    DishId, DishPatch, DishRegistry, DishStatus, EncodedImage, Effect, GenerationConfig,
    GenerationOrigin,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PassPhase {
    #[default]
    Inactive,
    /// Waiting for the credential pre-flight; nothing is marked yet.
    AwaitingCredential,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkPass {
    phase: PassPhase,
    remaining: VecDeque<DishId>,
    in_flight: Option<DishId>,
}

impl BulkPass {
    /// The global processing flag. Set for the whole pass, pre-flight included.
    pub fn is_processing(&self) -> bool {
        self.phase != PassPhase::Inactive
    }

    pub fn in_flight(&self) -> Option<DishId> {
        self.in_flight
    }

    /// Number of entries not yet submitted.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Starts a pass over `pending`. Refused while a pass is active or when
    /// there is nothing to do.
    pub fn begin(&mut self, pending: Vec<DishId>) -> bool {
        if self.is_processing() || pending.is_empty() {
            return false;
        }
        self.phase = PassPhase::AwaitingCredential;
        self.remaining = pending.into();
        self.in_flight = None;
        true
    }

    pub fn is_awaiting_credential(&self) -> bool {
        self.phase == PassPhase::AwaitingCredential
    }

    /// Drops the pass without touching any entry.
    pub fn abort(&mut self) {
        *self = Self::default();
    }

    /// Submits the next entry still eligible, or ends the pass.
    ///
    /// Entries deleted since the pass began, or currently owned by a retry,
    /// are skipped.
    pub fn advance(
        &mut self,
        registry: &mut DishRegistry,
        config: GenerationConfig,
    ) -> Option<Effect> {
        if !self.is_processing() || self.in_flight.is_some() {
            return None;
        }
        self.phase = PassPhase::Running;
        while let Some(dish_id) = self.remaining.pop_front() {
            if let Some(effect) =
                start_generation(registry, dish_id, GenerationOrigin::BulkPass, config)
            {
                self.in_flight = Some(dish_id);
                return Some(effect);
            }
        }
        self.abort();
        None
    }

    /// Records that `dish_id` settled. True if it was this pass's in-flight entry.
    pub fn settle(&mut self, dish_id: DishId) -> bool {
        if self.in_flight == Some(dish_id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

/// Marks one entry `generating` and builds its generate request.
///
/// Returns `None` when the entry is gone or already generating.
pub fn start_generation(
    registry: &mut DishRegistry,
    dish_id: DishId,
    origin: GenerationOrigin,
    config: GenerationConfig,
) -> Option<Effect> {
    let entry = registry.get(dish_id)?;
    if entry.status == DishStatus::Generating {
        return None;
    }
    let name = entry.name.clone();
    let description = entry.description.clone();
    registry.patch(dish_id, DishPatch::Generating);
    Some(Effect::Generate {
        dish_id,
        origin,
        name,
        description,
        config,
    })
}

/// Reconciles a settled generation into the registry. Deleted ids are ignored.
pub fn apply_generation_result(
    registry: &mut DishRegistry,
    dish_id: DishId,
    result: Result<EncodedImage, String>,
) -> bool {
    let patch = match result {
        Ok(image) => DishPatch::Completed(image),
        Err(message) if message.trim().is_empty() => DishPatch::Failed("Unknown error".into()),
        Err(message) => DishPatch::Failed(message),
    };
    registry.patch(dish_id, patch)
}
