//! Plain-text presentation of the view model.

use std::collections::HashMap;
use std::fmt::Write;

use plateshot_core::{AppViewModel, DishCardView, DishId, DishStatus};

const NAME_WIDTH: usize = 28;

pub fn render_table(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Style: {} | Resolution: {} | {}",
        view.style.label(),
        view.resolution,
        view.generate_label
    );
    if view.dishes.is_empty() {
        out.push_str("No dishes yet.\n");
        return out;
    }

    let _ = writeln!(out, "{:>3}  {:<10}  {:<NAME_WIDTH$}  detail", "#", "status", "dish");
    for dish in &view.dishes {
        let _ = writeln!(
            out,
            "{:>3}  {:<10}  {:<NAME_WIDTH$}  {}",
            dish.position,
            dish.status.label(),
            truncate(&dish.name, NAME_WIDTH),
            detail(dish)
        );
    }
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {notice}");
    }
    out
}

fn detail(dish: &DishCardView) -> String {
    match dish.status {
        DishStatus::Failed => dish.error.clone().unwrap_or_default(),
        _ => match dish.image_bytes {
            Some(bytes) => format!("{} KiB image", bytes.div_ceil(1024)),
            None => dish.description.clone(),
        },
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

/// Reports per-dish status transitions between successive views.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: HashMap<DishId, DishStatus>,
}

impl ProgressTracker {
    pub fn new(view: &AppViewModel) -> Self {
        let mut tracker = Self::default();
        tracker.changes(view);
        tracker
    }

    pub fn changes(&mut self, view: &AppViewModel) -> Vec<String> {
        let total = view.dishes.len();
        let mut lines = Vec::new();
        for dish in &view.dishes {
            let previous = self.last.insert(dish.dish_id, dish.status);
            if previous.is_none() || previous == Some(dish.status) {
                continue;
            }
            let mut line = format!(
                "[{}/{}] {}: {}",
                dish.position,
                total,
                dish.name,
                dish.status.label()
            );
            if let (DishStatus::Failed, Some(error)) = (dish.status, &dish.error) {
                let _ = write!(line, " ({error})");
            }
            lines.push(line);
        }
        lines
    }
}
