use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use plateshot_core::{DishStatus, Msg};
use plateshot_engine::{export_images, ExportSummary};
use plateshot_logging::{shot_info, shot_warn};

use super::app::App;
use super::render::{render_table, ProgressTracker};

/// How a batch run ended.
#[derive(Debug)]
pub struct BatchOutcome {
    pub completed: usize,
    pub failed: usize,
    pub export: ExportSummary,
}

impl BatchOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Reads a menu from `path`, or stdin for `-`.
pub fn read_menu(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read menu from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read menu {}", path.display()))
}

/// Adds every dish in `menu`, runs one bulk pass and exports the results.
pub fn run_batch(
    app: &mut App,
    menu: String,
    output_dir: &Path,
    out: &mut impl Write,
) -> anyhow::Result<BatchOutcome> {
    app.dispatch(Msg::MenuInputChanged(menu));
    app.dispatch(Msg::MenuSubmitted);
    let total = app.state().registry().len();
    if total == 0 {
        bail!("menu contains no dishes");
    }
    shot_info!("Batch run over {} dish(es)", total);

    app.dispatch(Msg::GenerateAllClicked);
    let mut tracker = ProgressTracker::new(&app.view());
    let mut progress = Ok(());
    app.settle(|view| {
        for line in tracker.changes(view) {
            if progress.is_ok() {
                progress = writeln!(out, "{line}");
            }
        }
    });
    progress?;

    let view = app.view();
    write!(out, "{}", render_table(&view))?;
    if let Some(notice) = view.notice {
        bail!(notice);
    }

    let count = |status| {
        app.state()
            .registry()
            .iter()
            .filter(|dish| dish.status == status)
            .count()
    };
    let completed = count(DishStatus::Completed);
    let failed = count(DishStatus::Failed);
    if failed > 0 {
        shot_warn!("{} of {} dish(es) failed", failed, total);
    }

    let export = export_images(output_dir, &app.state().registry().snapshot())?;
    writeln!(
        out,
        "Exported {} photo(s) to {}",
        export.images.len(),
        output_dir.display()
    )?;

    Ok(BatchOutcome {
        completed,
        failed,
        export,
    })
}
