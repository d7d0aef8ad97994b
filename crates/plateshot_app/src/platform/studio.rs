//! Interactive line-oriented session over the dish gallery.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use plateshot_core::{ImageResolution, Msg, PhotoStyle, SettingParseError};
use plateshot_engine::export_images;
use plateshot_logging::shot_info;

use super::app::App;
use super::render::{render_table, ProgressTracker};

const PASTE_TERMINATOR: &str = ".";

pub const HELP: &str = "\
Commands:
  add <name: description>      add one dish
  paste                        add many dishes, end with a line holding only '.'
  list                         show the gallery
  style <rustic|modern|social> set the photo style
  resolution <1K|2K|4K>        set the image resolution
  generate                     generate every idle or failed dish
  retry <n>                    regenerate dish n
  delete <n>                   remove dish n
  clear                        remove every dish
  edit <n> <instruction>       edit the photo of dish n
  save [dir]                   export completed photos
  help                         show this help
  quit                         leave the studio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    Add(String),
    Paste,
    List,
    Style(PhotoStyle),
    Resolution(ImageResolution),
    Generate,
    Retry(usize),
    Delete(usize),
    Clear,
    Edit { position: usize, instruction: String },
    Save(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a dish number")]
    BadPosition(String),
    #[error(transparent)]
    Setting(#[from] SettingParseError),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<StudioCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => StudioCommand::Add(required(rest, "add")?.to_string()),
        "paste" => StudioCommand::Paste,
        "list" | "ls" => StudioCommand::List,
        "style" => StudioCommand::Style(required(rest, "style")?.parse()?),
        "resolution" | "res" => StudioCommand::Resolution(required(rest, "resolution")?.parse()?),
        "generate" | "gen" => StudioCommand::Generate,
        "retry" => StudioCommand::Retry(position(required(rest, "retry")?)?),
        "delete" | "rm" => StudioCommand::Delete(position(required(rest, "delete")?)?),
        "clear" => StudioCommand::Clear,
        "edit" => {
            let (n, instruction) = required(rest, "edit")?
                .split_once(char::is_whitespace)
                .ok_or(CommandParseError::MissingArgument("edit"))?;
            StudioCommand::Edit {
                position: position(n)?,
                instruction: instruction.trim().to_string(),
            }
        }
        "save" => StudioCommand::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => StudioCommand::Help,
        "quit" | "exit" | "q" => StudioCommand::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandParseError> {
    if rest.is_empty() {
        Err(CommandParseError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn position(text: &str) -> Result<usize, CommandParseError> {
    text.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CommandParseError::BadPosition(text.to_string()))
}

/// Runs the studio until `quit` or end of input.
pub fn run_studio(
    app: &mut App,
    default_out: PathBuf,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "Plateshot studio. Type 'help' for commands.")?;
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if command == StudioCommand::Quit {
            break;
        }
        execute(app, command, &default_out, input, out)?;
    }
    shot_info!("Studio session ended");
    Ok(())
}

fn execute(
    app: &mut App,
    command: StudioCommand,
    default_out: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        StudioCommand::Add(text) => add_menu_text(app, text, out)?,
        StudioCommand::Paste => {
            let text = read_paste(input)?;
            add_menu_text(app, text, out)?;
        }
        StudioCommand::List => write!(out, "{}", render_table(&app.view()))?,
        StudioCommand::Style(style) => {
            app.dispatch(Msg::StyleSelected(style));
            writeln!(out, "Style set to {}", style.label())?;
        }
        StudioCommand::Resolution(resolution) => {
            app.dispatch(Msg::ResolutionSelected(resolution));
            writeln!(out, "Resolution set to {resolution}")?;
        }
        StudioCommand::Generate => {
            if !app.view().can_generate_all {
                writeln!(out, "Nothing to generate.")?;
                return Ok(());
            }
            app.dispatch(Msg::GenerateAllClicked);
            wait_with_progress(app, out)?;
            // The table shows the notice once; it is not kept around.
            write!(out, "{}", render_table(&app.view()))?;
            app.dispatch(Msg::NoticeDismissed);
        }
        StudioCommand::Retry(position) => {
            let Some(dish_id) = app.dish_at(position) else {
                return no_such_dish(out, position);
            };
            let retryable = app
                .view()
                .dishes
                .iter()
                .any(|dish| dish.dish_id == dish_id && dish.can_retry);
            if !retryable {
                writeln!(out, "Dish {position} is not idle or failed.")?;
                return Ok(());
            }
            app.dispatch(Msg::RetryClicked { dish_id });
            wait_with_progress(app, out)?;
        }
        StudioCommand::Delete(position) => {
            let Some(dish_id) = app.dish_at(position) else {
                return no_such_dish(out, position);
            };
            app.dispatch(Msg::DeleteClicked { dish_id });
            writeln!(out, "Removed dish {position}.")?;
        }
        StudioCommand::Clear => {
            app.dispatch(Msg::ClearAllClicked);
            writeln!(out, "Gallery cleared.")?;
        }
        StudioCommand::Edit {
            position,
            instruction,
        } => edit_dish(app, position, instruction, out)?,
        StudioCommand::Save(dir) => {
            let dir = dir.unwrap_or_else(|| default_out.to_path_buf());
            let summary = export_images(&dir, &app.state().registry().snapshot())?;
            writeln!(
                out,
                "Saved {} photo(s) to {} ({} without a photo).",
                summary.images.len(),
                dir.display(),
                summary.skipped
            )?;
        }
        StudioCommand::Help => writeln!(out, "{HELP}")?,
        StudioCommand::Quit => {}
    }
    Ok(())
}

fn add_menu_text(app: &mut App, text: String, out: &mut impl Write) -> anyhow::Result<()> {
    let before = app.state().registry().len();
    app.dispatch(Msg::MenuInputChanged(text));
    app.dispatch(Msg::MenuSubmitted);
    let added = app.state().registry().len() - before;
    writeln!(out, "Added {added} dish(es).")?;
    Ok(())
}

fn read_paste(input: &mut impl BufRead) -> anyhow::Result<String> {
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim() == PASTE_TERMINATOR {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

fn edit_dish(
    app: &mut App,
    position: usize,
    instruction: String,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(dish_id) = app.dish_at(position) else {
        return no_such_dish(out, position);
    };
    app.dispatch(Msg::EditOpened { dish_id });
    if app.state().edit_session().is_none() {
        writeln!(out, "Dish {position} has no finished photo to edit.")?;
        return Ok(());
    }
    app.dispatch(Msg::EditSubmitted { instruction });
    app.settle(|_| {});

    // A successful edit closes the session; a failed one leaves its error.
    match app.state().edit_session().map(|session| session.error.clone()) {
        None => writeln!(out, "Photo of dish {position} updated.")?,
        Some(error) => {
            let message = error.unwrap_or_else(|| "Edit was not submitted.".to_string());
            writeln!(out, "{message}")?;
            app.dispatch(Msg::EditClosed);
        }
    }
    Ok(())
}

fn wait_with_progress(app: &mut App, out: &mut impl Write) -> anyhow::Result<()> {
    let mut tracker = ProgressTracker::new(&app.view());
    let mut result = Ok(());
    app.settle(|view| {
        for line in tracker.changes(view) {
            if result.is_ok() {
                result = writeln!(out, "{line}");
            }
        }
    });
    Ok(result?)
}

fn no_such_dish(out: &mut impl Write, position: usize) -> anyhow::Result<()> {
    writeln!(out, "No dish at position {position}.")?;
    Ok(())
}
