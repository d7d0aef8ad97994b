mod common;

use std::io::Cursor;
use std::path::PathBuf;

use plateshot_app::platform::studio::{parse_command, run_studio, CommandParseError, StudioCommand};
use plateshot_core::{DishStatus, ImageResolution, PhotoStyle};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::start_app;

#[test]
fn parses_commands() {
    assert_eq!(parse_command("   ").unwrap(), None);
    assert_eq!(
        parse_command("add Soup: hot").unwrap(),
        Some(StudioCommand::Add("Soup: hot".to_string()))
    );
    assert_eq!(
        parse_command("STYLE rustic").unwrap(),
        Some(StudioCommand::Style(PhotoStyle::Rustic))
    );
    assert_eq!(
        parse_command("resolution 4k").unwrap(),
        Some(StudioCommand::Resolution(ImageResolution::Res4K))
    );
    assert_eq!(
        parse_command("edit 2  make it warmer ").unwrap(),
        Some(StudioCommand::Edit {
            position: 2,
            instruction: "make it warmer".to_string(),
        })
    );
    assert_eq!(
        parse_command("save out/dir").unwrap(),
        Some(StudioCommand::Save(Some(PathBuf::from("out/dir"))))
    );
    assert_eq!(parse_command("save").unwrap(), Some(StudioCommand::Save(None)));
    assert_eq!(parse_command("q").unwrap(), Some(StudioCommand::Quit));
}

#[test]
fn rejects_bad_commands() {
    assert_eq!(
        parse_command("dance").unwrap_err(),
        CommandParseError::Unknown("dance".to_string())
    );
    assert_eq!(
        parse_command("retry 0").unwrap_err(),
        CommandParseError::BadPosition("0".to_string())
    );
    assert_eq!(
        parse_command("delete").unwrap_err(),
        CommandParseError::MissingArgument("delete")
    );
    assert_eq!(
        parse_command("edit 3").unwrap_err(),
        CommandParseError::MissingArgument("edit")
    );
    assert!(matches!(
        parse_command("style neon").unwrap_err(),
        CommandParseError::Setting(_)
    ));
}

fn session(app: &mut plateshot_app::platform::app::App, script: &str, out_dir: PathBuf) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    run_studio(app, out_dir, &mut input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn paste_generate_retry_and_save() {
    let (mut app, generator) = start_app(Some("key"));
    let temp = TempDir::new().unwrap();

    let printed = session(
        &mut app,
        "paste\nSoup: tomato\nburnt toast\n.\nstyle social\ngenerate\nretry 1\nretry 2\nsave\nquit\n",
        temp.path().to_path_buf(),
    );

    assert!(printed.contains("Added 2 dish(es)."));
    assert!(printed.contains("Style set to Social Media (Flat Lay)"));
    assert!(printed.contains("Dish 1 is not idle or failed."));
    assert!(printed.contains("Saved 1 photo(s)"));
    assert_eq!(
        *generator.calls.lock().unwrap(),
        vec!["Soup", "burnt toast", "burnt toast"]
    );
    let statuses: Vec<_> = app.state().registry().iter().map(|d| d.status).collect();
    assert_eq!(statuses, vec![DishStatus::Completed, DishStatus::Failed]);
}

#[test]
fn edit_replaces_photo_or_reports_failure() {
    let (mut app, _) = start_app(Some("key"));
    let temp = TempDir::new().unwrap();

    let printed = session(
        &mut app,
        "add Soup\nedit 1 warmer light\ngenerate\nedit 1 warmer light\nedit 1 impossible\nedit 9 x\n",
        temp.path().to_path_buf(),
    );

    assert!(printed.contains("Dish 1 has no finished photo to edit."));
    assert!(printed.contains("Photo of dish 1 updated."));
    assert!(printed.contains("Failed to edit image. Please try again."));
    assert!(printed.contains("No dish at position 9."));
    assert!(app.state().edit_session().is_none());

    let dish = app.state().registry().iter().next().unwrap();
    assert_eq!(dish.image.as_ref().unwrap().decode().unwrap(), b"warmer light");
}

#[test]
fn delete_and_clear() {
    let (mut app, _) = start_app(Some("key"));
    let temp = TempDir::new().unwrap();

    let printed = session(
        &mut app,
        "add A\nadd B\nadd C\ndelete 2\nlist\n",
        temp.path().to_path_buf(),
    );
    let names: Vec<_> = app.state().registry().iter().map(|d| d.name.clone()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert!(printed.contains("Removed dish 2."));

    session(&mut app, "clear\n", temp.path().to_path_buf());
    assert!(app.state().registry().is_empty());
}
