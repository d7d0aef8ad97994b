use std::fs;

use plateshot_core::{DishEntry, DishStatus, EncodedImage};
use plateshot_engine::{
    ensure_output_dir, export_images, image_filename, AtomicFileWriter, ExportError,
    MANIFEST_FILENAME,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn completed(name: &str, bytes: &[u8]) -> DishEntry {
    let mut dish = DishEntry::new(name, "with care");
    dish.status = DishStatus::Completed;
    dish.image = Some(EncodedImage::from_bytes("image/png", bytes));
    dish
}

#[test]
fn filename_is_stable_and_safe() {
    let dish = DishEntry::new("Fish: Chips?/Deluxe", "");
    let name = image_filename(&dish.name, dish.id, "png");
    assert!(name.starts_with("Fish_Chips_Deluxe--"));
    assert!(name.ends_with(".png"));
    assert_eq!(name, image_filename(&dish.name, dish.id, "png"));

    let other = DishEntry::new("Fish: Chips?/Deluxe", "");
    assert_ne!(name, image_filename(&other.name, other.id, "png"));

    assert!(image_filename("CON", dish.id, "png").starts_with("CON_--"));
    assert!(image_filename("...", dish.id, "jpg").starts_with("dish--"));
}

#[test]
fn export_writes_completed_images_and_manifest() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("photos");
    let dishes = vec![
        completed("Soup", b"soup-bytes"),
        DishEntry::new("Bread", ""),
        completed("Cake", b"cake-bytes"),
    ];

    let summary = export_images(&out, &dishes).unwrap();

    assert_eq!(summary.images.len(), 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read(&summary.images[0].path).unwrap(), b"soup-bytes");
    assert_eq!(fs::read(&summary.images[1].path).unwrap(), b"cake-bytes");
    assert_eq!(summary.manifest_path, out.join(MANIFEST_FILENAME));

    let manifest: serde_json::Value =
        serde_json::from_slice(&fs::read(&summary.manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["image_count"], 2);
    assert_eq!(manifest["images"][0]["name"], "Soup");
    assert_eq!(manifest["images"][1]["media_type"], "image/png");
    assert_eq!(manifest["images"][1]["bytes"], 10);
}

#[test]
fn export_reports_undecodable_image() {
    let temp = TempDir::new().unwrap();
    let mut dish = completed("Soup", b"x");
    dish.image = Some(EncodedImage::new("image/png", "!!!"));

    let err = export_images(temp.path(), &[dish]).unwrap_err();
    assert!(matches!(err, ExportError::Decode { ref name, .. } if name == "Soup"));
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::open(temp.path()).unwrap();

    let first = writer.write("a.png", b"hello").unwrap();
    let second = writer.write("a.png", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"world");
}

#[test]
fn file_in_place_of_output_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(AtomicFileWriter::open(file_path.clone()).is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
