use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use photo_editor::adjustment::{MIN_FACTOR, STEP};
use photo_editor::filters;
use photo_editor::{AdjustmentState, Editor, LoadError, RotateDirection, SaveError};
use tempfile::TempDir;

// Helper to write a synthetic RGB image that is not symmetric under rotation
fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + 2 * y) % 256) as u8])
    });
    img.save(&path).unwrap();
    path
}

fn loaded(width: u32, height: u32) -> (TempDir, Editor) {
    let tmp = TempDir::new().unwrap();
    let path = write_rgb(tmp.path(), "photo.png", width, height);
    let mut editor = Editor::new();
    editor.load(&path).unwrap();
    (tmp, editor)
}

fn displayed_size(editor: &Editor) -> (u32, u32) {
    let img = editor.displayed().unwrap();
    (img.width(), img.height())
}

#[test]
fn load_forces_three_channels() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gray.png");
    GrayImage::from_pixel(4, 3, Luma([77])).save(&path).unwrap();

    let mut editor = Editor::new();
    let original = editor.load(&path).unwrap();
    assert_eq!(original.dimensions(), (4, 3));
    assert_eq!(original.get_pixel(0, 0), &Rgb([77, 77, 77]));
    assert_eq!(editor.displayed().unwrap().color(), image::ColorType::Rgb8);
    assert_eq!(editor.source_path(), Some(path.as_path()));
}

#[test]
fn load_starts_from_defaults_and_a_copy() {
    let (_tmp, editor) = loaded(20, 10);
    let adjustments = editor.adjustments().unwrap();
    assert_eq!(adjustments.brightness, 1.0);
    assert_eq!(adjustments.contrast, 1.0);
    assert_eq!(adjustments.scale, 1.0);
    assert!(!adjustments.grayscale);

    let original = editor.original().unwrap().clone();
    assert_eq!(editor.displayed().unwrap(), &DynamicImage::ImageRgb8(original));
}

#[test]
fn brightness_always_filters_the_original() {
    let (_tmp, mut editor) = loaded(16, 12);
    let original = editor.original().unwrap().clone();

    for delta in [STEP, STEP, STEP, -STEP] {
        assert!(editor.adjust_brightness(delta));
        let factor = editor.adjustments().unwrap().brightness;
        let expected = filters::brightness(&original, factor);
        assert_eq!(editor.displayed().unwrap().as_rgb8(), Some(&expected));
    }

    let factor = editor.adjustments().unwrap().brightness;
    assert!((factor - 1.2).abs() < 1e-4);
    assert_eq!(editor.original(), Some(&original));
}

#[test]
fn brightness_floors_at_minimum() {
    let (_tmp, mut editor) = loaded(8, 8);
    let original = editor.original().unwrap().clone();

    let changes: Vec<bool> = (0..10).map(|_| editor.adjust_brightness(-STEP)).collect();
    assert!(changes[..9].iter().all(|c| *c));
    assert!(!changes[9]);

    assert_eq!(editor.adjustments().unwrap().brightness, MIN_FACTOR);
    let expected = filters::brightness(&original, MIN_FACTOR);
    assert_eq!(editor.displayed().unwrap().as_rgb8(), Some(&expected));
}

#[test]
fn contrast_follows_the_same_law() {
    let (_tmp, mut editor) = loaded(16, 12);
    let original = editor.original().unwrap().clone();

    for _ in 0..12 {
        editor.adjust_contrast(-STEP);
    }
    assert_eq!(editor.adjustments().unwrap().contrast, MIN_FACTOR);

    assert!(editor.adjust_contrast(0.5));
    let factor = editor.adjustments().unwrap().contrast;
    assert!((factor - 0.6).abs() < 1e-4);
    assert_eq!(
        editor.displayed().unwrap().as_rgb8(),
        Some(&filters::contrast(&original, factor))
    );
    assert_eq!(editor.adjustments().unwrap().brightness, 1.0);
}

#[test]
fn scale_steps_resize_from_original_dimensions() {
    let (_tmp, mut editor) = loaded(100, 200);
    for _ in 0..3 {
        assert!(editor.adjust_scale(STEP));
    }
    assert_eq!(displayed_size(&editor), (130, 260));

    assert!(editor.adjust_scale(-STEP));
    assert_eq!(displayed_size(&editor), (120, 240));
}

#[test]
fn scale_ignores_current_rotation() {
    let (_tmp, mut editor) = loaded(100, 200);
    editor.rotate(RotateDirection::Right);
    assert_eq!(displayed_size(&editor), (200, 100));

    editor.adjust_scale(STEP);
    assert_eq!(displayed_size(&editor), (110, 220));
}

#[test]
fn rotations_compound_and_expand_bounds() {
    let (_tmp, mut editor) = loaded(30, 10);
    assert!(editor.rotate(RotateDirection::Left));
    assert_eq!(displayed_size(&editor), (10, 30));
    assert!(editor.rotate(RotateDirection::Left));
    assert_eq!(displayed_size(&editor), (30, 10));

    let original = DynamicImage::ImageRgb8(editor.original().unwrap().clone());
    assert_eq!(editor.displayed().unwrap(), &original.rotate180());
}

#[test]
fn rotate_left_then_right_round_trips() {
    let (_tmp, mut editor) = loaded(30, 10);
    let before = editor.displayed().unwrap().clone();

    editor.rotate(RotateDirection::Left);
    editor.rotate(RotateDirection::Right);
    assert_eq!(editor.displayed().unwrap(), &before);
}

#[test]
fn brightness_discards_rotation() {
    let (_tmp, mut editor) = loaded(100, 200);
    editor.rotate(RotateDirection::Left);
    assert_eq!(displayed_size(&editor), (200, 100));

    editor.adjust_brightness(STEP);
    assert_eq!(displayed_size(&editor), (100, 200));
}

#[test]
fn grayscale_toggle_is_an_involution() {
    let (_tmp, mut editor) = loaded(12, 7);
    let original = DynamicImage::ImageRgb8(editor.original().unwrap().clone());

    assert!(editor.toggle_grayscale());
    assert!(editor.adjustments().unwrap().grayscale);
    assert_eq!(editor.displayed().unwrap().color(), image::ColorType::L8);

    editor.rotate(RotateDirection::Right);
    assert_eq!(displayed_size(&editor), (7, 12));

    assert!(editor.toggle_grayscale());
    assert!(!editor.adjustments().unwrap().grayscale);
    assert_eq!(editor.displayed().unwrap(), &original);
}

#[test]
fn grayscale_drops_other_edits_but_keeps_counters() {
    let (_tmp, mut editor) = loaded(40, 20);
    let original = editor.original().unwrap().clone();

    editor.adjust_brightness(0.2);
    editor.adjust_scale(STEP);
    editor.toggle_grayscale();

    assert_eq!(displayed_size(&editor), (40, 20));
    assert_eq!(editor.displayed().unwrap(), &filters::grayscale(&original));

    let adjustments = editor.adjustments().unwrap();
    assert!((adjustments.brightness - 1.2).abs() < 1e-4);
    assert!((adjustments.scale - 1.1).abs() < 1e-4);
}

#[test]
fn missing_file_leaves_editor_empty() {
    let tmp = TempDir::new().unwrap();
    let mut editor = Editor::new();

    let result = editor.load(tmp.path().join("missing.png"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
    assert!(!editor.is_loaded());
    assert!(editor.displayed().is_none());
}

#[test]
fn failed_load_keeps_previous_image() {
    let (tmp, mut editor) = loaded(10, 10);
    editor.adjust_contrast(STEP);
    let path_before = editor.source_path().unwrap().to_path_buf();
    let displayed_before = editor.displayed().unwrap().clone();

    let broken = tmp.path().join("broken.png");
    std::fs::write(&broken, b"definitely not a png").unwrap();

    let result = editor.load(&broken);
    assert!(matches!(result, Err(LoadError::Decode { .. })));
    assert_eq!(editor.source_path(), Some(path_before.as_path()));
    assert_eq!(editor.displayed().unwrap(), &displayed_before);
    assert!((editor.adjustments().unwrap().contrast - 1.1).abs() < 1e-4);
}

#[test]
fn reload_resets_adjustments() {
    let (tmp, mut editor) = loaded(10, 10);
    editor.adjust_brightness(STEP);
    editor.toggle_grayscale();

    let other = write_rgb(tmp.path(), "other.bmp", 6, 9);
    editor.load(&other).unwrap();

    assert_eq!(editor.adjustments().unwrap(), &AdjustmentState::default());
    assert_eq!(displayed_size(&editor), (6, 9));
}

#[test]
fn save_without_image_fails() {
    let tmp = TempDir::new().unwrap();
    let editor = Editor::new();
    let target = tmp.path().join("out.png");

    assert!(matches!(editor.save(&target), Err(SaveError::NothingToSave)));
    assert!(!target.exists());
}

#[test]
fn save_appends_png_and_writes_displayed_image() {
    let (tmp, mut editor) = loaded(50, 20);
    editor.adjust_scale(-0.5);
    editor.rotate(RotateDirection::Right);

    let written = editor.save(tmp.path().join("result")).unwrap();
    assert_eq!(written, tmp.path().join("result.png"));

    let reloaded = image::open(&written).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (10, 25));
    assert_eq!(&reloaded.to_rgb8(), editor.displayed().unwrap().as_rgb8().unwrap());
}

#[test]
fn save_jpeg_of_grayscale() {
    let (tmp, mut editor) = loaded(32, 16);
    editor.toggle_grayscale();

    let written = editor.save(tmp.path().join("gray.jpg")).unwrap();
    let reloaded = image::open(&written).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (32, 16));
}

#[test]
fn save_rejects_unknown_extension() {
    let (tmp, editor) = loaded(4, 4);
    let target = tmp.path().join("out.xyz");

    assert!(matches!(
        editor.save(&target),
        Err(SaveError::UnsupportedFormat { .. })
    ));
    assert!(!target.exists());
}

#[test]
fn save_into_missing_directory_fails() {
    let (tmp, editor) = loaded(4, 4);
    let target = tmp.path().join("no/such/dir/out.png");

    assert!(matches!(editor.save(&target), Err(SaveError::Io { .. })));
}

#[test]
fn failed_encode_leaves_no_file_behind() {
    // JPEG caps each side at 65535 pixels.
    let (tmp, editor) = loaded(65_536, 1);
    let target = tmp.path().join("wide.jpg");

    assert!(matches!(editor.save(&target), Err(SaveError::Encode { .. })));
    assert!(!target.exists());
}
