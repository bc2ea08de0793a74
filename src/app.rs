use std::path::Path;

use eframe::egui;
use image::DynamicImage;
use image::imageops::FilterType;
use log::{error, warn};

use crate::adjustment::STEP;
use crate::editor::Editor;
use crate::filters::RotateDirection;
use crate::viewport;

const PANEL_WIDTH: f32 = 200.0;
const CANVAS_FILL: egui::Color32 = egui::Color32::from_gray(0xe0);
const OPEN_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Clone, Copy, Debug, PartialEq)]
enum Action {
    Open,
    IncreaseSize,
    DecreaseSize,
    RotateLeft,
    RotateRight,
    IncreaseBrightness,
    DecreaseBrightness,
    IncreaseContrast,
    DecreaseContrast,
    Grayscale,
    Save,
}

impl Action {
    const ALL: [Action; 11] = [
        Action::Open,
        Action::IncreaseSize,
        Action::DecreaseSize,
        Action::RotateLeft,
        Action::RotateRight,
        Action::IncreaseBrightness,
        Action::DecreaseBrightness,
        Action::IncreaseContrast,
        Action::DecreaseContrast,
        Action::Grayscale,
        Action::Save,
    ];

    fn needs_image(&self) -> bool {
        !matches!(self, Action::Open)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::Open => "📂 Load Image",
            Action::IncreaseSize => "🔍 Increase Size",
            Action::DecreaseSize => "🔍 Decrease Size",
            Action::RotateLeft => "↺ Rotate Left",
            Action::RotateRight => "↻ Rotate Right",
            Action::IncreaseBrightness => "☀ Increase Brightness",
            Action::DecreaseBrightness => "☀ Decrease Brightness",
            Action::IncreaseContrast => "◑ Increase Contrast",
            Action::DecreaseContrast => "◑ Decrease Contrast",
            Action::Grayscale => "⬛ Grayscale",
            Action::Save => "💾 Save",
        };
        write!(f, "{}", s)
    }
}

/// The editor window: a column of buttons on the left, the image on the right.
#[derive(Default)]
pub struct PhotoEditor {
    editor: Editor,
    texture: Option<egui::TextureHandle>,
    error: Option<String>,
}

impl PhotoEditor {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        let max_side = ctx.input(|i| i.max_texture_side);
        self.texture = self.editor.displayed().map(|image| {
            let color_image = texture_image(image, max_side);
            ctx.load_texture("displayed", color_image, egui::TextureOptions::LINEAR)
        });
    }

    fn open(&mut self, ctx: &egui::Context, path: &Path) {
        match self.editor.load(path).map(|_| ()) {
            Ok(()) => self.load_texture(ctx),
            Err(e) => {
                error!("Failed to load image: {}", e);
                self.error = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Source file stem with a `.png` extension, or `untitled.png` when
    /// nothing usable is loaded.
    fn default_save_name(&self) -> String {
        let stem = self
            .editor
            .source_path()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("untitled");
        format!("{}.png", stem)
    }

    fn save(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(self.default_save_name())
            .add_filter("PNG files", &["png"])
            .add_filter("JPEG files", &["jpg", "jpeg"])
            .add_filter("All files", &["*"])
            .save_file()
        {
            if let Err(e) = self.editor.save(&path) {
                error!("Failed to save image: {}", e);
                self.error = Some(format!("Failed to save image: {}", e));
            }
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action) {
        let changed = match action {
            Action::Open => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Image Files", &OPEN_EXTENSIONS)
                    .add_filter("All Files", &["*"])
                    .pick_file()
                {
                    self.open(ctx, &path);
                }
                false
            }
            Action::Save => {
                self.save();
                false
            }
            Action::IncreaseSize => self.editor.adjust_scale(STEP),
            Action::DecreaseSize => self.editor.adjust_scale(-STEP),
            Action::RotateLeft => self.editor.rotate(RotateDirection::Left),
            Action::RotateRight => self.editor.rotate(RotateDirection::Right),
            Action::IncreaseBrightness => self.editor.adjust_brightness(STEP),
            Action::DecreaseBrightness => self.editor.adjust_brightness(-STEP),
            Action::IncreaseContrast => self.editor.adjust_contrast(STEP),
            Action::DecreaseContrast => self.editor.adjust_contrast(-STEP),
            Action::Grayscale => self.editor.toggle_grayscale(),
        };

        if changed {
            self.load_texture(ctx);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped_files.first() {
            match &file.path {
                Some(path) => self.open(ctx, path),
                None => warn!("Dropped file {:?} has no path", file.name),
            }
        }
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        if let Some(message) = &self.error {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message.as_str());
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
        }
        if dismissed {
            self.error = None;
        }
    }

    fn status_text(&self) -> String {
        let (Some(path), Some(image), Some(adjustments)) = (
            self.editor.source_path(),
            self.editor.displayed(),
            self.editor.adjustments(),
        ) else {
            return "No image loaded".to_owned();
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        format!(
            "{}  |  {}x{}  |  brightness {:.1}  contrast {:.1}  size {:.1}{}",
            name,
            image.width(),
            image.height(),
            adjustments.brightness,
            adjustments.contrast,
            adjustments.scale,
            if adjustments.grayscale { "  grayscale" } else { "" }
        )
    }
}

/// Pixels to upload for `image`, downsampled to fit `max_side` when larger.
fn texture_image(image: &DynamicImage, max_side: usize) -> egui::ColorImage {
    let max_side = u32::try_from(max_side).unwrap_or(u32::MAX);
    let image_buffer = if image.width() > max_side || image.height() > max_side {
        image.resize(max_side, max_side, FilterType::Triangle).to_rgba8()
    } else {
        image.to_rgba8()
    };
    let size = [image_buffer.width() as _, image_buffer.height() as _];
    let pixels = image_buffer.as_flat_samples();
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice())
}

impl eframe::App for PhotoEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.error.is_none() {
            self.handle_dropped_files(ctx);
        }

        let mut clicked = None;
        let enabled = self.error.is_none();
        let loaded = self.editor.is_loaded();

        egui::SidePanel::left("controls")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    ui.add_space(10.0);
                    for action in Action::ALL {
                        let button = egui::Button::new(action.to_string())
                            .min_size(egui::vec2(PANEL_WIDTH - 20.0, 28.0));
                        if ui
                            .add_enabled(loaded || !action.needs_image(), button)
                            .clicked()
                        {
                            clicked = Some(action);
                        }
                        ui.add_space(5.0);
                    }
                });
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(CANVAS_FILL))
            .show(ctx, |ui| {
                if let (Some(texture), Some(image)) = (&self.texture, self.editor.displayed()) {
                    // The texture may be downsampled, so fit the real pixel size.
                    let image_size = egui::vec2(image.width() as f32, image.height() as f32);
                    let display_size = viewport::fit_size(ui.available_size(), image_size);
                    let (image_rect, _) =
                        ui.allocate_exact_size(display_size, egui::Sense::hover());
                    ui.painter().image(
                        texture.id(),
                        image_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            });

        self.show_error(ctx);

        if let Some(action) = clicked {
            self.apply(ctx, action);
        }
    }
}
