//! The edit state machine.
//!
//! An [`Editor`] is either empty or holds one loaded image. The loaded image
//! keeps the decoded original untouched and derives the displayed buffer from
//! it: brightness, contrast, scale and grayscale always start again from the
//! original, while rotation turns whatever is currently displayed.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageFormat, ImageReader, RgbImage};
use log::{debug, info};

use crate::adjustment::{Adjustment, AdjustmentState, scaled_dimensions};
use crate::error::{LoadError, SaveError};
use crate::filters::{self, RotateDirection};

/// Extension appended when a save path has none.
pub const DEFAULT_EXTENSION: &str = "png";

/// Formats offered for writing.
pub const SAVE_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Gif,
];

struct LoadedImage {
    path: PathBuf,
    original: RgbImage,
    displayed: DynamicImage,
    adjustments: AdjustmentState,
}

#[derive(Default)]
pub struct Editor {
    // `None` until the first successful load.
    image: Option<LoadedImage>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path` and makes it the new original.
    ///
    /// Adjustments are reset and the displayed image becomes a copy of the
    /// original. On failure the current state is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&RgbImage, LoadError> {
        let path = path.as_ref();
        let original = decode_rgb(path)?;
        info!(
            "Image loaded from {}: {}x{}",
            path.display(),
            original.width(),
            original.height()
        );

        let loaded = self.image.insert(LoadedImage {
            path: path.to_path_buf(),
            displayed: DynamicImage::ImageRgb8(original.clone()),
            original,
            adjustments: AdjustmentState::default(),
        });
        Ok(&loaded.original)
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn original(&self) -> Option<&RgbImage> {
        self.image.as_ref().map(|l| &l.original)
    }

    /// The buffer a renderer should show.
    pub fn displayed(&self) -> Option<&DynamicImage> {
        self.image.as_ref().map(|l| &l.displayed)
    }

    pub fn adjustments(&self) -> Option<&AdjustmentState> {
        self.image.as_ref().map(|l| &l.adjustments)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|l| l.path.as_path())
    }

    pub fn adjust_brightness(&mut self, delta: f32) -> bool {
        self.adjust(Adjustment::Brightness, delta)
    }

    pub fn adjust_contrast(&mut self, delta: f32) -> bool {
        self.adjust(Adjustment::Contrast, delta)
    }

    pub fn adjust_scale(&mut self, delta: f32) -> bool {
        self.adjust(Adjustment::Scale, delta)
    }

    /// Moves one factor and re-derives the displayed image from the original
    /// using that factor alone. Returns whether anything changed.
    pub fn adjust(&mut self, adjustment: Adjustment, delta: f32) -> bool {
        let Some(loaded) = &mut self.image else {
            return false;
        };
        if !loaded.adjustments.apply(adjustment, delta) {
            return false;
        }

        let factor = loaded.adjustments.factor(adjustment);
        let original = &loaded.original;
        let derived = match adjustment {
            Adjustment::Brightness => filters::brightness(original, factor),
            Adjustment::Contrast => filters::contrast(original, factor),
            Adjustment::Scale => {
                let (width, height) =
                    scaled_dimensions(original.width(), original.height(), factor);
                filters::resize(original, width, height)
            }
        };
        debug!(
            "{} set to {:.2}, displaying {}x{}",
            adjustment,
            factor,
            derived.width(),
            derived.height()
        );
        loaded.displayed = DynamicImage::ImageRgb8(derived);
        true
    }

    /// Turns the displayed image a quarter turn. Rotations accumulate until
    /// the next operation that re-derives from the original.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(loaded) = &mut self.image else {
            return false;
        };
        loaded.displayed = filters::rotate(&loaded.displayed, direction);
        debug!(
            "Rotated {}, displaying {}x{}",
            direction,
            loaded.displayed.width(),
            loaded.displayed.height()
        );
        true
    }

    /// Switches between a grayscale rendition of the original and a plain
    /// copy of it. Other edits visible in the displayed image are dropped,
    /// their factors are kept.
    pub fn toggle_grayscale(&mut self) -> bool {
        let Some(loaded) = &mut self.image else {
            return false;
        };
        let grayscale = !loaded.adjustments.grayscale;
        loaded.displayed = if grayscale {
            filters::grayscale(&loaded.original)
        } else {
            DynamicImage::ImageRgb8(loaded.original.clone())
        };
        loaded.adjustments.grayscale = grayscale;
        debug!("Grayscale {}", if grayscale { "on" } else { "off" });
        true
    }

    /// Encodes the displayed image, picking the format from the extension.
    ///
    /// A path without an extension gets [`DEFAULT_EXTENSION`]. Returns the
    /// path that was written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, SaveError> {
        let loaded = self.image.as_ref().ok_or(SaveError::NothingToSave)?;

        let path = with_default_extension(path.as_ref());
        let format = ImageFormat::from_path(&path)
            .ok()
            .filter(|format| SAVE_FORMATS.contains(format))
            .ok_or_else(|| SaveError::UnsupportedFormat { path: path.clone() })?;

        // The GIF encoder wants RGBA input.
        let needs_rgba = format == ImageFormat::Gif && loaded.displayed.color() != ColorType::Rgba8;
        let image = if needs_rgba {
            Cow::Owned(DynamicImage::ImageRgba8(loaded.displayed.to_rgba8()))
        } else {
            Cow::Borrowed(&loaded.displayed)
        };

        // Encode in memory first so a failing encoder leaves nothing on disk.
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(|source| SaveError::Encode {
                path: path.clone(),
                source,
            })?;
        std::fs::write(&path, &bytes).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Image saved to {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            format
        );
        Ok(path)
    }
}

/// Opens `path`, sniffing the format from its content first, and converts
/// whatever comes out to 8-bit RGB.
fn decode_rgb(path: &Path) -> Result<RgbImage, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;
    let image = reader.decode().map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}
