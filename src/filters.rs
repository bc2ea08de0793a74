//! Pixel operations applied by the editor.
//!
//! Every function takes its input by reference and returns a new buffer, so
//! the caller decides what gets replaced.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

impl std::fmt::Display for RotateDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotateDirection::Left => write!(f, "left"),
            RotateDirection::Right => write!(f, "right"),
        }
    }
}

/// Interpolates from `base` towards `value` by `factor`, extrapolating past
/// `value` when `factor > 1.0`.
fn blend(base: f32, value: u8, factor: f32) -> u8 {
    (base + factor * (value as f32 - base)).clamp(0.0, 255.0) as u8
}

/// Scales every channel towards black (`factor < 1.0`) or away from it.
pub fn brightness(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = blend(0.0, *channel, factor);
        }
    }
    out
}

/// Pushes every channel towards (`factor < 1.0`) or away from the image's
/// mean luminance.
pub fn contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luminance(image);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = blend(mean, *channel, factor);
        }
    }
    out
}

/// ITU-R 601-2 luma, rounded to the nearest level.
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0.map(u32::from);
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}

fn luma_image(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma(image.get_pixel(x, y))])
    })
}

/// Rounded mean of the image's grey levels.
pub fn mean_luminance(image: &RgbImage) -> f32 {
    let luma = luma_image(image);
    let count = luma.width() as u64 * luma.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = luma.pixels().map(|p| p.0[0] as u64).sum();
    (sum as f64 / count as f64).round() as f32
}

pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(image, width, height, FilterType::CatmullRom)
}

pub fn grayscale(image: &RgbImage) -> DynamicImage {
    DynamicImage::ImageLuma8(luma_image(image))
}

/// Quarter turn with the canvas expanded to fit, so nothing is cropped.
pub fn rotate(image: &DynamicImage, direction: RotateDirection) -> DynamicImage {
    match direction {
        RotateDirection::Left => image.rotate270(),
        RotateDirection::Right => image.rotate90(),
    }
}
