use eframe::egui;

/// Uniform factor that shrinks `image` to fit inside `viewport`.
///
/// Never magnifies (capped at 1.0) and never goes negative, so a collapsed
/// viewport yields 0.0.
pub fn fit_scale(viewport: egui::Vec2, image: egui::Vec2) -> f32 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return 1.0;
    }
    (viewport.x / image.x)
        .min(viewport.y / image.y)
        .min(1.0)
        .max(0.0)
}

/// On-screen size of `image` once fitted into `viewport`, in whole points.
pub fn fit_size(viewport: egui::Vec2, image: egui::Vec2) -> egui::Vec2 {
    let scale = fit_scale(viewport, image);
    egui::vec2((image.x * scale).floor(), (image.y * scale).floor())
}
