/// Increment applied by a single button press.
pub const STEP: f32 = 0.1;

/// Lowest value any factor can reach.
pub const MIN_FACTOR: f32 = 0.1;

// Absorbs float drift so that repeated `-STEP` presses land on the floor.
const FACTOR_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjustment {
    Brightness,
    Contrast,
    Scale,
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Adjustment::Brightness => "brightness",
            Adjustment::Contrast => "contrast",
            Adjustment::Scale => "scale",
        };
        write!(f, "{}", s)
    }
}

/// Scalar edit parameters tracked for the loaded image.
///
/// Factors are multiplicative, 1.0 meaning "unchanged".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjustmentState {
    pub brightness: f32,
    pub contrast: f32,
    pub scale: f32,
    pub grayscale: bool,
}

impl Default for AdjustmentState {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            scale: 1.0,
            grayscale: false,
        }
    }
}

impl AdjustmentState {
    pub fn factor(&self, adjustment: Adjustment) -> f32 {
        match adjustment {
            Adjustment::Brightness => self.brightness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Scale => self.scale,
        }
    }

    /// Moves one factor by `delta`.
    ///
    /// Decreasing is refused once the factor sits on the floor, otherwise the
    /// result is clamped to it. Returns whether the factor changed.
    pub fn apply(&mut self, adjustment: Adjustment, delta: f32) -> bool {
        let factor = match adjustment {
            Adjustment::Brightness => &mut self.brightness,
            Adjustment::Contrast => &mut self.contrast,
            Adjustment::Scale => &mut self.scale,
        };
        step_factor(factor, delta)
    }
}

fn step_factor(factor: &mut f32, delta: f32) -> bool {
    if !delta.is_finite() || delta == 0.0 {
        return false;
    }
    if delta < 0.0 && *factor <= MIN_FACTOR + FACTOR_EPSILON {
        return false;
    }

    let next = *factor + delta;
    *factor = if next <= MIN_FACTOR + FACTOR_EPSILON {
        MIN_FACTOR
    } else {
        next
    };
    true
}

/// Target size for `factor` applied to a `width` x `height` image.
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let scale = |dim: u32| ((dim as f32 * factor).round() as u32).max(1);
    (scale(width), scale(height))
}
