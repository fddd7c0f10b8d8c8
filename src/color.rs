use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scales for bar charts
// ---------------------------------------------------------------------------

/// A value → colour ramp, evaluated at `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Purple → teal → yellow.
    Viridis,
    /// Pale blue → deep blue.
    Blues,
}

impl ColorScale {
    pub fn color_at(self, t: f32) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let hsl = match self {
            ColorScale::Viridis => Hsl::new(280.0 - 225.0 * t, 0.70, 0.30 + 0.30 * t),
            ColorScale::Blues => Hsl::new(210.0, 0.65, 0.85 - 0.55 * t),
        };
        to_color32(hsl)
    }

    /// One colour per value, scaled between the smallest and largest value.
    pub fn colors_for(self, values: &[f64]) -> Vec<Color32> {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        values
            .iter()
            .map(|&v| {
                let t = if range.abs() < f64::EPSILON {
                    1.0
                } else {
                    ((v - min) / range) as f32
                };
                self.color_at(t)
            })
            .collect()
    }
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
