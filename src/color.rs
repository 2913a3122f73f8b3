use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for the 16 wind-rose buckets.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_color((i as f32 / n as f32) * 360.0))
        .collect()
}

fn hsl_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Series colours – fixed hues per measured variable
// ---------------------------------------------------------------------------

pub fn temperature_color() -> Color32 {
    hsl_color(8.0)
}

pub fn pressure_color() -> Color32 {
    hsl_color(210.0)
}

pub fn wind_color() -> Color32 {
    hsl_color(130.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(16);
        assert_eq!(palette.len(), 16);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
