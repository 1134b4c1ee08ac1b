use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Accent used for headings and single-series charts.
pub const ACCENT: Color32 = Color32::from_rgb(0x8c, 0x00, 0x05);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` shades of red, dark to light, by stepping lightness at a fixed hue.
pub fn red_shades(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let hsl = Hsl::new(358.0, 0.95, 0.27 + 0.38 * t);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: genre → Color32
// ---------------------------------------------------------------------------

/// Maps each genre to a distinct shade, assigned in the order genres are given.
#[derive(Debug, Clone, Default)]
pub struct GenreColors {
    mapping: HashMap<String, Color32>,
}

impl GenreColors {
    pub fn new(genres: &[String]) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(red_shades(genres.len()))
            .collect();
        GenreColors { mapping }
    }

    /// Unknown genres fall back to [`ACCENT`].
    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shades_get_lighter() {
        let shades = red_shades(4);
        assert_eq!(shades.len(), 4);
        assert!(shades[0].r() < shades[3].r());
        assert!(red_shades(0).is_empty());
        assert_eq!(red_shades(1).len(), 1);
    }

    #[test]
    fn genres_map_to_distinct_colors() {
        let colors = GenreColors::new(&["Drama".to_string(), "Comedy".to_string()]);
        assert_ne!(colors.color_for("Drama"), colors.color_for("Comedy"));
        assert_eq!(colors.color_for("Western"), ACCENT);
    }
}
