use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.55);
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
// Category colors: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours,
/// for chart series and legends.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for CategoryColors {
    fn default() -> Self {
        CategoryColors {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl CategoryColors {
    /// Build a colour map from a column's sorted distinct values.
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .zip(palette)
            .map(|(cat, color)| (cat.clone(), color))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
