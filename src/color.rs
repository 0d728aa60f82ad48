use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize, lightness: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, lightness);
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
// Color mapping: test id → Color32
// ---------------------------------------------------------------------------

/// One colour per test run. RAM series use a lighter tone of the same hue so
/// both resources of a run read as a pair.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    cpu: BTreeMap<String, Color32>,
    ram: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(test_ids: &[String]) -> Self {
        let zip = |palette: Vec<Color32>| -> BTreeMap<String, Color32> {
            test_ids.iter().cloned().zip(palette).collect()
        };
        ColorMap {
            cpu: zip(generate_palette(test_ids.len(), 0.50)),
            ram: zip(generate_palette(test_ids.len(), 0.72)),
        }
    }

    /// Base colour of a run; used for CPU series and single-resource charts.
    pub fn color_for(&self, test_id: &str) -> Color32 {
        self.cpu.get(test_id).copied().unwrap_or(Color32::GRAY)
    }

    pub fn ram_color_for(&self, test_id: &str) -> Color32 {
        self.ram.get(test_id).copied().unwrap_or(Color32::LIGHT_GRAY)
    }
}
