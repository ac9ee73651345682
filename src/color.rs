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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour for a ranked series entry (bars, cloud words), cycling when the
/// palette is smaller than the series.
pub fn color_for_rank(palette: &[Color32], rank: usize) -> Color32 {
    if palette.is_empty() {
        return Color32::GRAY;
    }
    palette[rank % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_hues() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(8);
        assert_eq!(p.len(), 8);
        assert_ne!(p[0], p[4]);
    }

    #[test]
    fn rank_lookup_cycles() {
        let p = generate_palette(3);
        assert_eq!(color_for_rank(&p, 0), color_for_rank(&p, 3));
        assert_eq!(color_for_rank(&[], 5), Color32::GRAY);
    }
}
