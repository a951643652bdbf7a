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

/// Pair each chart category with a distinct colour, in series order.
pub fn colored_entries(entries: &[(String, f64)]) -> Vec<(&str, f64, Color32)> {
    entries
        .iter()
        .zip(generate_palette(entries.len()))
        .map(|((label, value), color)| (label.as_str(), *value, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn entries_keep_their_order() {
        let entries = vec![("Laptop".to_string(), 3.0), ("Tablet".to_string(), 1.0)];
        let colored = colored_entries(&entries);
        assert_eq!(colored.len(), 2);
        assert_eq!((colored[0].0, colored[0].1), ("Laptop", 3.0));
        assert_eq!((colored[1].0, colored[1].1), ("Tablet", 1.0));
    }
}
