use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Canonical VOC palette
// ---------------------------------------------------------------------------

/// Border/"void" color used by the VOC class masks for pixels that belong to
/// no category (label 255).
pub const VOID_COLOR: [u8; 3] = [224, 224, 192];

/// Generate the first `n` entries of the canonical PASCAL VOC colormap.
///
/// Label `i` gets its color by spreading the bits of `i` across the three
/// channels, three bits per round, from the most significant bit down.
/// Index 0 is black (background), index 1 is dark red (aeroplane), and so on.
pub fn voc_palette(n: usize) -> Vec<[u8; 3]> {
    (0..n)
        .map(|label| {
            let mut id = label;
            let (mut r, mut g, mut b) = (0u8, 0u8, 0u8);
            for shift in (0..8).rev() {
                r |= ((id & 1) as u8) << shift;
                g |= (((id >> 1) & 1) as u8) << shift;
                b |= (((id >> 2) & 1) as u8) << shift;
                id >>= 3;
            }
            [r, g, b]
        })
        .collect()
}

/// Inverse palette lookup: map a mask pixel back to its category index.
///
/// Returns `None` for colors outside the palette, including [`VOID_COLOR`].
pub fn class_index_for(rgb: [u8; 3], palette: &[[u8; 3]]) -> Option<usize> {
    palette.iter().position(|&c| c == rgb)
}

// ---------------------------------------------------------------------------
// Display palette for overlays and the legend
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// The canonical VOC colors are designed to round-trip through label indices,
/// not to stay readable over a photograph, so overlays and the legend use
/// these instead.
pub fn generate_palette_rgb(n: usize) -> Vec<[u8; 3]> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            [
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ]
        })
        .collect()
}

/// [`generate_palette_rgb`] as egui colors, for the legend.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    generate_palette_rgb(n)
        .into_iter()
        .map(|[r, g, b]| Color32::from_rgb(r, g, b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voc_palette_known_entries() {
        let palette = voc_palette(21);
        assert_eq!(palette[0], [0, 0, 0]); // background
        assert_eq!(palette[1], [128, 0, 0]); // aeroplane
        assert_eq!(palette[2], [0, 128, 0]); // bicycle
        assert_eq!(palette[4], [0, 0, 128]); // boat
        assert_eq!(palette[15], [192, 128, 128]); // person
        assert_eq!(palette[20], [0, 64, 128]); // tvmonitor
    }

    #[test]
    fn class_index_roundtrip() {
        let palette = voc_palette(21);
        for (i, &c) in palette.iter().enumerate() {
            assert_eq!(class_index_for(c, &palette), Some(i));
        }
    }

    #[test]
    fn void_color_has_no_class() {
        let palette = voc_palette(21);
        assert_eq!(class_index_for(VOID_COLOR, &palette), None);
        assert_eq!(class_index_for([1, 2, 3], &palette), None);
    }

    #[test]
    fn display_palette_size_and_distinctness() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(21);
        assert_eq!(p.len(), 21);
        assert_ne!(p[0], p[10]);
    }
}
