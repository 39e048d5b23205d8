use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::chart::Palette;

// ---------------------------------------------------------------------------
// Hex → Color32
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (or `rrggbb`) into a colour, gray when malformed.
pub fn hex_color(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("Invalid colour '{hex}': {e}");
            Color32::GRAY
        }
    }
}

/// Colour of the `i`-th series of a palette.
pub fn series_color(palette: &Palette, i: usize) -> Color32 {
    hex_color(&palette.color(i))
}

/// Darker variant used for shadows and outlines.
pub fn shade(color: Color32, factor: f32) -> Color32 {
    let f = factor.clamp(0.0, 1.0);
    Color32::from_rgb(
        (color.r() as f32 * f) as u8,
        (color.g() as f32 * f) as u8,
        (color.b() as f32 * f) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(hex_color("#66b3ff"), Color32::from_rgb(0x66, 0xb3, 0xff));
        assert_eq!(hex_color("ff9999"), Color32::from_rgb(0xff, 0x99, 0x99));
    }

    #[test]
    fn malformed_hex_falls_back_to_gray() {
        assert_eq!(hex_color("not-a-colour"), Color32::GRAY);
    }

    #[test]
    fn series_color_uses_palette() {
        assert_eq!(
            series_color(&Palette::Set2, 1),
            Color32::from_rgb(0xfc, 0x8d, 0x62)
        );
    }
}
