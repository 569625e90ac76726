//! Luminance-based color derivations

use crate::host::ColorUtility;

const DARK_TEXT: &str = "#000000";
const LIGHT_TEXT: &str = "#ffffff";
const MUTED_ELEMENT: &str = "#555555";

/// Above this luminance text on the color is drawn dark
const TEXT_INVERT_THRESHOLD: f64 = 0.6;
/// Above this luminance the color is too light for elements on white
const ELEMENT_THRESHOLD: f64 = 0.8;

/// Derives colors from perceived luminance
#[derive(Debug, Clone, Copy, Default)]
pub struct LuminanceColorUtility;

impl LuminanceColorUtility {
    /// Perceived luminance in `0.0..=1.0`; unparsable colors count as black
    pub fn luminance(color: &str) -> f64 {
        let (r, g, b) = parse_hex(color).unwrap_or((0, 0, 0));
        (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
    }
}

impl ColorUtility for LuminanceColorUtility {
    fn contrasting_text_color(&self, color: &str) -> String {
        if Self::luminance(color) > TEXT_INVERT_THRESHOLD {
            DARK_TEXT.to_string()
        } else {
            LIGHT_TEXT.to_string()
        }
    }

    fn element_color(&self, color: &str) -> String {
        if Self::luminance(color) > ELEMENT_THRESHOLD {
            MUTED_ELEMENT.to_string()
        } else {
            color.to_string()
        }
    }
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional)
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
