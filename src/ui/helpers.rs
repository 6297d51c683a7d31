use ratatui::style::Color;
use unicode_width::UnicodeWidthStr;

use sb_base::config::RgbColor;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut width = 0;
        for c in s.chars() {
            let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if width + cw + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            width += cw;
        }
        result
    }
}

/// Black or white, whichever reads better on `bg`
pub fn contrast_text(bg: RgbColor) -> Color {
    let luma = 0.299 * bg[0] as f32 + 0.587 * bg[1] as f32 + 0.114 * bg[2] as f32;
    if luma > 140.0 { Color::Rgb(20, 20, 20) } else { Color::Rgb(245, 245, 245) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_string("Leaf", 10), "Leaf");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_string("Sunflower", 5), "Sunf…");
    }

    #[test]
    fn contrast_flips_on_brightness() {
        assert_eq!(contrast_text([255, 255, 255]), Color::Rgb(20, 20, 20));
        assert_eq!(contrast_text([10, 10, 40]), Color::Rgb(245, 245, 245));
    }
}
