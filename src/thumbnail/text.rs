//! Text layout and drawing for thumbnail rendering
//!
//! Measuring goes through `imageproc::drawing::text_size`; titles are wrapped
//! into at most two lines and scaled down until they fit their column.

use ab_glyph::{FontArc, PxScale};
use image::Rgba;
use imageproc::drawing::{draw_text_mut, text_size, Canvas};

/// Pixel width of a single line at the given scale
pub fn line_width(font: &FontArc, scale: PxScale, text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }
    text_size(scale, font, text).0
}

/// Truncate to at most `max_chars` characters, on char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Word-wrap `text` into at most `max_lines` lines of `max_width` pixels
///
/// Overflow is ellipsized; a single word wider than the column is cut to
/// twenty characters plus an ellipsis.
pub fn wrap_lines(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    max_width: u32,
    max_lines: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current.join(" "), word)
        };

        if line_width(font, scale, &candidate) <= max_width {
            current.push(word);
            continue;
        }

        if current.is_empty() {
            // single word too wide for the column
            lines.push(format!("{}...", truncate_chars(word, 20)));
            return lines;
        }

        lines.push(current.join(" "));
        current = vec![word];

        if lines.len() >= max_lines {
            let mut last = lines[max_lines - 1].clone();
            while line_width(font, scale, &format!("{} ...", last)) > max_width
                && last.chars().count() > 3
            {
                last.pop();
            }
            lines[max_lines - 1] = format!("{} ...", last.trim_end());
            lines.truncate(max_lines);
            return lines;
        }
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current.join(" "));
    }

    lines
}

/// Shrink the font size until `text` fits `max_width` in at most `max_lines`
///
/// Returns the chosen scale together with the wrapped lines.
pub fn fit_lines(
    font: &FontArc,
    text: &str,
    max_width: u32,
    max_lines: usize,
    start_size: f32,
    min_size: f32,
) -> (PxScale, Vec<String>) {
    let mut size = start_size;

    while size >= min_size {
        let scale = PxScale::from(size);
        let lines = wrap_lines(font, scale, text, max_width, max_lines);
        let fits = lines.len() <= max_lines
            && lines
                .iter()
                .all(|line| line_width(font, scale, line) <= max_width);
        if fits {
            return (scale, lines);
        }
        size -= 2.0;
    }

    let scale = PxScale::from(min_size);
    let lines = wrap_lines(font, scale, text, max_width, max_lines);
    (scale, lines)
}

/// Draw a line twice, shadow first, for a cheap drop shadow
#[allow(clippy::too_many_arguments)]
pub fn draw_shadowed_text<C>(
    canvas: &mut C,
    x: i32,
    y: i32,
    shadow_offset: i32,
    scale: PxScale,
    font: &FontArc,
    text: &str,
    color: Rgba<u8>,
    shadow: Rgba<u8>,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    draw_text_mut(
        canvas,
        shadow,
        x + shadow_offset,
        y + shadow_offset,
        scale,
        font,
        text,
    );
    draw_text_mut(canvas, color, x, y, scale, font, text);
}

/// Draw wrapped lines with a drop shadow and fixed inter-line spacing
#[allow(clippy::too_many_arguments)]
pub fn draw_shadowed_lines<C>(
    canvas: &mut C,
    x: i32,
    y: i32,
    shadow_offset: i32,
    scale: PxScale,
    font: &FontArc,
    lines: &[String],
    spacing: i32,
    color: Rgba<u8>,
    shadow: Rgba<u8>,
) where
    C: Canvas<Pixel = Rgba<u8>>,
{
    let line_height = scale.y.ceil() as i32 + spacing;
    for (index, line) in lines.iter().enumerate() {
        let line_y = y + index as i32 * line_height;
        draw_shadowed_text(
            canvas,
            x,
            line_y,
            shadow_offset,
            scale,
            font,
            line,
            color,
            shadow,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::fonts::FontSet;
    use image::RgbaImage;

    fn test_font() -> Option<FontArc> {
        FontSet::load_default().ok().map(|fonts| fonts.regular)
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn test_wrap_empty_text() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let lines = wrap_lines(&font, PxScale::from(30.0), "", 400, 2);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_wrap_short_text_is_single_line() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let lines = wrap_lines(&font, PxScale::from(30.0), "Short title", 600, 2);
        assert_eq!(lines, vec!["Short title".to_string()]);
    }

    #[test]
    fn test_wrap_limits_line_count() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let long = "one two three four five six seven eight nine ten eleven twelve";
        let lines = wrap_lines(&font, PxScale::from(30.0), long, 200, 2);
        assert!(lines.len() <= 2, "got {:?}", lines);
    }

    #[test]
    fn test_wrap_ellipsizes_single_long_word() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let word = "Supercalifragilisticexpialidocious";
        let lines = wrap_lines(&font, PxScale::from(30.0), word, 100, 2);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("..."));
    }

    #[test]
    fn test_fit_lines_shrinks_until_it_fits() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let title = "A reasonably long song title that needs wrapping";
        let (scale, lines) = fit_lines(&font, title, 400, 2, 42.0, 20.0);

        assert!(lines.len() <= 2);
        for line in &lines {
            assert!(line_width(&font, scale, line) <= 400, "line too wide: {}", line);
        }
    }

    #[test]
    fn test_draw_shadowed_text_modifies_canvas() {
        let Some(font) = test_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let mut canvas = RgbaImage::from_pixel(200, 60, Rgba([0, 0, 0, 255]));
        draw_shadowed_text(
            &mut canvas,
            10,
            10,
            2,
            PxScale::from(32.0),
            &font,
            "Test",
            Rgba([255, 255, 255, 255]),
            Rgba([0, 0, 0, 140]),
        );
        let touched = canvas.pixels().any(|p| p.0[0] > 0);
        assert!(touched, "text drawing left the canvas black");
    }
}
