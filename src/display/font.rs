//! Compact 5x7 bitmap font
//!
//! Glyphs cover ASCII space..underscore; lowercase input is folded to
//! uppercase before lookup. Anything outside the table renders as a blank
//! cell so layout stays stable.

use super::PixelBuffer;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance between characters
pub const CHAR_SPACING: u32 = 1;
/// Vertical advance between wrapped lines
pub const LINE_SPACING: u32 = 3;

const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'_';

/// One row per byte, low 5 bits used, bit 4 is the leftmost column
#[rustfmt::skip]
const GLYPHS: [[u8; 7]; (LAST_CHAR - FIRST_CHAR + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // !
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // "
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // #
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // $
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // %
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // &
    [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // (
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // )
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // *
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ,
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // .
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // /
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ;
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // <
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // =
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // >
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // ?
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // @
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // [
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // backslash
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ]
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // _
];

fn glyph(c: char) -> Option<&'static [u8; 7]> {
    let c = c.to_ascii_uppercase();
    let b = c as u32;
    if b < FIRST_CHAR as u32 || b > LAST_CHAR as u32 {
        return None;
    }
    Some(&GLYPHS[(b as u8 - FIRST_CHAR) as usize])
}

/// Pixel width of a single-line string
pub fn text_width(text: &str) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        0
    } else {
        n * (GLYPH_WIDTH + CHAR_SPACING) - CHAR_SPACING
    }
}

/// Draw a single line of text with its top-left corner at (x, y)
pub fn draw_text(buffer: &mut PixelBuffer, x: i32, y: i32, text: &str, r: u8, g: u8, b: u8) {
    let mut cx = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (gy, row) in rows.iter().enumerate() {
                for gx in 0..GLYPH_WIDTH {
                    if row & (0x10 >> gx) != 0 {
                        buffer.set_pixel(cx + gx as i32, y + gy as i32, r, g, b);
                    }
                }
            }
        }
        cx += (GLYPH_WIDTH + CHAR_SPACING) as i32;
    }
}

/// Word-wrap `text` to at most `max_width` pixels per line.
/// Explicit newlines are honored; a word longer than the limit gets a line
/// of its own rather than being split.
pub fn wrap_text(text: &str, max_width: u32) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width(&candidate) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}

/// Draw multi-line text wrapped to `max_width` pixels.
/// Returns the pixel height consumed.
pub fn draw_text_wrapped(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    max_width: u32,
    text: &str,
    r: u8,
    g: u8,
    b: u8,
) -> u32 {
    let line_advance = GLYPH_HEIGHT + LINE_SPACING;
    let lines = wrap_text(text, max_width);
    for (i, line) in lines.iter().enumerate() {
        draw_text(buffer, x, y + (i as u32 * line_advance) as i32, line, r, g, b);
    }
    lines.len() as u32 * line_advance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), GLYPH_WIDTH);
        assert_eq!(text_width("AB"), GLYPH_WIDTH * 2 + CHAR_SPACING);
    }

    #[test]
    fn test_lowercase_folds_to_uppercase() {
        let mut upper = PixelBuffer::with_size(8, 8);
        let mut lower = PixelBuffer::with_size(8, 8);
        draw_text(&mut upper, 0, 0, "A", 255, 255, 255);
        draw_text(&mut lower, 0, 0, "a", 255, 255, 255);
        assert_eq!(upper.as_bytes(), lower.as_bytes());
    }

    #[test]
    fn test_known_glyph_lights_pixels() {
        let mut buf = PixelBuffer::with_size(8, 8);
        draw_text(&mut buf, 0, 0, "0", 255, 255, 255);
        let lit = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get_pixel(x, y) == Some((255, 255, 255)))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_unknown_glyph_stays_blank_but_advances() {
        let mut buf = PixelBuffer::with_size(32, 8);
        draw_text(&mut buf, 0, 0, "\u{3042}!", 255, 0, 0);
        // First cell blank
        for y in 0..GLYPH_HEIGHT as i32 {
            for x in 0..GLYPH_WIDTH as i32 {
                assert_eq!(buf.get_pixel(x, y), Some((0, 0, 0)));
            }
        }
        // '!' landed in the second cell
        let second = (GLYPH_WIDTH + CHAR_SPACING) as i32;
        let lit = (0..GLYPH_HEIGHT as i32)
            .flat_map(|y| (0..GLYPH_WIDTH as i32).map(move |x| (second + x, y)))
            .any(|(x, y)| buf.get_pixel(x, y) == Some((255, 0, 0)));
        assert!(lit);
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("AA BB CC", text_width("AA BB"));
        assert_eq!(lines, vec!["AA BB".to_string(), "CC".to_string()]);
    }

    #[test]
    fn test_wrap_honors_newlines_and_blank_lines() {
        let lines = wrap_text("A\n\nB", 1000);
        assert_eq!(
            lines,
            vec!["A".to_string(), String::new(), "B".to_string()]
        );
    }

    #[test]
    fn test_wrap_oversize_word_gets_own_line() {
        let lines = wrap_text("AAAAAAAAAA B", 12);
        assert_eq!(lines[0], "AAAAAAAAAA");
        assert_eq!(lines[1], "B");
    }

    #[test]
    fn test_clipped_draw_does_not_panic() {
        let mut buf = PixelBuffer::with_size(4, 4);
        draw_text(&mut buf, -3, -3, "TEST STRING", 255, 255, 255);
        draw_text(&mut buf, 100, 100, "OFFSCREEN", 255, 255, 255);
    }
}
