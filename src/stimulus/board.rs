//! Calibration board
//!
//! A light-gray frame at the exact screen bounds with a black field inside,
//! used to line a physical calibration fixture up against the panel, plus a
//! status block showing the measured rig geometry (or usage instructions
//! when the program was started without measurements).

use super::Stimulus;
use crate::config::Measurements;
use crate::display::{draw_text_wrapped, PixelBuffer};

/// Border thickness in pixels on every side
pub const BORDER_INSET: i32 = 2;
/// Status text margin from the top-left corner
const TEXT_MARGIN: i32 = 10;
/// Wrap margin subtracted from the screen width
const WRAP_MARGIN: u32 = 100;

const FIELD_COLOR: (u8, u8, u8) = (0xAA, 0xAA, 0xAA);
const TEXT_COLOR: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);

/// Fill the buffer with the alignment frame: gray to the edges, black
/// inside, leaving a 2 px gray border at the exact screen bounds.
/// Shared between the main display and the TFT mirror.
pub fn draw_alignment_frame(buffer: &mut PixelBuffer) {
    let (r, g, b) = FIELD_COLOR;
    buffer.clear(r, g, b);

    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    buffer.fill_rect(
        BORDER_INSET,
        BORDER_INSET,
        (w - 2 * BORDER_INSET).max(0) as u32,
        (h - 2 * BORDER_INSET).max(0) as u32,
        0,
        0,
        0,
    );
}

/// Build the status block shown while calibrating.
/// `invoked_as` is argv[0], echoed in the usage lines.
fn status_text(measurements: &Measurements, invoked_as: &str) -> String {
    let mut text = String::from("Currently in calibration mode\n\n");
    if !measurements.is_complete() {
        text.push_str("Missing parameters on program, you must start the program as follows\n");
        text.push_str(&format!(
            "{} <distance_to_screen> <calibration_box_width>\n",
            invoked_as
        ));
        text.push_str(&format!("Example : {} 1000 120\n", invoked_as));
    }
    text.push_str(&format!(
        "Distance to screen in mm: {}\n",
        measurements.distance_mm
    ));
    text.push_str(&format!(
        "Width of the calibration box in mm: {}",
        measurements.box_width_mm
    ));
    text
}

pub struct CalibrationBoard {
    text: String,
}

impl CalibrationBoard {
    pub fn new(measurements: &Measurements, invoked_as: &str) -> Self {
        Self {
            text: status_text(measurements, invoked_as),
        }
    }
}

impl Stimulus for CalibrationBoard {
    fn update(&mut self, _dt: f32) {
        // Static display, nothing to advance
    }

    fn render(&self, buffer: &mut PixelBuffer) {
        draw_alignment_frame(buffer);

        let wrap_width = buffer.width().saturating_sub(WRAP_MARGIN);
        let (r, g, b) = TEXT_COLOR;
        draw_text_wrapped(
            buffer,
            TEXT_MARGIN,
            TEXT_MARGIN,
            wrap_width,
            &self.text,
            r,
            g,
            b,
        );
    }

    fn name(&self) -> &str {
        "Calibration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Measurements {
        Measurements {
            distance_mm: 1000,
            box_width_mm: 120,
        }
    }

    #[test]
    fn test_frame_border_and_field() {
        let mut buf = PixelBuffer::with_size(32, 24);
        draw_alignment_frame(&mut buf);
        // Corners and edge band are gray
        assert_eq!(buf.get_pixel(0, 0), Some((0xAA, 0xAA, 0xAA)));
        assert_eq!(buf.get_pixel(31, 23), Some((0xAA, 0xAA, 0xAA)));
        assert_eq!(buf.get_pixel(1, 12), Some((0xAA, 0xAA, 0xAA)));
        assert_eq!(buf.get_pixel(30, 12), Some((0xAA, 0xAA, 0xAA)));
        // Inside the inset is black
        assert_eq!(buf.get_pixel(2, 2), Some((0, 0, 0)));
        assert_eq!(buf.get_pixel(29, 21), Some((0, 0, 0)));
        assert_eq!(buf.get_pixel(16, 12), Some((0, 0, 0)));
    }

    #[test]
    fn test_frame_survives_tiny_buffer() {
        let mut buf = PixelBuffer::with_size(3, 3);
        draw_alignment_frame(&mut buf);
        assert_eq!(buf.get_pixel(1, 1), Some((0xAA, 0xAA, 0xAA)));
    }

    #[test]
    fn test_status_text_with_measurements() {
        let text = status_text(&complete(), "saccade");
        assert!(text.starts_with("Currently in calibration mode\n\n"));
        assert!(text.contains("Distance to screen in mm: 1000"));
        assert!(text.contains("Width of the calibration box in mm: 120"));
        assert!(!text.contains("Missing parameters"));
    }

    #[test]
    fn test_status_text_without_measurements() {
        let text = status_text(&Measurements::default(), "./saccade");
        assert!(text.contains("Missing parameters"));
        assert!(text.contains("./saccade <distance_to_screen> <calibration_box_width>"));
        assert!(text.contains("Example : ./saccade 1000 120"));
        assert!(text.contains("Distance to screen in mm: 0"));
    }

    #[test]
    fn test_board_renders_text_over_frame() {
        let board = CalibrationBoard::new(&complete(), "saccade");
        let mut buf = PixelBuffer::with_size(320, 240);
        board.render(&mut buf);
        // Some white status pixels in the text area
        let lit = (10..60)
            .flat_map(|y| (10..200).map(move |x| (x, y)))
            .any(|(x, y)| buf.get_pixel(x, y) == Some((255, 255, 255)));
        assert!(lit);
    }
}
