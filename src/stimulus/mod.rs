mod board;
mod sweep;

pub use board::{draw_alignment_frame, CalibrationBoard};
pub use sweep::SweepMarker;

use crate::display::PixelBuffer;

/// One of the mutually exclusive draw states of the display
pub trait Stimulus {
    /// Advance state by dt seconds (called each frame while active)
    fn update(&mut self, dt: f32);

    /// Render into the pixel buffer
    fn render(&self, buffer: &mut PixelBuffer);

    /// Name for logging
    fn name(&self) -> &str;
}
