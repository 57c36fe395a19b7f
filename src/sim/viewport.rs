//! Viewport size provider
//!
//! The simulation never reads the window directly; whoever drives it supplies
//! the play-surface size through this trait.

/// Width/height of the play surface, queried at spawn and clamp time
pub trait ViewportMetrics {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

/// A viewport with a constant size (tests, headless runs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub width: f32,
    pub height: f32,
}

impl FixedViewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl ViewportMetrics for FixedViewport {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
