//! Platform abstraction layer
//!
//! Browser glue for the session driver:
//! - Viewport size from the window
//! - Animation-frame and interval registrations that cancel on drop

mod web;

pub use web::{FrameLoop, IntervalHandle, WindowViewport};
