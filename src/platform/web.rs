//! Browser implementations (wasm32 only)

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::sim::ViewportMetrics;

/// Fallback size when the window can't be queried
const FALLBACK_WIDTH: f32 = 800.0;
const FALLBACK_HEIGHT: f32 = 600.0;

/// Reads the window's inner size on every query, so resizes take effect at
/// the next spawn/clamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowViewport;

impl ViewportMetrics for WindowViewport {
    fn width(&self) -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(FALLBACK_WIDTH)
    }

    fn height(&self) -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(FALLBACK_HEIGHT)
    }
}

/// A reusable `requestAnimationFrame` callback. The closure is built once and
/// registered again for every frame. Dropping the loop cancels a pending frame
/// and frees the closure; don't drop it from inside its own callback.
pub struct FrameLoop {
    closure: Closure<dyn FnMut(f64)>,
    pending: Option<i32>,
}

impl FrameLoop {
    pub fn new<F: FnMut(f64) + 'static>(callback: F) -> Self {
        Self {
            closure: Closure::<dyn FnMut(f64)>::new(callback),
            pending: None,
        }
    }

    /// Schedule the callback for the next frame. No-op while one is pending.
    pub fn request(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.request_animation_frame(self.closure.as_ref().unchecked_ref()) {
            Ok(id) => self.pending = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Mark the pending frame as delivered. Call at the top of the callback.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Cancel the pending frame. Repeated calls do nothing.
    pub fn cancel(&mut self) {
        let Some(id) = self.pending.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A `setInterval` registration that owns its closure and clears the
/// interval when dropped.
pub struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    pub fn every<F: FnMut() + 'static>(interval_ms: u32, callback: F) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        ) {
            Ok(id) => Some(Self {
                id,
                _closure: closure,
            }),
            Err(e) => {
                log::warn!("setInterval failed: {:?}", e);
                None
            }
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
