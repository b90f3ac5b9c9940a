use image::RgbaImage;
use tracing::debug;

use super::errors::CaptureError;
use crate::window::TargetWindow;

/// What one look at the target window found.
#[derive(Debug)]
pub enum Observation {
    /// The window no longer exists.
    Closed,
    /// The window exists but is minimized.
    Minimized,
    /// The window exists but has no drawable area.
    ZeroArea { width: u32, height: u32 },
    /// The window's current pixels.
    Pixels(RgbaImage),
}

/// A window the capture loop can observe once per tick.
///
/// Implementations check liveness, read the size, and grab the pixels in
/// that order, stopping at the first step that rules out a capture.
pub trait CaptureTarget: Send + 'static {
    fn observe(&mut self) -> Result<Observation, CaptureError>;
}

/// [`CaptureTarget`] for a real OS window, using `xcap`.
///
/// Only the window id is kept between ticks; the window is looked up again
/// on each observation, which doubles as the liveness check.
#[derive(Debug, Clone)]
pub struct XcapTarget {
    window: TargetWindow,
}

impl XcapTarget {
    pub fn new(window: TargetWindow) -> Self {
        Self { window }
    }
}

impl CaptureTarget for XcapTarget {
    fn observe(&mut self) -> Result<Observation, CaptureError> {
        let id = self.window.id();
        let windows = xcap::Window::all().map_err(|e| CaptureError::ProbeFailed {
            message: e.to_string(),
        })?;

        let Some(window) = windows.into_iter().find(|w| w.id().ok() == Some(id)) else {
            return Ok(Observation::Closed);
        };

        let is_minimized = window.is_minimized().unwrap_or_else(|e| {
            debug!(
                event = "core.capture.is_minimized_check_failed",
                window_id = id,
                error = %e
            );
            false
        });
        if is_minimized {
            return Ok(Observation::Minimized);
        }

        let width = window.width().unwrap_or(0);
        let height = window.height().unwrap_or(0);
        if width == 0 || height == 0 {
            return Ok(Observation::ZeroArea { width, height });
        }

        let image = window
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed {
                message: e.to_string(),
            })?;

        if image.width() == 0 || image.height() == 0 {
            return Ok(Observation::ZeroArea {
                width: image.width(),
                height: image.height(),
            });
        }

        Ok(Observation::Pixels(image))
    }
}
