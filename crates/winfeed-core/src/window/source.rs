use tracing::debug;

use super::errors::WindowError;
use super::types::WindowInfo;

/// Access to the desktop's top-level windows.
pub trait WindowSource {
    /// All top-level windows, in the system's enumeration order.
    fn windows(&self) -> Result<Vec<WindowInfo>, WindowError>;

    /// Direct lookup of a window whose title is exactly `title`.
    fn find_exact(&self, title: &str) -> Result<Option<WindowInfo>, WindowError> {
        Ok(self.windows()?.into_iter().find(|w| w.title() == title))
    }
}

/// [`WindowSource`] backed by the OS window list via `xcap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XcapWindowSource;

impl WindowSource for XcapWindowSource {
    fn windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
        let windows = xcap::Window::all().map_err(|e| WindowError::EnumerationFailed {
            message: e.to_string(),
        })?;

        Ok(windows.iter().filter_map(window_info).collect())
    }
}

/// Read the properties of an xcap window. Windows without an id are skipped.
pub(crate) fn window_info(w: &xcap::Window) -> Option<WindowInfo> {
    let id = match w.id() {
        Ok(id) => id,
        Err(e) => {
            debug!(
                event = "core.window.property_access_failed",
                property = "id",
                error = %e
            );
            return None;
        }
    };

    let title = w.title().unwrap_or_else(|e| {
        debug!(
            event = "core.window.property_access_failed",
            property = "title",
            window_id = id,
            error = %e
        );
        String::new()
    });
    let app_name = w.app_name().unwrap_or_default();
    let width = w.width().unwrap_or(0);
    let height = w.height().unwrap_or(0);
    let is_minimized = w.is_minimized().unwrap_or_else(|e| {
        debug!(
            event = "core.window.is_minimized_check_failed",
            window_id = id,
            error = %e
        );
        false
    });

    Some(WindowInfo::new(
        id,
        title,
        app_name,
        width,
        height,
        is_minimized,
    ))
}
