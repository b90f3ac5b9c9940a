use tracing::{info, warn};

use super::errors::WindowError;
use super::locator::WindowLocator;
use super::source::{WindowSource, XcapWindowSource};
use super::types::{TargetWindow, WindowInfo};
use crate::config::WindowConfig;

/// Windows smaller than this in either dimension are treated as invisible
/// system windows and left out of listings.
const MIN_LISTED_DIMENSION: u32 = 10;

/// List visible windows, skipping tiny system windows.
pub fn list_windows() -> Result<Vec<WindowInfo>, WindowError> {
    info!(event = "core.window.list_started");

    let all = XcapWindowSource.windows()?;
    let total = all.len();

    let result: Vec<WindowInfo> = all
        .into_iter()
        .filter(|w| w.width() >= MIN_LISTED_DIMENSION && w.height() >= MIN_LISTED_DIMENSION)
        .collect();

    let tiny_count = total - result.len();
    if tiny_count > 0 {
        info!(event = "core.window.list_filtered", tiny_count = tiny_count);
    }

    info!(event = "core.window.list_completed", count = result.len());
    Ok(result)
}

/// Resolve the capture target from configuration using the OS window list.
pub fn find_target_window(config: &WindowConfig) -> Result<TargetWindow, WindowError> {
    let locator = WindowLocator::from_config(config);
    let result = locator.locate(&XcapWindowSource);

    if let Err(e) = &result {
        warn!(event = "core.window.find_target_failed", error = %e);
    }

    result
}
