//! Target window lookup.

pub mod errors;
pub mod handler;
pub mod locator;
pub mod source;
pub mod types;

pub use errors::WindowError;
pub use handler::{find_target_window, list_windows};
pub use locator::WindowLocator;
pub use source::{WindowSource, XcapWindowSource};
pub use types::{TargetWindow, WindowInfo};
