//! Periodic capture of the target window into the frame store.

pub mod encoder;
pub mod errors;
pub mod handler;
pub mod stats;
pub mod target;

pub use encoder::FrameEncoder;
pub use errors::CaptureError;
pub use handler::{CaptureLoop, SkipReason, TickOutcome};
pub use stats::{CaptureStats, StatsSnapshot};
pub use target::{CaptureTarget, Observation, XcapTarget};
