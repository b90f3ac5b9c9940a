//! winfeed-core: capture one desktop window and serve it over HTTP
//!
//! The pipeline is capture → encode → publish → serve:
//!
//! - [`window`] - Resolve the target window once at startup
//! - [`capture`] - Periodic capture loop that encodes JPEG frames
//! - [`frame`] - Single-slot store holding the latest published frame
//! - [`http`] - Accept loop and per-connection request handling
//! - [`config`] - Hierarchical TOML configuration

pub mod capture;
pub mod config;
pub mod errors;
pub mod events;
pub mod frame;
pub mod http;
pub mod logging;
pub mod window;

// Re-export commonly used types at crate root for convenience
pub use capture::{
    CaptureLoop, CaptureStats, CaptureTarget, FrameEncoder, Observation, StatsSnapshot, TickOutcome,
    XcapTarget,
};
pub use config::FeedConfig;
pub use errors::WinfeedError;
pub use frame::{Frame, FrameStore};
pub use http::{ControlPage, HttpServer, ServeContext};
pub use window::{TargetWindow, WindowInfo, WindowLocator, WindowSource, XcapWindowSource};

// Re-export logging initialization
pub use logging::init_logging;
