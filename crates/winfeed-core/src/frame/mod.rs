//! Latest-frame storage shared between the capture loop and HTTP handlers.

pub mod store;
pub mod types;

pub use store::FrameStore;
pub use types::Frame;
