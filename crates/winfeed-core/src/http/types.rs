use std::time::Duration;

use super::page::ControlPage;
use crate::config::ServerConfig;
use crate::frame::FrameStore;

/// Everything a connection handler needs, shared read-only across handlers.
#[derive(Debug, Clone)]
pub struct ServeContext {
    pub store: FrameStore,
    pub page: ControlPage,
    /// Requests whose path starts with this are served the latest frame.
    pub image_path: String,
    pub max_header_bytes: usize,
    pub request_timeout: Duration,
    pub write_timeout: Duration,
}

impl ServeContext {
    pub fn new(store: FrameStore, page: ControlPage, config: &ServerConfig) -> Self {
        Self {
            store,
            page,
            image_path: config.image_path.clone(),
            max_header_bytes: config.max_header_bytes,
            request_timeout: config.request_timeout(),
            write_timeout: config.write_timeout(),
        }
    }
}
