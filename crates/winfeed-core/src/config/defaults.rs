//! Default values for configuration types.

use crate::config::types::{CaptureConfig, FeedConfig, PageConfig, ServerConfig, WindowConfig};

/// Window titles tried in order before falling back to a substring search.
pub const DEFAULT_TITLES: &[&str] = &[
    "Minecraft",
    "Minecraft Bedrock",
    "Minecraft for Windows 10",
    "Minecraft: Bedrock Edition",
];

pub const DEFAULT_TITLE_MATCH: &str = "minecraft";

/// ~30 Hz.
pub const DEFAULT_INTERVAL_MS: u64 = 33;
pub const DEFAULT_JPEG_QUALITY: u8 = 70;
pub const DEFAULT_ERROR_BACKOFF_MS: u64 = 100;

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKLOG: u32 = 5;
pub const DEFAULT_MAX_CONNECTIONS: usize = 64;
pub const DEFAULT_MAX_HEADER_BYTES: usize = 8 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_IMAGE_PATH: &str = "/image";

pub const DEFAULT_REFRESH_MS: u64 = 33;

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            titles: DEFAULT_TITLES.iter().map(|t| t.to_string()).collect(),
            title_match: Some(DEFAULT_TITLE_MATCH.to_string()),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            error_backoff_ms: DEFAULT_ERROR_BACKOFF_MS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
            image_path: DEFAULT_IMAGE_PATH.to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH_MS,
            heading: None,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            capture: CaptureConfig::default(),
            server: ServerConfig::default(),
            page: PageConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.window.titles.len(), 4);
        assert_eq!(config.window.titles[0], "Minecraft");
        assert_eq!(config.window.title_match.as_deref(), Some("minecraft"));
        assert_eq!(config.capture.interval_ms, 33);
        assert_eq!(config.capture.jpeg_quality, 70);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.backlog, 5);
        assert_eq!(config.server.write_timeout_ms, 10_000);
        assert_eq!(config.server.image_path, "/image");
        assert_eq!(config.page.refresh_ms, 33);
        assert!(config.page.heading.is_none());
    }
}
