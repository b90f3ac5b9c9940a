//! Configuration type definitions.
//!
//! [`FeedConfig`] is the fully resolved configuration the pipeline runs with.
//! [`PartialConfig`] mirrors it with every field optional and is what config
//! files deserialize into, so a file only overrides the keys it names.

use serde::Deserialize;
use std::time::Duration;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub window: WindowConfig,
    pub capture: CaptureConfig,
    pub server: ServerConfig,
    pub page: PageConfig,
}

/// How the target window is located.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Exact titles, tried in order.
    pub titles: Vec<String>,
    /// Case-insensitive substring used when no exact title matches.
    pub title_match: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Target period between capture ticks.
    pub interval_ms: u64,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
    /// Pause after a failed tick before trying again.
    pub error_backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Listen backlog passed to `listen(2)`.
    pub backlog: u32,
    /// Upper bound on connections served at the same time.
    pub max_connections: usize,
    /// Largest request head accepted before the connection is dropped.
    pub max_header_bytes: usize,
    /// Deadline for receiving a complete request head.
    pub request_timeout_ms: u64,
    /// Deadline for the client to take the whole response.
    pub write_timeout_ms: u64,
    /// Path prefix that selects the image endpoint.
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// How often the control page re-requests the image.
    pub refresh_ms: u64,
    /// Page heading; defaults to the resolved window title.
    pub heading: Option<String>,
}

impl CaptureConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_millis(self.error_backoff_ms)
    }
}

impl ServerConfig {
    /// `bind:port` in a form accepted by `SocketAddr::from_str`.
    pub fn address(&self) -> String {
        if self.bind.contains(':') && !self.bind.starts_with('[') {
            format!("[{}]:{}", self.bind, self.port)
        } else {
            format!("{}:{}", self.bind, self.port)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

/// Config file contents. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub window: PartialWindowConfig,
    #[serde(default)]
    pub capture: PartialCaptureConfig,
    #[serde(default)]
    pub server: PartialServerConfig,
    #[serde(default)]
    pub page: PartialPageConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialWindowConfig {
    pub titles: Option<Vec<String>>,
    #[serde(rename = "match")]
    pub title_match: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialCaptureConfig {
    pub interval_ms: Option<u64>,
    pub jpeg_quality: Option<u8>,
    pub error_backoff_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub backlog: Option<u32>,
    pub max_connections: Option<usize>,
    pub max_header_bytes: Option<usize>,
    pub request_timeout_ms: Option<u64>,
    pub write_timeout_ms: Option<u64>,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialPageConfig {
    pub refresh_ms: Option<u64>,
    pub heading: Option<String>,
}

impl FeedConfig {
    /// Apply the keys present in `overrides` on top of this config.
    pub fn apply(&mut self, overrides: PartialConfig) {
        let PartialConfig {
            window,
            capture,
            server,
            page,
        } = overrides;

        if let Some(titles) = window.titles {
            self.window.titles = titles;
        }
        if let Some(title_match) = window.title_match {
            self.window.title_match = Some(title_match);
        }

        if let Some(v) = capture.interval_ms {
            self.capture.interval_ms = v;
        }
        if let Some(v) = capture.jpeg_quality {
            self.capture.jpeg_quality = v;
        }
        if let Some(v) = capture.error_backoff_ms {
            self.capture.error_backoff_ms = v;
        }

        if let Some(v) = server.bind {
            self.server.bind = v;
        }
        if let Some(v) = server.port {
            self.server.port = v;
        }
        if let Some(v) = server.backlog {
            self.server.backlog = v;
        }
        if let Some(v) = server.max_connections {
            self.server.max_connections = v;
        }
        if let Some(v) = server.max_header_bytes {
            self.server.max_header_bytes = v;
        }
        if let Some(v) = server.request_timeout_ms {
            self.server.request_timeout_ms = v;
        }
        if let Some(v) = server.write_timeout_ms {
            self.server.write_timeout_ms = v;
        }
        if let Some(v) = server.image_path {
            self.server.image_path = v;
        }

        if let Some(v) = page.refresh_ms {
            self.page.refresh_ms = v;
        }
        if let Some(v) = page.heading {
            self.page.heading = Some(v);
        }
    }
}
