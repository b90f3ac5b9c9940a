//! # Configuration System
//!
//! Hierarchical TOML configuration for winfeed.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.winfeed/config.toml`
//! 3. **Project config** - `./.winfeed/config.toml`
//! 4. **Explicit file** - `--config <FILE>` (must exist)
//! 5. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.winfeed/config.toml
//! [window]
//! titles = ["Minecraft"]
//! match = "minecraft"
//!
//! [capture]
//! interval_ms = 33
//! jpeg_quality = 70
//!
//! [server]
//! port = 8080
//! max_connections = 64
//! ```

pub mod defaults;
pub mod errors;
pub mod loading;
pub mod types;
pub mod validation;

pub use errors::ConfigError;
pub use loading::{load_file, load_hierarchy, load_layers};
pub use types::{
    CaptureConfig, FeedConfig, PageConfig, PartialCaptureConfig, PartialConfig, PartialPageConfig,
    PartialServerConfig, PartialWindowConfig, ServerConfig, WindowConfig,
};
pub use validation::validate_config;
