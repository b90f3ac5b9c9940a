use crate::config::errors::ConfigError;
use crate::config::types::FeedConfig;

/// Smallest header budget that still fits a realistic browser request line.
const MIN_HEADER_BYTES: usize = 256;

/// Validate a fully merged configuration.
pub fn validate_config(config: &FeedConfig) -> Result<(), ConfigError> {
    let has_titles = config.window.titles.iter().any(|t| !t.is_empty());
    let has_match = config
        .window
        .title_match
        .as_deref()
        .is_some_and(|m| !m.is_empty());
    if !has_titles && !has_match {
        return Err(invalid(
            "window",
            "needs at least one title or a non-empty match substring".to_string(),
        ));
    }

    if config.capture.interval_ms == 0 {
        return Err(invalid(
            "capture.interval_ms",
            "must be greater than 0".to_string(),
        ));
    }

    let quality = config.capture.jpeg_quality;
    if !(1..=100).contains(&quality) {
        return Err(invalid(
            "capture.jpeg_quality",
            format!("must be between 1 and 100, got {quality}"),
        ));
    }

    if config.server.bind.is_empty() {
        return Err(invalid("server.bind", "cannot be empty".to_string()));
    }

    if config.server.backlog == 0 {
        return Err(invalid(
            "server.backlog",
            "must be greater than 0".to_string(),
        ));
    }

    if config.server.max_connections == 0 {
        return Err(invalid(
            "server.max_connections",
            "must be greater than 0".to_string(),
        ));
    }

    if config.server.max_header_bytes < MIN_HEADER_BYTES {
        return Err(invalid(
            "server.max_header_bytes",
            format!(
                "must be at least {MIN_HEADER_BYTES}, got {}",
                config.server.max_header_bytes
            ),
        ));
    }

    if config.server.request_timeout_ms == 0 {
        return Err(invalid(
            "server.request_timeout_ms",
            "must be greater than 0".to_string(),
        ));
    }

    if config.server.write_timeout_ms == 0 {
        return Err(invalid(
            "server.write_timeout_ms",
            "must be greater than 0".to_string(),
        ));
    }

    let image_path = &config.server.image_path;
    if !image_path.starts_with('/') || image_path.len() < 2 {
        return Err(invalid(
            "server.image_path",
            format!("must start with '/' and name a path, got '{image_path}'"),
        ));
    }

    if config.page.refresh_ms == 0 {
        return Err(invalid(
            "page.refresh_ms",
            "must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidConfiguration { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<(), ConfigError>) -> &'static str {
        match result {
            Err(ConfigError::InvalidConfiguration { field, .. }) => field,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FeedConfig::default()).is_ok());
    }

    #[test]
    fn test_window_needs_title_or_match() {
        let mut config = FeedConfig::default();
        config.window.titles.clear();
        config.window.title_match = None;
        assert_eq!(field_of(validate_config(&config)), "window");

        config.window.title_match = Some("alpha".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_quality_bounds() {
        let mut config = FeedConfig::default();
        config.capture.jpeg_quality = 0;
        assert_eq!(field_of(validate_config(&config)), "capture.jpeg_quality");

        config.capture.jpeg_quality = 101;
        assert_eq!(field_of(validate_config(&config)), "capture.jpeg_quality");

        config.capture.jpeg_quality = 100;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = FeedConfig::default();
        config.capture.interval_ms = 0;
        assert_eq!(field_of(validate_config(&config)), "capture.interval_ms");
    }

    #[test]
    fn test_server_limits() {
        let mut config = FeedConfig::default();
        config.server.max_connections = 0;
        assert_eq!(field_of(validate_config(&config)), "server.max_connections");

        let mut config = FeedConfig::default();
        config.server.max_header_bytes = 16;
        assert_eq!(field_of(validate_config(&config)), "server.max_header_bytes");

        let mut config = FeedConfig::default();
        config.server.backlog = 0;
        assert_eq!(field_of(validate_config(&config)), "server.backlog");

        let mut config = FeedConfig::default();
        config.server.write_timeout_ms = 0;
        assert_eq!(field_of(validate_config(&config)), "server.write_timeout_ms");
    }

    #[test]
    fn test_image_path_must_be_absolute() {
        let mut config = FeedConfig::default();
        config.server.image_path = "image".to_string();
        assert_eq!(field_of(validate_config(&config)), "server.image_path");

        config.server.image_path = "/".to_string();
        assert_eq!(field_of(validate_config(&config)), "server.image_path");

        config.server.image_path = "/frame.jpg".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
