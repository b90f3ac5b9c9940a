use tracing::{debug, info, warn};

use super::errors::WindowError;
use super::source::WindowSource;
use super::types::TargetWindow;
use crate::config::WindowConfig;

/// Resolves the target window from an ordered list of exact titles and a
/// case-insensitive fallback substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLocator {
    titles: Vec<String>,
    pattern: Option<String>,
}

impl WindowLocator {
    pub fn new(titles: Vec<String>, pattern: Option<String>) -> Self {
        Self {
            titles,
            pattern: pattern.filter(|p| !p.is_empty()),
        }
    }

    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(config.titles.clone(), config.title_match.clone())
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Find the target window.
    ///
    /// Exact titles are tried in order and the first hit wins. Only when
    /// none of them exists is the full window list scanned for the first
    /// title containing the pattern, ignoring case.
    pub fn locate(&self, source: &dyn WindowSource) -> Result<TargetWindow, WindowError> {
        info!(
            event = "core.window.locate_started",
            titles = ?self.titles,
            pattern = ?self.pattern
        );

        for title in self.titles.iter().filter(|t| !t.is_empty()) {
            if let Some(window) = source.find_exact(title)? {
                info!(
                    event = "core.window.locate_completed",
                    match_type = "exact_title",
                    window_id = window.id(),
                    title = window.title()
                );
                return Ok(TargetWindow::from(&window));
            }
            debug!(event = "core.window.exact_title_missed", title = title);
        }

        if let Some(pattern) = &self.pattern {
            let needle = pattern.to_lowercase();
            let found = source
                .windows()?
                .into_iter()
                .find(|w| !w.title().is_empty() && w.title().to_lowercase().contains(&needle));

            if let Some(window) = found {
                info!(
                    event = "core.window.locate_completed",
                    match_type = "partial_title",
                    window_id = window.id(),
                    title = window.title()
                );
                return Ok(TargetWindow::from(&window));
            }
        }

        warn!(
            event = "core.window.locate_failed",
            titles = ?self.titles,
            pattern = ?self.pattern
        );
        Err(WindowError::WindowNotFound {
            titles: self.titles.clone(),
            pattern: self.pattern.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::types::WindowInfo;
    use std::cell::RefCell;

    struct FakeSource {
        windows: Vec<WindowInfo>,
        exact_lookups: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn with_titles(titles: &[&str]) -> Self {
            let windows = titles
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    WindowInfo::new(i as u32 + 1, t.to_string(), String::new(), 800, 600, false)
                })
                .collect();
            Self {
                windows,
                exact_lookups: RefCell::new(Vec::new()),
            }
        }
    }

    impl WindowSource for FakeSource {
        fn windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
            Ok(self.windows.clone())
        }

        fn find_exact(&self, title: &str) -> Result<Option<WindowInfo>, WindowError> {
            self.exact_lookups.borrow_mut().push(title.to_string());
            Ok(self.windows.iter().find(|w| w.title() == title).cloned())
        }
    }

    struct BrokenSource;

    impl WindowSource for BrokenSource {
        fn windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
            Err(WindowError::EnumerationFailed {
                message: "display unavailable".to_string(),
            })
        }
    }

    fn locator(titles: &[&str], pattern: Option<&str>) -> WindowLocator {
        WindowLocator::new(
            titles.iter().map(|t| t.to_string()).collect(),
            pattern.map(str::to_string),
        )
    }

    #[test]
    fn test_second_exact_title_is_found() {
        let source = FakeSource::with_titles(&["Terminal", "Beta"]);
        let target = locator(&["Alpha", "Beta"], Some("alpha"))
            .locate(&source)
            .unwrap();

        assert_eq!(target.title(), "Beta");
        assert_eq!(target.id(), 2);
        assert_eq!(*source.exact_lookups.borrow(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_exact_titles_tried_in_order() {
        let source = FakeSource::with_titles(&["Beta", "Alpha"]);
        let target = locator(&["Alpha", "Beta"], None).locate(&source).unwrap();

        assert_eq!(target.title(), "Alpha");
        assert_eq!(*source.exact_lookups.borrow(), vec!["Alpha"]);
    }

    #[test]
    fn test_falls_back_to_case_insensitive_substring() {
        let source = FakeSource::with_titles(&["Editor", "XYZAlphaZYX", "alpha two"]);
        let target = locator(&["Alpha", "Beta"], Some("alpha"))
            .locate(&source)
            .unwrap();

        assert_eq!(target.title(), "XYZAlphaZYX");
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        let source = FakeSource::with_titles(&["Alpha launcher", "Alpha"]);
        let target = locator(&["Alpha"], Some("alpha")).locate(&source).unwrap();

        assert_eq!(target.id(), 2);
    }

    #[test]
    fn test_exact_lookup_is_case_sensitive() {
        let source = FakeSource::with_titles(&["beta"]);
        let result = locator(&["Beta"], None).locate(&source);

        assert!(matches!(result, Err(WindowError::WindowNotFound { .. })));
    }

    #[test]
    fn test_not_found_reports_what_was_tried() {
        let source = FakeSource::with_titles(&["Editor"]);
        let err = locator(&["Alpha"], Some("gamma"))
            .locate(&source)
            .unwrap_err();

        match err {
            WindowError::WindowNotFound { titles, pattern } => {
                assert_eq!(titles, vec!["Alpha"]);
                assert_eq!(pattern.as_deref(), Some("gamma"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_pattern_is_ignored() {
        let source = FakeSource::with_titles(&["Editor"]);
        let locator = locator(&[], Some(""));

        assert_eq!(locator.pattern(), None);
        assert!(locator.locate(&source).is_err());
    }

    #[test]
    fn test_enumeration_failure_propagates() {
        let result = locator(&["Alpha"], Some("alpha")).locate(&BrokenSource);
        assert!(matches!(result, Err(WindowError::EnumerationFailed { .. })));
    }
}
