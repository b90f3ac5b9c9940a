use serde::Serialize;

/// A top-level window as seen during enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    id: u32,
    title: String,
    app_name: String,
    width: u32,
    height: u32,
    is_minimized: bool,
}

impl WindowInfo {
    pub fn new(
        id: u32,
        title: String,
        app_name: String,
        width: u32,
        height: u32,
        is_minimized: bool,
    ) -> Self {
        Self {
            id,
            title,
            app_name,
            width,
            height,
            is_minimized,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }
}

/// The window resolved at startup and captured for the life of the process.
///
/// Holds only the OS window id and the title seen at lookup time. Liveness
/// is re-checked by the capture loop on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWindow {
    id: u32,
    title: String,
}

impl TargetWindow {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl From<&WindowInfo> for TargetWindow {
    fn from(info: &WindowInfo) -> Self {
        Self::new(info.id(), info.title())
    }
}
