use serde::{Deserialize, Serialize};

use super::settings::PageSettings;

/// Rendering mode chosen from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Mobile,
    Desktop,
}

/// Chart margins in px.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartMargin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl DisplayMode {
    /// Tick and axis-label font size in px.
    #[must_use]
    pub fn axis_font_size(&self) -> u32 {
        match self {
            DisplayMode::Mobile => 9,
            DisplayMode::Desktop => 12,
        }
    }

    /// Chart container height in px.
    #[must_use]
    pub fn chart_height(&self) -> u32 {
        match self {
            DisplayMode::Mobile => 250,
            DisplayMode::Desktop => 500,
        }
    }

    #[must_use]
    pub fn chart_margin(&self) -> ChartMargin {
        match self {
            DisplayMode::Mobile => ChartMargin { top: 20, right: 0, bottom: 10, left: 0 },
            DisplayMode::Desktop => ChartMargin { top: 20, right: 25, bottom: 10, left: 25 },
        }
    }
}

/// Tracks the viewport width and the display mode derived from it.
///
/// Lives apart from the dataset store: resizing never touches derived data,
/// and the data transforms never read the viewport.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    breakpoint_px: u32,
    mode: DisplayMode,
}

impl ViewportObserver {
    /// Starts in desktop mode until the first width is observed.
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            breakpoint_px,
            mode: DisplayMode::Desktop,
        }
    }

    /// Observer using the configured mobile breakpoint.
    pub fn from_settings(settings: &PageSettings) -> Self {
        Self::new(settings.mobile_breakpoint_px)
    }

    #[must_use]
    pub fn breakpoint_px(&self) -> u32 {
        self.breakpoint_px
    }

    /// Classify a width without touching the observer's state.
    #[must_use]
    pub fn classify(&self, width_px: u32) -> DisplayMode {
        if width_px <= self.breakpoint_px {
            DisplayMode::Mobile
        } else {
            DisplayMode::Desktop
        }
    }

    /// Record a new viewport width. Returns `true` when the mode changed,
    /// so the host only re-renders on an actual switch.
    pub fn observe(&mut self, width_px: u32) -> bool {
        let mode = self.classify(width_px);
        if mode == self.mode {
            return false;
        }
        log::debug!("viewport {width_px}px: switching to {mode:?}");
        self.mode = mode;
        true
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.mode == DisplayMode::Mobile
    }
}
