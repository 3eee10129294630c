//! Scroll tracker: derives navbar and back-to-top flags from the offset.

/// Scroll offset bookkeeping. Only the current and previous offsets are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportScrollState {
    pub offset: f32,
    pub last_offset: f32,
    pub past_threshold: bool,
    pub scrolling_down: bool,
}

/// Flags written back to the page chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollFlags {
    /// `.navbar.scrolled`
    pub nav_scrolled: bool,
    /// Navbar slid off-screen.
    pub nav_hidden: bool,
    /// `.scroll-top.visible`
    pub back_to_top_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThresholds {
    pub nav: f32,
    pub back_to_top: f32,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            nav: 100.0,
            back_to_top: 500.0,
        }
    }
}

impl ScrollThresholds {
    pub fn past_nav(&self, offset: f32) -> bool {
        offset > self.nav
    }

    pub fn back_to_top_visible(&self, offset: f32) -> bool {
        offset > self.back_to_top
    }
}

impl ViewportScrollState {
    /// Record a new offset and derive the chrome flags for it.
    pub fn update(&mut self, offset: f32, thresholds: &ScrollThresholds) -> ScrollFlags {
        self.last_offset = self.offset;
        self.offset = offset;
        self.scrolling_down = offset > self.last_offset;
        self.past_threshold = thresholds.past_nav(offset);

        let beyond = thresholds.back_to_top_visible(offset);
        ScrollFlags {
            nav_scrolled: self.past_threshold,
            nav_hidden: self.scrolling_down && beyond,
            back_to_top_visible: beyond,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_hides_only_when_scrolling_down_far() {
        let t = ScrollThresholds::default();
        let mut s = ViewportScrollState::default();

        let f = s.update(120.0, &t);
        assert!(f.nav_scrolled && !f.nav_hidden && !f.back_to_top_visible);

        let f = s.update(600.0, &t);
        assert!(f.nav_hidden && f.back_to_top_visible);

        let f = s.update(550.0, &t);
        assert!(!s.scrolling_down);
        assert!(!f.nav_hidden && f.back_to_top_visible);

        let f = s.update(550.0, &t);
        assert!(!f.nav_hidden, "equal offset is not scrolling down");
    }

    #[test]
    fn thresholds_are_strict() {
        let t = ScrollThresholds::default();
        assert!(!t.past_nav(100.0));
        assert!(t.past_nav(100.5));
        assert!(!t.back_to_top_visible(500.0));
        assert!(t.back_to_top_visible(501.0));
    }
}
