use crate::config::SiteConfig;
use crate::render::layout::Viewport;
use crate::view::menu::MobileMenu;
use crate::view::parallax::Throttle;
use crate::view::pointer::PointerState;
use crate::view::scroll::{ScrollFlags, ScrollThresholds, ViewportScrollState};

/// All mutable view state that is not tied to a particular element.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub viewport: Viewport,
    pub thresholds: ScrollThresholds,
    pub scroll: ViewportScrollState,
    pub flags: ScrollFlags,
    pub pointer: PointerState,
    pub parallax_throttle: Throttle,
    pub parallax_recomputes: u64,
    pub active_section: Option<usize>,
    pub menu: MobileMenu,
    pub frames: u64,
}

impl ViewState {
    pub fn new(viewport: Viewport, config: &SiteConfig) -> Self {
        Self {
            viewport,
            thresholds: ScrollThresholds {
                nav: config.nav_threshold,
                back_to_top: config.back_to_top_threshold,
            },
            scroll: ViewportScrollState::default(),
            flags: ScrollFlags::default(),
            pointer: PointerState::default(),
            parallax_throttle: Throttle::new(config.parallax_throttle()),
            parallax_recomputes: 0,
            active_section: None,
            menu: MobileMenu::default(),
            frames: 0,
        }
    }
}
