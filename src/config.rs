//! Site configuration.
//!
//! Every knob has a default matching the shipped page, so an empty JSON
//! object (or no file at all) is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Third-party endpoint the contact form posts to.
    pub form_endpoint: String,
    /// Navbar switches to its "scrolled" look past this offset (px).
    pub nav_threshold: f32,
    /// Back-to-top button and navbar auto-hide kick in past this offset (px).
    pub back_to_top_threshold: f32,
    /// Added to the scroll offset before testing which section is current.
    pub section_probe_offset: f32,
    /// Height of the fixed navbar, subtracted from anchor scroll targets.
    pub navbar_height: f32,
    pub parallax_throttle_ms: u64,
    /// Hero content is fully transparent after this many pixels of scroll.
    pub hero_fade_distance: f32,
    pub counter_duration_ms: u64,
    pub counter_tick_ms: u64,
    pub stagger_step_ms: u64,
    pub submit_reenable_ms: u64,
    /// Ambient orb motion only starts on viewports wider than this.
    pub ambient_min_width: f32,
    /// The custom cursor only starts on viewports wider than this.
    pub cursor_min_width: f32,
    pub smoothing: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_endpoint: String::from("https://formspree.io/f/portfolio"),
            nav_threshold: 100.0,
            back_to_top_threshold: 500.0,
            section_probe_offset: 100.0,
            navbar_height: 80.0,
            parallax_throttle_ms: 10,
            hero_fade_distance: 600.0,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            stagger_step_ms: 100,
            submit_reenable_ms: 3000,
            ambient_min_width: 768.0,
            cursor_min_width: 968.0,
            smoothing: 0.1,
        }
    }
}

impl SiteConfig {
    /// Load a config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parallax_throttle(&self) -> Duration {
        Duration::from_millis(self.parallax_throttle_ms)
    }

    /// Never zero: a zero tick would re-arm forever within one frame.
    pub fn counter_tick(&self) -> Duration {
        Duration::from_millis(self.counter_tick_ms.max(1))
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }

    pub fn submit_reenable(&self) -> Duration {
        Duration::from_millis(self.submit_reenable_ms)
    }
}
