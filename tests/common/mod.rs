#![allow(dead_code)]

use std::time::{Duration, Instant};

use folio_view::config::SiteConfig;
use folio_view::dom::NodeId;
use folio_view::engine::pipeline::PageLoader;
use folio_view::render::layout::{Layout, LayoutBox, Viewport};
use folio_view::view::ViewController;

/// Small page with every element the controller drives.
pub const PAGE: &str = r##"<!DOCTYPE html>
<html><head><title>Fixture</title></head><body>
<nav class="navbar">
  <ul class="nav-menu">
    <li><a href="#a" class="nav-link">A</a></li>
    <li><a href="#b" class="nav-link">B</a></li>
    <li><a href="#c" class="nav-link">C</a></li>
  </ul>
  <button class="hamburger"><span></span></button>
</nav>
<section id="a" class="hero">
  <div class="gradient-orb orb-1"></div>
  <div class="gradient-orb orb-2"></div>
  <div class="hero-content">
    <h1>Hello</h1>
    <div class="hero-stats">
      <span class="stat-number">92</span>
      <span class="stat-number">15+</span>
    </div>
  </div>
</section>
<section id="b">
  <div class="section-header"><h2>Skills</h2></div>
  <div class="skills-grid">
    <div class="skill-category">one</div>
    <div class="skill-category">two</div>
    <div class="skill-category">three</div>
  </div>
  <article class="project-card"><h3>Scan</h3><a href="#" class="project-link" data-project="nmap">Details</a></article>
  <a href="#" class="project-link" data-project="does-not-exist">Broken</a>
</section>
<section id="c">
  <form id="contact-form" class="contact-form">
    <input type="email" name="email">
    <textarea name="message"></textarea>
    <button type="submit" class="btn">Send Message</button>
    <p id="form-status"></p>
  </form>
</section>
<button class="scroll-top">^</button>
<div id="project-modal" class="modal">
  <div class="modal-content">
    <button class="modal-close">x</button>
    <h2 id="modal-title"></h2>
    <p id="modal-description"></p>
    <p id="modal-tech"></p>
  </div>
</div>
</body></html>"##;

pub const DESKTOP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

pub const PHONE: Viewport = Viewport {
    width: 390.0,
    height: 800.0,
};

pub fn controller_at(viewport: Viewport, t0: Instant) -> ViewController {
    controller_with(SiteConfig::default(), viewport, t0)
}

pub fn controller_with(config: SiteConfig, viewport: Viewport, t0: Instant) -> ViewController {
    PageLoader::new(config, viewport).process_html(PAGE, "file:///fixture.html", t0)
}

pub fn controller(t0: Instant) -> ViewController {
    controller_at(DESKTOP, t0)
}

pub fn ms(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

pub fn node_by_id(ctl: &ViewController, id: &str) -> NodeId {
    ctl.document()
        .element_by_id(id)
        .unwrap_or_else(|| panic!("fixture has no #{}", id))
}

pub fn first_with_class(ctl: &ViewController, class: &str) -> NodeId {
    ctl.document()
        .first_with_class(class)
        .unwrap_or_else(|| panic!("fixture has no .{}", class))
}

/// Replace section geometry with exact spans: `a` 0..400, `b` 400..1400,
/// `c` 1400..2400.
pub fn tile_sections(ctl: &mut ViewController) {
    let mut layout = ctl.layout().clone();
    for (id, top, height) in [("a", 0.0, 400.0), ("b", 400.0, 1000.0), ("c", 1400.0, 1000.0)] {
        let node = node_by_id(ctl, id);
        layout.set_box(node, LayoutBox::new(0.0, top, 1280.0, height));
    }
    ctl.set_layout(layout);
}

/// Run frames every `step_ms` from `from_ms` to `to_ms` inclusive.
pub fn run_frames(ctl: &mut ViewController, t0: Instant, from_ms: u64, to_ms: u64, step_ms: u64) {
    let mut t = from_ms;
    while t <= to_ms {
        ctl.frame(ms(t0, t));
        t += step_ms;
    }
}

pub fn empty_layout(ctl: &ViewController) -> Layout {
    Layout::empty(ctl.document())
}
