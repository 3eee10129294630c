//! Typed registry of every element the controller drives.
//!
//! Built once from the parsed document. Afterwards the controller iterates
//! these lists and never queries the document by class again.

use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::view::form::FormSlots;
use crate::view::modal::ModalSlots;
use crate::view::parallax::{HeroTargets, ParallaxTarget, SectionTargets};
use crate::view::reveal::RevealRole;

/// Repeated items inside a section that get parallax and reveal.
pub const CARD_CLASSES: &[&str] = &[
    "project-card",
    "skill-category",
    "cert-card",
    "timeline-item",
    "info-card",
    "highlight-item",
    "additional-item",
    "contact-method",
];

/// Revealed on their own.
pub const REVEAL_CLASSES: &[&str] = &[
    "section-header",
    "about-text",
    "project-card",
    "timeline-item",
    "info-card",
    "highlight-item",
    "contact-method",
    "contact-form",
];

/// Containers whose children are revealed one after another.
pub const STAGGER_CLASSES: &[&str] = &["skills-grid", "cert-grid", "additional-grid"];

pub const STATS_CLASS: &str = "hero-stats";
pub const STAT_NUMBER_CLASS: &str = "stat-number";

#[derive(Debug, Clone)]
pub struct NavLink {
    pub node: NodeId,
    /// Section id the link points at (`href="#about"` → `about`).
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct SectionEntry {
    pub node: NodeId,
    pub html_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pub body: Option<NodeId>,
    pub navbar: Option<NodeId>,
    pub nav_menu: Option<NodeId>,
    pub hamburger: Option<NodeId>,
    pub scroll_top: Option<NodeId>,
    pub nav_links: Vec<NavLink>,
    pub sections: Vec<SectionEntry>,
    pub hero: HeroTargets,
    pub parallax_sections: Vec<SectionTargets>,
    pub reveal: Vec<(NodeId, RevealRole)>,
    pub stats_container: Option<NodeId>,
    pub stat_numbers: Vec<NodeId>,
    pub modal: Option<ModalSlots>,
    pub project_triggers: HashMap<NodeId, String>,
    pub form: Option<FormSlots>,
    pub interactive: Vec<NodeId>,
}

fn has_any_class(doc: &Document, id: NodeId, classes: &[&str]) -> bool {
    classes.iter().any(|c| doc.has_class(id, c))
}

impl PageRegistry {
    pub fn build(doc: &Document) -> Self {
        let mut reg = PageRegistry {
            body: doc.elements_with_tag("body").into_iter().next(),
            navbar: doc.first_with_class("navbar"),
            nav_menu: doc.first_with_class("nav-menu"),
            hamburger: doc.first_with_class("hamburger"),
            scroll_top: doc.first_with_class("scroll-top"),
            ..Default::default()
        };
        if reg.navbar.is_none() {
            log::warn!("page has no .navbar; navbar flags will be skipped");
        }
        if reg.hamburger.is_none() {
            log::debug!("page has no .hamburger");
        }

        reg.nav_links = doc
            .elements_with_class("nav-link")
            .into_iter()
            .filter_map(|node| {
                let href = doc.attr(node, "href")?;
                let target = href.strip_prefix('#')?;
                Some(NavLink {
                    node,
                    target: target.to_string(),
                })
            })
            .collect();

        reg.collect_sections(doc);
        reg.collect_reveal(doc);
        reg.collect_modal(doc);
        reg.collect_form(doc);

        reg.interactive = doc
            .descendants(doc.root())
            .into_iter()
            .filter(|&n| {
                let node = doc.node(n);
                node.is_element()
                    && (matches!(node.tag.as_str(), "a" | "button")
                        || node.has_class("btn")
                        || has_any_class(doc, n, CARD_CLASSES))
            })
            .collect();

        log::debug!(
            "registry: {} sections, {} reveal targets, {} parallax sections, {} projects",
            reg.sections.len(),
            reg.reveal.len(),
            reg.parallax_sections.len(),
            reg.project_triggers.len()
        );
        reg
    }

    fn collect_sections(&mut self, doc: &Document) {
        for node in doc.elements_with_tag("section") {
            // Only top-level sections tile the page.
            let nested = doc
                .node(node)
                .parent
                .and_then(|p| doc.closest(p, |n| n.tag == "section"))
                .is_some();
            if nested {
                continue;
            }
            if let Some(html_id) = doc.attr(node, "id") {
                self.sections.push(SectionEntry {
                    node,
                    html_id: html_id.to_string(),
                });
            }

            if doc.has_class(node, "hero") {
                self.hero = HeroTargets {
                    section: Some(node),
                    content: doc.elements_with_class_in(node, "hero-content").into_iter().next(),
                    orbs: doc
                        .elements_with_class_in(node, "gradient-orb")
                        .into_iter()
                        .enumerate()
                        .map(|(i, n)| ParallaxTarget::orb(n, i))
                        .collect(),
                };
                continue;
            }

            let header = doc
                .elements_with_class_in(node, "section-header")
                .into_iter()
                .next()
                .map(ParallaxTarget::header);
            let cards: Vec<ParallaxTarget> = doc
                .descendants(node)
                .into_iter()
                .filter(|&n| has_any_class(doc, n, CARD_CLASSES))
                .enumerate()
                .map(|(i, n)| ParallaxTarget::card(n, i))
                .collect();
            if header.is_some() || !cards.is_empty() {
                self.parallax_sections.push(SectionTargets { node, header, cards });
            }
        }
    }

    fn collect_reveal(&mut self, doc: &Document) {
        let mut stagger_children = Vec::new();
        for node in doc.descendants(doc.root()) {
            if has_any_class(doc, node, STAGGER_CLASSES) {
                let children = doc.element_children(node);
                stagger_children.extend(children.iter().copied());
                self.reveal.push((node, RevealRole::Stagger(children)));
            }
        }

        if let Some(stats) = doc.first_with_class(STATS_CLASS) {
            self.stats_container = Some(stats);
            self.stat_numbers = doc.elements_with_class_in(stats, STAT_NUMBER_CLASS);
            self.reveal.push((stats, RevealRole::Stats));
        }

        for node in doc.descendants(doc.root()) {
            if has_any_class(doc, node, REVEAL_CLASSES) && !stagger_children.contains(&node) {
                self.reveal.push((node, RevealRole::Plain));
            }
        }
    }

    fn collect_modal(&mut self, doc: &Document) {
        for node in doc.descendants(doc.root()) {
            if let Some(id) = doc.attr(node, "data-project") {
                self.project_triggers.insert(node, id.to_string());
            }
        }

        let Some(dialog) = doc
            .element_by_id("project-modal")
            .or_else(|| doc.first_with_class("modal"))
        else {
            if !self.project_triggers.is_empty() {
                log::warn!("project triggers present but no modal dialog");
            }
            return;
        };
        self.modal = Some(ModalSlots {
            dialog,
            title: doc.element_by_id("modal-title"),
            description: doc.element_by_id("modal-description"),
            tech: doc.element_by_id("modal-tech"),
            close: doc.elements_with_class_in(dialog, "modal-close").into_iter().next(),
        });
    }

    fn collect_form(&mut self, doc: &Document) {
        let Some(form) = doc
            .element_by_id("contact-form")
            .or_else(|| doc.elements_with_tag("form").into_iter().next())
        else {
            return;
        };
        let fields = doc
            .descendants(form)
            .into_iter()
            .filter(|&n| matches!(doc.node(n).tag.as_str(), "input" | "textarea"))
            .filter_map(|n| Some((doc.attr(n, "name")?.to_string(), n)))
            .collect();
        let submit = doc
            .descendants(form)
            .into_iter()
            .find(|&n| doc.node(n).tag == "button");
        self.form = Some(FormSlots {
            form,
            fields,
            submit,
            status: doc.element_by_id("form-status"),
        });
    }

    /// Index into `sections` of the section with this html id.
    pub fn section_index(&self, html_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.html_id == html_id)
    }

    pub fn is_interactive(&self, doc: &Document, node: NodeId) -> bool {
        self.interactive.iter().any(|&i| doc.is_ancestor_or_self(i, node))
    }
}
