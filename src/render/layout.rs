use crate::dom::{Document, NodeId, NodeType};

/// Bounding box for a laid-out node, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.bottom()
    }
}

/// Size of the visible window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Document-space geometry for every node of a `Document`.
#[derive(Debug, Clone)]
pub struct Layout {
    boxes: Vec<LayoutBox>,
}

impl Layout {
    /// An all-zero layout sized for `doc`; useful when the host measures
    /// geometry itself.
    pub fn empty(doc: &Document) -> Self {
        Self {
            boxes: vec![LayoutBox::default(); doc.len()],
        }
    }

    pub fn get(&self, id: NodeId) -> LayoutBox {
        self.boxes.get(id.0).copied().unwrap_or_default()
    }

    /// Override a box with measured geometry.
    pub fn set_box(&mut self, id: NodeId, b: LayoutBox) {
        if id.0 >= self.boxes.len() {
            self.boxes.resize(id.0 + 1, LayoutBox::default());
        }
        self.boxes[id.0] = b;
    }

    /// Total document height.
    pub fn document_height(&self) -> f32 {
        self.boxes.iter().map(|b| b.bottom()).fold(0.0, f32::max)
    }

    /// Deepest element under `scope` whose box contains the point.
    pub fn hit_test(&self, doc: &Document, scope: NodeId, x: f32, y: f32) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for id in doc.descendants(scope) {
            let node = doc.node(id);
            if node.node_type != NodeType::Element {
                continue;
            }
            let b = self.get(id);
            if b.height > 0.0 && b.contains(x, y) {
                // Document order visits ancestors first, so the last match is deepest.
                best = Some(id);
            }
        }
        best
    }
}

const BLOCK_TAGS: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "form",
    "section", "article", "aside", "main", "header", "footer", "nav", "blockquote", "label",
    "input", "textarea", "button",
];

/// Tags that never take up space in the flow.
const OUT_OF_FLOW: &[&str] = &["head", "title", "meta", "link", "script", "style"];

/// Per-tag vertical margins (top, bottom) in pixels.
fn tag_margins(tag: &str) -> (f32, f32) {
    match tag {
        "h1" => (24.0, 16.0),
        "h2" => (20.0, 12.0),
        "h3" | "h4" => (16.0, 10.0),
        "p" => (4.0, 10.0),
        "ul" | "ol" => (8.0, 8.0),
        "li" => (2.0, 2.0),
        _ => (0.0, 0.0),
    }
}

/// Per-tag padding in pixels. Sections carry the stylesheet's 6rem padding.
fn tag_padding(tag: &str, is_block: bool) -> f32 {
    match tag {
        "section" => 96.0,
        "nav" | "header" | "footer" => 12.0,
        "input" | "button" => 12.0,
        "textarea" => 40.0,
        _ if is_block => 4.0,
        _ => 0.0,
    }
}

/// Compute a top-to-bottom block layout. The hero section is stretched to
/// at least one viewport height (`min-height: 100vh`).
pub fn compute_layout(doc: &Document, viewport: Viewport) -> Layout {
    let mut layout = Layout::empty(doc);
    let mut cursor_y = 0.0;
    layout_node(doc, doc.root(), 0.0, &mut cursor_y, viewport, 16.0, &mut layout);
    layout
}

fn layout_node(
    doc: &Document,
    id: NodeId,
    x: f32,
    cursor_y: &mut f32,
    viewport: Viewport,
    parent_font_size: f32,
    layout: &mut Layout,
) {
    let node = doc.node(id);
    let available_width = (viewport.width - x * 2.0).max(0.0);

    // Fixed and absolutely positioned chrome is laid out separately.
    if OUT_OF_FLOW.contains(&node.tag.as_str())
        || node.has_class("navbar")
        || node.has_class("gradient-orb")
        || node.has_class("modal")
        || node.has_class("scroll-top")
    {
        layout_fixed(doc, id, x, viewport, layout);
        return;
    }

    let is_block = node.node_type == NodeType::Element && BLOCK_TAGS.contains(&node.tag.as_str());
    let font_size = match node.tag.as_str() {
        "h1" => 48.0,
        "h2" => 36.0,
        "h3" => 20.0,
        "h4" => 18.0,
        "small" => 12.0,
        _ => parent_font_size,
    };

    let (margin_top, margin_bottom) = tag_margins(&node.tag);
    let padding = tag_padding(&node.tag, is_block);

    if is_block {
        *cursor_y += margin_top;
    }
    let start_y = *cursor_y;
    *cursor_y += padding;

    let child_x = x + if is_block { padding.min(32.0) } else { 0.0 };
    for &child in &node.children {
        layout_node(doc, child, child_x, cursor_y, viewport, font_size, layout);
    }

    if node.node_type == NodeType::Text && !node.text.trim().is_empty() {
        let line_height = font_size * 1.4;
        let chars_per_line = (available_width / (font_size * 0.6)).max(1.0) as usize;
        let lines = (node.text.trim().len() as f32 / chars_per_line as f32)
            .ceil()
            .max(1.0);
        *cursor_y += lines * line_height;
    }

    *cursor_y += padding;

    let mut height = *cursor_y - start_y;
    if node.has_class("hero") && height < viewport.height {
        *cursor_y = start_y + viewport.height;
        height = viewport.height;
    }

    if is_block {
        *cursor_y += margin_bottom;
    }

    layout.set_box(id, LayoutBox::new(x, start_y, available_width, height));
}

/// Lay out an out-of-flow subtree against its own cursor starting at 0 so
/// it does not push the flow down.
fn layout_fixed(doc: &Document, id: NodeId, x: f32, viewport: Viewport, layout: &mut Layout) {
    let node = doc.node(id);
    if node.has_class("navbar") {
        layout.set_box(id, LayoutBox::new(0.0, 0.0, viewport.width, 80.0));
    } else if node.has_class("gradient-orb") {
        layout.set_box(id, LayoutBox::new(x, 0.0, 400.0, 400.0));
    } else if node.has_class("scroll-top") {
        layout.set_box(
            id,
            LayoutBox::new(viewport.width - 80.0, viewport.height - 80.0, 50.0, 50.0),
        );
    } else if node.has_class("modal") {
        layout.set_box(id, LayoutBox::new(0.0, 0.0, viewport.width, viewport.height));
        let mut cursor = viewport.height * 0.25;
        for &child in &node.children {
            layout_node(doc, child, viewport.width * 0.2, &mut cursor, viewport, 16.0, layout);
        }
        return;
    } else {
        return;
    }
    let mut cursor = layout.get(id).y;
    for &child in &node.children {
        layout_node(doc, child, x + 12.0, &mut cursor, viewport, 16.0, layout);
    }
}
