//! Active-section highlighting for the navigation links.

/// Vertical extent of a section in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f32,
    pub height: f32,
}

impl SectionSpan {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Index of the section containing the probe position, if any. Sections
/// are expected to tile the page; in a gap nothing is active.
pub fn section_at(probe: f32, spans: &[SectionSpan]) -> Option<usize> {
    spans.iter().position(|s| s.contains(probe))
}

/// Section considered current for a scroll offset: the probe sits
/// `probe_offset` pixels below the top of the viewport.
pub fn active_section(offset: f32, probe_offset: f32, spans: &[SectionSpan]) -> Option<usize> {
    section_at(offset + probe_offset, spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_shifted_below_viewport_top() {
        let spans = [SectionSpan::new(0.0, 400.0), SectionSpan::new(400.0, 500.0)];
        assert_eq!(active_section(299.0, 100.0, &spans), Some(0));
        assert_eq!(active_section(300.0, 100.0, &spans), Some(1));
        assert_eq!(active_section(800.0, 100.0, &spans), None);
    }

    #[test]
    fn gap_above_first_section_marks_nothing() {
        let spans = [SectionSpan::new(200.0, 400.0)];
        assert_eq!(section_at(50.0, &spans), None);
    }
}
