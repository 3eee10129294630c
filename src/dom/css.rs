//! Inline style state written by the view controller.
//!
//! Only the handful of properties the controller animates are modelled:
//! `transform` (translations) and `opacity`. Other declarations are ignored.

use std::fmt;

/// A CSS translation. Pixel values unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate { x: f32, y: f32 },
    TranslateY(f32),
    /// `translateY(<n>%)`, used to slide the navbar off-screen.
    TranslateYPercent(f32),
}

impl Transform {
    pub const IDENTITY: Transform = Transform::TranslateY(0.0);

    /// Vertical displacement in pixels given the element's own height
    /// (needed to resolve percentages).
    pub fn dy(&self, own_height: f32) -> f32 {
        match *self {
            Transform::Translate { y, .. } => y,
            Transform::TranslateY(y) => y,
            Transform::TranslateYPercent(p) => own_height * p / 100.0,
        }
    }

    pub fn dx(&self) -> f32 {
        match *self {
            Transform::Translate { x, .. } => x,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate { x, y } => write!(f, "translate({}px, {}px)", x, y),
            Transform::TranslateY(y) => write!(f, "translateY({}px)", y),
            Transform::TranslateYPercent(p) => write!(f, "translateY({}%)", p),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    pub transform: Option<Transform>,
    pub opacity: Option<f32>,
}

impl InlineStyle {
    /// Serialize as the body of a `style=""` attribute.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(t) = self.transform {
            decls.push(format!("transform: {}", t));
        }
        if let Some(o) = self.opacity {
            decls.push(format!("opacity: {}", o));
        }
        decls.join("; ")
    }

    pub fn effective_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }
}

/// Parse an inline `style="..."` attribute value.
pub fn parse_inline_style(style: &str) -> InlineStyle {
    let mut props = InlineStyle::default();
    for decl in style.split(';') {
        let parts: Vec<&str> = decl.splitn(2, ':').collect();
        if parts.len() != 2 {
            continue;
        }
        let prop = parts[0].trim();
        let val = parts[1].trim();
        match prop {
            "transform" => props.transform = parse_transform(val),
            "opacity" => {
                props.opacity = val
                    .parse::<f32>()
                    .ok()
                    .filter(|o| o.is_finite())
                    .map(|o| o.clamp(0.0, 1.0))
            }
            _ => {}
        }
    }
    props
}

/// Parse the translate forms produced by `Transform`'s `Display` impl.
pub fn parse_transform(val: &str) -> Option<Transform> {
    let v = val.trim();
    if let Some(inner) = v.strip_prefix("translateY(").and_then(|s| s.strip_suffix(')')) {
        let inner = inner.trim();
        if let Some(pct) = inner.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|p| p.is_finite())
                .map(Transform::TranslateYPercent);
        }
        return parse_css_size(inner).map(Transform::TranslateY);
    }
    if let Some(inner) = v.strip_prefix("translate(").and_then(|s| s.strip_suffix(')')) {
        let mut parts = inner.split(',');
        let x = parse_css_size(parts.next()?)?;
        let y = parts.next().map(parse_css_size).unwrap_or(Some(0.0))?;
        return Some(Transform::Translate { x, y });
    }
    None
}

/// Parse a CSS length into pixels. Only `px` and unitless values.
pub fn parse_css_size(val: &str) -> Option<f32> {
    let v = val.trim();
    v.strip_suffix("px")
        .unwrap_or(v)
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
}
