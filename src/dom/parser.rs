use crate::dom::css::parse_inline_style;
use crate::dom::{Document, NodeId};
use scraper::{ElementRef, Html, Node};

/// Tags whose children should be stripped (invisible/script content)
const SKIP_CHILDREN: &[&str] = &["script", "style", "noscript", "svg"];

/// Parse raw HTML into a mutable `Document`.
pub fn parse_html(html: &str, url: &str) -> Document {
    let document = Html::parse_document(html);

    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let mut doc = Document::new(url);
    doc.title = title.trim().to_string();
    let root = doc.root();
    convert_element(document.root_element(), &mut doc, root);
    doc
}

fn convert_element(el: ElementRef<'_>, doc: &mut Document, parent: NodeId) {
    let tag = el.value().name.local.as_ref().to_string();
    let classes: Vec<&str> = el.value().classes().collect();
    let id = doc.create_element(parent, &tag, &classes);

    for (k, v) in el.value().attrs() {
        match k {
            "class" => {}
            "style" => {
                *doc.style_mut(id) = parse_inline_style(v);
                doc.set_attr(id, k, v);
            }
            _ => doc.set_attr(id, k, v),
        }
    }

    if SKIP_CHILDREN.contains(&tag.as_str()) {
        return;
    }

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    convert_element(child_el, doc, id);
                }
            }
            Node::Text(t) => {
                if !t.text.trim().is_empty() {
                    doc.create_text(id, &t.text);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::css::Transform;

    #[test]
    fn parse_simple_html() {
        let html = r##"
        <html>
            <head><title>Portfolio</title></head>
            <body>
                <nav class="navbar"><a class="nav-link active" href="#home">Home</a></nav>
                <p>Content paragraph</p>
            </body>
        </html>
        "##;

        let doc = parse_html(html, "file:///index.html");
        assert_eq!(doc.title, "Portfolio");
        let link = doc.first_with_class("nav-link").unwrap();
        assert!(doc.has_class(link, "active"));
        assert_eq!(doc.attr(link, "href"), Some("#home"));
        assert_eq!(doc.attr(link, "class"), None);
    }

    #[test]
    fn strips_script_children() {
        let html = r#"
        <html><body>
            <p>Visible</p>
            <script>alert("hidden");</script>
        </body></html>
        "#;

        let doc = parse_html(html, "file:///index.html");
        let text = doc.text_content(doc.root());
        assert!(text.contains("Visible"));
        assert!(!text.contains("alert"));
    }

    #[test]
    fn seeds_inline_style() {
        let html = r#"<html><body><div class="orb" style="transform: translateY(4px); opacity: 0.3"></div></body></html>"#;
        let doc = parse_html(html, "file:///index.html");
        let orb = doc.first_with_class("orb").unwrap();
        assert_eq!(doc.style(orb).transform, Some(Transform::TranslateY(4.0)));
        assert_eq!(doc.style(orb).opacity, Some(0.3));
    }

    #[test]
    fn unsupported_style_values_do_not_abort_parse() {
        let html = r#"<html><body><div class="card" style="transition-delay: -0.5s">x</div></body></html>"#;
        let doc = parse_html(html, "file:///index.html");
        let card = doc.first_with_class("card").unwrap();
        assert_eq!(doc.text_content(card), "x");
        assert_eq!(doc.style(card).transform, None);
    }
}
