//! Null-safe helpers over `scraper` for markup that may be missing pieces.

use animeworld_core::sanitize_text;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Every element of `document` matching `css`, in document order.
pub(crate) fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => document.select(&sel).collect(),
        None => Vec::new(),
    }
}

pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    document.select(&sel).next()
}

/// First descendant of `scope` matching `css`.
pub(crate) fn find_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    scope.select(&sel).next()
}

pub(crate) fn find_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Trimmed attribute value, or an empty string when the element or the
/// attribute is missing.
pub fn extract_attribute(element: Option<ElementRef<'_>>, name: &str) -> String {
    element
        .and_then(|el| el.value().attr(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Whitespace-normalized text of the element and all its descendants.
pub(crate) fn element_text(element: Option<ElementRef<'_>>) -> String {
    element
        .map(|el| sanitize_text(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Text of the element's own text nodes, ignoring child elements.
pub(crate) fn own_text(element: ElementRef<'_>) -> String {
    let text: String = element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect();
    sanitize_text(&text)
}

pub(crate) fn texts(elements: &[ElementRef<'_>]) -> Vec<String> {
    elements
        .iter()
        .map(|el| element_text(Some(*el)))
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_nodes_and_attributes_read_as_empty() {
        let doc = Html::parse_document(r#"<div><img data-src=" /a.jpg "></div>"#);
        let img = select_first(&doc, "img");
        assert_eq!(extract_attribute(img, "data-src"), "/a.jpg");
        assert_eq!(extract_attribute(img, "src"), "");
        assert_eq!(extract_attribute(select_first(&doc, "video"), "src"), "");
        assert_eq!(element_text(None), "");
    }

    #[test]
    fn own_text_skips_child_elements() {
        let doc = Html::parse_document(
            r#"<a href="/x"><span class="type-series">TV</span> Bleach
                <em>new</em></a>"#,
        );
        let link = select_first(&doc, "a").unwrap();
        assert_eq!(own_text(link), "Bleach");
        assert_eq!(element_text(Some(link)), "TV Bleach new");
    }

    #[test]
    fn invalid_selectors_match_nothing() {
        let doc = Html::parse_document("<p>x</p>");
        assert!(select_all(&doc, "p[").is_empty());
        assert!(select_first(&doc, "::nope").is_none());
    }
}
