use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::{SCROLL_LINK_PADDING, SCROLL_SPY_OFFSET};

pub const HOME_ANCHOR: &str = "#hero";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget<'a> {
    Top,
    Section(&'a str),
    External,
}

pub fn anchor_target(href: &str) -> AnchorTarget<'_> {
    match href.strip_prefix('#') {
        Some("") => AnchorTarget::Top,
        Some(id) => AnchorTarget::Section(id),
        None => AnchorTarget::External,
    }
}

/// Where the container should scroll so a section clears the sticky header.
pub fn scroll_target_top(offset_top: i32, header_height: i32) -> i32 {
    offset_top - header_height - SCROLL_LINK_PADDING
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPosition {
    pub id: String,
    pub top: i32,
}

/// Anchor of the footer link to highlight for a scroll position. Sections
/// must be in document order; the last one scrolled past wins.
pub fn active_anchor(scroll_pos: i32, header_height: i32, sections: &[SectionPosition]) -> Option<String> {
    let threshold = |section: &SectionPosition| section.top - header_height - SCROLL_SPY_OFFSET;

    if let Some(first) = sections.first() {
        if scroll_pos < threshold(first) {
            return Some(HOME_ANCHOR.to_string());
        }
    }

    sections
        .iter()
        .filter(|section| scroll_pos >= threshold(section))
        .last()
        .map(|section| format!("#{}", section.id))
}

pub fn header_height(document: &Document) -> i32 {
    document
        .query_selector(".app-header")
        .ok()
        .flatten()
        .and_then(|header| header.dyn_into::<HtmlElement>().ok())
        .map(|header| header.offset_height())
        .unwrap_or(0)
}

pub fn section_positions(document: &Document) -> Vec<SectionPosition> {
    let Ok(nodes) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| SectionPosition {
            id: section.id(),
            top: section.offset_top(),
        })
        .collect()
}

pub fn smooth_scroll_to(container: &Element, top: i32) {
    let mut options = ScrollToOptions::new();
    options.top(f64::from(top.max(0)));
    options.behavior(ScrollBehavior::Smooth);
    container.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionPosition> {
        [("products", 600), ("plans", 1400), ("ai", 2300)]
            .into_iter()
            .map(|(id, top)| SectionPosition { id: id.to_string(), top })
            .collect()
    }

    #[test]
    fn hrefs_classify() {
        assert_eq!(anchor_target("#"), AnchorTarget::Top);
        assert_eq!(anchor_target("#plans"), AnchorTarget::Section("plans"));
        assert_eq!(anchor_target("/terms"), AnchorTarget::External);
    }

    #[test]
    fn scroll_target_clears_header() {
        assert_eq!(scroll_target_top(1400, 70), 1315);
    }

    #[test]
    fn above_first_section_highlights_home() {
        assert_eq!(active_anchor(0, 70, &sections()), Some("#hero".to_string()));
        assert_eq!(active_anchor(479, 70, &sections()), Some("#hero".to_string()));
    }

    #[test]
    fn last_section_scrolled_past_wins() {
        assert_eq!(active_anchor(480, 70, &sections()), Some("#products".to_string()));
        assert_eq!(active_anchor(1300, 70, &sections()), Some("#plans".to_string()));
        assert_eq!(active_anchor(9000, 70, &sections()), Some("#ai".to_string()));
    }

    #[test]
    fn no_sections_no_highlight() {
        assert_eq!(active_anchor(100, 70, &[]), None);
    }
}
