//! Report fragments and the pagination links they carry.
//!
//! Every successful report response replaces the previous fragment. Links
//! are stamped with the generation of the fragment they were scanned from,
//! so a link kept from an older fragment can be recognised and ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::types::PageNumber;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("valid regex"));
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\sclass\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});
static PAGE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\sdata-page\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});

const LINK_CLASSES: [&str; 2] = ["page-link", "page-btn"];

/// A pagination control found in a report fragment.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub page: PageNumber,
    generation: u64,
}

impl PageLink {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Sanitized report markup plus the links it exposes.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ReportFragment {
    pub html: String,
    pub links: Vec<PageLink>,
    generation: u64,
}

/// Removes scripts and event handlers while keeping the markup the pager relies on.
pub fn sanitize_fragment(html: &str) -> String {
    ammonia::Builder::default()
        .add_generic_attributes(&["class", "data-page"])
        .clean(html)
        .to_string()
}

/// Escapes the serializer applies to text nodes; `&amp;` must be undone last.
const TEXT_ESCAPES: [(&str, &str); 4] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", "\u{a0}"),
    ("&amp;", "&"),
];

/// Strips every tag, leaving the plain text content of the fragment.
pub fn fragment_text(html: &str) -> String {
    let escaped = ammonia::Builder::empty().clean(html).to_string();
    TEXT_ESCAPES
        .iter()
        .fold(escaped, |text, (entity, raw)| text.replace(entity, raw))
}

/// Finds elements classed `page-link page-btn` and reads their `data-page`.
///
/// Elements whose page value is missing or not a positive number are skipped.
pub fn scan_links(html: &str, generation: u64) -> Vec<PageLink> {
    TAG.find_iter(html)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let classes = CLASS_ATTR.captures(tag)?.get(1)?.as_str();
            let is_page_link = LINK_CLASSES
                .iter()
                .all(|wanted| classes.split_whitespace().any(|class| class == *wanted));
            if !is_page_link {
                return None;
            }
            let page = PAGE_ATTR.captures(tag)?.get(1)?.as_str().parse().ok()?;
            Some(PageLink { page, generation })
        })
        .collect()
}

impl ReportFragment {
    pub fn new(raw_html: &str, generation: u64) -> Self {
        let html = sanitize_fragment(raw_html);
        let links = scan_links(&html, generation);
        Self {
            html,
            links,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `link` was scanned from this fragment.
    pub fn owns(&self, link: &PageLink) -> bool {
        link.generation == self.generation
    }

    /// First link of this fragment pointing at `page`.
    pub fn link_to(&self, page: PageNumber) -> Option<&PageLink> {
        self.links.iter().find(|link| link.page == page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r##"
        <table><tr><td>Ana</td></tr></table>
        <ul class="pagination">
          <li><a href="#" class="page-link page-btn" data-page="1">1</a></li>
          <li><a href="#" class="page-btn page-link" data-page='2'>2</a></li>
          <li><a href="#" class="page-link" data-page="3">3</a></li>
          <li><a href="#" class="page-link page-btn" data-page="">…</a></li>
          <li><a href="#" class="page-link page-btn" onclick="evil()" data-page="4">»</a></li>
        </ul>
        <script>alert(1)</script>
    "##;

    #[test]
    fn scans_only_page_buttons_with_numeric_pages() {
        let pages: Vec<u32> = scan_links(FRAGMENT, 0)
            .into_iter()
            .map(|link| link.page.get())
            .collect();

        assert_eq!(pages, vec![1, 2, 4]);
    }

    #[test]
    fn fragment_is_sanitized_but_keeps_link_markup() {
        let fragment = ReportFragment::new(FRAGMENT, 1);

        assert!(!fragment.html.contains("<script"));
        assert!(!fragment.html.contains("onclick"));
        assert!(fragment.html.contains(r#"data-page="2""#));
        assert_eq!(fragment.links.len(), 3);
    }

    #[test]
    fn links_belong_to_their_generation() {
        let first = ReportFragment::new(FRAGMENT, 1);
        let second = ReportFragment::new(FRAGMENT, 2);
        let old_link = first.link_to(PageNumber::new(2).unwrap()).unwrap();

        assert!(first.owns(old_link));
        assert!(!second.owns(old_link));
    }

    #[test]
    fn text_rendering_drops_tags() {
        let text = fragment_text("<p>Ana <b>Silva</b></p>");

        assert_eq!(text.trim(), "Ana Silva");
    }

    #[test]
    fn text_rendering_decodes_entities() {
        let text = fragment_text("<td>Ana &amp; Bia</td><td>1 &lt; 2</td><td>&amp;lt;</td>");

        assert_eq!(text, "Ana & Bia1 < 2&lt;");
    }
}
