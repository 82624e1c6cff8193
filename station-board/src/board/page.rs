//! Board page sectioning.
//!
//! The provider's page is a flat run of `div` elements: some preamble,
//! then departures starting at the first element classed
//! `corpocentrale`, then arrivals starting at the second, then a
//! `footer`-classed element and trailing chrome. Nothing but those
//! marker classes delimits the sections, so we classify elements by a
//! linear scan over the body's children in document order.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Which board section an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Page chrome before the first section marker.
    Preamble,
    /// Departures: first `corpocentrale` marker up to the next one.
    Departures,
    /// Arrivals: second `corpocentrale` marker up to the footer.
    Arrivals,
    /// The `footer`-classed element and everything after it.
    Footer,
}

/// One top-level element of the board page, classified.
#[derive(Debug, Clone)]
pub struct BoardFragment {
    /// Section this element belongs to.
    pub kind: SectionKind,
    /// The element's outer HTML.
    pub html: String,
    /// The element's text content, whitespace-normalized.
    pub text: String,
}

/// A fetched board page, split into sections.
#[derive(Debug, Clone, Default)]
pub struct BoardPage {
    fragments: Vec<BoardFragment>,
}

impl BoardPage {
    /// Parse a board page and classify its top-level elements.
    ///
    /// The scan starts at the first `div` child of `<body>` (earlier
    /// elements are ignored, as the reference page never puts content
    /// there) and walks the remaining children in document order,
    /// switching section on each marker class it meets. A page with no
    /// markers classifies everything as preamble.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let body_selector = Selector::parse("body").unwrap();
        let Some(body) = document.select(&body_selector).next() else {
            return Self::default();
        };

        let children: Vec<ElementRef<'_>> =
            body.children().filter_map(ElementRef::wrap).collect();
        let start = children
            .iter()
            .position(|el| el.value().name() == "div")
            .unwrap_or(children.len());

        let mut kind = SectionKind::Preamble;
        let mut markers_seen = 0u32;
        let mut fragments = Vec::new();

        for el in &children[start..] {
            if has_class(el, "footer") {
                kind = SectionKind::Footer;
            } else if has_class(el, "corpocentrale") {
                markers_seen += 1;
                kind = if markers_seen == 1 {
                    SectionKind::Departures
                } else {
                    SectionKind::Arrivals
                };
            }

            fragments.push(BoardFragment {
                kind,
                html: el.html(),
                text: element_text(el),
            });
        }

        debug!(
            fragments = fragments.len(),
            markers = markers_seen,
            "board page sectioned"
        );

        Self { fragments }
    }

    /// The classified top-level elements, in document order.
    pub fn fragments(&self) -> &[BoardFragment] {
        &self.fragments
    }

    /// True if the page yielded no content elements at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The joined text of every fragment in one section.
    pub fn section_text(&self, kind: SectionKind) -> String {
        let lines: Vec<&str> = self
            .fragments
            .iter()
            .filter(|f| f.kind == kind && !f.text.is_empty())
            .map(|f| f.text.as_str())
            .collect();
        lines.join("\n")
    }
}

fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn element_text(el: &ElementRef<'_>) -> String {
    let parts: Vec<&str> = el
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    parts.join(" ")
}
