//! Shared fixtures: the reference portfolio document as a `MemoryView`.
#![allow(dead_code)]

use folio_ui::{
    Catalog, ClickPath, ElementInfo, IntersectionReport, MemoryView, Node, Page, PageConfig,
    PageEvent, View,
};

pub const SECTIONS: &[&str] = &["about", "skills", "projects", "contact"];
pub const SUBMIT_LABEL: &str = r#"<i class="fas fa-paper-plane"></i> Send Message"#;

/// Navigation hrefs as they appear in the reference markup. `#home` has no
/// matching section.
pub fn nav_hrefs() -> Vec<String> {
    ["#home", "#about", "#skills", "#projects", "#contact"]
        .iter()
        .map(|href| (*href).to_string())
        .collect()
}

pub fn reference_view(config: &PageConfig) -> MemoryView {
    let elements = &config.elements;
    let mut view = MemoryView::new()
        .with(Node::Id(&elements.nav))
        .with(Node::Id(&elements.menu_button))
        .with(Node::Id(&elements.close_button))
        .with(Node::Id(&elements.year))
        .with(Node::Query(&elements.contact_form))
        .with(Node::Image(0))
        .with(Node::Image(1));
    view.insert_html(Node::Query(&elements.submit_button), SUBMIT_LABEL);
    for section in SECTIONS {
        view.insert(Node::Id(section));
        view.insert(Node::NavLink(section));
    }
    view
}

/// A page that has processed `Ready`, with the mutation log cleared.
pub fn ready_page() -> (Page, MemoryView) {
    let config = PageConfig::default();
    let mut view = reference_view(&config);
    let mut page = Page::new(config, Catalog::builtin().expect("builtin catalog"));
    page.handle(
        PageEvent::Ready {
            nav_hrefs: nav_hrefs(),
            images_complete: vec![false, true],
            year: 2026,
        },
        &mut view,
    );
    view.take_mutations();
    (page, view)
}

pub fn click(elements: Vec<ElementInfo>) -> PageEvent {
    PageEvent::Click {
        path: ClickPath::new(elements),
    }
}

/// Click on a "view certificate" button inside the certificates section.
pub fn click_certificate(id: &str) -> PageEvent {
    click(vec![
        ElementInfo::new("button")
            .with_class("btn")
            .with_class("view-cert")
            .with_attr("data-cert", id),
        ElementInfo::new("div").with_class("cert-card"),
        ElementInfo::new("section").with_id("certificates"),
        ElementInfo::new("body"),
    ])
}

pub fn key(key: &str) -> PageEvent {
    PageEvent::KeyDown {
        key: key.to_string(),
    }
}

pub fn report(section: &str, is_intersecting: bool, overlap: f64) -> IntersectionReport {
    IntersectionReport {
        section_id: section.into(),
        is_intersecting,
        overlap,
    }
}

/// Sections whose navigation link currently carries `active`.
pub fn active_links(view: &MemoryView) -> Vec<&'static str> {
    SECTIONS
        .iter()
        .copied()
        .filter(|section| view.has_class(Node::NavLink(section), "active"))
        .collect()
}
