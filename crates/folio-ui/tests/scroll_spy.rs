mod common;

use common::*;
use folio_ui::{Mutation, Node, PageConfig, PageEvent, ScrollSpy, TriggerBand, View};

fn batch(reports: Vec<folio_ui::IntersectionReport>) -> PageEvent {
    PageEvent::Intersections { reports }
}

#[test]
fn setup_observes_only_resolvable_sections() {
    let config = PageConfig::default();
    let mut view = reference_view(&config);
    let mut spy = ScrollSpy::new(TriggerBand::default(), "active");
    spy.setup(
        &["#home", "#about", "#", "resume.pdf", "#about", "#skills"],
        &mut view,
    );
    assert_eq!(spy.sections(), &["about", "skills"]);
    insta::assert_snapshot!(
        view.mutations()[0].to_string(),
        @"observe [about, skills] -20% 0px -70% 0px"
    );
}

#[test]
fn setup_without_sections_observes_nothing() {
    let mut view = folio_ui::MemoryView::new();
    let mut spy = ScrollSpy::new(TriggerBand::default(), "active");
    spy.setup(&["#about", "#skills"], &mut view);
    assert!(spy.sections().is_empty());
    assert!(view.mutations().is_empty());

    assert_eq!(spy.process(&[report("about", true, 40.0)], &mut view), None);
}

#[test]
fn greatest_overlap_wins_regardless_of_delivery_order() {
    let (mut page, mut view) = ready_page();
    page.handle(
        batch(vec![
            report("projects", true, 80.0),
            report("skills", true, 20.0),
        ]),
        &mut view,
    );
    assert_eq!(active_links(&view), vec!["projects"]);

    page.handle(
        batch(vec![
            report("skills", true, 20.0),
            report("projects", true, 80.0),
        ]),
        &mut view,
    );
    assert_eq!(active_links(&view), vec!["projects"]);
    assert_eq!(page.scroll_spy().active(), Some("projects"));
}

#[test]
fn equal_overlap_prefers_earlier_link() {
    let (mut page, mut view) = ready_page();
    page.handle(
        batch(vec![
            report("contact", true, 0.0),
            report("skills", true, 0.0),
        ]),
        &mut view,
    );
    assert_eq!(active_links(&view), vec!["skills"]);
}

#[test]
fn batch_without_intersections_keeps_previous_highlight() {
    let (mut page, mut view) = ready_page();
    page.handle(batch(vec![report("about", true, 10.0)]), &mut view);
    view.take_mutations();

    page.handle(
        batch(vec![
            report("about", false, 0.0),
            report("skills", false, 0.0),
        ]),
        &mut view,
    );
    assert!(view.mutations().is_empty());
    assert_eq!(active_links(&view), vec!["about"]);
}

#[test]
fn reports_for_unknown_sections_are_ignored() {
    let (mut page, mut view) = ready_page();
    page.handle(batch(vec![report("about", true, 10.0)]), &mut view);
    page.handle(batch(vec![report("home", true, 500.0)]), &mut view);
    assert_eq!(active_links(&view), vec!["about"]);
}

#[test]
fn activation_only_touches_navigation_links() {
    let (mut page, mut view) = ready_page();
    page.handle(batch(vec![report("skills", true, 10.0)]), &mut view);
    for mutation in view.mutations() {
        let Mutation::Class { node, class, .. } = mutation else {
            panic!("unexpected mutation {mutation}");
        };
        assert!(node.to_string().starts_with("nav-link["), "{node}");
        assert_eq!(class, "active");
    }
    assert_eq!(view.mutations().len(), SECTIONS.len());
}

#[test]
fn at_most_one_link_active_after_every_batch() {
    let (mut page, mut view) = ready_page();
    // Deterministic pseudo-random batches over known and unknown sections.
    let ids = ["about", "skills", "projects", "contact", "home"];
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    for _ in 0..250 {
        let len = (next() % 5) as usize;
        let reports = (0..len)
            .map(|_| {
                let value = next();
                let id = ids[(value % ids.len() as u64) as usize];
                let intersecting = value & 0b1000 != 0;
                let overlap = ((value >> 8) % 120) as f64;
                report(id, intersecting, overlap)
            })
            .collect();
        page.handle(batch(reports), &mut view);
        assert!(active_links(&view).len() <= 1, "{:?}", active_links(&view));
    }
}

#[test]
fn band_geometry_feeds_activation() {
    let (mut page, mut view) = ready_page();
    let band = page.scroll_spy().band();
    let viewport = 900.0;
    // about ends inside the band, skills starts inside it and covers more.
    let reports = vec![
        band.report("about", -600.0, 200.0, viewport),
        band.report("skills", 200.0, 1100.0, viewport),
        band.report("projects", 1100.0, 1800.0, viewport),
    ];
    assert!(!reports[2].is_intersecting);
    page.handle(batch(reports), &mut view);
    assert_eq!(active_links(&view), vec!["skills"]);
    assert!(!view.has_class(Node::NavLink("about"), "active"));
}
