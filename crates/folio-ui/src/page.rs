//! Page dispatcher: routes host events to the controllers.

use tracing::{debug, trace, warn};

use crate::catalog::Catalog;
use crate::config::PageConfig;
use crate::contact::ContactForm;
use crate::events::{ClickPath, EventOutcome, PageEvent};
use crate::fade::ImageFade;
use crate::markup::{MODAL_CLOSE_CLASS, MODAL_ID};
use crate::modal::CertificateModal;
use crate::nav::{follow_anchor, NavDrawer};
use crate::scroll_spy::{ScrollSpy, TriggerBand};
use crate::view::{Node, View};

/// Every controller of the portfolio page.
#[derive(Debug)]
pub struct Page {
    config: PageConfig,
    drawer: NavDrawer,
    scroll_spy: ScrollSpy,
    modal: CertificateModal,
    contact: ContactForm,
    fade: ImageFade,
}

impl Page {
    pub fn new(config: PageConfig, catalog: Catalog) -> Self {
        let band = config.scroll_spy.band().unwrap_or_else(|err| {
            warn!("{err}; using the default trigger band");
            TriggerBand::default()
        });
        Self {
            drawer: NavDrawer::new(&config.elements, &config.classes),
            scroll_spy: ScrollSpy::new(band, config.classes.active_link.clone()),
            modal: CertificateModal::new(catalog, config.classes.modal_visible.clone()),
            contact: ContactForm::new(&config.elements, config.contact.clone()),
            fade: ImageFade::new(config.fade_in.transition.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn modal(&self) -> &CertificateModal {
        &self.modal
    }

    pub fn scroll_spy(&self) -> &ScrollSpy {
        &self.scroll_spy
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn drawer(&self) -> &NavDrawer {
        &self.drawer
    }

    pub fn handle(&mut self, event: PageEvent, view: &mut impl View) -> EventOutcome {
        trace!("page event {event:?}");
        match event {
            PageEvent::Ready {
                nav_hrefs,
                images_complete,
                year,
            } => {
                self.ready(&nav_hrefs, &images_complete, year, view);
                EventOutcome::DEFAULT
            }
            PageEvent::Click { path } => self.click(&path, view),
            PageEvent::KeyDown { key } => {
                self.drawer.key_down(&key, view);
                self.modal.key_down(&key, view);
                EventOutcome::DEFAULT
            }
            PageEvent::Submit => {
                if self.contact.submit(view) {
                    EventOutcome::PREVENT
                } else {
                    EventOutcome::DEFAULT
                }
            }
            PageEvent::Intersections { reports } => {
                self.scroll_spy.process(&reports, view);
                EventOutcome::DEFAULT
            }
            PageEvent::CertificateImage { token, outcome } => {
                self.modal.image_finished(token, outcome, view);
                EventOutcome::DEFAULT
            }
            PageEvent::PageImageLoaded { index } => {
                self.fade.loaded(index, view);
                EventOutcome::DEFAULT
            }
            PageEvent::TimerFired { token } => {
                if !self.contact.timer_fired(token, view) {
                    debug!("timer {token} has no pending owner");
                }
                EventOutcome::DEFAULT
            }
        }
    }

    fn ready(
        &mut self,
        nav_hrefs: &[String],
        images_complete: &[bool],
        year: i32,
        view: &mut impl View,
    ) {
        view.set_text(Node::Id(&self.config.elements.year), &year.to_string());
        self.fade.prepare(images_complete, view);
        self.scroll_spy.setup(nav_hrefs, view);
        self.modal.mount(view);
    }

    fn click(&mut self, path: &ClickPath, view: &mut impl View) -> EventOutcome {
        let elements = &self.config.elements;
        self.drawer.click(path, view);

        let mut outcome = EventOutcome::DEFAULT;
        let anchor = path.closest(|element| {
            element.tag == "a" && element.attr("href").is_some_and(|href| href.starts_with('#'))
        });
        if let Some(href) = anchor.and_then(|anchor| anchor.attr("href")) {
            if follow_anchor(href, &self.drawer, view) {
                outcome = EventOutcome::PREVENT;
            }
        }

        let certificate = path
            .closest(|element| element.has_class(&elements.view_certificate_class))
            .and_then(|button| button.attr(&elements.certificate_attribute));
        if let Some(id) = certificate {
            self.modal.open(id, view);
        } else if path
            .closest(|element| element.has_class(MODAL_CLOSE_CLASS))
            .is_some()
            || path.target().is_some_and(|target| target.has_id(MODAL_ID))
        {
            self.modal.close(view);
        }
        outcome
    }
}
