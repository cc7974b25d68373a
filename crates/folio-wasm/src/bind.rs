//! Event wiring between the document and the page controllers.
//!
//! The page lives behind a `RefCell` shared by every listener. Each listener
//! holds the borrow for a single event; host requests queued by the view are
//! started after the borrow ends.

use std::cell::RefCell;
use std::rc::Rc;

use folio_ui::{
    Catalog, ClickPath, ElementInfo, EventOutcome, IntersectionReport, LoadOutcome, Page,
    PageConfig, PageEvent, RequestToken, TriggerBand,
};
use smol_str::SmolStr;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::console;
use crate::dom::{DomView, HostRequest};
use crate::pending::{Detach, InFlight};

/// A certificate image together with the handlers it reports through.
struct ImageLoad {
    image: HtmlImageElement,
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl Detach for ImageLoad {
    fn detach(&self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

struct App {
    window: Window,
    document: Document,
    certificate_attribute: SmolStr,
    page: RefCell<Page>,
    view: RefCell<DomView>,
    observer: RefCell<Option<IntersectionObserver>>,
    image: RefCell<InFlight<ImageLoad>>,
}

/// Bind the controllers to the current document.
pub(crate) fn install(config: PageConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init(&config.logging.level);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let catalog = Catalog::builtin().map_err(|err| JsValue::from_str(&err.to_string()))?;

    let app = Rc::new(App {
        view: RefCell::new(DomView::new(
            window.clone(),
            document.clone(),
            &config.elements.nav_links,
        )),
        certificate_attribute: config.elements.certificate_attribute.clone(),
        page: RefCell::new(Page::new(config, catalog)),
        observer: RefCell::new(None),
        image: RefCell::new(InFlight::new()),
        window,
        document,
    });

    let loading = js_sys::Reflect::get(&app.document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading");
    if loading {
        let pending = Rc::clone(&app);
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = bind_document(&pending) {
                warn!("binding failed: {err:?}");
            }
        });
        app.document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        bind_document(&app)
    }
}

fn bind_document(app: &Rc<App>) -> Result<(), JsValue> {
    let images = app.document.images();
    let mut images_complete = Vec::new();
    for index in 0..images.length() {
        let Some(image) = images
            .item(index)
            .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
        else {
            continue;
        };
        images_complete.push(image.complete());
        let target = Rc::clone(app);
        let position = index as usize;
        let on_load = Closure::<dyn FnMut()>::new(move || {
            dispatch(&target, PageEvent::PageImageLoaded { index: position });
        });
        image.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        on_load.forget();
    }

    let nav_hrefs = {
        let page = app.page.borrow();
        let links = app
            .document
            .query_selector_all(&page.config().elements.nav_links)?;
        (0..links.length())
            .filter_map(|index| links.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|link| link.get_attribute("href"))
            .collect::<Vec<_>>()
    };

    let target = Rc::clone(app);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let path = click_path(&event, &target.certificate_attribute);
        if dispatch(&target, PageEvent::Click { path }).prevent_default {
            event.prevent_default();
        }
    });
    app.document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let target = Rc::clone(app);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        dispatch(&target, PageEvent::KeyDown { key: event.key() });
    });
    app.document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    let form = {
        let page = app.page.borrow();
        app.document
            .query_selector(&page.config().elements.contact_form)?
    };
    if let Some(form) = form {
        let target = Rc::clone(app);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if dispatch(&target, PageEvent::Submit).prevent_default {
                event.prevent_default();
            }
        });
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
    }

    let year = i32::try_from(js_sys::Date::new_0().get_full_year()).unwrap_or_default();
    dispatch(
        app,
        PageEvent::Ready {
            nav_hrefs,
            images_complete,
            year,
        },
    );
    info!("portfolio page bound");
    Ok(())
}

/// Run one event through the page, then start whatever it requested.
fn dispatch(app: &Rc<App>, event: PageEvent) -> EventOutcome {
    let (outcome, requests) = {
        let mut page = app.page.borrow_mut();
        let mut view = app.view.borrow_mut();
        let outcome = page.handle(event, &mut *view);
        (outcome, view.take_requests())
    };
    for request in requests {
        if let Err(err) = start(app, request) {
            warn!("host request failed: {err:?}");
        }
    }
    outcome
}

fn start(app: &Rc<App>, request: HostRequest) -> Result<(), JsValue> {
    match request {
        HostRequest::Image { path, token } => load_image(app, &path, token),
        HostRequest::Timer { delay_ms, token } => {
            let target = Rc::clone(app);
            let on_timeout = Closure::once_into_js(move || {
                dispatch(&target, PageEvent::TimerFired { token });
            });
            let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            app.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    on_timeout.unchecked_ref(),
                    delay,
                )
                .map(drop)
        }
        HostRequest::Observe { sections, band } => observe(app, &sections, band),
    }
}

fn load_image(app: &Rc<App>, path: &str, token: RequestToken) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    let target = Rc::clone(app);
    let on_load = Closure::<dyn FnMut()>::new(move || {
        dispatch(
            &target,
            PageEvent::CertificateImage {
                token,
                outcome: LoadOutcome::Loaded,
            },
        );
    });
    let target = Rc::clone(app);
    let on_error = Closure::<dyn FnMut()>::new(move || {
        dispatch(
            &target,
            PageEvent::CertificateImage {
                token,
                outcome: LoadOutcome::Failed,
            },
        );
    });
    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    debug!("loading certificate image {path} ({token})");
    image.set_src(path);
    // Releases the handlers of the load this one supersedes.
    app.image.borrow_mut().replace(ImageLoad {
        image,
        _on_load: on_load,
        _on_error: on_error,
    });
    Ok(())
}

fn observe(app: &Rc<App>, sections: &[SmolStr], band: TriggerBand) -> Result<(), JsValue> {
    if let Some(previous) = app.observer.borrow_mut().take() {
        previous.disconnect();
    }

    let target = Rc::clone(app);
    let on_change = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let reports = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionReport {
                    section_id: SmolStr::new(entry.target().id()),
                    is_intersecting: entry.is_intersecting(),
                    overlap: entry.intersection_rect().height(),
                })
                .collect();
            dispatch(&target, PageEvent::Intersections { reports });
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&band.root_margin());
    let observer =
        IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &options)?;
    on_change.forget();

    for section in sections {
        if let Some(element) = app.document.get_element_by_id(section) {
            observer.observe(&element);
        }
    }
    *app.observer.borrow_mut() = Some(observer);
    Ok(())
}

/// Element path from the event target up to the document root.
fn click_path(event: &Event, certificate_attribute: &str) -> ClickPath {
    let mut elements = Vec::new();
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        let mut info = ElementInfo::new(&element.tag_name().to_ascii_lowercase());
        let id = element.id();
        if !id.is_empty() {
            info = info.with_id(&id);
        }
        let classes = element.class_list();
        for index in 0..classes.length() {
            if let Some(class) = classes.item(index) {
                info = info.with_class(&class);
            }
        }
        for name in ["href", certificate_attribute] {
            if let Some(value) = element.get_attribute(name) {
                info = info.with_attr(name, &value);
            }
        }
        elements.push(info);
        current = element.parent_element();
    }
    ClickPath::new(elements)
}
