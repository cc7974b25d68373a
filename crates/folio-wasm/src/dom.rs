//! [`View`] over the live document.

use folio_ui::markup::{Markup, VOID_TAGS};
use folio_ui::{Node, RequestToken, TriggerBand, View};
use smol_str::SmolStr;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

/// Asynchronous work requested during an event. Started by the binding
/// layer once the page borrow is released.
#[derive(Debug, Clone)]
pub(crate) enum HostRequest {
    Image {
        path: String,
        token: RequestToken,
    },
    Timer {
        delay_ms: u32,
        token: RequestToken,
    },
    Observe {
        sections: Vec<SmolStr>,
        band: TriggerBand,
    },
}

pub(crate) struct DomView {
    window: Window,
    document: Document,
    nav_links: String,
    requests: Vec<HostRequest>,
}

impl DomView {
    pub(crate) fn new(window: Window, document: Document, nav_links: &str) -> Self {
        Self {
            window,
            document,
            nav_links: nav_links.to_string(),
            requests: Vec::new(),
        }
    }

    pub(crate) fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Every element `node` resolves to.
    fn resolve(&self, node: Node<'_>) -> Vec<Element> {
        match node {
            Node::Id(id) => self.document.get_element_by_id(id).into_iter().collect(),
            Node::Query(selector) => match self.document.query_selector(selector) {
                Ok(element) => element.into_iter().collect(),
                Err(err) => {
                    warn!("invalid selector '{selector}': {err:?}");
                    Vec::new()
                }
            },
            Node::NavLink(section) => {
                let href = format!("#{section}");
                self.select_all(&self.nav_links)
                    .into_iter()
                    .filter(|link| link.get_attribute("href").as_deref() == Some(href.as_str()))
                    .collect()
            }
            Node::Image(index) => u32::try_from(index)
                .ok()
                .and_then(|index| self.document.images().item(index))
                .into_iter()
                .collect(),
        }
    }

    fn first(&self, node: Node<'_>) -> Option<Element> {
        self.resolve(node).into_iter().next()
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            warn!("invalid selector '{selector}'");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn build(&self, markup: &Markup) -> Result<web_sys::Node, JsValue> {
        match markup {
            Markup::Text { text } => Ok(self.document.create_text_node(text).into()),
            Markup::Element(element) => {
                let node = self.document.create_element(&element.tag)?;
                for (name, value) in &element.attrs {
                    node.set_attribute(name, value)?;
                }
                if !VOID_TAGS.contains(&element.tag.as_str()) {
                    for child in &element.children {
                        node.append_child(&self.build(child)?)?;
                    }
                }
                Ok(node.into())
            }
        }
    }
}

fn report(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        warn!("{what} failed: {err:?}");
    }
}

impl View for DomView {
    fn exists(&self, node: Node<'_>) -> bool {
        !self.resolve(node).is_empty()
    }

    fn set_class(&mut self, node: Node<'_>, class: &str, on: bool) {
        for element in self.resolve(node) {
            let classes = element.class_list();
            let result = if on {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            };
            report(result, "class update");
        }
    }

    fn has_class(&self, node: Node<'_>, class: &str) -> bool {
        self.first(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_text(&mut self, node: Node<'_>, text: &str) {
        if let Some(element) = self.first(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_markup(&mut self, node: Node<'_>, markup: &Markup) {
        let Some(element) = self.first(node) else {
            return;
        };
        element.set_text_content(None);
        let result = self
            .build(markup)
            .and_then(|child| element.append_child(&child).map(drop));
        report(result, "markup update");
    }

    fn inner_html(&self, node: Node<'_>) -> Option<String> {
        self.first(node).map(|element| element.inner_html())
    }

    fn set_inner_html(&mut self, node: Node<'_>, html: &str) {
        if let Some(element) = self.first(node) {
            element.set_inner_html(html);
        }
    }

    fn set_disabled(&mut self, node: Node<'_>, disabled: bool) {
        if let Some(element) = self.first(node) {
            let result = element
                .toggle_attribute_with_force("disabled", disabled)
                .map(drop);
            report(result, "disabled update");
        }
    }

    fn set_style(&mut self, node: Node<'_>, property: &str, value: &str) {
        for element in self.resolve(node) {
            if let Some(element) = element.dyn_ref::<HtmlElement>() {
                report(
                    element.style().set_property(property, value),
                    "style update",
                );
            }
        }
    }

    fn scroll_into_view(&mut self, node: Node<'_>) {
        if let Some(element) = self.first(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn reset_form(&mut self, node: Node<'_>) {
        if let Some(form) = self
            .first(node)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn append_to_body(&mut self, markup: &Markup) {
        let Some(body) = self.document.body() else {
            warn!("document has no body");
            return;
        };
        let result = self
            .build(markup)
            .and_then(|node| body.append_child(&node).map(drop));
        report(result, "append to body");
    }

    fn alert(&mut self, message: &str) {
        report(self.window.alert_with_message(message), "alert");
    }

    fn request_image(&mut self, path: &str, token: RequestToken) {
        self.requests.push(HostRequest::Image {
            path: path.to_string(),
            token,
        });
    }

    fn start_timer(&mut self, delay_ms: u32, token: RequestToken) {
        self.requests.push(HostRequest::Timer { delay_ms, token });
    }

    fn observe_sections(&mut self, sections: &[SmolStr], band: TriggerBand) {
        self.requests.push(HostRequest::Observe {
            sections: sections.to_vec(),
            band,
        });
    }
}
