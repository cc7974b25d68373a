//! Headless [`View`] backed by an in-memory element table.
//!
//! Used by the test suites and by the JSON session facade of `folio-wasm`.
//! Only registered nodes exist; every applied mutation is recorded in order
//! so callers can replay or snapshot it. Elements are tracked independently:
//! changing a child's content does not rewrite the markup stored for its
//! ancestors.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use crate::markup::{Element, Markup};
use crate::scroll_spy::TriggerBand;
use crate::view::{Node, NodeKey, RequestToken, View};

/// Children of a tracked element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Nodes(Vec<Markup>),
    /// Host-authored HTML, kept verbatim.
    Html(String),
}

impl Content {
    fn to_html(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(text) => Markup::text(text.as_str()).to_html(),
            Content::Nodes(nodes) => nodes.iter().map(Markup::to_html).collect(),
            Content::Html(html) => html.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    pub classes: BTreeSet<SmolStr>,
    pub content: Content,
    pub disabled: bool,
    pub styles: BTreeMap<SmolStr, String>,
}

/// One applied mutation or host request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Class { node: NodeKey, class: SmolStr, on: bool },
    Text { node: NodeKey, text: String },
    Markup { node: NodeKey, html: String },
    InnerHtml { node: NodeKey, html: String },
    Disabled { node: NodeKey, disabled: bool },
    Style { node: NodeKey, property: SmolStr, value: String },
    ScrollIntoView { node: NodeKey },
    ResetForm { node: NodeKey },
    AppendToBody { html: String },
    Alert { message: String },
    RequestImage { path: String, token: RequestToken },
    StartTimer { delay_ms: u32, token: RequestToken },
    ObserveSections { sections: Vec<SmolStr>, root_margin: String },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Class { node, class, on } => {
                write!(f, "class {node} {}{class}", if *on { '+' } else { '-' })
            }
            Mutation::Text { node, text } => write!(f, "text {node} {text:?}"),
            Mutation::Markup { node, html } => write!(f, "markup {node} {html}"),
            Mutation::InnerHtml { node, html } => write!(f, "inner-html {node} {html}"),
            Mutation::Disabled { node, disabled } => write!(f, "disabled {node} {disabled}"),
            Mutation::Style {
                node,
                property,
                value,
            } => write!(f, "style {node} {property}: {value}"),
            Mutation::ScrollIntoView { node } => write!(f, "scroll {node}"),
            Mutation::ResetForm { node } => write!(f, "reset {node}"),
            Mutation::AppendToBody { html } => write!(f, "append body {html}"),
            Mutation::Alert { message } => write!(f, "alert {message:?}"),
            Mutation::RequestImage { path, token } => write!(f, "load image {path} {token}"),
            Mutation::StartTimer { delay_ms, token } => {
                write!(f, "timer {delay_ms}ms {token}")
            }
            Mutation::ObserveSections {
                sections,
                root_margin,
            } => write!(f, "observe [{}] {root_margin}", sections.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: BTreeMap<NodeKey, ElementState>,
    body: Vec<Markup>,
    log: Vec<Mutation>,
    image_requests: Vec<(String, RequestToken)>,
    timers: Vec<(u32, RequestToken)>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryView::insert`].
    #[must_use]
    pub fn with(mut self, node: Node<'_>) -> Self {
        self.insert(node);
        self
    }

    /// Register an element. Re-registering keeps its state.
    pub fn insert(&mut self, node: Node<'_>) {
        self.elements.entry(node.to_key()).or_default();
    }

    /// Register an element with host-authored inner HTML.
    pub fn insert_html(&mut self, node: Node<'_>, html: &str) {
        self.elements.entry(node.to_key()).or_default().content = Content::Html(html.to_string());
    }

    pub fn remove(&mut self, node: Node<'_>) {
        self.elements.remove(&node.to_key());
    }

    pub fn element(&self, node: Node<'_>) -> Option<&ElementState> {
        self.elements.get(&node.to_key())
    }

    /// Text content, when the element's children are a single text node.
    pub fn text(&self, node: Node<'_>) -> Option<&str> {
        match &self.element(node)?.content {
            Content::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn html(&self, node: Node<'_>) -> Option<String> {
        self.element(node).map(|element| element.content.to_html())
    }

    pub fn style(&self, node: Node<'_>, property: &str) -> Option<&str> {
        self.element(node)?.styles.get(property).map(String::as_str)
    }

    pub fn is_disabled(&self, node: Node<'_>) -> bool {
        self.element(node).is_some_and(|element| element.disabled)
    }

    pub fn body(&self) -> &[Markup] {
        &self.body
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    /// Drain the mutation log.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }

    /// Mutation log, one line per entry.
    pub fn trace(&self) -> String {
        let mut out = String::new();
        for mutation in &self.log {
            out.push_str(&mutation.to_string());
            out.push('\n');
        }
        out
    }

    pub fn image_requests(&self) -> &[(String, RequestToken)] {
        &self.image_requests
    }

    pub fn timers(&self) -> &[(u32, RequestToken)] {
        &self.timers
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|mutation| match mutation {
                Mutation::Alert { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn element_mut(&mut self, node: Node<'_>) -> Option<&mut ElementState> {
        self.elements.get_mut(&node.to_key())
    }

    fn register_markup(&mut self, markup: &Markup) {
        let Markup::Element(element) = markup else {
            return;
        };
        if let Some(id) = element.get_attr("id") {
            let state = self.elements.entry(NodeKey::Id(SmolStr::new(id))).or_default();
            state.classes = classes_of(element);
            state.content = if element.children.is_empty() {
                Content::Empty
            } else {
                Content::Nodes(element.children.clone())
            };
        }
        for child in &element.children {
            self.register_markup(child);
        }
    }
}

fn classes_of(element: &Element) -> BTreeSet<SmolStr> {
    element
        .get_attr("class")
        .map(|classes| classes.split_whitespace().map(SmolStr::new).collect())
        .unwrap_or_default()
}

impl View for MemoryView {
    fn exists(&self, node: Node<'_>) -> bool {
        self.elements.contains_key(&node.to_key())
    }

    fn set_class(&mut self, node: Node<'_>, class: &str, on: bool) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        if on {
            element.classes.insert(SmolStr::new(class));
        } else {
            element.classes.remove(class);
        }
        self.log.push(Mutation::Class {
            node: node.to_key(),
            class: SmolStr::new(class),
            on,
        });
    }

    fn has_class(&self, node: Node<'_>, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn set_text(&mut self, node: Node<'_>, text: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.content = Content::Text(text.to_string());
        self.log.push(Mutation::Text {
            node: node.to_key(),
            text: text.to_string(),
        });
    }

    fn set_markup(&mut self, node: Node<'_>, markup: &Markup) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.content = Content::Nodes(vec![markup.clone()]);
        self.log.push(Mutation::Markup {
            node: node.to_key(),
            html: markup.to_html(),
        });
    }

    fn inner_html(&self, node: Node<'_>) -> Option<String> {
        self.html(node)
    }

    fn set_inner_html(&mut self, node: Node<'_>, html: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.content = Content::Html(html.to_string());
        self.log.push(Mutation::InnerHtml {
            node: node.to_key(),
            html: html.to_string(),
        });
    }

    fn set_disabled(&mut self, node: Node<'_>, disabled: bool) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element.disabled = disabled;
        self.log.push(Mutation::Disabled {
            node: node.to_key(),
            disabled,
        });
    }

    fn set_style(&mut self, node: Node<'_>, property: &str, value: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        element
            .styles
            .insert(SmolStr::new(property), value.to_string());
        self.log.push(Mutation::Style {
            node: node.to_key(),
            property: SmolStr::new(property),
            value: value.to_string(),
        });
    }

    fn scroll_into_view(&mut self, node: Node<'_>) {
        if self.exists(node) {
            self.log.push(Mutation::ScrollIntoView {
                node: node.to_key(),
            });
        }
    }

    fn reset_form(&mut self, node: Node<'_>) {
        if self.exists(node) {
            self.log.push(Mutation::ResetForm {
                node: node.to_key(),
            });
        }
    }

    fn append_to_body(&mut self, markup: &Markup) {
        self.register_markup(markup);
        self.body.push(markup.clone());
        self.log.push(Mutation::AppendToBody {
            html: markup.to_html(),
        });
    }

    fn alert(&mut self, message: &str) {
        self.log.push(Mutation::Alert {
            message: message.to_string(),
        });
    }

    fn request_image(&mut self, path: &str, token: RequestToken) {
        self.image_requests.push((path.to_string(), token));
        self.log.push(Mutation::RequestImage {
            path: path.to_string(),
            token,
        });
    }

    fn start_timer(&mut self, delay_ms: u32, token: RequestToken) {
        self.timers.push((delay_ms, token));
        self.log.push(Mutation::StartTimer { delay_ms, token });
    }

    fn observe_sections(&mut self, sections: &[SmolStr], band: TriggerBand) {
        self.log.push(Mutation::ObserveSections {
            sections: sections.to_vec(),
            root_margin: band.root_margin(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{render_shell, MODAL_ID};

    #[test]
    fn missing_nodes_ignore_mutations() {
        let mut view = MemoryView::new();
        view.set_class(Node::Id("nav"), "open", true);
        view.set_text(Node::Id("year"), "2026");
        view.scroll_into_view(Node::Id("about"));
        assert!(view.mutations().is_empty());
        assert!(!view.has_class(Node::Id("nav"), "open"));
    }

    #[test]
    fn appended_markup_registers_ids_and_classes() {
        let mut view = MemoryView::new();
        view.append_to_body(&render_shell());
        assert!(view.has_class(Node::Id(MODAL_ID), "cert-modal"));
        assert!(view.exists(Node::Id("modal-title")));
        assert_eq!(
            view.html(Node::Id("modal-title")).as_deref(),
            Some("Certificate")
        );
    }

    #[test]
    fn trace_lists_mutations_in_order() {
        let mut view = MemoryView::new().with(Node::NavLink("about"));
        view.set_class(Node::NavLink("about"), "active", true);
        view.start_timer(10, RequestToken(3));
        assert_eq!(
            view.trace(),
            "class nav-link[#about] +active\ntimer 10ms #3\n"
        );
    }
}
