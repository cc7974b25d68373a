//! The view abstraction controllers mutate instead of a global document.
//!
//! A [`View`] resolves [`Node`]s to elements and applies mutations to them.
//! Operations on nodes that do not resolve are silent no-ops, which is how
//! optional page features degrade. Asynchronous work (image loads, timers,
//! intersection observation) is *requested* through the view; the host
//! reports completion back as a [`crate::PageEvent`] carrying the same
//! [`RequestToken`].

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::markup::Markup;
use crate::scroll_spy::TriggerBand;

/// Borrowed element address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node<'a> {
    /// Element with this `id`.
    Id(&'a str),
    /// First element matching a CSS selector.
    Query(&'a str),
    /// Navigation link(s) whose href is `#<section id>`.
    NavLink(&'a str),
    /// The n-th `img` element of the page, in document order.
    Image(usize),
}

impl Node<'_> {
    pub fn to_key(self) -> NodeKey {
        match self {
            Node::Id(id) => NodeKey::Id(SmolStr::new(id)),
            Node::Query(selector) => NodeKey::Query(SmolStr::new(selector)),
            Node::NavLink(section) => NodeKey::NavLink(SmolStr::new(section)),
            Node::Image(index) => NodeKey::Image(index),
        }
    }
}

/// Owned element address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NodeKey {
    Id(SmolStr),
    Query(SmolStr),
    NavLink(SmolStr),
    Image(usize),
}

impl NodeKey {
    pub fn as_node(&self) -> Node<'_> {
        match self {
            NodeKey::Id(id) => Node::Id(id),
            NodeKey::Query(selector) => Node::Query(selector),
            NodeKey::NavLink(section) => Node::NavLink(section),
            NodeKey::Image(index) => Node::Image(*index),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Id(id) => write!(f, "#{id}"),
            NodeKey::Query(selector) => write!(f, "{selector}"),
            NodeKey::NavLink(section) => write!(f, "nav-link[#{section}]"),
            NodeKey::Image(index) => write!(f, "img[{index}]"),
        }
    }
}

/// Identifies one asynchronous request so late completions can be matched
/// against the request that is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic [`RequestToken`] source.
#[derive(Debug, Default, Clone)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn next_token(&mut self) -> RequestToken {
        self.last += 1;
        RequestToken(self.last)
    }
}

/// Outcome of an image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Element lookup and mutation surface used by every controller.
pub trait View {
    /// Whether `node` resolves to at least one element.
    fn exists(&self, node: Node<'_>) -> bool;

    /// Add (`on`) or remove a class.
    fn set_class(&mut self, node: Node<'_>, class: &str, on: bool);

    fn has_class(&self, node: Node<'_>, class: &str) -> bool;

    /// Replace the children of `node` with a single text node.
    fn set_text(&mut self, node: Node<'_>, text: &str);

    /// Replace the children of `node` with `markup`.
    fn set_markup(&mut self, node: Node<'_>, markup: &Markup);

    /// Current inner HTML of host-authored markup.
    fn inner_html(&self, node: Node<'_>) -> Option<String>;

    /// Restore host-authored markup captured with [`View::inner_html`].
    fn set_inner_html(&mut self, node: Node<'_>, html: &str);

    fn set_disabled(&mut self, node: Node<'_>, disabled: bool);

    /// Set an inline style property.
    fn set_style(&mut self, node: Node<'_>, property: &str, value: &str);

    /// Smooth-scroll `node` to the start of the viewport.
    fn scroll_into_view(&mut self, node: Node<'_>);

    /// Reset a form's fields.
    fn reset_form(&mut self, node: Node<'_>);

    /// Append `markup` to the document body.
    fn append_to_body(&mut self, markup: &Markup);

    /// Blocking notification to the user.
    fn alert(&mut self, message: &str);

    /// Start loading `path`; completion arrives as a certificate image event.
    fn request_image(&mut self, path: &str, token: RequestToken);

    /// Start a one-shot timer; expiry arrives as a timer event.
    fn start_timer(&mut self, delay_ms: u32, token: RequestToken);

    /// Observe `sections` against `band`; reports arrive as intersection
    /// batches.
    fn observe_sections(&mut self, sections: &[SmolStr], band: TriggerBand);
}
