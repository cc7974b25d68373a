//! Events delivered by the host and the outcome reported back.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::scroll_spy::IntersectionReport;
use crate::view::{LoadOutcome, RequestToken};

/// Browser-level event, already reduced to what the controllers need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// The document finished parsing.
    Ready {
        /// `href` of every navigation link, in document order.
        #[serde(default)]
        nav_hrefs: Vec<String>,
        /// One flag per page image: already loaded when ready fired.
        #[serde(default)]
        images_complete: Vec<bool>,
        /// Current calendar year from the host clock.
        year: i32,
    },
    /// Click anywhere in the document.
    Click { path: ClickPath },
    KeyDown { key: String },
    /// Contact form submission.
    Submit,
    /// One batch from the section intersection observer.
    Intersections { reports: Vec<IntersectionReport> },
    /// A certificate image request finished.
    CertificateImage {
        token: RequestToken,
        outcome: LoadOutcome,
    },
    /// The n-th page image finished loading.
    PageImageLoaded { index: usize },
    /// A timer started through the view expired.
    TimerFired { token: RequestToken },
}

/// What the host should do with the native event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const DEFAULT: Self = Self {
        prevent_default: false,
    };
    pub const PREVENT: Self = Self {
        prevent_default: true,
    };
}

/// Summary of one element on a click's propagation path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub tag: SmolStr,
    #[serde(default)]
    pub id: Option<SmolStr>,
    #[serde(default)]
    pub classes: Vec<SmolStr>,
    /// Attributes the controllers care about (`href`, the certificate
    /// attribute).
    #[serde(default)]
    pub attributes: Vec<(SmolStr, String)>,
}

impl ElementInfo {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: SmolStr::new(tag),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(SmolStr::new(id));
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(SmolStr::new(class));
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((SmolStr::new(name), value.to_string()));
        self
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Elements from the click target outward to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickPath(pub Vec<ElementInfo>);

impl ClickPath {
    pub fn new(elements: Vec<ElementInfo>) -> Self {
        Self(elements)
    }

    /// The element that was clicked.
    pub fn target(&self) -> Option<&ElementInfo> {
        self.0.first()
    }

    /// Nearest element (target included) matching `predicate`.
    pub fn closest(&self, predicate: impl Fn(&ElementInfo) -> bool) -> Option<&ElementInfo> {
        self.0.iter().find(|element| predicate(element))
    }

    /// Whether the click happened on or inside the element with `id`.
    pub fn within_id(&self, id: &str) -> bool {
        self.0.iter().any(|element| element.has_id(id))
    }
}
