//! Structured markup and the certificate modal view-model.
//!
//! Controllers never build HTML strings. They pick a [`ModalView`] and
//! [`render`] turns it into a [`Markup`] tree, which a DOM host materialises
//! node by node and tests compare through [`Markup::to_html`].

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Id of the modal overlay (the backdrop).
pub const MODAL_ID: &str = "cert-modal";
/// Id of the modal title region.
pub const MODAL_TITLE_ID: &str = "modal-title";
/// Id of the modal content region.
pub const MODAL_CONTENT_ID: &str = "certificate-content";
/// Class of the modal close control.
pub const MODAL_CLOSE_CLASS: &str = "close-modal";

/// Owned element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Markup {
    Element(Element),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: SmolStr,
    pub attrs: Vec<(SmolStr, String)>,
    pub children: Vec<Markup>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: SmolStr::new(tag),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((SmolStr::new(name), value.into()));
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::text(text))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Markup {
    fn from(value: Element) -> Self {
        Markup::Element(value)
    }
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text { text: text.into() }
    }

    /// Ids of this node and all its descendants, in document order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        collect_ids(self, &mut ids);
        ids
    }

    /// Serialise to HTML with attribute and text escaping.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect_ids<'a>(markup: &'a Markup, ids: &mut Vec<&'a str>) {
    if let Markup::Element(element) = markup {
        if let Some(id) = element.get_attr("id") {
            ids.push(id);
        }
        for child in &element.children {
            collect_ids(child, ids);
        }
    }
}

/// Elements serialised without children or a closing tag.
pub const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

fn write_html(markup: &Markup, out: &mut String) {
    match markup {
        Markup::Text { text } => escape_into(text, false, out),
        Markup::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&element.tag.as_str()) {
                return;
            }
            for child in &element.children {
                write_html(child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// What the modal content region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    /// Initial content before any certificate was opened.
    Placeholder,
    Loading,
    Image {
        src: String,
        alt: String,
        download_name: String,
    },
    /// The image at `path` failed to load.
    NotFound { path: String },
    /// The identifier is not in the catalog.
    Unavailable,
}

fn icon(classes: &str) -> Element {
    Element::new("i").class(classes)
}

/// Render the content region for `view`.
pub fn render(view: &ModalView) -> Markup {
    match view {
        ModalView::Placeholder => Element::new("div")
            .class("certificate-placeholder")
            .child(icon("fas fa-certificate"))
            .child(Element::new("p").text("Certificate preview would appear here"))
            .into(),
        ModalView::Loading => Element::new("div")
            .class("certificate-loading")
            .child(icon("fas fa-spinner fa-spin"))
            .child(Element::new("p").text("Loading certificate..."))
            .into(),
        ModalView::Image {
            src,
            alt,
            download_name,
        } => Element::new("div")
            .class("certificate-view")
            .child(
                Element::new("img")
                    .attr("src", src.as_str())
                    .attr("alt", alt.as_str())
                    .class("loaded"),
            )
            .child(
                Element::new("div").class("certificate-actions").child(
                    Element::new("a")
                        .attr("href", src.as_str())
                        .attr("download", download_name.as_str())
                        .class("btn btn-primary")
                        .child(icon("fas fa-download"))
                        .text(" Download Certificate"),
                ),
            )
            .into(),
        ModalView::NotFound { path } => Element::new("div")
            .class("certificate-placeholder")
            .child(icon("fas fa-exclamation-triangle"))
            .child(Element::new("h3").text("Certificate Not Found"))
            .child(Element::new("p").text("The certificate image could not be loaded."))
            .child(Element::new("p").text(format!("Please check the file path: {path}")))
            .into(),
        ModalView::Unavailable => Element::new("p").text("Certificate not available.").into(),
    }
}

/// The modal overlay, mounted once at start-up.
pub fn render_shell() -> Markup {
    Element::new("div")
        .id(MODAL_ID)
        .class("cert-modal")
        .child(
            Element::new("div")
                .class("modal-content")
                .child(
                    Element::new("div")
                        .class("modal-header")
                        .child(
                            Element::new("h3")
                                .id(MODAL_TITLE_ID)
                                .text(crate::catalog::GENERIC_TITLE),
                        )
                        .child(
                            Element::new("button")
                                .class(MODAL_CLOSE_CLASS)
                                .attr("aria-label", "Close modal")
                                .child(icon("fas fa-times")),
                        ),
                )
                .child(
                    Element::new("div")
                        .class("certificate-image")
                        .id(MODAL_CONTENT_ID)
                        .child(render(&ModalView::Placeholder)),
                ),
        )
        .into()
}

/// Submit-control label while the contact form is "sending".
pub fn render_sending_label(label: &str) -> Markup {
    Element::new("span")
        .class("sending")
        .child(icon("fas fa-spinner fa-spin"))
        .text(format!(" {label}"))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn loaded_image_renders_download_link() {
        let markup = render(&ModalView::Image {
            src: "certificates/html-certificate.jpg".to_string(),
            alt: "HTML Essentials".to_string(),
            download_name: "HTML-Certificate.jpg".to_string(),
        });
        expect![[r#"<div class="certificate-view"><img src="certificates/html-certificate.jpg" alt="HTML Essentials" class="loaded"><div class="certificate-actions"><a href="certificates/html-certificate.jpg" download="HTML-Certificate.jpg" class="btn btn-primary"><i class="fas fa-download"></i> Download Certificate</a></div></div>"#]]
        .assert_eq(&markup.to_html());
    }

    #[test]
    fn not_found_names_attempted_path() {
        let markup = render(&ModalView::NotFound {
            path: "certificates/missing.jpg".to_string(),
        });
        expect![[r#"<div class="certificate-placeholder"><i class="fas fa-exclamation-triangle"></i><h3>Certificate Not Found</h3><p>The certificate image could not be loaded.</p><p>Please check the file path: certificates/missing.jpg</p></div>"#]]
        .assert_eq(&markup.to_html());
    }

    #[test]
    fn unavailable_and_loading_views() {
        expect![[r#"<p>Certificate not available.</p>"#]]
            .assert_eq(&render(&ModalView::Unavailable).to_html());
        expect![[r#"<div class="certificate-loading"><i class="fas fa-spinner fa-spin"></i><p>Loading certificate...</p></div>"#]]
            .assert_eq(&render(&ModalView::Loading).to_html());
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let markup = render(&ModalView::Image {
            src: "a\"b.jpg".to_string(),
            alt: "C/C++ & Java <Foundations>".to_string(),
            download_name: "x.jpg".to_string(),
        });
        let html = markup.to_html();
        assert!(html.contains(r#"src="a&quot;b.jpg""#), "{html}");
        assert!(html.contains(r#"alt="C/C++ &amp; Java &lt;Foundations&gt;""#), "{html}");
    }

    #[test]
    fn shell_exposes_modal_ids() {
        let shell = render_shell();
        assert_eq!(shell.ids(), vec![MODAL_ID, MODAL_TITLE_ID, MODAL_CONTENT_ID]);
        let html = shell.to_html();
        assert!(html.contains(r#"aria-label="Close modal""#), "{html}");
        assert!(html.contains("Certificate preview would appear here"), "{html}");
    }
}
