//! Certificate modal controller.

use serde::Serialize;
use smol_str::SmolStr;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, GENERIC_TITLE};
use crate::markup::{render, render_shell, ModalView, MODAL_CONTENT_ID, MODAL_ID, MODAL_TITLE_ID};
use crate::view::{LoadOutcome, Node, RequestToken, TokenSource, View};

/// Why the modal shows an error placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalFailure {
    /// The identifier is not in the catalog. No image was requested.
    NotInCatalog,
    /// The catalog image failed to load.
    ImageFailed { path: String },
}

/// Modal lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ModalState {
    Closed,
    Loading { id: SmolStr, token: RequestToken },
    Loaded { id: SmolStr },
    Error { id: SmolStr, cause: ModalFailure },
}

impl ModalState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn certificate_id(&self) -> Option<&str> {
        match self {
            ModalState::Closed => None,
            ModalState::Loading { id, .. }
            | ModalState::Loaded { id }
            | ModalState::Error { id, .. } => Some(id),
        }
    }
}

/// Opens, populates, and closes the single certificate dialog.
#[derive(Debug)]
pub struct CertificateModal {
    catalog: Catalog,
    visible_class: SmolStr,
    state: ModalState,
    tokens: TokenSource,
    mounted: bool,
}

impl CertificateModal {
    pub fn new(catalog: Catalog, visible_class: impl Into<SmolStr>) -> Self {
        Self {
            catalog,
            visible_class: visible_class.into(),
            state: ModalState::Closed,
            tokens: TokenSource::default(),
            mounted: false,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Append the dialog markup to the body. Later calls do nothing.
    pub fn mount(&mut self, view: &mut impl View) {
        if self.mounted {
            return;
        }
        if view.exists(Node::Id(MODAL_ID)) {
            debug!("modal already present in document, reusing it");
        } else {
            view.append_to_body(&render_shell());
        }
        self.mounted = true;
    }

    /// Show certificate `id`, restarting any sequence in progress.
    pub fn open(&mut self, id: &str, view: &mut impl View) {
        let Some(entry) = self.catalog.get(id) else {
            warn!("certificate '{id}' is not in the catalog");
            view.set_text(Node::Id(MODAL_TITLE_ID), GENERIC_TITLE);
            view.set_markup(Node::Id(MODAL_CONTENT_ID), &render(&ModalView::Unavailable));
            view.set_class(Node::Id(MODAL_ID), &self.visible_class, true);
            self.state = ModalState::Error {
                id: SmolStr::new(id),
                cause: ModalFailure::NotInCatalog,
            };
            return;
        };

        let token = self.tokens.next_token();
        info!("opening certificate '{id}' (request {token})");
        view.set_text(Node::Id(MODAL_TITLE_ID), &entry.title);
        view.set_markup(Node::Id(MODAL_CONTENT_ID), &render(&ModalView::Loading));
        view.set_class(Node::Id(MODAL_ID), &self.visible_class, true);
        self.state = ModalState::Loading {
            id: entry.id.clone(),
            token,
        };
        view.request_image(&entry.image_path, token);
    }

    /// Apply an image-load completion. Completions for anything but the
    /// current loading request are dropped.
    pub fn image_finished(
        &mut self,
        token: RequestToken,
        outcome: LoadOutcome,
        view: &mut impl View,
    ) {
        let id = match &self.state {
            ModalState::Loading { id, token: current } if *current == token => id.clone(),
            state => {
                debug!("discarding stale image completion {token} in state {state:?}");
                return;
            }
        };
        let Some(entry) = self.catalog.get(&id) else {
            return;
        };
        match outcome {
            LoadOutcome::Loaded => {
                let content = ModalView::Image {
                    src: entry.image_path.clone(),
                    alt: entry.title.clone(),
                    download_name: entry.download_file_name(),
                };
                view.set_markup(Node::Id(MODAL_CONTENT_ID), &render(&content));
                self.state = ModalState::Loaded { id };
            }
            LoadOutcome::Failed => {
                warn!(
                    "certificate image '{}' for '{id}' failed to load",
                    entry.image_path
                );
                let path = entry.image_path.clone();
                view.set_markup(
                    Node::Id(MODAL_CONTENT_ID),
                    &render(&ModalView::NotFound { path: path.clone() }),
                );
                self.state = ModalState::Error {
                    id,
                    cause: ModalFailure::ImageFailed { path },
                };
            }
        }
    }

    /// Hide the dialog. Closing a closed dialog does nothing.
    pub fn close(&mut self, view: &mut impl View) {
        if !self.state.is_visible() {
            return;
        }
        debug!("closing certificate modal");
        view.set_class(Node::Id(MODAL_ID), &self.visible_class, false);
        self.state = ModalState::Closed;
    }

    /// Escape closes a visible dialog.
    pub fn key_down(&mut self, key: &str, view: &mut impl View) {
        if key == "Escape" && self.state.is_visible() {
            self.close(view);
        }
    }
}
