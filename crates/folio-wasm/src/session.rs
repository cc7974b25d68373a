//! JSON session facade: drive the controllers against a headless document.

use folio_ui::contact::SubmissionState;
use folio_ui::{
    Catalog, CertificateEntry, EventOutcome, FolioError, MemoryView, ModalState, Mutation, NodeKey,
    Page, PageConfig, PageEvent,
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;
use tracing::debug;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::wasm_bindgen;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid {what} json: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Folio(#[from] FolioError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Describes the host document a session starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSetup {
    /// `folio.toml` contents; defaults apply when absent.
    pub config_toml: Option<String>,
    /// Certificate catalog; the built-in catalog applies when absent.
    pub catalog_toml: Option<String>,
    /// Elements present in the host document.
    pub elements: Vec<ElementSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSeed {
    pub node: NodeKey,
    /// Host-authored inner HTML, e.g. the submit control's label.
    #[serde(default)]
    pub html: Option<String>,
}

/// Result of one dispatched event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub outcome: EventOutcome,
    /// Mutations and host requests produced by the event, in order.
    pub mutations: Vec<Mutation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub modal: ModalState,
    /// Certificate the dialog shows, while it is visible.
    pub certificate_id: Option<SmolStr>,
    pub active_section: Option<SmolStr>,
    pub drawer_open: bool,
    pub contact_sending: bool,
}

/// Controllers plus the headless document they mutate.
#[derive(Debug)]
pub struct PortfolioSession {
    page: Page,
    view: MemoryView,
}

impl PortfolioSession {
    pub fn new(setup: SessionSetup) -> SessionResult<Self> {
        let config = match setup.config_toml.as_deref() {
            Some(contents) => PageConfig::from_toml(contents)?,
            None => PageConfig::default(),
        };
        let catalog = match setup.catalog_toml.as_deref() {
            Some(contents) => Catalog::from_toml(contents)?,
            None => Catalog::builtin()?,
        };
        let mut view = MemoryView::new();
        for seed in &setup.elements {
            match seed.html.as_deref() {
                Some(html) => view.insert_html(seed.node.as_node(), html),
                None => view.insert(seed.node.as_node()),
            }
        }
        debug!(
            "session started with {} elements and {} certificates",
            setup.elements.len(),
            catalog.len()
        );
        Ok(Self {
            page: Page::new(config, catalog),
            view,
        })
    }

    pub fn dispatch(&mut self, event: PageEvent) -> DispatchResult {
        let outcome = self.page.handle(event, &mut self.view);
        DispatchResult {
            outcome,
            mutations: self.view.take_mutations(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let modal = self.page.modal().state();
        SessionSnapshot {
            modal: modal.clone(),
            certificate_id: modal.certificate_id().map(SmolStr::new),
            active_section: self.page.scroll_spy().active().map(SmolStr::new),
            drawer_open: self.page.drawer().is_open(&self.view),
            contact_sending: matches!(
                self.page.contact().state(),
                SubmissionState::Sending { .. }
            ),
        }
    }

    pub fn certificates(&self) -> Vec<CertificateEntry> {
        self.page.modal().catalog().iter().cloned().collect()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> &MemoryView {
        &self.view
    }
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
pub struct WasmPortfolioSession {
    inner: PortfolioSession,
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
impl WasmPortfolioSession {
    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(constructor)
    )]
    pub fn new(setup_json: &str) -> Result<WasmPortfolioSession, String> {
        let setup: SessionSetup = parse_json(setup_json, "session setup")?;
        Ok(Self {
            inner: PortfolioSession::new(setup)?,
        })
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = dispatchJson)
    )]
    pub fn dispatch_json(&mut self, event_json: &str) -> Result<String, String> {
        let event: PageEvent = parse_json(event_json, "page event")?;
        json_string(&self.inner.dispatch(event))
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = snapshotJson)
    )]
    pub fn snapshot_json(&self) -> Result<String, String> {
        json_string(&self.inner.snapshot())
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = certificatesJson)
    )]
    pub fn certificates_json(&self) -> Result<String, String> {
        json_string(&self.inner.certificates())
    }
}

impl From<SessionError> for String {
    fn from(value: SessionError) -> Self {
        value.to_string()
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(
    contents: &str,
    what: &'static str,
) -> SessionResult<T> {
    serde_json::from_str(contents).map_err(|source| SessionError::Json { what, source })
}

fn json_string<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("json serialization failed: {err}"))
}
