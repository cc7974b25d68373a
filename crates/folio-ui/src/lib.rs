//! `folio-ui` - Interaction controllers for the folio portfolio page.
//!
//! The crate holds everything the page does in response to browser events,
//! written against the [`View`] trait instead of a live document:
//!
//! - **Scroll-spy** ([`ScrollSpy`]): marks the navigation link of the section
//!   inside the viewport trigger band
//! - **Certificate modal** ([`CertificateModal`]): loading, loaded and error
//!   states keyed by a catalog identifier, with stale-load protection
//! - **Boundary behavior**: navigation drawer, smooth-scroll anchors, contact
//!   form simulation, footer year, image fade-in
//!
//! A [`Page`] owns all controllers and dispatches [`PageEvent`]s. The
//! `folio-wasm` crate implements [`View`] over `web-sys`; [`MemoryView`]
//! implements it headlessly.
//!
//! # Example
//!
//! ```
//! use folio_ui::{Catalog, MemoryView, ModalState, Page, PageConfig, PageEvent};
//!
//! let mut page = Page::new(PageConfig::default(), Catalog::builtin().unwrap());
//! let mut view = MemoryView::new();
//! page.handle(
//!     PageEvent::Ready { nav_hrefs: vec![], images_complete: vec![], year: 2026 },
//!     &mut view,
//! );
//! page.handle(
//!     PageEvent::KeyDown { key: "Escape".to_string() },
//!     &mut view,
//! );
//! assert_eq!(page.modal().state(), &ModalState::Closed);
//! ```

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod events;
pub mod fade;
pub mod markup;
pub mod memory;
pub mod modal;
pub mod nav;
pub mod page;
pub mod scroll_spy;
pub mod view;

pub use catalog::{Catalog, CertificateEntry};
pub use config::PageConfig;
pub use error::{FolioError, FolioResult};
pub use events::{ClickPath, ElementInfo, EventOutcome, PageEvent};
pub use markup::{Markup, ModalView};
pub use memory::{MemoryView, Mutation};
pub use modal::{CertificateModal, ModalFailure, ModalState};
pub use page::Page;
pub use scroll_spy::{IntersectionReport, ScrollSpy, TriggerBand};
pub use view::{LoadOutcome, Node, NodeKey, RequestToken, View};
