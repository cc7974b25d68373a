//! Browser/WASM adapter for the folio page controllers.
//!
//! Two surfaces:
//!
//! - [`PortfolioSession`]: a JSON facade over [`folio_ui::Page`] and a
//!   headless [`folio_ui::MemoryView`]. It builds natively and is exported
//!   to JavaScript with the `wasm` feature, so a host can drive the
//!   controllers and apply the returned mutations itself.
//! - With the `wasm` feature on `wasm32`, a `#[wasm_bindgen(start)]` entry
//!   that binds the controllers directly to the live document through
//!   `web-sys`.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

mod pending;
mod session;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod bind;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod console;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod dom;

pub use session::{
    DispatchResult, ElementSeed, PortfolioSession, SessionError, SessionResult, SessionSetup,
    SessionSnapshot, WasmPortfolioSession,
};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::*;

/// Page configuration compiled into the module.
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
const EMBEDDED_CONFIG: &str = include_str!("../folio.toml");

/// Module entry: install logging and bind the controllers to the document.
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    bind::install(folio_ui::PageConfig::load(Some(EMBEDDED_CONFIG)))
}
