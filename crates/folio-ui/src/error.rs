//! Errors raised while loading page configuration and the certificate catalog.
//!
//! Event handling itself never fails: missing elements, unknown certificates
//! and broken image paths all degrade to visible placeholders. Only the
//! loading functions return [`FolioError`].

use smol_str::SmolStr;
use thiserror::Error;

/// Loading and validation errors.
#[derive(Debug, Error)]
pub enum FolioError {
    /// TOML text could not be parsed into the expected shape.
    #[error("invalid {what} toml: {source}")]
    Toml {
        what: &'static str,
        #[source]
        source: toml::de::Error,
    },

    /// JSON text could not be parsed into the expected shape.
    #[error("invalid {what} json: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog entries share an identifier.
    #[error("duplicate certificate id '{0}'")]
    DuplicateCertificate(SmolStr),

    /// A catalog entry has an empty required field.
    #[error("certificate '{id}' has an empty {field}")]
    EmptyField { id: SmolStr, field: &'static str },

    /// Trigger band margins leave no visible strip.
    #[error("scroll-spy margins {top}% + {bottom}% must each be >= 0 and sum below 100")]
    InvalidBand { top: f64, bottom: f64 },
}

/// Result alias for loading operations.
pub type FolioResult<T> = Result<T, FolioError>;
