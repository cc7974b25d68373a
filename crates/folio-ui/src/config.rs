//! Page configuration loaded from `folio.toml`.
//!
//! Every field has a default matching the reference portfolio markup, so an
//! empty document (or no document at all) yields a working configuration.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::warn;

use crate::error::{FolioError, FolioResult};
use crate::scroll_spy::TriggerBand;

/// Conventional file name for the page configuration.
pub const CONFIG_FILE: &str = "folio.toml";

/// Page configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Where the controllers find their elements.
    pub elements: ElementConfig,
    /// Class names toggled by the controllers.
    pub classes: ClassConfig,
    /// Scroll-spy trigger band.
    pub scroll_spy: ScrollSpyConfig,
    /// Contact-form simulation.
    pub contact: ContactConfig,
    /// Image fade-in.
    pub fade_in: FadeInConfig,
    /// Log verbosity for the browser console sink.
    pub logging: LoggingConfig,
}

impl PageConfig {
    /// Parse and validate a configuration document.
    pub fn from_toml(contents: &str) -> FolioResult<Self> {
        let config: PageConfig = toml::from_str(contents).map_err(|source| FolioError::Toml {
            what: "page config",
            source,
        })?;
        config.scroll_spy.band()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the document is
    /// missing or invalid.
    pub fn load(contents: Option<&str>) -> Self {
        let Some(contents) = contents else {
            return PageConfig::default();
        };
        match PageConfig::from_toml(contents) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to load {CONFIG_FILE}, using defaults: {err}");
                PageConfig::default()
            }
        }
    }
}

/// Element ids and selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementConfig {
    /// Id of the control that opens the navigation drawer.
    pub menu_button: SmolStr,
    /// Id of the control that closes the navigation drawer.
    pub close_button: SmolStr,
    /// Id of the navigation drawer container.
    pub nav: SmolStr,
    /// Selector matching navigation links.
    pub nav_links: SmolStr,
    /// Id of the footer year placeholder.
    pub year: SmolStr,
    /// Selector of the contact form.
    pub contact_form: SmolStr,
    /// Selector of the contact form's submit control.
    pub submit_button: SmolStr,
    /// Class carried by "view certificate" controls.
    pub view_certificate_class: SmolStr,
    /// Attribute holding the certificate identifier on those controls.
    pub certificate_attribute: SmolStr,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            menu_button: SmolStr::new_inline("menuBtn"),
            close_button: SmolStr::new_inline("closeBtn"),
            nav: SmolStr::new_inline("nav"),
            nav_links: SmolStr::new_inline(".nav-link"),
            year: SmolStr::new_inline("year"),
            contact_form: SmolStr::new_inline(".form"),
            submit_button: SmolStr::new(".form button[type=\"submit\"]"),
            view_certificate_class: SmolStr::new_inline("view-cert"),
            certificate_attribute: SmolStr::new_inline("data-cert"),
        }
    }
}

/// Class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassConfig {
    pub drawer_open: SmolStr,
    pub active_link: SmolStr,
    pub modal_visible: SmolStr,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            drawer_open: SmolStr::new_inline("open"),
            active_link: SmolStr::new_inline("active"),
            modal_visible: SmolStr::new_inline("active"),
        }
    }
}

/// Trigger band margins, in percent of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollSpyConfig {
    pub top_margin_percent: f64,
    pub bottom_margin_percent: f64,
}

impl ScrollSpyConfig {
    pub fn band(&self) -> FolioResult<TriggerBand> {
        TriggerBand::new(self.top_margin_percent, self.bottom_margin_percent)
    }
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            top_margin_percent: 20.0,
            bottom_margin_percent: 70.0,
        }
    }
}

/// Contact-form simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Delay before the simulated submission completes.
    pub submit_delay_ms: u32,
    /// Label shown on the submit control while sending.
    pub sending_label: String,
    /// Message shown once the simulated submission completes.
    pub thank_you_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            sending_label: "Sending...".to_string(),
            thank_you_message: "Thank you for your message! I'll get back to you soon."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeInConfig {
    /// CSS `transition` applied to page images.
    pub transition: String,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        Self {
            transition: "opacity 0.3s ease-in-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `folio_ui::modal=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PageConfig::from_toml("").expect("config");
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.contact.submit_delay_ms, 1500);
        assert_eq!(config.elements.submit_button, ".form button[type=\"submit\"]");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = PageConfig::from_toml(
            r#"
[scroll_spy]
top_margin_percent = 10

[contact]
submit_delay_ms = 250
"#,
        )
        .expect("config");
        assert_eq!(config.scroll_spy.top_margin_percent, 10.0);
        assert_eq!(config.scroll_spy.bottom_margin_percent, 70.0);
        assert_eq!(config.contact.submit_delay_ms, 250);
        assert_eq!(config.contact.sending_label, "Sending...");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PageConfig::from_toml("[classes]\ndrawer_opne = \"x\"\n").unwrap_err();
        assert!(matches!(err, FolioError::Toml { .. }), "{err}");
    }

    #[test]
    fn band_without_visible_strip_is_rejected() {
        let err = PageConfig::from_toml(
            "[scroll_spy]\ntop_margin_percent = 60\nbottom_margin_percent = 40\n",
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::InvalidBand { .. }), "{err}");
    }

    #[test]
    fn load_falls_back_on_invalid_document() {
        let config = PageConfig::load(Some("[elements\n"));
        assert_eq!(config, PageConfig::default());
        assert_eq!(PageConfig::load(None), PageConfig::default());
    }
}
