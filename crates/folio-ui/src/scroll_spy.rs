//! Scroll-spy: highlight the navigation link of the section in view.
//!
//! Sections are watched against a horizontal trigger band. Each batch of
//! intersection reports elects at most one winner: the intersecting section
//! with the largest visible overlap with the band, earliest link first on
//! exact ties. A batch without any intersecting section keeps the current
//! highlight.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{FolioError, FolioResult};
use crate::view::{Node, View};

/// Viewport strip that counts as "in view", expressed as margins cut from
/// the top and bottom of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerBand {
    top_percent: f64,
    bottom_percent: f64,
}

impl TriggerBand {
    pub fn new(top_percent: f64, bottom_percent: f64) -> FolioResult<Self> {
        let valid = top_percent.is_finite()
            && bottom_percent.is_finite()
            && top_percent >= 0.0
            && bottom_percent >= 0.0
            && top_percent + bottom_percent < 100.0;
        if !valid {
            return Err(FolioError::InvalidBand {
                top: top_percent,
                bottom: bottom_percent,
            });
        }
        Ok(Self {
            top_percent,
            bottom_percent,
        })
    }

    /// `rootMargin` for an `IntersectionObserver`.
    pub fn root_margin(self) -> String {
        format!("-{}% 0px -{}% 0px", self.top_percent, self.bottom_percent)
    }

    /// Band bounds in viewport pixels.
    pub fn bounds(self, viewport_height: f64) -> (f64, f64) {
        let top = viewport_height * self.top_percent / 100.0;
        let bottom = viewport_height * (100.0 - self.bottom_percent) / 100.0;
        (top, bottom)
    }

    /// Height of `[section_top, section_bottom]` (viewport coordinates)
    /// inside the band.
    pub fn overlap(self, section_top: f64, section_bottom: f64, viewport_height: f64) -> f64 {
        let (band_top, band_bottom) = self.bounds(viewport_height);
        (section_bottom.min(band_bottom) - section_top.max(band_top)).max(0.0)
    }

    /// Build the report an observer would deliver for a section box.
    pub fn report(
        self,
        section_id: &str,
        section_top: f64,
        section_bottom: f64,
        viewport_height: f64,
    ) -> IntersectionReport {
        let overlap = self.overlap(section_top, section_bottom, viewport_height);
        IntersectionReport {
            section_id: SmolStr::new(section_id),
            is_intersecting: overlap > 0.0,
            overlap,
        }
    }
}

impl Default for TriggerBand {
    fn default() -> Self {
        Self {
            top_percent: 20.0,
            bottom_percent: 70.0,
        }
    }
}

/// One intersection change delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionReport {
    pub section_id: SmolStr,
    pub is_intersecting: bool,
    /// Visible height of the section inside the band, in pixels.
    #[serde(default)]
    pub overlap: f64,
}

/// Tracks which navigation link is active.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    band: TriggerBand,
    active_class: SmolStr,
    /// Observed section ids, in link order.
    sections: Vec<SmolStr>,
    active: Option<SmolStr>,
}

impl ScrollSpy {
    pub fn new(band: TriggerBand, active_class: impl Into<SmolStr>) -> Self {
        Self {
            band,
            active_class: active_class.into(),
            sections: Vec::new(),
            active: None,
        }
    }

    /// Resolve link hrefs to sections and start observing them. Links whose
    /// target is not a fragment or does not exist are dropped.
    pub fn setup<S: AsRef<str>>(&mut self, hrefs: &[S], view: &mut impl View) {
        self.sections.clear();
        for href in hrefs {
            let Some(section) = fragment_target(href.as_ref()) else {
                continue;
            };
            if !view.exists(Node::Id(section)) {
                debug!("scroll-spy dropping link to missing section '{section}'");
                continue;
            }
            if self.sections.iter().any(|known| known == section) {
                continue;
            }
            self.sections.push(SmolStr::new(section));
        }
        if !self.sections.is_empty() {
            view.observe_sections(&self.sections, self.band);
        }
    }

    /// Apply one batch of reports and return the active section.
    pub fn process(&mut self, reports: &[IntersectionReport], view: &mut impl View) -> Option<&str> {
        if let Some(winner) = self.elect(reports) {
            let winner = self.sections[winner].clone();
            for section in &self.sections {
                view.set_class(Node::NavLink(section), &self.active_class, *section == winner);
            }
            if self.active.as_ref() != Some(&winner) {
                debug!("scroll-spy active section '{winner}'");
            }
            self.active = Some(winner);
        }
        self.active.as_deref()
    }

    fn elect(&self, reports: &[IntersectionReport]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for report in reports.iter().filter(|report| report.is_intersecting) {
            let Some(index) = self
                .sections
                .iter()
                .position(|section| *section == report.section_id)
            else {
                continue;
            };
            let overlap = if report.overlap.is_finite() {
                report.overlap.max(0.0)
            } else {
                0.0
            };
            let better = match best {
                None => true,
                Some((best_index, best_overlap)) => {
                    overlap > best_overlap || (overlap == best_overlap && index < best_index)
                }
            };
            if better {
                best = Some((index, overlap));
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn sections(&self) -> &[SmolStr] {
        &self.sections
    }

    pub fn band(&self) -> TriggerBand {
        self.band
    }
}

/// Section id targeted by an in-page href (`#about` -> `about`).
pub fn fragment_target(href: &str) -> Option<&str> {
    let target = href.strip_prefix('#')?;
    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}
