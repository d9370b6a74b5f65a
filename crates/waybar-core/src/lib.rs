//! Output contract for Waybar `custom` modules running with `return-type: json`.
//!
//! - `Output`: the single JSON line Waybar parses on every tick.
//! - `redact`: masking of credentials before text reaches the bar.

pub mod redact;

use serde::{Deserialize, Serialize};

pub use redact::redact_sensitive;

/// Text shown in the bar when a module cannot produce a reading.
pub const DEGRADED_TEXT: &str = "--";

/// One status line. Every field is always serialized; Waybar treats an empty
/// string as "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub alt: String,
    pub tooltip: String,
    pub class: String,
    pub percentage: String,
}

impl Output {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Placeholder line carrying a (redacted) failure message in the tooltip.
    pub fn degraded(message: &str) -> Self {
        Self::new(DEGRADED_TEXT).with_tooltip(redact_sensitive(message))
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
