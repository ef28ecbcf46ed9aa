//! 24-bit RGB color theme for terminal reports.

use owo_colors::Rgb;

use crate::validation::Severity;

/// Palette for rendering findings.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Passing result - green (34, 197, 94)
    pub success: Rgb,
    /// Error findings - red (239, 68, 68)
    pub error: Rgb,
    /// Warning findings - yellow (234, 179, 8)
    pub warning: Rgb,
    /// Info findings - blue (59, 130, 246)
    pub info: Rgb,
    /// Excerpts and secondary text - gray (107, 114, 128)
    pub muted: Rgb,
    /// Rule identifiers - cyan (34, 211, 238)
    pub rule_id: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Rgb(34, 197, 94),
            error: Rgb(239, 68, 68),
            warning: Rgb(234, 179, 8),
            info: Rgb(59, 130, 246),
            muted: Rgb(107, 114, 128),
            rule_id: Rgb(34, 211, 238),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a finding of `severity`.
    pub fn severity(&self, severity: Severity) -> Rgb {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }
}
