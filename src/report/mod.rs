//! Notices recorded while assembling a texture.
//!
//! Every skip, fallback and lookup decision the pipeline makes is written
//! here instead of being printed, so the CLI decides how to show them and
//! tests can assert on them.

use std::fmt;

/// Severity level for a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Notice codes.
pub mod codes {
    pub const UNNAMED_MASK: &str = "maskpaint::catalog::unnamed";
    pub const DUPLICATE_PART: &str = "maskpaint::catalog::duplicate";
    pub const TABS_UNSET: &str = "maskpaint::config::tabs-unset";
    pub const SCRATCH_CLEAR: &str = "maskpaint::scratch::clear";
    pub const COLOR_FALLBACK: &str = "maskpaint::tint::white-fallback";
    pub const TATTOO_HIDDEN: &str = "maskpaint::tint::tattoo-hidden";
    pub const OPTION_NO_MASK: &str = "maskpaint::option::no-mask";
    pub const OPTION_NO_COLOR: &str = "maskpaint::option::no-color";
    pub const OPTION_APPLIED: &str = "maskpaint::option::applied";
    pub const GLOSS_APPLIED: &str = "maskpaint::gloss::applied";
    pub const GLOSS_MISSING: &str = "maskpaint::gloss::missing";
    pub const CATEGORY_NO_MASK: &str = "maskpaint::material::no-mask";
}

/// A single pipeline notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Severity level.
    pub severity: Severity,
    /// Machine-readable code (e.g. "maskpaint::gloss::missing").
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl Notice {
    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Collects notices from the pipeline passes.
#[derive(Debug, Clone, Default)]
pub struct Report {
    notices: Vec<Notice>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn info(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Notice::info(code, message));
    }

    pub fn warning(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Notice::warning(code, message));
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.notices
            .iter()
            .filter(|n| n.severity == Severity::Warning)
            .count()
    }

    /// Check whether any notice carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.notices.iter().any(|n| n.code == code)
    }

    /// Notices carrying the given code.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Notice> + 'a {
        self.notices.iter().filter(move |n| n.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn merge(&mut self, other: Report) {
        self.notices.extend(other.notices);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_counts_and_codes() {
        let mut report = Report::new();
        report.info(codes::GLOSS_MISSING, "No gloss part found");
        report.warning(codes::OPTION_NO_MASK, "No mask found for ShirtPat.2.png");

        assert_eq!(report.warning_count(), 1);
        assert!(report.has_code(codes::GLOSS_MISSING));
        assert!(!report.has_code(codes::GLOSS_APPLIED));
        assert_eq!(report.with_code(codes::OPTION_NO_MASK).count(), 1);
    }

    #[test]
    fn test_merge() {
        let mut a = Report::new();
        a.info(codes::GLOSS_APPLIED, "a");
        let mut b = Report::new();
        b.warning(codes::TABS_UNSET, "b");

        a.merge(b);
        assert_eq!(a.iter().count(), 2);
        assert_eq!(a.warning_count(), 1);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
