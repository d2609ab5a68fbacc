//! Pre-flight validation reports.

use derive_getters::Getters;
use serde::Serialize;

/// One line of a pre-flight checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PreflightCheck {
    /// What was checked
    name: String,
    /// Whether the check passed
    ok: bool,
    /// Explanation shown to the operator
    message: String,
}

/// Checklist produced before any generation work begins.
///
/// The report is valid only while every check passes.
///
/// # Examples
///
/// ```
/// use lumina_interface::PreflightReport;
///
/// let mut report = PreflightReport::new("vertex_ai");
/// report.pass("Configuration", "project and bucket set");
/// report.fail("API access", "403 Forbidden");
/// assert!(!report.valid());
/// assert_eq!(report.failures().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PreflightReport {
    /// Backend mode that was validated
    mode: String,
    /// Individual checks in execution order
    checks: Vec<PreflightCheck>,
}

impl PreflightReport {
    /// Empty report for a mode.
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            checks: Vec::new(),
        }
    }

    /// Record a passing check.
    pub fn pass(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.push(name, true, message);
    }

    /// Record a failing check.
    pub fn fail(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.push(name, false, message);
    }

    fn push(&mut self, name: impl Into<String>, ok: bool, message: impl Into<String>) {
        self.checks.push(PreflightCheck {
            name: name.into(),
            ok,
            message: message.into(),
        });
    }

    /// Append the checks of another report.
    pub fn merge(&mut self, other: PreflightReport) {
        self.checks.extend(other.checks);
    }

    /// True when every check passed.
    pub fn valid(&self) -> bool {
        self.checks.iter().all(|check| check.ok)
    }

    /// Checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &PreflightCheck> {
        self.checks.iter().filter(|check| !check.ok)
    }
}

impl std::fmt::Display for PreflightReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pre-flight checks ({}):", self.mode)?;
        for check in &self.checks {
            let mark = if check.ok { "ok" } else { "FAIL" };
            writeln!(f, "  [{:>4}] {}: {}", mark, check.name, check.message)?;
        }
        write!(f, "Result: {}", if self.valid() { "valid" } else { "invalid" })
    }
}
