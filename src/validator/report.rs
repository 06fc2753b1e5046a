use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of one validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Passed,
    /// Check passed, with something worth looking at
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    /// True for [`CheckStatus::Passed`]
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckStatus::Passed)
    }

    /// True for [`CheckStatus::Warning`]
    pub fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    /// True for [`CheckStatus::Failed`]
    pub fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }

    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// One named check and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    /// Check name
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Passed,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Validation report for a merged SDF file
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// File that was validated
    pub file: String,
    /// Records found in the file
    pub record_count: usize,
    /// Individual checks, in the order they ran
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Empty report for `file`
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            record_count: 0,
            checks: Vec::new(),
        }
    }

    /// Append a check
    pub fn push(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// True if no check failed
    pub fn is_valid(&self) -> bool {
        !self.has_failures()
    }

    /// True if any check failed
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// True if any check warned
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of passed checks
    pub fn passed_count(&self) -> usize {
        self.count(CheckStatus::is_passed)
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(CheckStatus::is_warning)
    }

    /// Number of failed checks
    pub fn failed_count(&self) -> usize {
        self.count(CheckStatus::is_failed)
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    fn count(&self, pred: fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.status)).count()
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Render the report with terminal colors when the `colorized_output`
    /// feature is enabled, plain text otherwise
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;
            use std::fmt::Write;

            static PASSED: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut out = String::new();
            let _ = writeln!(out, "{}", style("Merged SDF Validation Report").bold().cyan());
            let _ = writeln!(out, "{}: {}", style("File").bold(), self.file);
            let _ = writeln!(out, "{}: {}\n", style("Records").bold(), self.record_count);

            for check in &self.checks {
                match &check.status {
                    CheckStatus::Passed => {
                        let _ = writeln!(out, "[{}] {}", PASSED, style(&check.name).green());
                    }
                    CheckStatus::Warning(msg) => {
                        let _ = writeln!(out, "[{}] {} - {}", WARN, style(&check.name).yellow(), msg);
                    }
                    CheckStatus::Failed(msg) => {
                        let _ = writeln!(out, "[{}] {} - {}", FAIL, style(&check.name).red(), msg);
                    }
                }
            }

            let _ = writeln!(
                out,
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(self.passed_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failed_count()).red()
            );
            let verdict = if self.has_failures() {
                style(self.verdict()).red().bold()
            } else if self.has_warnings() {
                style(self.verdict()).yellow().bold()
            } else {
                style(self.verdict()).green().bold()
            };
            let _ = writeln!(out, "{}", verdict);
            out
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merged SDF Validation Report")?;
        writeln!(f, "File: {}", self.file)?;
        writeln!(f, "Records: {}", self.record_count)?;
        writeln!(f)?;

        for check in &self.checks {
            write!(f, "[{}] {}", check.status.symbol(), check.name)?;
            match &check.status {
                CheckStatus::Passed => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.passed_count(),
            self.warning_count(),
            self.failed_count()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.verdict())
    }
}
