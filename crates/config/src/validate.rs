//! Semantic checks on a loaded configuration.
//!
//! Parsing already rejects malformed files; these checks catch configs that
//! parse but would make the wizard misbehave.

use std::path::{Path, PathBuf};

use crate::schema::AutocodeConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "wizard.services[2]"
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.path, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
}

impl ValidationResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Check `config`, resolving relative paths against `base`.
pub fn validate_config(config: &AutocodeConfig, base: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    if config.wizard.services.is_empty() {
        result.push(
            Severity::Error,
            "wizard.services",
            "no services configured, the first step has nothing to pick",
        );
    }
    for (i, label) in config.wizard.services.iter().enumerate() {
        if !label.contains(':') {
            result.push(
                Severity::Error,
                format!("wizard.services[{i}]"),
                format!("\"{label}\" is not in \"<name>: <path>\" form"),
            );
        }
    }

    if config
        .validation
        .reserved_names
        .iter()
        .any(|n| *n == config.wizard.default_file_name)
    {
        result.push(
            Severity::Warning,
            "wizard.default_file_name",
            format!(
                "default \"{}\" is reserved and will always be rejected",
                config.wizard.default_file_name
            ),
        );
    }

    let template = config.template_path(base);
    if !template.is_file() {
        result.push(
            Severity::Warning,
            "template.path",
            format!("template not found at {}", template.display()),
        );
    }

    for (i, root) in config.workspace_roots(base).iter().enumerate() {
        if !root.is_dir() {
            result.push(
                Severity::Error,
                format!("workspace.roots[{i}]"),
                format!("{} is not a directory", root.display()),
            );
        }
    }

    result
}
