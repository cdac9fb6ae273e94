//! Config schema types (wizard content, name validation, template, workspace).
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocodeConfig {
    pub wizard: WizardConfig,
    pub validation: ValidationConfig,
    pub template: TemplateConfig,
    pub workspace: WorkspaceConfig,
}

/// Content shown by the generate wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Title shown on every prompt of the flow.
    pub title: String,
    /// Suggested file name when nothing was entered yet.
    pub default_file_name: String,
    /// Selectable services, each `"<name>: <path>"`.
    pub services: Vec<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            title: "Create some codes from service".into(),
            default_file_name: "serviceA.java".into(),
            services: vec![
                "some-service-1: /service/one".into(),
                "some-service-2: /service/two".into(),
                "some-service-3: /service/three".into(),
                "some-service-4: /service/four".into(),
                "some-service-5: /service/five".into(),
            ],
        }
    }
}

/// File name validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Names that are rejected with "Name not unique".
    pub reserved_names: Vec<String>,
    /// Artificial latency of every validation round-trip.
    pub latency_ms: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reserved_names: vec!["vscode".into()],
            latency_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template file, relative paths resolve against the config directory.
    pub path: PathBuf,
    /// Fail on `{{token}}`s that name no wizard field instead of writing
    /// `undefined`.
    pub strict: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("templates/service.java"),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace roots. Generated files land in the first one. Empty means
    /// the current directory.
    pub roots: Vec<PathBuf>,
}

impl AutocodeConfig {
    /// Template path resolved against `base` when relative.
    pub fn template_path(&self, base: &Path) -> PathBuf {
        if self.template.path.is_absolute() {
            self.template.path.clone()
        } else {
            base.join(&self.template.path)
        }
    }

    /// Workspace roots resolved against `base`, falling back to `base`
    /// itself when none are configured.
    pub fn workspace_roots(&self, base: &Path) -> Vec<PathBuf> {
        if self.workspace.roots.is_empty() {
            return vec![base.to_path_buf()];
        }
        self.workspace
            .roots
            .iter()
            .map(|root| {
                if root.is_absolute() {
                    root.clone()
                } else {
                    base.join(root)
                }
            })
            .collect()
    }
}
