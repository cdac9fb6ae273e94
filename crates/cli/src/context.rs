//! Config loading and command-line overrides shared by all commands.

use std::path::{Path, PathBuf};

use {
    anyhow::{Context, Result},
    autocode_config::{AutocodeConfig, discover_and_load, load_config},
    tracing::debug,
};

/// Effective configuration for one invocation.
pub struct Loaded {
    pub config: AutocodeConfig,
    /// File the config came from, if any.
    pub path: Option<PathBuf>,
    /// Directory relative config paths resolve against.
    pub base: PathBuf,
    pub cwd: PathBuf,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub workspace: Vec<PathBuf>,
    pub template: Option<PathBuf>,
}

impl Loaded {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let (config, path) = match &overrides.config {
            Some(path) => {
                let config = load_config(path)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                (config, Some(path.clone()))
            },
            None => discover_and_load(),
        };
        Ok(Self::resolve(config, path, cwd, overrides))
    }

    fn resolve(
        mut config: AutocodeConfig,
        path: Option<PathBuf>,
        cwd: PathBuf,
        overrides: &Overrides,
    ) -> Self {
        let base = path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| cwd.clone(), |dir| cwd.join(dir));

        if !overrides.workspace.is_empty() {
            config.workspace.roots = overrides
                .workspace
                .iter()
                .map(|root| cwd.join(root))
                .collect();
        }
        if let Some(template) = &overrides.template {
            config.template.path = cwd.join(template);
        }
        debug!(base = %base.display(), config = ?path, "configuration resolved");

        Self {
            config,
            path,
            base,
            cwd,
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.config.template_path(&self.base)
    }

    /// Configured roots, or the current directory when there are none.
    pub fn workspace_roots(&self) -> Vec<PathBuf> {
        if self.config.workspace.roots.is_empty() {
            vec![self.cwd.clone()]
        } else {
            self.config.workspace_roots(&self.base)
        }
    }
}
