use std::path::Path;

use {
    anyhow::{Context, Result, bail},
    autocode_config::{
        Severity, default_config_template, find_or_default_config_path, validate_config,
    },
    clap::Subcommand,
};

use crate::context::{Loaded, Overrides};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write a documented default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the configuration and report errors/warnings.
    Check,
}

pub fn handle_config(action: ConfigAction, overrides: &Overrides) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = overrides
                .config
                .clone()
                .unwrap_or_else(find_or_default_config_path);
            init(&path, force)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        },
        ConfigAction::Show => {
            let loaded = Loaded::load(overrides)?;
            print!("{}", toml::to_string_pretty(&loaded.config)?);
            Ok(())
        },
        ConfigAction::Check => check(&Loaded::load(overrides)?),
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, default_config_template())
        .with_context(|| format!("failed to write {}", path.display()))
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(loaded: &Loaded) -> Result<()> {
    let mut result = validate_config(&loaded.config, &loaded.base);
    result.config_path = loaded.path.clone();

    if let Some(ref path) = result.config_path {
        eprintln!("Checking {}\n", path.display());
    } else {
        eprintln!("No config file found; checking defaults.\n");
    }

    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!(
            "  {BOLD}{color}{}{RESET} {}: {}",
            d.severity, d.path, d.message
        );
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if !result.diagnostics.is_empty() {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
