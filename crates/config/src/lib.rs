//! Configuration loading, validation and env substitution.
//!
//! Config files: `autocode.toml`, `autocode.yaml`, `autocode.yml` or
//! `autocode.json`, searched in `./` then the user config directory.
//!
//! Supports `${ENV_VAR}` substitution in the raw file before parsing.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod template;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{
        config_dir, discover_and_load, find_config_file, find_or_default_config_path, load_config,
    },
    schema::{AutocodeConfig, TemplateConfig, ValidationConfig, WizardConfig, WorkspaceConfig},
    template::default_config_template,
    validate::{Diagnostic, Severity, ValidationResult, validate_config},
};
