//! File name check for the name step.

use std::{
    path::{Component, Path},
    time::Duration,
};

use {
    async_trait::async_trait,
    autocode_config::ValidationConfig,
    autocode_sequencer::Validator,
    tracing::trace,
};

pub const NAME_NOT_UNIQUE: &str = "Name not unique";
pub const NAME_OUTSIDE_WORKSPACE: &str = "Name must be a path inside the workspace";

/// Whether `name` is a non-empty relative path made only of plain
/// components.
pub(crate) fn stays_in_workspace(name: &str) -> bool {
    let mut components = Path::new(name).components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

/// Rejects reserved file names after an artificial lookup latency.
#[derive(Debug, Clone)]
pub struct UniqueNameValidator {
    reserved: Vec<String>,
    latency: Duration,
}

impl UniqueNameValidator {
    pub fn new(reserved: Vec<String>, latency: Duration) -> Self {
        Self { reserved, latency }
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(
            config.reserved_names.clone(),
            Duration::from_millis(config.latency_ms),
        )
    }
}

#[async_trait]
impl Validator for UniqueNameValidator {
    async fn validate(&self, candidate: &str) -> Option<String> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if !stays_in_workspace(candidate) {
            trace!(candidate, "name leaves the workspace");
            return Some(NAME_OUTSIDE_WORKSPACE.to_string());
        }
        let taken = self.reserved.iter().any(|name| name == candidate);
        trace!(candidate, taken, "name checked");
        taken.then(|| NAME_NOT_UNIQUE.to_string())
    }
}
