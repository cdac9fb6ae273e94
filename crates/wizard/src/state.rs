//! Answers accumulated by the wizard. No I/O.

use autocode_sequencer::PickItem;

/// Wizard state, filled in one step at a time.
///
/// Fields stay `None` until the step that produces them has completed, so a
/// partially walked wizard is representable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub title: String,
    /// Number of the step shown most recently.
    pub step: usize,
    pub total_steps: usize,
    /// The picked service entry.
    pub resource_group: Option<PickItem>,
    pub service_name: Option<String>,
    pub service_url: Option<String>,
    /// Entered file name, extension included.
    pub name: Option<String>,
    /// `name` up to its first dot.
    pub file_name: Option<String>,
}

impl WizardState {
    pub fn new(title: impl Into<String>, total_steps: usize) -> Self {
        Self {
            title: title.into(),
            total_steps,
            ..Self::default()
        }
    }

    /// Record the picked service and derive its name and URL from a
    /// `"<name>: <path>"` label.
    pub fn select_service(&mut self, item: PickItem) {
        let (name, url) = match item.label.split_once(':') {
            Some((name, url)) => (name.trim(), url.trim()),
            None => (item.label.trim(), ""),
        };
        self.service_name = Some(name.to_string());
        self.service_url = Some(url.to_string());
        self.resource_group = Some(item);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let stem = name.split('.').next().unwrap_or_default();
        self.file_name = Some(stem.to_string());
        self.name = Some(name);
    }

    /// Whether every step has produced its answer.
    pub fn is_complete(&self) -> bool {
        self.resource_group.is_some() && self.name.is_some()
    }

    /// Value of a template field, by its template identifier.
    pub fn field(&self, token: &str) -> Option<String> {
        match token {
            "serviceName" => self.service_name.clone(),
            "serviceUrl" => self.service_url.clone(),
            "name" => self.name.clone(),
            "fileName" => self.file_name.clone(),
            "resourceGroup" => self.resource_group.as_ref().map(|item| item.label.clone()),
            "title" => Some(self.title.clone()),
            "step" => Some(self.step.to_string()),
            "totalSteps" => Some(self.total_steps.to_string()),
            _ => None,
        }
    }
}
