//! Top-level list of actions.

use std::sync::Arc;

use {
    async_trait::async_trait,
    autocode_sequencer::{
        Choice, PickItem, PromptSurface, SelectionParams, Sequencer, Step, StepRef,
    },
    tracing::{debug, error, info},
};

use crate::{Result, generate::Generator};

pub const MENU_TITLE: &str = "autocode";
pub const MENU_PLACEHOLDER: &str = "Choose an action";

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: Action,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Selection prompt listing named actions.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    entries: Vec<MenuEntry>,
}

impl Default for ActionMenu {
    fn default() -> Self {
        Self::new(vec![
            MenuEntry::new("Generate code from a service", Action::Generate),
            MenuEntry::new("Cli Function 2", Action::Generate),
            MenuEntry::new("Cli Function 3", Action::Generate),
        ])
    }
}

impl ActionMenu {
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Show the menu. `None` when it was dismissed.
    pub async fn choose(&self, surface: &mut dyn PromptSurface) -> Result<Option<&MenuEntry>> {
        let step: StepRef<Option<String>> = Arc::new(MenuStep {
            items: self
                .entries
                .iter()
                .map(|entry| PickItem::new(entry.label.as_str()))
                .collect(),
        });
        let mut picked: Option<String> = None;
        Sequencer::run(surface, &mut picked, step).await?;
        Ok(picked.and_then(|label| self.entries.iter().find(|entry| entry.label == label)))
    }

    /// Show the menu and run the chosen action.
    ///
    /// Failures of the action are logged and swallowed; only a failing menu
    /// prompt is returned as an error.
    pub async fn run(&self, surface: &mut dyn PromptSurface, generator: &Generator) -> Result<()> {
        let Some(entry) = self.choose(surface).await? else {
            debug!("menu dismissed");
            return Ok(());
        };
        info!(action = %entry.label, "running action");

        let outcome = match entry.action {
            Action::Generate => generator.run(surface).await.map(drop),
        };
        if let Err(e) = outcome {
            error!(action = %entry.label, error = %e, "action failed");
        }
        Ok(())
    }
}

struct MenuStep {
    items: Vec<PickItem>,
}

#[async_trait]
impl Step<Option<String>> for MenuStep {
    async fn execute(
        &self,
        input: &mut Sequencer<'_, Option<String>>,
        state: &mut Option<String>,
    ) -> autocode_sequencer::Result<Option<StepRef<Option<String>>>> {
        let choice = input
            .show_selection_prompt(
                SelectionParams::new(MENU_TITLE, 1, 1)
                    .placeholder(MENU_PLACEHOLDER)
                    .items(self.items.clone()),
            )
            .await?;
        if let Choice::Item(item) = choice {
            *state = Some(item.label);
        }
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "action_menu"
    }
}
