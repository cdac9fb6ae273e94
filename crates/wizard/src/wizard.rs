//! The two wizard steps: pick a service, then name the file.

use std::sync::Arc;

use {
    async_trait::async_trait,
    autocode_config::AutocodeConfig,
    autocode_sequencer::{
        Choice, NeverResume, PickItem, ResumePolicy, Result, SelectionParams, Sequencer, Step,
        StepRef, TextParams, Validator,
    },
    tracing::debug,
};

use crate::{state::WizardState, validate::UniqueNameValidator};

pub const PICK_PLACEHOLDER: &str = "Pick a service";
pub const TOTAL_STEPS: usize = 2;

/// Everything the steps need besides the state.
pub struct WizardSettings {
    pub title: String,
    pub services: Vec<PickItem>,
    pub default_file_name: String,
    pub validator: Arc<dyn Validator>,
    pub should_resume: Arc<dyn ResumePolicy>,
}

impl WizardSettings {
    pub fn from_config(config: &AutocodeConfig) -> Self {
        Self {
            title: config.wizard.title.clone(),
            services: config
                .wizard
                .services
                .iter()
                .map(|label| PickItem::new(label.as_str()))
                .collect(),
            default_file_name: config.wizard.default_file_name.clone(),
            validator: Arc::new(UniqueNameValidator::from_config(&config.validation)),
            should_resume: Arc::new(NeverResume),
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_resume_policy(mut self, policy: Arc<dyn ResumePolicy>) -> Self {
        self.should_resume = policy;
        self
    }

    /// First step of the wizard.
    pub fn entry(self: &Arc<Self>) -> StepRef<WizardState> {
        Arc::new(PickService {
            settings: Arc::clone(self),
        })
    }

    pub fn file_name_prompt(&self) -> String {
        format!(
            "Input file name of codes, default: {}",
            self.default_file_name
        )
    }
}

/// Step 1: choose one of the configured services.
///
/// Re-running the step, after going back, pre-selects the earlier pick.
pub struct PickService {
    settings: Arc<WizardSettings>,
}

#[async_trait]
impl Step<WizardState> for PickService {
    async fn execute(
        &self,
        input: &mut Sequencer<'_, WizardState>,
        state: &mut WizardState,
    ) -> Result<Option<StepRef<WizardState>>> {
        state.step = 1;
        let settings = &self.settings;
        let choice = input
            .show_selection_prompt(
                SelectionParams::new(&settings.title, 1, TOTAL_STEPS)
                    .placeholder(PICK_PLACEHOLDER)
                    .items(settings.services.clone())
                    .active_item(state.resource_group.clone())
                    .should_resume(Arc::clone(&settings.should_resume)),
            )
            .await?;

        match choice {
            Choice::Item(item) => {
                state.select_service(item);
                Ok(Some(Arc::new(EnterFileName {
                    settings: Arc::clone(settings),
                })))
            },
            Choice::Button(button) => {
                debug!(button = button.id(), "unhandled button ends the wizard");
                Ok(None)
            },
        }
    }

    fn name(&self) -> &'static str {
        "pick_service"
    }
}

/// Step 2: enter the name of the file to generate.
pub struct EnterFileName {
    settings: Arc<WizardSettings>,
}

#[async_trait]
impl Step<WizardState> for EnterFileName {
    async fn execute(
        &self,
        input: &mut Sequencer<'_, WizardState>,
        state: &mut WizardState,
    ) -> Result<Option<StepRef<WizardState>>> {
        state.step = 2;
        let settings = &self.settings;
        let value = state
            .name
            .clone()
            .unwrap_or_else(|| settings.default_file_name.clone());
        let choice = input
            .show_text_prompt(
                TextParams::new(&settings.title, 2, TOTAL_STEPS)
                    .value(value)
                    .prompt(settings.file_name_prompt())
                    .validate(Arc::clone(&settings.validator))
                    .should_resume(Arc::clone(&settings.should_resume)),
            )
            .await?;

        match choice {
            Choice::Item(name) => state.set_name(name),
            Choice::Button(button) => {
                debug!(button = button.id(), "unhandled button ends the wizard");
            },
        }
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "enter_file_name"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {
        super::*,
        autocode_sequencer::{
            AcceptAll,
            testing::{OpenedView, Scripted, ScriptedSurface},
        },
    };

    fn settings() -> Arc<WizardSettings> {
        Arc::new(
            WizardSettings::from_config(&AutocodeConfig::default())
                .with_validator(Arc::new(AcceptAll)),
        )
    }

    async fn walk(surface: &mut ScriptedSurface) -> WizardState {
        let settings = settings();
        let mut state = WizardState::new(&settings.title, TOTAL_STEPS);
        Sequencer::run(surface, &mut state, settings.entry())
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn prompts_match_the_wizard_layout() {
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(1)])
            .script([Scripted::accept("serviceA.java")]);
        let state = walk(&mut surface).await;

        assert_eq!(state.service_name.as_deref(), Some("some-service-2"));
        assert_eq!(state.service_url.as_deref(), Some("/service/two"));
        assert_eq!(state.file_name.as_deref(), Some("serviceA"));

        let opened = surface.opened();
        let OpenedView::Selection(pick) = &opened[0].view else {
            panic!("expected a selection prompt first");
        };
        assert_eq!(pick.title, "Create some codes from service");
        assert_eq!((pick.step, pick.total_steps), (1, 2));
        assert_eq!(pick.placeholder, PICK_PLACEHOLDER);
        assert_eq!(pick.items.len(), 5);
        assert_eq!(pick.active, None);

        let OpenedView::Text(name) = &opened[1].view else {
            panic!("expected a text prompt second");
        };
        assert_eq!((name.step, name.total_steps), (2, 2));
        assert_eq!(name.value, "serviceA.java");
        assert_eq!(name.prompt, "Input file name of codes, default: serviceA.java");
        assert_eq!(name.buttons, vec![autocode_sequencer::PromptButton::Back]);
    }

    #[tokio::test]
    async fn going_back_preselects_previous_pick() {
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(3)])
            .script([Scripted::back()])
            .script([Scripted::select(0)])
            .script([Scripted::accept("x.java")]);
        let state = walk(&mut surface).await;

        let opened = surface.opened();
        let OpenedView::Selection(again) = &opened[2].view else {
            panic!("expected the service prompt again");
        };
        assert_eq!(again.active, Some(3));
        assert_eq!(state.service_name.as_deref(), Some("some-service-1"));
        assert_eq!(state.name.as_deref(), Some("x.java"));
    }

    #[tokio::test]
    async fn name_prompt_prefills_previous_name() {
        let settings = settings();
        let mut state = WizardState::new(&settings.title, TOTAL_STEPS);
        state.set_name("kept.java");
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(0)])
            .script([Scripted::accept("kept.java")]);
        Sequencer::run(&mut surface, &mut state, settings.entry())
            .await
            .unwrap();

        let opened = surface.opened();
        let OpenedView::Text(view) = &opened[1].view else {
            panic!("expected a text prompt");
        };
        assert_eq!(view.value, "kept.java");
    }

    #[tokio::test]
    async fn dismissing_the_name_prompt_leaves_state_incomplete() {
        let mut surface = ScriptedSurface::new()
            .script([Scripted::select(0)])
            .script([Scripted::hide()]);
        let state = walk(&mut surface).await;

        assert!(!state.is_complete());
        assert_eq!(state.name, None);
        assert_eq!(surface.live_count(), 0);
    }
}
