use std::sync::Arc;

use {
    async_trait::async_trait,
    futures::{
        FutureExt, StreamExt,
        future::BoxFuture,
        stream::FuturesUnordered,
    },
    tracing::{debug, trace},
};

use crate::{
    Error, FlowSignal, Result,
    prompt::{Choice, SelectionParams, TextParams},
    resume::ResumePolicy,
    slot::PromptSlot,
    surface::{PickItem, PromptButton, PromptEvent, PromptSurface, SelectionView, TextView},
};

/// Shared handle to a step; history keeps these so steps can be re-run.
pub type StepRef<S> = Arc<dyn Step<S>>;

/// One stage of a multi-step flow.
///
/// `execute` shows whatever prompts it needs through `input`, records the
/// answers in `state` and returns the step to run next, or `None` to end
/// the chain.
#[async_trait]
pub trait Step<S: Send>: Send + Sync {
    async fn execute(
        &self,
        input: &mut Sequencer<'_, S>,
        state: &mut S,
    ) -> Result<Option<StepRef<S>>>;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Drives a chain of [`Step`]s and owns the live prompt.
pub struct Sequencer<'a, S> {
    surface: &'a mut dyn PromptSurface,
    history: Vec<StepRef<S>>,
    current: PromptSlot,
}

impl<'a, S: Send> Sequencer<'a, S> {
    /// Run the chain starting at `entry` until a step returns `None` or the
    /// user cancels.
    ///
    /// Answers are collected in `state`, which the caller keeps. Flow
    /// signals never escape; any other error aborts the chain and is
    /// returned.
    pub async fn run(
        surface: &'a mut dyn PromptSurface,
        state: &mut S,
        entry: StepRef<S>,
    ) -> Result<()> {
        let mut input = Self {
            surface,
            history: Vec::new(),
            current: PromptSlot::default(),
        };
        let outcome = input.step_through(entry, state).await;
        input.current.release();
        outcome
    }

    async fn step_through(&mut self, entry: StepRef<S>, state: &mut S) -> Result<()> {
        let mut cursor = Some(entry);
        while let Some(step) = cursor.take() {
            self.history.push(Arc::clone(&step));
            self.current.freeze();
            debug!(step = step.name(), depth = self.history.len(), "running step");

            cursor = match step.execute(self, state).await {
                Ok(next) => next,
                Err(Error::Flow(FlowSignal::Back)) => {
                    self.history.pop();
                    let previous = self.history.pop();
                    debug!(
                        to = previous.as_ref().map(|s| s.name()),
                        "navigating back"
                    );
                    previous
                },
                Err(Error::Flow(FlowSignal::Resume)) => {
                    debug!(step = step.name(), "resuming step");
                    self.history.pop()
                },
                Err(Error::Flow(FlowSignal::Cancel)) => {
                    debug!(step = step.name(), "flow cancelled");
                    None
                },
                Err(e) => return Err(e),
            };
        }
        Ok(())
    }

    /// Number of steps started and not undone, including the running one.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Whether a prompt is currently shown.
    pub fn has_live_prompt(&self) -> bool {
        self.current.is_live()
    }

    /// Extra buttons with the back button in front once there is a step to
    /// go back to.
    fn buttons(&self, extra: Vec<PromptButton>) -> Vec<PromptButton> {
        let mut buttons = Vec::with_capacity(extra.len() + 1);
        if self.history.len() > 1 {
            buttons.push(PromptButton::Back);
        }
        buttons.extend(extra);
        buttons
    }

    /// Show a single-select prompt and wait for a pick or a button.
    pub async fn show_selection_prompt(
        &mut self,
        params: SelectionParams,
    ) -> Result<Choice<PickItem>> {
        let active = params.active_item.as_ref().and_then(|active| {
            params
                .items
                .iter()
                .position(|item| item.label == active.label)
        });
        let view = SelectionView {
            title: params.title,
            step: params.step,
            total_steps: params.total_steps,
            placeholder: params.placeholder,
            items: params.items,
            active,
            buttons: self.buttons(params.buttons),
        };
        let items = view.items.clone();

        self.current.release();
        let session = self.current.hold(self.surface.open_selection(view)?);

        loop {
            match session.next_event().await? {
                PromptEvent::Selected(index) => match items.get(index) {
                    Some(item) => return Ok(Choice::Item(item.clone())),
                    None => trace!(index, "selection out of range ignored"),
                },
                PromptEvent::Button(PromptButton::Back) => return Err(FlowSignal::Back.into()),
                PromptEvent::Button(button) => return Ok(Choice::Button(button)),
                PromptEvent::Hidden => {
                    return Err(dismissed(params.should_resume.as_ref(), self.surface).await);
                },
                PromptEvent::ValueChanged(_) | PromptEvent::Accepted(_) => {},
            }
        }
    }

    /// Show a text prompt and wait until a value passes validation or a
    /// button is pressed.
    ///
    /// Every text change starts a validation. Only the outcome of the most
    /// recently started one is displayed; older ones finishing late are
    /// dropped.
    pub async fn show_text_prompt(&mut self, params: TextParams) -> Result<Choice<String>> {
        let view = TextView {
            title: params.title,
            step: params.step,
            total_steps: params.total_steps,
            value: params.value,
            prompt: params.prompt,
            buttons: self.buttons(params.buttons),
        };
        let validator = params.validate;

        self.current.release();
        let session = self.current.hold(self.surface.open_text(view)?);

        let mut latest: u64 = 0;
        let mut pending: FuturesUnordered<BoxFuture<'static, (u64, Option<String>)>> =
            FuturesUnordered::new();

        loop {
            tokio::select! {
                biased;

                Some((ticket, message)) = pending.next(), if !pending.is_empty() => {
                    if ticket == latest {
                        session.set_validation_message(message);
                    } else {
                        trace!(ticket, latest, "stale validation discarded");
                    }
                },
                event = session.next_event() => match event? {
                    PromptEvent::ValueChanged(text) => {
                        latest += 1;
                        let ticket = latest;
                        let validator = Arc::clone(&validator);
                        pending.push(
                            async move { (ticket, validator.validate(&text).await) }.boxed(),
                        );
                    },
                    PromptEvent::Accepted(value) => {
                        session.set_enabled(false);
                        session.set_busy(true);
                        let message = validator.validate(&value).await;
                        if message.is_none() {
                            return Ok(Choice::Item(value));
                        }
                        // The accepted text is the newest; in-flight checks are stale.
                        latest += 1;
                        session.set_validation_message(message);
                        session.set_enabled(true);
                        session.set_busy(false);
                    },
                    PromptEvent::Button(PromptButton::Back) => return Err(FlowSignal::Back.into()),
                    PromptEvent::Button(button) => return Ok(Choice::Button(button)),
                    PromptEvent::Hidden => {
                        return Err(dismissed(params.should_resume.as_ref(), self.surface).await);
                    },
                    PromptEvent::Selected(_) => {},
                },
            }
        }
    }
}

/// Turn a dismissal into the signal chosen by `policy`.
async fn dismissed(policy: &dyn ResumePolicy, surface: &mut dyn PromptSurface) -> Error {
    match policy.should_resume(surface).await {
        Ok(true) => FlowSignal::Resume.into(),
        Ok(false) => FlowSignal::Cancel.into(),
        Err(e) => e,
    }
}
