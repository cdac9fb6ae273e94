//! Scripted [`PromptSurface`] for driving flows in tests.
//!
//! Each opened prompt consumes the next script in line. A script is a queue
//! of events, pauses and failures; once it runs dry the prompt reports
//! [`PromptEvent::Hidden`]. Everything the flow does to a prompt is recorded
//! and can be inspected after the run.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use {
    async_trait::async_trait,
    tokio::time::{Instant, sleep_until},
};

use crate::{
    Error, Result,
    surface::{PromptButton, PromptEvent, PromptSession, PromptSurface, SelectionView, TextView},
};

/// One entry of a prompt script.
#[derive(Debug, Clone)]
pub enum Scripted {
    Event(PromptEvent),
    /// Wait before delivering the next entry.
    Pause(Duration),
    /// Report a surface failure.
    Fail(String),
}

impl Scripted {
    pub fn select(index: usize) -> Self {
        Self::Event(PromptEvent::Selected(index))
    }

    pub fn type_text(text: impl Into<String>) -> Self {
        Self::Event(PromptEvent::ValueChanged(text.into()))
    }

    pub fn accept(text: impl Into<String>) -> Self {
        Self::Event(PromptEvent::Accepted(text.into()))
    }

    pub fn back() -> Self {
        Self::Event(PromptEvent::Button(PromptButton::Back))
    }

    pub fn button(id: impl Into<String>) -> Self {
        Self::Event(PromptEvent::Button(PromptButton::custom(id)))
    }

    pub fn hide() -> Self {
        Self::Event(PromptEvent::Hidden)
    }

    pub fn pause(duration: Duration) -> Self {
        Self::Pause(duration)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenedView {
    Selection(SelectionView),
    Text(TextView),
}

/// Record of a prompt opened on a [`ScriptedSurface`].
#[derive(Debug, Clone)]
pub struct OpenedPrompt {
    pub view: OpenedView,
    pub disposed: bool,
    pub enabled: Vec<bool>,
    pub busy: Vec<bool>,
    pub validation_messages: Vec<Option<String>>,
}

#[derive(Default)]
struct Shared {
    scripts: VecDeque<VecDeque<Scripted>>,
    confirms: VecDeque<bool>,
    questions: Vec<String>,
    opened: Vec<OpenedPrompt>,
    live: usize,
    max_live: usize,
}

/// In-memory surface that plays back scripted user input.
#[derive(Clone, Default)]
pub struct ScriptedSurface {
    shared: Arc<Mutex<Shared>>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the script for the next prompt to be opened.
    #[must_use]
    pub fn script(self, entries: impl IntoIterator<Item = Scripted>) -> Self {
        self.lock().scripts.push_back(entries.into_iter().collect());
        self
    }

    /// Queue an answer to a confirmation question. Unanswered questions get
    /// `false`.
    #[must_use]
    pub fn confirm(self, answer: bool) -> Self {
        self.lock().confirms.push_back(answer);
        self
    }

    pub fn opened(&self) -> Vec<OpenedPrompt> {
        self.lock().opened.clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.lock().questions.clone()
    }

    /// Prompts opened and not yet disposed.
    pub fn live_count(&self) -> usize {
        self.lock().live
    }

    /// Highest number of prompts that were live at the same time.
    pub fn max_live(&self) -> usize {
        self.lock().max_live
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn open(&mut self, view: OpenedView) -> Box<dyn PromptSession> {
        let mut shared = self.lock();
        let script = shared.scripts.pop_front().unwrap_or_default();
        shared.opened.push(OpenedPrompt {
            view,
            disposed: false,
            enabled: Vec::new(),
            busy: Vec::new(),
            validation_messages: Vec::new(),
        });
        shared.live += 1;
        let live = shared.live;
        shared.max_live = shared.max_live.max(live);
        let index = shared.opened.len() - 1;
        drop(shared);

        Box::new(ScriptedSession {
            shared: Arc::clone(&self.shared),
            index,
            script,
            pause_until: None,
        })
    }
}

#[async_trait]
impl PromptSurface for ScriptedSurface {
    fn open_selection(&mut self, view: SelectionView) -> Result<Box<dyn PromptSession>> {
        Ok(self.open(OpenedView::Selection(view)))
    }

    fn open_text(&mut self, view: TextView) -> Result<Box<dyn PromptSession>> {
        Ok(self.open(OpenedView::Text(view)))
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut shared = self.lock();
        shared.questions.push(question.to_string());
        Ok(shared.confirms.pop_front().unwrap_or(false))
    }
}

struct ScriptedSession {
    shared: Arc<Mutex<Shared>>,
    index: usize,
    script: VecDeque<Scripted>,
    /// Deadline of the pause at the front of `script`, kept across
    /// cancelled waits.
    pause_until: Option<Instant>,
}

impl ScriptedSession {
    fn record(&self, f: impl FnOnce(&mut OpenedPrompt)) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(prompt) = shared.opened.get_mut(self.index) {
            f(prompt);
        }
    }
}

#[async_trait]
impl PromptSession for ScriptedSession {
    async fn next_event(&mut self) -> Result<PromptEvent> {
        loop {
            match self.script.pop_front() {
                None => return Ok(PromptEvent::Hidden),
                Some(Scripted::Event(event)) => return Ok(event),
                Some(Scripted::Fail(message)) => return Err(Error::surface(message)),
                Some(Scripted::Pause(duration)) => {
                    let deadline = *self
                        .pause_until
                        .get_or_insert_with(|| Instant::now() + duration);
                    self.script.push_front(Scripted::Pause(duration));
                    sleep_until(deadline).await;
                    self.script.pop_front();
                    self.pause_until = None;
                },
            }
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.record(|p| p.enabled.push(enabled));
    }

    fn set_busy(&mut self, busy: bool) {
        self.record(|p| p.busy.push(busy));
    }

    fn set_validation_message(&mut self, message: Option<String>) {
        self.record(|p| p.validation_messages.push(message));
    }

    fn dispose(&mut self) {
        let mut shared = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(prompt) = shared.opened.get_mut(self.index)
            && !prompt.disposed
        {
            prompt.disposed = true;
            shared.live -= 1;
        }
    }
}
