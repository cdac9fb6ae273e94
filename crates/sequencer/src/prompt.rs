//! Parameters and results of the two prompt kinds.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    resume::{NeverResume, ResumePolicy},
    surface::{PickItem, PromptButton},
};

/// Result of a prompt: the value it asks for, or an extra button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Item(T),
    Button(PromptButton),
}

impl<T> Choice<T> {
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Button(_) => None,
        }
    }
}

/// Asynchronous check of a text prompt candidate.
///
/// Returns the message to display, or `None` when the text is acceptable.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn validate(&self, candidate: &str) -> Option<String>;
}

/// Validator that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl Validator for AcceptAll {
    async fn validate(&self, _candidate: &str) -> Option<String> {
        None
    }
}

pub struct SelectionParams {
    pub title: String,
    pub step: usize,
    pub total_steps: usize,
    pub placeholder: String,
    pub items: Vec<PickItem>,
    /// Pre-selected entry, matched against `items` by label.
    pub active_item: Option<PickItem>,
    pub buttons: Vec<PromptButton>,
    pub should_resume: Arc<dyn ResumePolicy>,
}

impl SelectionParams {
    pub fn new(title: impl Into<String>, step: usize, total_steps: usize) -> Self {
        Self {
            title: title.into(),
            step,
            total_steps,
            placeholder: String::new(),
            items: Vec::new(),
            active_item: None,
            buttons: Vec::new(),
            should_resume: Arc::new(NeverResume),
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn items(mut self, items: Vec<PickItem>) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn active_item(mut self, item: Option<PickItem>) -> Self {
        self.active_item = item;
        self
    }

    #[must_use]
    pub fn buttons(mut self, buttons: Vec<PromptButton>) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn should_resume(mut self, policy: Arc<dyn ResumePolicy>) -> Self {
        self.should_resume = policy;
        self
    }
}

pub struct TextParams {
    pub title: String,
    pub step: usize,
    pub total_steps: usize,
    pub value: String,
    pub prompt: String,
    pub validate: Arc<dyn Validator>,
    pub buttons: Vec<PromptButton>,
    pub should_resume: Arc<dyn ResumePolicy>,
}

impl TextParams {
    pub fn new(title: impl Into<String>, step: usize, total_steps: usize) -> Self {
        Self {
            title: title.into(),
            step,
            total_steps,
            value: String::new(),
            prompt: String::new(),
            validate: Arc::new(AcceptAll),
            buttons: Vec::new(),
            should_resume: Arc::new(NeverResume),
        }
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn validate(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validate = validator;
        self
    }

    #[must_use]
    pub fn buttons(mut self, buttons: Vec<PromptButton>) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub fn should_resume(mut self, policy: Arc<dyn ResumePolicy>) -> Self {
        self.should_resume = policy;
        self
    }
}
