//! Contract with the host UI that actually draws prompts.

use async_trait::async_trait;

use crate::Result;

/// A selectable entry of a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
}

impl PickItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&str> for PickItem {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// A button shown in a prompt's title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptButton {
    /// The built-in back affordance.
    Back,
    Custom {
        id: String,
        tooltip: Option<String>,
    },
}

impl PromptButton {
    pub fn custom(id: impl Into<String>) -> Self {
        Self::Custom {
            id: id.into(),
            tooltip: None,
        }
    }

    /// Identifier used by line-based surfaces to trigger the button.
    pub fn id(&self) -> &str {
        match self {
            Self::Back => "back",
            Self::Custom { id, .. } => id,
        }
    }
}

/// Everything a surface needs to draw a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub title: String,
    pub step: usize,
    pub total_steps: usize,
    pub placeholder: String,
    pub items: Vec<PickItem>,
    /// Index into `items` of the pre-selected entry.
    pub active: Option<usize>,
    pub buttons: Vec<PromptButton>,
}

/// Everything a surface needs to draw a single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub title: String,
    pub step: usize,
    pub total_steps: usize,
    pub value: String,
    pub prompt: String,
    pub buttons: Vec<PromptButton>,
}

/// User interaction reported by a live prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// An item of a selection prompt was picked, by index.
    Selected(usize),
    /// The text of a text prompt changed.
    ValueChanged(String),
    /// The text prompt was submitted with this value.
    Accepted(String),
    Button(PromptButton),
    /// The prompt was dismissed without a result.
    Hidden,
}

/// Factory for prompt widgets.
#[async_trait]
pub trait PromptSurface: Send {
    /// Create and show a selection prompt.
    fn open_selection(&mut self, view: SelectionView) -> Result<Box<dyn PromptSession>>;

    /// Create and show a text prompt.
    fn open_text(&mut self, view: TextView) -> Result<Box<dyn PromptSession>>;

    /// Ask a yes/no question outside of any prompt.
    async fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// A shown prompt widget.
///
/// `next_event` must be cancel safe: the sequencer races it against
/// pending validations and drops it when a validation finishes first.
#[async_trait]
pub trait PromptSession: Send {
    async fn next_event(&mut self) -> Result<PromptEvent>;

    fn set_enabled(&mut self, enabled: bool);

    fn set_busy(&mut self, busy: bool);

    fn set_validation_message(&mut self, message: Option<String>);

    /// Hide the widget and release it. Events are not delivered afterwards.
    fn dispose(&mut self);
}
