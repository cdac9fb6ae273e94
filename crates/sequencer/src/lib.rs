//! Multi-step input driver.
//!
//! A [`Sequencer`] runs a chain of [`Step`]s. Each step shows at most one
//! prompt through a [`PromptSurface`] and returns the step that follows it,
//! or `None` when the chain is complete. Prompts report back, cancel and
//! resume as [`FlowSignal`]s in their error channel; the sequencer recovers
//! those and lets every other error through.

pub mod error;
pub mod prompt;
pub mod resume;
pub mod sequencer;
mod slot;
pub mod surface;
pub mod testing;

pub use {
    error::{Error, FlowSignal, Result},
    prompt::{AcceptAll, Choice, SelectionParams, TextParams, Validator},
    resume::{AskToResume, NeverResume, ResumePolicy},
    sequencer::{Sequencer, Step, StepRef},
    surface::{PickItem, PromptButton, PromptEvent, PromptSession, PromptSurface, SelectionView, TextView},
};
