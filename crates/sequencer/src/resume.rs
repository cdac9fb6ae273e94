//! What to do when a prompt is dismissed without a result.

use {async_trait::async_trait, tracing::debug};

use crate::{Result, surface::PromptSurface};

/// Decides between [`FlowSignal::Resume`](crate::FlowSignal::Resume) and
/// [`FlowSignal::Cancel`](crate::FlowSignal::Cancel) for a dismissed prompt.
#[async_trait]
pub trait ResumePolicy: Send + Sync {
    async fn should_resume(&self, surface: &mut dyn PromptSurface) -> Result<bool>;
}

/// Dismissal always cancels the flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverResume;

#[async_trait]
impl ResumePolicy for NeverResume {
    async fn should_resume(&self, _surface: &mut dyn PromptSurface) -> Result<bool> {
        Ok(false)
    }
}

/// Asks the user whether to go back to the dismissed prompt.
#[derive(Debug, Clone)]
pub struct AskToResume {
    question: String,
}

impl AskToResume {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

impl Default for AskToResume {
    fn default() -> Self {
        Self::new("Prompt closed. Resume where you left off?")
    }
}

#[async_trait]
impl ResumePolicy for AskToResume {
    async fn should_resume(&self, surface: &mut dyn PromptSurface) -> Result<bool> {
        let resume = surface.confirm(&self.question).await?;
        debug!(resume, "resume decision");
        Ok(resume)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {super::*, crate::testing::ScriptedSurface};

    #[tokio::test]
    async fn never_resume_does_not_ask() {
        let mut surface = ScriptedSurface::new().confirm(true);
        assert!(!NeverResume.should_resume(&mut surface).await.unwrap());
        assert!(surface.questions().is_empty());
    }

    #[tokio::test]
    async fn ask_to_resume_follows_the_answer() {
        let mut surface = ScriptedSurface::new().confirm(true).confirm(false);
        let policy = AskToResume::new("again?");
        assert!(policy.should_resume(&mut surface).await.unwrap());
        assert!(!policy.should_resume(&mut surface).await.unwrap());
        assert_eq!(surface.questions(), vec!["again?", "again?"]);
    }
}
