use tracing::trace;

use crate::surface::PromptSession;

/// Holder of the one live prompt session.
///
/// Filling the slot disposes whatever it held before, so two sessions are
/// never visible at once.
#[derive(Default)]
pub(crate) struct PromptSlot {
    live: Option<Box<dyn PromptSession>>,
}

impl PromptSlot {
    pub(crate) fn hold(&mut self, session: Box<dyn PromptSession>) -> &mut Box<dyn PromptSession> {
        self.release();
        trace!("prompt session acquired");
        self.live.insert(session)
    }

    pub(crate) fn release(&mut self) {
        if let Some(mut session) = self.live.take() {
            session.dispose();
            trace!("prompt session released");
        }
    }

    /// Freeze the live session while the next step prepares its prompt.
    pub(crate) fn freeze(&mut self) {
        if let Some(session) = self.live.as_mut() {
            session.set_enabled(false);
            session.set_busy(true);
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

impl Drop for PromptSlot {
    fn drop(&mut self) {
        self.release();
    }
}
