use {
    autocode_wizard::{NoticeLevel, Notifier},
    tracing::debug,
};

use crate::output::Output;

/// Prints wizard notices as plain lines.
#[derive(Clone)]
pub struct TerminalNotifier {
    output: Output,
}

impl TerminalNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        let line = match level {
            NoticeLevel::Progress => format!("... {message}"),
            NoticeLevel::Success => format!("ok  {message}"),
            NoticeLevel::Warning => format!("warning: {message}"),
        };
        if let Err(e) = self.output.line(&line) {
            debug!(error = %e, "failed to print notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::output::Transcript};

    #[test]
    fn notices_are_prefixed_by_level() {
        let transcript = Transcript::new();
        let notifier = TerminalNotifier::new(Output::new(transcript.clone()));
        notifier.progress("Creating file 'a' from service 'b'");
        notifier.warning("No folder or workspace opened!");
        assert_eq!(
            transcript.contents(),
            "... Creating file 'a' from service 'b'\nwarning: No folder or workspace opened!\n"
        );
    }
}
