//! [`PromptSurface`] that prints prompts and reads answers line by line.

use std::collections::VecDeque;

use {
    async_trait::async_trait,
    autocode_sequencer::{
        PickItem, PromptButton, PromptEvent, PromptSession, PromptSurface, Result, SelectionView,
        TextView,
    },
    tracing::debug,
};

use crate::{
    input::{LineInput, SelectionInput, TextInput, parse_selection, parse_text},
    output::Output,
};

/// Terminal rendering of the prompt surface.
///
/// Selection prompts accept an item number, an item label, or an empty
/// line for the pre-selected item. Text prompts take the typed line as the
/// value; an empty line keeps the shown value. In both, `:<id>` presses a
/// button and `:q` or end of input dismisses the prompt.
pub struct TerminalSurface {
    input: LineInput,
    output: Output,
}

impl TerminalSurface {
    pub fn new(input: LineInput, output: Output) -> Self {
        Self { input, output }
    }

    /// Surface over the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(LineInput::stdin(), Output::stdout())
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    fn header(&self, title: &str, step: usize, total_steps: usize) -> std::io::Result<()> {
        self.output.line("")?;
        if total_steps > 1 {
            self.output.line(&format!("{title} ({step}/{total_steps})"))
        } else {
            self.output.line(title)
        }
    }

    fn hint(&self, buttons: &[PromptButton]) -> std::io::Result<()> {
        let mut commands: Vec<String> = buttons
            .iter()
            .map(|button| match button {
                PromptButton::Custom {
                    id,
                    tooltip: Some(tooltip),
                } => format!(":{id} ({tooltip})"),
                _ => format!(":{}", button.id()),
            })
            .collect();
        commands.push(":q".to_string());
        self.output.line(&format!("  commands: {}", commands.join("  ")))
    }
}

#[async_trait]
impl PromptSurface for TerminalSurface {
    fn open_selection(&mut self, view: SelectionView) -> Result<Box<dyn PromptSession>> {
        self.header(&view.title, view.step, view.total_steps)?;
        if !view.placeholder.is_empty() {
            self.output.line(&view.placeholder)?;
        }
        for (index, item) in view.items.iter().enumerate() {
            self.output.line(&render_item(index, item, view.active))?;
        }
        self.hint(&view.buttons)?;
        Ok(Box::new(SelectionSession {
            input: self.input.clone(),
            output: self.output.clone(),
            items: view.items,
            active: view.active,
            buttons: view.buttons,
            marker_shown: false,
            disposed: false,
        }))
    }

    fn open_text(&mut self, view: TextView) -> Result<Box<dyn PromptSession>> {
        self.header(&view.title, view.step, view.total_steps)?;
        if !view.prompt.is_empty() {
            self.output.line(&view.prompt)?;
        }
        self.hint(&view.buttons)?;
        Ok(Box::new(TextSession {
            input: self.input.clone(),
            output: self.output.clone(),
            value: view.value,
            buttons: view.buttons,
            queued: VecDeque::new(),
            marker_shown: false,
            disposed: false,
        }))
    }

    async fn confirm(&mut self, question: &str) -> Result<bool> {
        self.output.inline(&format!("{question} [y/N] "))?;
        let answer = self.input.next_line().await.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

fn render_item(index: usize, item: &PickItem, active: Option<usize>) -> String {
    let marker = if active == Some(index) {
        '*'
    } else {
        ' '
    };
    match &item.description {
        Some(description) => format!("{marker} {}) {}  {description}", index + 1, item.label),
        None => format!("{marker} {}) {}", index + 1, item.label),
    }
}

/// Report a failed write from a method that cannot return it.
fn log_write(result: std::io::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "terminal write failed");
    }
}

struct SelectionSession {
    input: LineInput,
    output: Output,
    items: Vec<PickItem>,
    active: Option<usize>,
    buttons: Vec<PromptButton>,
    marker_shown: bool,
    disposed: bool,
}

#[async_trait]
impl PromptSession for SelectionSession {
    async fn next_event(&mut self) -> Result<PromptEvent> {
        loop {
            if self.disposed {
                return Ok(PromptEvent::Hidden);
            }
            if !self.marker_shown {
                self.output.inline("> ")?;
                self.marker_shown = true;
            }
            let Some(line) = self.input.next_line().await else {
                return Ok(PromptEvent::Hidden);
            };
            self.marker_shown = false;
            match parse_selection(&line, &self.items, self.active, &self.buttons) {
                SelectionInput::Pick(index) => return Ok(PromptEvent::Selected(index)),
                SelectionInput::Button(button) => return Ok(PromptEvent::Button(button)),
                SelectionInput::Quit => return Ok(PromptEvent::Hidden),
                SelectionInput::Invalid(message) => self.output.line(&format!("  {message}"))?,
            }
        }
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn set_busy(&mut self, _busy: bool) {}

    fn set_validation_message(&mut self, message: Option<String>) {
        if let Some(message) = message {
            log_write(self.output.line(&format!("  ! {message}")));
            self.marker_shown = false;
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

struct TextSession {
    input: LineInput,
    output: Output,
    value: String,
    buttons: Vec<PromptButton>,
    /// Events already decided but not yet delivered.
    queued: VecDeque<PromptEvent>,
    marker_shown: bool,
    disposed: bool,
}

impl TextSession {
    fn marker(&self) -> String {
        if self.value.is_empty() {
            "> ".to_string()
        } else {
            format!("[{}] > ", self.value)
        }
    }
}

#[async_trait]
impl PromptSession for TextSession {
    async fn next_event(&mut self) -> Result<PromptEvent> {
        if let Some(event) = self.queued.pop_front() {
            return Ok(event);
        }
        loop {
            if self.disposed {
                return Ok(PromptEvent::Hidden);
            }
            if !self.marker_shown {
                self.output.inline(&self.marker())?;
                self.marker_shown = true;
            }
            let Some(line) = self.input.next_line().await else {
                return Ok(PromptEvent::Hidden);
            };
            self.marker_shown = false;
            match parse_text(&line, &self.buttons) {
                TextInput::Submit(value) => {
                    self.value.clone_from(&value);
                    self.queued.push_back(PromptEvent::Accepted(value.clone()));
                    return Ok(PromptEvent::ValueChanged(value));
                },
                TextInput::Keep => return Ok(PromptEvent::Accepted(self.value.clone())),
                TextInput::Button(button) => return Ok(PromptEvent::Button(button)),
                TextInput::Quit => return Ok(PromptEvent::Hidden),
                TextInput::Invalid(message) => self.output.line(&format!("  {message}"))?,
            }
        }
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    fn set_busy(&mut self, _busy: bool) {}

    fn set_validation_message(&mut self, message: Option<String>) {
        if let Some(message) = message {
            log_write(self.output.line(&format!("  ! {message}")));
            self.marker_shown = false;
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use {super::*, crate::output::Transcript, tokio::sync::mpsc};

    fn surface() -> (TerminalSurface, mpsc::UnboundedSender<String>, Transcript) {
        let (tx, rx) = mpsc::unbounded_channel();
        let transcript = Transcript::new();
        let surface = TerminalSurface::new(LineInput::new(rx), Output::new(transcript.clone()));
        (surface, tx, transcript)
    }

    fn selection(active: Option<usize>, buttons: Vec<PromptButton>) -> SelectionView {
        SelectionView {
            title: "Create some codes from service".into(),
            step: 1,
            total_steps: 2,
            placeholder: "Pick a service".into(),
            items: vec![PickItem::new("svc-a: /a"), PickItem::new("svc-b: /b")],
            active,
            buttons,
        }
    }

    fn text(value: &str) -> TextView {
        TextView {
            title: "Create some codes from service".into(),
            step: 2,
            total_steps: 2,
            value: value.into(),
            prompt: "Input file name of codes, default: serviceA.java".into(),
            buttons: vec![PromptButton::Back],
        }
    }

    #[tokio::test]
    async fn selection_renders_items_and_reads_number() {
        let (mut surface, tx, transcript) = surface();
        let mut session = surface.open_selection(selection(Some(1), vec![])).unwrap();
        tx.send("1".into()).unwrap();

        assert_eq!(session.next_event().await.unwrap(), PromptEvent::Selected(0));
        let out = transcript.contents();
        assert!(out.contains("Create some codes from service (1/2)\n"));
        assert!(out.contains("Pick a service\n"));
        assert!(out.contains("  1) svc-a: /a\n"));
        assert!(out.contains("* 2) svc-b: /b\n"));
        assert!(out.contains("commands: :q\n"));
    }

    #[test]
    fn item_description_follows_label() {
        let item = PickItem::new("svc-a: /a").with_description("billing");
        assert_eq!(render_item(0, &item, None), "  1) svc-a: /a  billing");
        assert_eq!(render_item(0, &item, Some(0)), "* 1) svc-a: /a  billing");
    }

    #[tokio::test]
    async fn selection_reports_invalid_input_and_keeps_reading() {
        let (mut surface, tx, transcript) = surface();
        let mut session = surface
            .open_selection(selection(None, vec![PromptButton::Back]))
            .unwrap();
        tx.send("7".into()).unwrap();
        tx.send(":back".into()).unwrap();

        assert_eq!(
            session.next_event().await.unwrap(),
            PromptEvent::Button(PromptButton::Back)
        );
        assert!(transcript.contents().contains("choose a number from 1 to 2"));
    }

    #[tokio::test]
    async fn end_of_input_hides_prompt() {
        let (mut surface, tx, _) = surface();
        let mut session = surface.open_selection(selection(None, vec![])).unwrap();
        drop(tx);
        assert_eq!(session.next_event().await.unwrap(), PromptEvent::Hidden);
    }

    #[tokio::test]
    async fn typed_line_changes_then_accepts_value() {
        let (mut surface, tx, transcript) = surface();
        let mut session = surface.open_text(text("serviceA.java")).unwrap();
        tx.send("out.java".into()).unwrap();
        tx.send(String::new()).unwrap();

        assert_eq!(
            session.next_event().await.unwrap(),
            PromptEvent::ValueChanged("out.java".into())
        );
        assert_eq!(
            session.next_event().await.unwrap(),
            PromptEvent::Accepted("out.java".into())
        );
        assert_eq!(
            session.next_event().await.unwrap(),
            PromptEvent::Accepted("out.java".into())
        );
        assert!(transcript.contents().contains("[serviceA.java] > "));
    }

    #[tokio::test]
    async fn validation_message_is_printed() {
        let (mut surface, _tx, transcript) = surface();
        let mut session = surface.open_text(text("")).unwrap();
        session.set_validation_message(Some("Name not unique".into()));
        session.set_validation_message(None);
        assert!(transcript.contents().contains("  ! Name not unique\n"));
    }

    #[tokio::test]
    async fn disposed_session_reports_hidden() {
        let (mut surface, tx, _) = surface();
        let mut session = surface.open_text(text("x")).unwrap();
        tx.send("queued".into()).unwrap();
        session.dispose();
        assert_eq!(session.next_event().await.unwrap(), PromptEvent::Hidden);
    }

    #[tokio::test]
    async fn confirm_accepts_yes_only() {
        let (mut surface, tx, transcript) = surface();
        for answer in ["Y", "yes", "no", ""] {
            tx.send(answer.into()).unwrap();
        }
        assert!(surface.confirm("Resume?").await.unwrap());
        assert!(surface.confirm("Resume?").await.unwrap());
        assert!(!surface.confirm("Resume?").await.unwrap());
        assert!(!surface.confirm("Resume?").await.unwrap());
        drop(tx);
        assert!(!surface.confirm("Resume?").await.unwrap());
        assert!(transcript.contents().contains("Resume? [y/N] "));
    }
}
