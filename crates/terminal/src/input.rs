//! Line input and its interpretation.

use std::{io::BufRead, sync::Arc};

use {
    autocode_sequencer::{PickItem, PromptButton},
    tokio::{
        io::{AsyncBufRead, AsyncBufReadExt},
        sync::{Mutex, mpsc},
    },
    tracing::{debug, warn},
};

/// Receiving end of the line reader, shared by the prompts of one surface.
///
/// Receiving is cancel safe: a line is only taken out of the channel by a
/// receive that completes.
#[derive(Clone)]
pub struct LineInput {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl LineInput {
    pub fn new(lines: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }

    /// Read `reader` line by line on a background task.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    },
                    Ok(None) => {
                        debug!("input closed");
                        break;
                    },
                    Err(e) => {
                        warn!(error = %e, "failed to read input");
                        break;
                    },
                }
            }
        });
        Self::new(rx)
    }

    /// Read the process stdin on a dedicated thread.
    ///
    /// The thread is detached, so a pending read never holds up exit.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = std::thread::Builder::new()
            .name("autocode-stdin".into())
            .spawn(move || {
                for line in std::io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        },
                        Err(e) => {
                            warn!(error = %e, "failed to read stdin");
                            break;
                        },
                    }
                }
                debug!("stdin closed");
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to start stdin reader");
        }
        Self::new(rx)
    }

    /// Next line without its terminator, or `None` once input is closed.
    pub async fn next_line(&self) -> Option<String> {
        let mut lines = self.lines.lock().await;
        let line = lines.recv().await?;
        Some(line.trim_end_matches('\r').to_string())
    }
}

/// Meaning of a line typed at a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    Pick(usize),
    Button(PromptButton),
    Quit,
    /// Line that selects nothing; the message explains why.
    Invalid(String),
}

/// Meaning of a line typed at a text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    /// Submit this value.
    Submit(String),
    /// Submit the value already shown.
    Keep,
    Button(PromptButton),
    Quit,
    Invalid(String),
}

/// Lines starting with `:` are commands: `:q` quits, `:<id>` presses the
/// button with that id.
fn command(line: &str, buttons: &[PromptButton]) -> Option<Result<Command, String>> {
    let name = line.strip_prefix(':')?.trim();
    if matches!(name, "q" | "quit") {
        return Some(Ok(Command::Quit));
    }
    Some(
        buttons
            .iter()
            .find(|button| button.id() == name)
            .map(|button| Command::Button(button.clone()))
            .ok_or_else(|| format!("unknown command ':{name}'")),
    )
}

enum Command {
    Quit,
    Button(PromptButton),
}

pub fn parse_selection(
    line: &str,
    items: &[PickItem],
    active: Option<usize>,
    buttons: &[PromptButton],
) -> SelectionInput {
    let line = line.trim();
    match command(line, buttons) {
        Some(Ok(Command::Quit)) => return SelectionInput::Quit,
        Some(Ok(Command::Button(button))) => return SelectionInput::Button(button),
        Some(Err(message)) => return SelectionInput::Invalid(message),
        None => {},
    }

    if line.is_empty() {
        return match active {
            Some(index) => SelectionInput::Pick(index),
            None => SelectionInput::Invalid("nothing selected".to_string()),
        };
    }
    if let Ok(number) = line.parse::<usize>() {
        return match number.checked_sub(1).filter(|index| *index < items.len()) {
            Some(index) => SelectionInput::Pick(index),
            None => SelectionInput::Invalid(format!("choose a number from 1 to {}", items.len())),
        };
    }
    match items
        .iter()
        .position(|item| item.label.eq_ignore_ascii_case(line))
    {
        Some(index) => SelectionInput::Pick(index),
        None => SelectionInput::Invalid(format!("no entry named '{line}'")),
    }
}

pub fn parse_text(line: &str, buttons: &[PromptButton]) -> TextInput {
    match command(line.trim(), buttons) {
        Some(Ok(Command::Quit)) => TextInput::Quit,
        Some(Ok(Command::Button(button))) => TextInput::Button(button),
        Some(Err(message)) => TextInput::Invalid(message),
        None if line.trim().is_empty() => TextInput::Keep,
        None => TextInput::Submit(line.to_string()),
    }
}
