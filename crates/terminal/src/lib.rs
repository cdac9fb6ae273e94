//! Plain terminal implementation of the prompt surface.
//!
//! Prompts are printed as numbered lists or a single input line and
//! answered by typing a line. Input is read on a background task so prompts
//! can wait for it alongside other work.

pub mod input;
pub mod notify;
pub mod output;
pub mod surface;

pub use {
    input::LineInput,
    notify::TerminalNotifier,
    output::{Output, Transcript},
    surface::TerminalSurface,
};
