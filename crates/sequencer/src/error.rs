use autocode_common::FromMessage;

/// Interrupts raised by a prompt instead of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSignal {
    /// Re-run the previous step.
    Back,
    /// Abandon the chain.
    Cancel,
    /// Re-run the interrupted step.
    Resume,
}

impl std::fmt::Display for FlowSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Back => write!(f, "back"),
            Self::Cancel => write!(f, "cancel"),
            Self::Resume => write!(f, "resume"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Flow control, recovered by the sequencer.
    #[error("flow interrupted: {0}")]
    Flow(FlowSignal),

    #[error("prompt surface error: {message}")]
    Surface { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn surface(message: impl Into<String>) -> Self {
        Self::Surface {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// The flow signal carried by this error, if any.
    #[must_use]
    pub fn signal(&self) -> Option<FlowSignal> {
        match self {
            Self::Flow(signal) => Some(*signal),
            _ => None,
        }
    }
}

impl From<FlowSignal> for Error {
    fn from(signal: FlowSignal) -> Self {
        Self::Flow(signal)
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

autocode_common::impl_context!();

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(FlowSignal::Back, "flow interrupted: back")]
    #[case(FlowSignal::Cancel, "flow interrupted: cancel")]
    #[case(FlowSignal::Resume, "flow interrupted: resume")]
    fn signals_travel_as_errors(#[case] signal: FlowSignal, #[case] shown: &str) {
        let err: Error = signal.into();
        assert_eq!(err.signal(), Some(signal));
        assert_eq!(err.to_string(), shown);
    }

    #[test]
    fn other_errors_carry_no_signal() {
        assert_eq!(Error::surface("gone").signal(), None);
        assert_eq!(Error::message("x").signal(), None);
    }
}
