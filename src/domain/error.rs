//! Domain error types.

/// Top-level error type for pipjournal. The metric calculator itself is
/// total and never fails; every variant here belongs to the input edge
/// (journal files, CLI arguments).
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal error: {reason}")]
    Journal { reason: String },

    #[error("invalid direction {value:?}: expected buy, sell, long, or short")]
    InvalidDirection { value: String },

    #[error("invalid quality rating {value}: expected 1-5")]
    InvalidQuality { value: u8 },
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Journal { .. } => 1,
            JournalError::InvalidDirection { .. } | JournalError::InvalidQuality { .. } => 2,
        };
        std::process::ExitCode::from(code)
    }
}
