//! User-visible error kinds for a submission and the internal delivery error.

use thiserror::Error;

/// Errors shown inline under the URL field.
///
/// The `Display` text is exactly what the user reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Nothing left after trimming whitespace
    #[error("Please enter an Instagram reel URL")]
    EmptyInput,

    /// Non-empty input that matches none of the accepted URL shapes
    #[error("Please enter a valid Instagram reel URL (e.g., https://www.instagram.com/reel/...)")]
    InvalidFormat,

    /// Catch-all for a failed pipeline; the fake pipeline never produces it
    #[error("Failed to process the reel. Please try again.")]
    ProcessingFailed,
}

/// Failure while handing the payload to the save target.
///
/// Never reaches the user: delivery always reports success.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to write demo payload: {0}")]
    Io(#[from] std::io::Error),
}
