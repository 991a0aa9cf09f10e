use std::error::Error;
use std::fmt;

/// A type of error which is returned when talking to a chat session that
/// doesn't exist, either because the chat screen is not shown or because
/// the session has shut down.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SessionUnavailable;

impl fmt::Debug for SessionUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionUnavailable").finish()
    }
}

impl fmt::Display for SessionUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "no chat session is running".fmt(f)
    }
}

impl Error for SessionUnavailable {}
