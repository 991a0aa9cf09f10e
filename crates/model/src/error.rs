use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred while asking for an estimate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service could not be reached at all (connection refused, DNS
    /// failure, network unreachable).
    TransportUnavailable,
    /// The service answered with a non-success status.
    UpstreamRejected,
    /// The service answered with success, but the body was unusable.
    MalformedResponse,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TransportUnavailable => {
                write!(f, "Transport unavailable")
            }
            ErrorKind::UpstreamRejected => write!(f, "Upstream rejected"),
            ErrorKind::MalformedResponse => write!(f, "Malformed response"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}
