use serde::{Deserialize, Serialize};
use vroomy_model::ErrorKind;

/// How the scripted provider answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// A successful answer. `None` models a well-formed body without the
    /// `generated_text` field.
    #[serde(rename = "estimate")]
    Estimate(Option<String>),
    /// A classified failure.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
    /// The request future panics instead of resolving.
    #[serde(rename = "panic")]
    Panic,
}

impl PresetReply {
    /// Creates a successful reply with the given text.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Estimate(Some(text.into()))
    }

    /// Creates a failure of the given kind, without status or detail.
    #[inline]
    pub fn failure(kind: ErrorKind) -> Self {
        Self::Failure(PresetFailure {
            kind,
            status: None,
            detail: None,
        })
    }

    /// Creates an upstream rejection with a status and optional detail.
    #[inline]
    pub fn rejected(status: u16, detail: Option<&str>) -> Self {
        Self::Failure(PresetFailure {
            kind: ErrorKind::UpstreamRejected,
            status: Some(status),
            detail: detail.map(ToOwned::to_owned),
        })
    }
}

/// A scripted failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetFailure {
    /// Kind reported by the error.
    pub kind: ErrorKind,
    /// Status code reported by the error, if any.
    pub status: Option<u16>,
    /// Detail reported by the error, if any.
    pub detail: Option<String>,
}
