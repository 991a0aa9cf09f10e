use serde::{Deserialize, Serialize};

/// A successful answer from the prediction service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// The generated estimate text.
    ///
    /// A well-formed answer may still lack this field; that is not an
    /// error at this layer.
    pub generated_text: Option<String>,
}

impl PredictionResponse {
    /// Creates a response carrying the given text.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            generated_text: Some(text.into()),
        }
    }
}
