/// A request to be sent to the prediction service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PredictionRequest {
    /// The free-text vehicle description typed by the user.
    ///
    /// Callers must not send an empty text. Providers forward it as-is,
    /// without trimming.
    pub text: String,
}

impl PredictionRequest {
    /// Creates a request for the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}
