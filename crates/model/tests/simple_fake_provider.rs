use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use vroomy_model::{
    ErrorKind, PredictionProvider, PredictionProviderError, PredictionRequest,
    PredictionResponse,
};

#[derive(Debug)]
struct FakeProviderError {
    kind: ErrorKind,
    detail: Option<String>,
}

impl Display for FakeProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeProviderError {}

impl PredictionProviderError for FakeProviderError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn status(&self) -> Option<u16> {
        (self.kind == ErrorKind::UpstreamRejected).then_some(422)
    }
}

/// Quotes a flat price for anything that mentions a year, and rejects the
/// rest the way a validating service would.
struct FakeProvider;

impl PredictionProvider for FakeProvider {
    type Error = FakeProviderError;

    fn predict(
        &self,
        req: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse, Self::Error>> + Send + 'static
    {
        let text = req.text.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            if text.is_empty() {
                return Err(FakeProviderError {
                    kind: ErrorKind::Other,
                    detail: None,
                });
            }
            if !text.chars().any(|c| c.is_ascii_digit()) {
                return Err(FakeProviderError {
                    kind: ErrorKind::UpstreamRejected,
                    detail: Some("year is required".to_owned()),
                });
            }
            Ok(PredictionResponse::with_text(format!("{text}: £9000")))
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prediction() {
        let provider = FakeProvider;
        let req = PredictionRequest::new("Golf 2020");
        let resp = provider.predict(&req).await.unwrap();
        assert_eq!(resp.generated_text.as_deref(), Some("Golf 2020: £9000"));
    }

    #[tokio::test]
    async fn test_rejected() {
        let provider = FakeProvider;
        let req = PredictionRequest::new("Golf");
        let err = provider.predict(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
        assert_eq!(err.detail(), Some("year is required"));
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeProvider;
        let req = PredictionRequest::new("");
        let err = provider.predict(&req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.detail(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_response_without_text() {
        let resp: PredictionResponse =
            serde_json::from_str(r#"{"price": 14500}"#).unwrap();
        assert_eq!(resp, PredictionResponse::default());
    }
}
