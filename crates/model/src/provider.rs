use std::error::Error;

use crate::error::ErrorKind;
use crate::request::PredictionRequest;
use crate::response::PredictionResponse;

/// The error type for a prediction provider.
pub trait PredictionProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the error detail reported by the service, if any.
    ///
    /// Only meaningful for [`ErrorKind::UpstreamRejected`], where the
    /// service may explain why it refused the request.
    fn detail(&self) -> Option<&str> {
        None
    }

    /// Returns the status code reported by the service, if any.
    fn status(&self) -> Option<u16> {
        None
    }
}

/// A type that represents a prediction service.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
///
/// Each call to [`PredictionProvider::predict`] must perform at most one
/// exchange with the service. Retrying is up to the caller.
pub trait PredictionProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: PredictionProviderError;

    /// Asks the service for an estimate.
    fn predict(
        &self,
        req: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse, Self::Error>> + Send + 'static;
}
