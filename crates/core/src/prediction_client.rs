use std::borrow::Cow;
use std::pin::Pin;
use std::sync::Arc;

use tracing::Instrument;
use vroomy_model::{
    ErrorKind, PredictionProvider, PredictionProviderError, PredictionRequest,
    PredictionResponse,
};

use crate::replies::Replies;

type PredictResult =
    Result<PredictionResponse, Box<dyn PredictionProviderError>>;
type BoxedPredictFuture = Pin<Box<dyn Future<Output = PredictResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(PredictionRequest) -> BoxedPredictFuture + Send + Sync>;

/// A wrapper around a prediction provider that turns whatever the service
/// answers into text the assistant can show.
///
/// There are two layers: [`PredictionClient::try_estimate`] keeps failures
/// classified, and [`PredictionClient::estimate`] absorbs them into one of
/// the configured [`Replies`].
#[derive(Clone)]
pub struct PredictionClient {
    handler_fn: HandlerFn,
    replies: Arc<Replies>,
}

impl PredictionClient {
    /// Creates a client for the given provider, with the default replies.
    #[inline]
    pub fn new<P: PredictionProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `PredictionClient` doesn't
        // have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.predict(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    let resp_or_err = fut.await;
                    match resp_or_err {
                        Ok(resp) => {
                            trace!("got a response: {:?}", resp);
                            Ok(resp)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err)
                                as Box<dyn PredictionProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("prediction client req")),
            )
        });
        Self {
            handler_fn,
            replies: Arc::new(Replies::default()),
        }
    }

    /// Replaces the replies used for placeholders and failures.
    #[inline]
    pub fn with_replies(mut self, replies: Arc<Replies>) -> Self {
        self.replies = replies;
        self
    }

    /// Asks for an estimate, keeping failures classified.
    ///
    /// On success the text is currency-normalized. A valid answer without
    /// text yields the missing-estimate placeholder rather than an error.
    /// `text` must not be empty; it is sent as-is.
    pub async fn try_estimate(
        &self,
        text: &str,
    ) -> Result<String, Box<dyn PredictionProviderError>> {
        let resp = (self.handler_fn)(PredictionRequest::new(text)).await?;
        let generated = match resp.generated_text {
            Some(generated) => generated,
            None => {
                warn!("the service answered without an estimate");
                self.replies.missing_estimate.clone()
            }
        };
        Ok(normalize_currency(&generated).into_owned())
    }

    /// Asks for an estimate. Never fails: every failure is converted into
    /// a displayable reply.
    pub async fn estimate(&self, text: &str) -> String {
        match self.try_estimate(text).await {
            Ok(reply) => reply,
            Err(err) => self.reply_for_error(err.as_ref()),
        }
    }

    /// Returns the reply shown for a classified failure.
    pub fn reply_for_error(&self, err: &dyn PredictionProviderError) -> String {
        match err.kind() {
            ErrorKind::TransportUnavailable => {
                self.replies.service_paused.clone()
            }
            ErrorKind::UpstreamRejected => match err.detail() {
                Some(detail) if !detail.is_empty() => detail.to_owned(),
                _ => self.replies.upstream_rejected_for(err.status()),
            },
            ErrorKind::MalformedResponse | ErrorKind::Other => {
                self.replies.technical_difficulties.clone()
            }
        }
    }
}

/// Rewrites every pound sign into a euro sign.
///
/// This only changes the glyph; amounts are left untouched.
pub fn normalize_currency(text: &str) -> Cow<'_, str> {
    if text.contains('£') {
        Cow::Owned(text.replace('£', "€"))
    } else {
        Cow::Borrowed(text)
    }
}
