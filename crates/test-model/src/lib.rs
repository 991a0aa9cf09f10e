//! A local scripted prediction provider for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use vroomy_model::{
    ErrorKind, PredictionProvider, PredictionProviderError, PredictionRequest,
    PredictionResponse,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    failure: PresetFailure,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.message, self.failure.kind)
    }
}

impl StdError for Error {}

impl PredictionProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.failure.kind
    }

    #[inline]
    fn detail(&self) -> Option<&str> {
        self.failure.detail.as_deref()
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.failure.status
    }
}

#[derive(Default)]
struct Shared {
    script: VecDeque<PresetReply>,
    requests: Vec<String>,
}

/// A local scripted provider for testing purpose.
///
/// Before sending requests, you need to push the replies the provider
/// should give, in order. Each request consumes one reply. If the script
/// runs out, an error of kind [`ErrorKind::Other`] is returned.
///
/// Clones share the same script and request log, so a test can keep a
/// clone around to inspect what the code under test has sent.
///
/// # Note
///
/// This type is not optimized for production use. You should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    shared: Arc<Mutex<Shared>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    /// Appends a reply to the script.
    #[inline]
    pub fn push_reply(&self, reply: PresetReply) {
        self.lock().script.push_back(reply);
    }

    /// Sets how long each request takes before it resolves.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns how many requests have been made so far.
    #[inline]
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Returns the texts of all requests made so far.
    #[inline]
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl Debug for ScriptedProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let shared = self.lock();
        f.debug_struct("ScriptedProvider")
            .field("remaining", &shared.script.len())
            .field("calls", &shared.requests.len())
            .field("delay", &self.delay)
            .finish()
    }
}

impl PredictionProvider for ScriptedProvider {
    type Error = crate::Error;

    fn predict(
        &self,
        req: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse, Self::Error>> + Send + 'static
    {
        let reply = {
            let mut shared = self.lock();
            shared.requests.push(req.text.clone());
            shared.script.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match reply {
                Some(PresetReply::Estimate(generated_text)) => {
                    Ok(PredictionResponse { generated_text })
                }
                Some(PresetReply::Failure(failure)) => Err(Error {
                    message: "scripted failure",
                    failure,
                }),
                Some(PresetReply::Panic) => panic!("scripted panic"),
                None => Err(Error {
                    message: "not enough replies",
                    failure: PresetFailure {
                        kind: ErrorKind::Other,
                        status: None,
                        detail: None,
                    },
                }),
            }
        }
    }
}
