use std::sync::Arc;

use vroomy_model::PredictionProvider;

use super::controller::ChatController;
use super::state::SessionState;
use super::{ChatSession, IdleCallback, MessageCallback};
use crate::prediction_client::PredictionClient;
use crate::replies::Replies;
use crate::transcript::ChatMessage;

/// [`ChatSession`] builder.
///
/// The builder can be cloned to start several independent sessions with
/// the same provider and callbacks.
#[derive(Clone)]
pub struct ChatSessionBuilder {
    client: PredictionClient,
    replies: Arc<Replies>,
    on_message: Option<MessageCallback>,
    on_idle: Option<IdleCallback>,
}

impl ChatSessionBuilder {
    /// Creates a new builder with the specified prediction provider.
    #[inline]
    pub fn with_prediction_provider<P: PredictionProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            client: PredictionClient::new(provider),
            replies: Arc::new(Replies::default()),
            on_message: None,
            on_idle: None,
        }
    }

    /// Replaces the default replies.
    #[inline]
    pub fn with_replies(mut self, replies: Replies) -> Self {
        self.replies = Arc::new(replies);
        self
    }

    /// Attaches a callback to be invoked for every message appended to the
    /// transcript, starting with the greeting.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&ChatMessage) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Arc::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the session gets back to idle
    /// after a reply.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Arc::new(on_idle));
        self
    }

    /// Starts the session.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self) -> ChatSession {
        let Self {
            client,
            replies,
            on_message,
            on_idle,
        } = self;

        let state = SessionState {
            controller: ChatController::new(replies.greeting.clone()),
            client: client.with_replies(Arc::clone(&replies)),
            replies,
            on_message,
            on_idle,
            next_request_id: 1,
        };
        ChatSession::spawn(state)
    }
}
