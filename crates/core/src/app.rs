use vroomy_model::PredictionProvider;

use crate::chat::{ChatSession, ChatSessionBuilder};
use crate::error::SessionUnavailable;
use crate::navigation::{Navigator, Screen};
use crate::replies::Replies;
use crate::transcript::ChatMessage;

/// [`App`] builder.
pub struct AppBuilder {
    session_builder: ChatSessionBuilder,
}

impl AppBuilder {
    /// Creates a builder with the specified prediction provider.
    #[inline]
    pub fn with_prediction_provider<P: PredictionProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            session_builder: ChatSessionBuilder::with_prediction_provider(
                provider,
            ),
        }
    }

    /// Replaces the default replies.
    #[inline]
    pub fn with_replies(mut self, replies: Replies) -> Self {
        self.session_builder = self.session_builder.with_replies(replies);
        self
    }

    /// Attaches a callback to be invoked for every message appended to the
    /// transcript of any chat session.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&ChatMessage) + Send + Sync + 'static,
    ) -> Self {
        self.session_builder = self.session_builder.on_message(on_message);
        self
    }

    /// Attaches a callback to be invoked when a chat session gets back to
    /// idle after a reply.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.session_builder = self.session_builder.on_idle(on_idle);
        self
    }

    /// Builds the app, showing the landing page.
    #[inline]
    pub fn build(self) -> App {
        App {
            navigator: Navigator::new(),
            session_builder: self.session_builder,
            chat: None,
        }
    }
}

/// The whole application: which screen is shown, and the chat session
/// while the chat screen is shown.
///
/// Leaving the chat discards its session. Coming back starts a fresh one
/// with only the greeting.
pub struct App {
    navigator: Navigator,
    session_builder: ChatSessionBuilder,
    chat: Option<ChatSession>,
}

impl App {
    /// Returns the screen currently shown.
    #[inline]
    pub fn active_screen(&self) -> Screen {
        self.navigator.active_screen()
    }

    /// Shows the given screen. Returns `false` if it was already shown, in
    /// which case nothing changes.
    ///
    /// Showing the chat starts a session, so this must be called within a
    /// tokio runtime.
    pub fn navigate_to(&mut self, screen: Screen) -> bool {
        if !self.navigator.navigate_to(screen) {
            return false;
        }
        self.chat = match screen {
            Screen::Chat => Some(self.session_builder.clone().build()),
            Screen::Landing => None,
        };
        true
    }

    /// Returns the chat session, if the chat screen is shown.
    #[inline]
    pub fn chat(&self) -> Option<&ChatSession> {
        self.chat.as_ref()
    }

    /// Submits a user message to the chat session.
    pub fn send_user_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionUnavailable> {
        self.chat()
            .ok_or(SessionUnavailable)?
            .send_user_message(text)
    }

    /// Returns the transcript of the chat session.
    pub async fn transcript(
        &self,
    ) -> Result<Vec<ChatMessage>, SessionUnavailable> {
        self.chat().ok_or(SessionUnavailable)?.transcript().await
    }

    /// Returns whether the chat session is waiting for a reply.
    pub async fn is_awaiting_response(
        &self,
    ) -> Result<bool, SessionUnavailable> {
        self.chat()
            .ok_or(SessionUnavailable)?
            .is_awaiting_response()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::watch;
    use tokio::time::timeout;
    use vroomy_test_model::{PresetReply, ScriptedProvider};

    use super::*;

    fn build_app(provider: ScriptedProvider) -> (App, watch::Receiver<usize>) {
        let (idle_tx, idle_rx) = watch::channel(0usize);
        let app = AppBuilder::with_prediction_provider(provider)
            .on_idle(move || {
                idle_tx.send_modify(|count| *count += 1);
            })
            .build();
        (app, idle_rx)
    }

    #[tokio::test]
    async fn test_starts_on_landing() {
        let (app, _) = build_app(ScriptedProvider::default());
        assert_eq!(app.active_screen(), Screen::Landing);
        assert!(app.chat().is_none());
        assert_eq!(app.send_user_message("Golf 2020"), Err(SessionUnavailable));
        assert_eq!(app.transcript().await, Err(SessionUnavailable));
        assert_eq!(app.is_awaiting_response().await, Err(SessionUnavailable));
    }

    #[tokio::test]
    async fn test_leaving_chat_resets_session() {
        let provider = ScriptedProvider::default();
        provider.push_reply(PresetReply::text("Price: £9000"));
        let (mut app, mut idle_rx) = build_app(provider);

        assert!(app.navigate_to(Screen::Chat));
        app.send_user_message("Golf 2020").unwrap();
        timeout(Duration::from_secs(1), idle_rx.wait_for(|n| *n >= 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(app.transcript().await.unwrap().len(), 3);

        assert!(app.navigate_to(Screen::Landing));
        assert!(app.chat().is_none());
        assert!(app.navigate_to(Screen::Chat));
        assert_eq!(app.active_screen(), Screen::Chat);

        let transcript = app.transcript().await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].content(), Replies::default().greeting);
        assert!(!app.is_awaiting_response().await.unwrap());
    }

    #[tokio::test]
    async fn test_same_screen_keeps_session() {
        let provider = ScriptedProvider::default();
        provider.push_reply(PresetReply::text("Price: £9000"));
        let (mut app, mut idle_rx) = build_app(provider);

        app.navigate_to(Screen::Chat);
        app.send_user_message("Golf 2020").unwrap();
        timeout(Duration::from_secs(1), idle_rx.wait_for(|n| *n >= 1))
            .await
            .unwrap()
            .unwrap();

        assert!(!app.navigate_to(Screen::Chat));
        assert_eq!(app.transcript().await.unwrap().len(), 3);
    }
}
