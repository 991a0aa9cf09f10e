mod builder;
mod controller;
mod state;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

pub use builder::ChatSessionBuilder;
pub use controller::{ChatController, ChatStage};
use state::{Command, CommandSender, SessionState};

use crate::error::SessionUnavailable;
use crate::transcript::ChatMessage;

type MessageCallback = Arc<dyn Fn(&ChatMessage) + Send + Sync>;
type IdleCallback = Arc<dyn Fn() + Send + Sync>;

/// A point-in-time copy of a session's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSnapshot {
    /// All messages, in insertion order.
    pub transcript: Vec<ChatMessage>,
    /// Whether a submission is waiting for its reply.
    pub awaiting_response: bool,
    /// The text being composed.
    pub pending_input: String,
}

/// A running chat session.
///
/// The session's state lives in its own task and is only ever mutated
/// there, one command at a time, in the order commands were sent. At most
/// one estimate is in flight: anything submitted meanwhile is dropped.
///
/// The task ends once every handle to the session is dropped. An estimate
/// still in flight then runs to completion and its reply is discarded.
#[derive(Clone)]
pub struct ChatSession {
    cmd_tx: CommandSender,
}

impl ChatSession {
    /// Submits a user message. Blank text, and anything sent while a
    /// reply is awaited, is ignored.
    #[inline]
    pub fn send_user_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionUnavailable> {
        self.send(Command::SendUserMessage(text.into()))
    }

    /// Replaces the text being composed.
    #[inline]
    pub fn set_pending_input<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionUnavailable> {
        self.send(Command::SetPendingInput(text.into()))
    }

    /// Submits the text being composed, with the same rules as
    /// [`ChatSession::send_user_message`].
    #[inline]
    pub fn submit_pending(&self) -> Result<(), SessionUnavailable> {
        self.send(Command::SubmitPending)
    }

    /// Returns a copy of the session's state.
    pub async fn snapshot(&self) -> Result<ChatSnapshot, SessionUnavailable> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| SessionUnavailable)
    }

    /// Returns all messages, in insertion order.
    #[inline]
    pub async fn transcript(
        &self,
    ) -> Result<Vec<ChatMessage>, SessionUnavailable> {
        Ok(self.snapshot().await?.transcript)
    }

    /// Returns whether a submission is waiting for its reply.
    #[inline]
    pub async fn is_awaiting_response(
        &self,
    ) -> Result<bool, SessionUnavailable> {
        Ok(self.snapshot().await?.awaiting_response)
    }

    #[inline]
    fn send(&self, cmd: Command) -> Result<(), SessionUnavailable> {
        self.cmd_tx.send(cmd).map_err(|_| SessionUnavailable)
    }

    fn spawn(state: SessionState) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let weak_tx = cmd_tx.downgrade();
        tokio::spawn(
            run_session(state, weak_tx, cmd_rx)
                .instrument(trace_span!("chat session")),
        );
        Self { cmd_tx }
    }
}

async fn run_session(
    mut state: SessionState,
    cmd_tx: mpsc::WeakUnboundedSender<Command>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
) {
    debug!("started");
    if let Some(greeting) = state.controller.transcript().last().cloned() {
        state.notify_message(&greeting);
    }

    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");
        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            state.handle(cmd, &cmd_tx);
        });
    }
    debug!("will terminate");
}
