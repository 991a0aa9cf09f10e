use std::fmt::{self, Debug};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;
use tracing::Instrument;

use super::controller::ChatController;
use super::{ChatSnapshot, IdleCallback, MessageCallback};
use crate::prediction_client::PredictionClient;
use crate::replies::Replies;
use crate::transcript::ChatMessage;

pub(super) type CommandSender = mpsc::UnboundedSender<Command>;
type WeakCommandSender = mpsc::WeakUnboundedSender<Command>;

/// Everything a session task owns. Only the session task touches it.
pub(super) struct SessionState {
    pub(super) controller: ChatController,
    pub(super) client: PredictionClient,
    pub(super) replies: Arc<Replies>,
    pub(super) on_message: Option<MessageCallback>,
    pub(super) on_idle: Option<IdleCallback>,
    pub(super) next_request_id: u64,
}

pub(super) enum Command {
    SendUserMessage(String),
    SetPendingInput(String),
    SubmitPending,
    Snapshot(oneshot::Sender<ChatSnapshot>),
    EstimateFinished {
        request_id: u64,
        outcome: Result<String, JoinError>,
    },
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SendUserMessage(text) => {
                f.debug_tuple("SendUserMessage").field(text).finish()
            }
            Command::SetPendingInput(text) => {
                f.debug_tuple("SetPendingInput").field(text).finish()
            }
            Command::SubmitPending => f.write_str("SubmitPending"),
            Command::Snapshot(_) => f.write_str("Snapshot"),
            Command::EstimateFinished {
                request_id,
                outcome,
            } => f
                .debug_struct("EstimateFinished")
                .field("request_id", request_id)
                .field("ok", &outcome.is_ok())
                .finish(),
        }
    }
}

impl SessionState {
    pub(super) fn handle(&mut self, cmd: Command, cmd_tx: &WeakCommandSender) {
        match cmd {
            Command::SendUserMessage(text) => {
                let accepted = self.controller.submit(&text).cloned();
                self.on_submitted(accepted, cmd_tx);
            }
            Command::SetPendingInput(text) => {
                self.controller.set_pending_input(text);
            }
            Command::SubmitPending => {
                let accepted = self.controller.submit_pending().cloned();
                self.on_submitted(accepted, cmd_tx);
            }
            Command::Snapshot(reply_tx) => {
                reply_tx.send(self.snapshot()).ok();
            }
            Command::EstimateFinished {
                request_id,
                outcome,
            } => {
                self.finish_estimate(request_id, outcome);
            }
        }
    }

    pub(super) fn notify_message(&self, message: &ChatMessage) {
        if let Some(on_message) = &self.on_message {
            on_message(message);
        }
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            transcript: self.controller.transcript().all().to_vec(),
            awaiting_response: self.controller.is_awaiting_response(),
            pending_input: self.controller.pending_input().to_owned(),
        }
    }

    fn on_submitted(
        &mut self,
        accepted: Option<ChatMessage>,
        cmd_tx: &WeakCommandSender,
    ) {
        let Some(message) = accepted else {
            trace!("submission ignored");
            return;
        };
        self.notify_message(&message);
        self.start_estimate(message.content().to_owned(), cmd_tx);
    }

    /// Runs the estimate in its own task, so that a failing request can't
    /// take the session down with it.
    fn start_estimate(&mut self, text: String, cmd_tx: &WeakCommandSender) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let client = self.client.clone();
        let estimate = tokio::spawn(
            async move { client.estimate(&text).await }
                .instrument(trace_span!("estimate", request_id)),
        );

        let cmd_tx = cmd_tx.clone();
        tokio::spawn(async move {
            let outcome = estimate.await;
            let Some(cmd_tx) = cmd_tx.upgrade() else {
                debug!("session is gone, discarding estimate {request_id}");
                return;
            };
            cmd_tx
                .send(Command::EstimateFinished {
                    request_id,
                    outcome,
                })
                .ok();
        });
    }

    fn finish_estimate(
        &mut self,
        request_id: u64,
        outcome: Result<String, JoinError>,
    ) {
        let appended = match outcome {
            Ok(reply) => self.controller.resolve(reply),
            Err(err) => {
                error!("estimate {request_id} failed: {err}");
                self.controller.reject(&self.replies.controller_fault)
            }
        };
        let Some(message) = appended.cloned() else {
            return;
        };
        self.notify_message(&message);
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }
}
