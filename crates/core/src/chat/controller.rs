use std::mem;

use crate::transcript::{ChatMessage, Role, Transcript};

/// The stage of a chat controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChatStage {
    /// Ready to accept a submission.
    #[default]
    Idle,
    /// A submission is waiting for its reply. Further submissions are
    /// dropped until it resolves.
    AwaitingResponse,
}

/// The chat state machine.
///
/// It owns the transcript and the text being composed, and cycles between
/// [`ChatStage::Idle`] and [`ChatStage::AwaitingResponse`] for as long as
/// it lives. It performs no I/O: whoever drives it asks for the estimate
/// and reports back with [`ChatController::resolve`] or
/// [`ChatController::reject`].
#[derive(Clone, Debug)]
pub struct ChatController {
    transcript: Transcript,
    pending_input: String,
    stage: ChatStage,
}

impl ChatController {
    /// Creates a controller whose transcript starts with the greeting.
    pub fn new<S: Into<String>>(greeting: S) -> Self {
        let mut transcript = Transcript::new();
        transcript.append(Role::Assistant, greeting);
        Self {
            transcript,
            pending_input: String::new(),
            stage: ChatStage::Idle,
        }
    }

    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the current stage.
    #[inline]
    pub fn stage(&self) -> ChatStage {
        self.stage
    }

    /// Returns `true` while a submission is waiting for its reply.
    #[inline]
    pub fn is_awaiting_response(&self) -> bool {
        self.stage == ChatStage::AwaitingResponse
    }

    /// Returns the text being composed.
    #[inline]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the text being composed.
    #[inline]
    pub fn set_pending_input<S: Into<String>>(&mut self, text: S) {
        self.pending_input = text.into();
    }

    /// Submits a user message.
    ///
    /// Blank text and submissions while awaiting a response are ignored
    /// and return `None`. Otherwise the message is appended as typed, the
    /// pending input is cleared and the controller starts awaiting.
    pub fn submit(&mut self, text: &str) -> Option<&ChatMessage> {
        if self.is_awaiting_response() {
            warn!("dropping a submission while awaiting a response");
            return None;
        }
        if text.trim().is_empty() {
            return None;
        }
        self.pending_input.clear();
        self.stage = ChatStage::AwaitingResponse;
        Some(self.transcript.append(Role::User, text))
    }

    /// Submits the pending input, with the same rules as
    /// [`ChatController::submit`]. The pending input is kept if the
    /// submission is ignored.
    pub fn submit_pending(&mut self) -> Option<&ChatMessage> {
        if self.is_awaiting_response() || self.pending_input.trim().is_empty()
        {
            return None;
        }
        let text = mem::take(&mut self.pending_input);
        self.submit(&text)
    }

    /// Appends the reply to the awaited submission and goes back to idle.
    ///
    /// Returns `None` if nothing was awaited.
    pub fn resolve<S: Into<String>>(
        &mut self,
        reply: S,
    ) -> Option<&ChatMessage> {
        if !self.is_awaiting_response() {
            warn!("ignoring a reply while idle");
            return None;
        }
        self.stage = ChatStage::Idle;
        Some(self.transcript.append(Role::Assistant, reply))
    }

    /// Appends the fallback text after the awaited submission failed
    /// outright, and goes back to idle.
    ///
    /// Returns `None` if nothing was awaited.
    pub fn reject(&mut self, fallback: &str) -> Option<&ChatMessage> {
        if !self.is_awaiting_response() {
            warn!("ignoring a failure while idle");
            return None;
        }
        self.stage = ChatStage::Idle;
        Some(self.transcript.append(Role::Assistant, fallback))
    }
}
