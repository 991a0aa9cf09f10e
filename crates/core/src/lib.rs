//! Core logic of the estimation assistant: the chat transcript, the
//! prediction client, the chat session and the screen navigation.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod app;
mod chat;
mod error;
pub mod navigation;
mod prediction_client;
pub mod replies;
pub mod transcript;

pub use app::{App, AppBuilder};
pub use chat::{
    ChatController, ChatSession, ChatSessionBuilder, ChatSnapshot, ChatStage,
};
pub use error::SessionUnavailable;
pub use navigation::{Navigator, Screen};
pub use prediction_client::{PredictionClient, normalize_currency};
pub use replies::Replies;
pub use transcript::{ChatMessage, MessageId, Role, Transcript};
