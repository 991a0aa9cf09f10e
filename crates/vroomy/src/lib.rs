//! A terminal front-end for the Vroomy car-price estimation assistant.
//!
//! The crate ships the `vroomy` binary. Its building blocks (environment
//! configuration, command parsing and screen rendering) are exposed as a
//! library so other hosts can reuse them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod commands;
pub mod config;
pub mod screens;

/// Re-exports of [`vroomy_core`] crate.
pub mod core {
    pub use vroomy_core::*;
}
