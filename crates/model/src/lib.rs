//! An abstraction layer for price prediction services.
//!
//! This crate establishes a unified protocol for the chat core to talk to
//! a remote estimation service, so that the core can switch between the
//! real HTTP service and local fakes without modifying its own code.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
