//! sqlcalc - a deliberately vulnerable SQL calculator wargame service
//!
//! This library provides the components of the service:
//! - Backing engine access (single shared MySQL handle)
//! - Query execution (verbatim, with error text capture)
//! - Result formatting (line-based responses)
//! - TCP server (serial acceptor and session handler)
//!
//! The service prompts a client for two operands and an operator, pastes
//! the raw strings into a `SELECT` statement and reflects the engine's
//! rows or error text back. The missing sanitization and the verbatim
//! error channel are the point of the exercise, not defects.

pub mod backend;
pub mod error;
pub mod executor;
pub mod format;
pub mod server;

pub use error::{Error, Result};
