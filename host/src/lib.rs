//! Business Subscription Registry - Session Host
//!
//! Drives a single registry session over newline-delimited JSON on
//! stdin/stdout and refreshes subscription statuses on a timer.

pub mod config;
pub mod error;
pub mod protocol;
pub mod refresh;
pub mod runner;
pub mod session;
pub mod telemetry;

pub use crate::config::Config;
pub use error::{HostError, HostResult};
pub use session::Session;
