//! Shared types and core logic for the Business Subscription Registry
//!
//! This crate contains the session store, the registration flow and the
//! derived view logic used by the native host and the browser (via WASM).

pub mod config;
pub mod models;
pub mod registration;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

pub use config::*;
pub use models::*;
pub use registration::*;
pub use store::*;
pub use types::*;
pub use validation::*;
pub use view::*;
