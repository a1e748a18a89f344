//! Domain models for the Business Subscription Registry

mod business;

pub use business::*;
