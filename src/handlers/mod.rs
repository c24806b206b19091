//! HTTP handlers.

pub mod person;
pub use person::*;
