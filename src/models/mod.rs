//! Data models for the gift list application.
//!
//! Field names serialize in camelCase, matching what the browser UI reads and sends.

mod gift;
mod link;
pub mod loose;
mod person;
mod reorder;

pub use gift::*;
pub use link::*;
pub use person::*;
pub use reorder::*;
