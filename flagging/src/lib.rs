//! Flagging engine — records community flags against content.
//!
//! The first flag on a content item transitions it to `Flagged`, which makes
//! it eligible for a removal/keep proposal. Later flags only accumulate in
//! the counters; they never re-trigger the status call.

pub mod engine;
pub mod error;
pub mod flag;

pub use engine::{FlagEngine, FlagEvent};
pub use error::FlagError;
pub use flag::{FlagReason, FlagRecord};
