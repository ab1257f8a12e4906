//! Content ledger — owns each content item's identity and status.
//!
//! This crate is the leaf dependency of the governance engines: flagging,
//! proposals, and appeals all mutate content state exclusively through
//! [`ContentLedger::set_status`], the single authorized choke point.

pub mod error;
pub mod event;
pub mod ledger;

pub use error::ContentError;
pub use event::ContentEvent;
pub use ledger::{ContentLedger, ContentRecord, StatusAuthority};
