//! Fundamental types for the Curia content-governance protocol.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: identities, the logical clock, content status, record ids,
//! and the governance parameters.

pub mod height;
pub mod identity;
pub mod params;
pub mod status;

pub use height::BlockHeight;
pub use identity::Identity;
pub use params::{GovernanceParams, MAX_QUORUM_BPS, MIN_QUORUM_BPS};
pub use status::ContentStatus;

/// Raw token amount, in the oracle's smallest unit.
pub type TokenAmount = u128;

/// Monotonic id of a registered content item.
pub type ContentId = u64;

/// Monotonic id of a flag record.
pub type FlagId = u64;

/// Monotonic id of a removal/keep proposal.
pub type ProposalId = u64;

/// Monotonic id of an appeal.
pub type AppealId = u64;
