//! DAO proposal engine for the Curia protocol.
//!
//! Flagged content gets a time-boxed removal/keep vote. Votes are weighted
//! by the voter's token balance at cast time; outcomes execute only after
//! the window closes and combined turnout clears a basis-point quorum of
//! total supply. The [`ballot`] module carries the window/tally/quorum
//! arithmetic shared with the appeal engine.

pub mod ballot;
pub mod engine;
pub mod error;
pub mod proposal;

pub use ballot::{BallotRecord, Ballots, Tally, VotingWindow, quorum_threshold, BPS_DENOMINATOR};
pub use engine::{ProposalEngine, ProposalEvent};
pub use error::ProposalError;
pub use proposal::{Proposal, ProposalKind, ProposalResult};
