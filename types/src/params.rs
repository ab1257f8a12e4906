//! Governance parameters — balance thresholds, voting window, quorum.
//!
//! One flat struct shared by the flagging/proposal/appeal engines. The
//! quorum percentage is owner-tunable at runtime within
//! [`MIN_QUORUM_BPS`]..=[`MAX_QUORUM_BPS`]; everything else is fixed at
//! construction.

use crate::TokenAmount;
use serde::{Deserialize, Serialize};

/// Lowest quorum the owner may set: 100 bps = 1% of total supply.
pub const MIN_QUORUM_BPS: u32 = 100;

/// Highest quorum the owner may set: 10_000 bps = 100% of total supply.
pub const MAX_QUORUM_BPS: u32 = 10_000;

/// Tunable parameters of the governance engines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum token balance a reporter must hold to flag content.
    /// Re-checked against the oracle at flag time, never snapshotted.
    pub min_flag_balance: TokenAmount,

    /// Minimum token balance required to open a removal/keep proposal.
    pub min_proposal_stake: TokenAmount,

    /// Minimum token balance required to open an appeal.
    pub min_appeal_stake: TokenAmount,

    /// Length of every voting window, in blocks. A proposal or appeal
    /// opened at height `h` accepts votes through `h + voting_period`.
    pub voting_period: u64,

    /// Quorum threshold in basis points of total token supply
    /// (e.g., 1000 = 10%). Combined for+against voting power must reach
    /// `total_supply * quorum_bps / 10_000` before an outcome executes.
    pub quorum_bps: u32,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            min_flag_balance: 10,
            min_proposal_stake: 100,
            min_appeal_stake: 100,
            voting_period: 100,
            quorum_bps: 1_000,
        }
    }
}
