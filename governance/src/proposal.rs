//! Proposal records.

use crate::ballot::{Tally, VotingWindow};
use curia_types::{ContentId, Identity, ProposalId};
use serde::{Deserialize, Serialize};

/// What the proposal asks the community to do with flagged content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// Remove the content if approved.
    Remove,
    /// Keep the content (return it to `Active`) if approved.
    Keep,
}

/// The executed outcome of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalResult {
    Approved,
    Rejected,
}

/// A removal/keep proposal against one content item.
///
/// Executes at most once; the record itself is never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub content_id: ContentId,
    pub proposer: Identity,
    pub kind: ProposalKind,
    pub description: String,
    pub tally: Tally,
    pub window: VotingWindow,
    pub executed: bool,
    pub result: Option<ProposalResult>,
}
