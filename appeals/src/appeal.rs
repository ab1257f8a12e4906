//! Appeal records.

use curia_governance::ballot::{Tally, VotingWindow};
use curia_types::{AppealId, ContentId, Identity};
use serde::{Deserialize, Serialize};

/// The resolved outcome of an appeal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppealResult {
    /// The removal was overturned; the content is restored.
    Upheld,
    /// The removal stands.
    Rejected,
}

/// An author's appeal against a removal.
///
/// At most one appeal ever exists per content item; resolves at most once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Appeal {
    pub id: AppealId,
    pub content_id: ContentId,
    pub appellant: Identity,
    pub reason: String,
    pub evidence: String,
    pub tally: Tally,
    pub window: VotingWindow,
    pub resolved: bool,
    pub result: Option<AppealResult>,
}
