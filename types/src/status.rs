//! Content status lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The moderation status of a content item.
///
/// `active → flagged → (proposal outcome) → active | removed`
/// `removed → appealing → (appeal outcome) → active | removed`
///
/// `Archived` is reachable only via an owner-only administrative action and
/// excludes the content from further flagging/DAO/appeal eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentStatus {
    /// Visible, no governance action pending.
    Active,
    /// At least one community flag recorded; eligible for a removal proposal.
    Flagged,
    /// Removed by an approved proposal (or a rejected appeal).
    Removed,
    /// An appeal vote is open; transient until the appeal resolves.
    Appealing,
    /// Administratively shelved. No further governance.
    Archived,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Flagged => "flagged",
            Self::Removed => "removed",
            Self::Appealing => "appealing",
            Self::Archived => "archived",
        };
        write!(f, "{s}")
    }
}
