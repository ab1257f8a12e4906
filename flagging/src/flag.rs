//! Flag records.

use curia_types::{BlockHeight, ContentId, FlagId, Identity};
use serde::{Deserialize, Serialize};

/// Why content was flagged. The set is closed; anything else is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagReason {
    Spam,
    Harassment,
    Misinformation,
    IllegalContent,
    Copyright,
    Other,
}

/// One reporter's flag against one content item.
///
/// At most one flag exists per (content, reporter) pair. Flags are never
/// deleted; resolution only stamps a label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlagRecord {
    pub id: FlagId,
    pub content_id: ContentId,
    pub reporter: Identity,
    pub reason: FlagReason,
    pub description: String,
    pub created_at: BlockHeight,
    pub resolved: bool,
    /// Informational label stamped by the owner; decoupled from the DAO
    /// outcome and never fed back into content status.
    pub resolution: Option<String>,
}
