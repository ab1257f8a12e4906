//! Audit events emitted by the content ledger.

use curia_types::{BlockHeight, ContentId, ContentStatus, Identity};
use serde::{Deserialize, Serialize};

/// A record appended to the ledger's event trail on every mutation.
///
/// Events are side-channel output for external observers; nothing in the
/// core reads them back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentEvent {
    Registered {
        content_id: ContentId,
        external_id: String,
        author: Identity,
        at: BlockHeight,
    },
    StatusChanged {
        content_id: ContentId,
        from: ContentStatus,
        to: ContentStatus,
    },
}
