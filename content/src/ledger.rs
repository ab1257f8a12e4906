//! The content table and its single authorized status mutator.

use crate::error::ContentError;
use crate::event::ContentEvent;
use curia_types::{BlockHeight, ContentId, ContentStatus, Identity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered content item.
///
/// The id is immutable once assigned; `status` changes only through
/// [`ContentLedger::set_status`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    /// Caller-supplied external identifier (e.g. a content hash). Unique.
    pub external_id: String,
    pub title: String,
    pub category: String,
    pub author: Identity,
    pub status: ContentStatus,
    pub created_at: BlockHeight,
}

/// Who is asking for a status change.
///
/// The three subsystem tags are capability markers: the flagging, proposal,
/// and appeal engines act on their own authority, never on behalf of an
/// arbitrary caller. An `Account` must be the system owner or the content's
/// author.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusAuthority {
    Account(Identity),
    Flagging,
    Proposals,
    Appeals,
}

/// Owns every content record and the status state machine.
pub struct ContentLedger {
    owner: Identity,
    next_id: ContentId,
    by_id: HashMap<ContentId, ContentRecord>,
    by_external_id: HashMap<String, ContentId>,
    author_counts: HashMap<Identity, u64>,
    events: Vec<ContentEvent>,
}

impl ContentLedger {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            next_id: 1,
            by_id: HashMap::new(),
            by_external_id: HashMap::new(),
            author_counts: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// The system owner's identity.
    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    /// Register a new content item with status `Active`.
    pub fn register(
        &mut self,
        external_id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        author: Identity,
        now: BlockHeight,
    ) -> Result<ContentId, ContentError> {
        let external_id = external_id.into();
        let title = title.into();
        if self.by_external_id.contains_key(&external_id) {
            return Err(ContentError::DuplicateContent(external_id));
        }
        if external_id.is_empty() {
            return Err(ContentError::InvalidInput("external id must not be empty"));
        }
        if title.is_empty() {
            return Err(ContentError::InvalidInput("title must not be empty"));
        }

        let id = self.next_id;
        self.next_id += 1;
        let record = ContentRecord {
            id,
            external_id: external_id.clone(),
            title,
            category: category.into(),
            author: author.clone(),
            status: ContentStatus::Active,
            created_at: now,
        };
        self.by_external_id.insert(external_id.clone(), id);
        *self.author_counts.entry(author.clone()).or_insert(0) += 1;
        self.by_id.insert(id, record);

        tracing::info!(content_id = id, external_id = %external_id, author = %author, "content registered");
        self.events.push(ContentEvent::Registered {
            content_id: id,
            external_id,
            author,
            at: now,
        });
        Ok(id)
    }

    /// Change a content item's status. The single choke point every other
    /// component goes through.
    ///
    /// Authorization only: this does not judge which transitions are legal
    /// (it will accept `Active → Active`). Transition legality belongs to
    /// the calling engine's preconditions.
    pub fn set_status(
        &mut self,
        content_id: ContentId,
        new_status: ContentStatus,
        authority: &StatusAuthority,
    ) -> Result<(), ContentError> {
        let record = self
            .by_id
            .get_mut(&content_id)
            .ok_or(ContentError::NotFound(content_id))?;
        match authority {
            StatusAuthority::Account(id) => {
                if *id != self.owner && *id != record.author {
                    return Err(ContentError::Unauthorized);
                }
            }
            StatusAuthority::Flagging | StatusAuthority::Proposals | StatusAuthority::Appeals => {}
        }

        let from = record.status;
        record.status = new_status;
        tracing::info!(content_id, %from, to = %new_status, "content status changed");
        self.events.push(ContentEvent::StatusChanged {
            content_id,
            from,
            to: new_status,
        });
        Ok(())
    }

    /// Owner-only administrative shelving. Reachable from any state; the
    /// downstream engines refuse archived content, so this is terminal in
    /// practice. Goes through [`Self::set_status`] so the event trail
    /// records the transition like any other.
    pub fn archive(
        &mut self,
        content_id: ContentId,
        caller: &Identity,
    ) -> Result<(), ContentError> {
        if *caller != self.owner {
            return Err(ContentError::Unauthorized);
        }
        self.set_status(
            content_id,
            ContentStatus::Archived,
            &StatusAuthority::Account(caller.clone()),
        )
    }

    pub fn get(&self, content_id: ContentId) -> Option<&ContentRecord> {
        self.by_id.get(&content_id)
    }

    pub fn get_by_external_id(&self, external_id: &str) -> Option<&ContentRecord> {
        self.by_external_id
            .get(external_id)
            .and_then(|id| self.by_id.get(id))
    }

    pub fn status(&self, content_id: ContentId) -> Result<ContentStatus, ContentError> {
        self.by_id
            .get(&content_id)
            .map(|r| r.status)
            .ok_or(ContentError::NotFound(content_id))
    }

    /// Number of items this author has registered. Zero for unknown authors
    /// by documented convention.
    pub fn content_count_of(&self, author: &Identity) -> u64 {
        self.author_counts.get(author).copied().unwrap_or(0)
    }

    /// The append-only audit trail.
    pub fn events(&self) -> &[ContentEvent] {
        &self.events
    }
}
