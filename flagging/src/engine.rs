//! The flagging engine and its counters.

use crate::error::FlagError;
use crate::flag::{FlagReason, FlagRecord};
use curia_content::{ContentLedger, StatusAuthority};
use curia_oracle::BalanceOracle;
use curia_types::{
    BlockHeight, ContentId, ContentStatus, FlagId, GovernanceParams, Identity,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Audit events emitted by the flagging engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagEvent {
    ContentFlagged {
        flag_id: FlagId,
        content_id: ContentId,
        reporter: Identity,
        reason: FlagReason,
    },
    FlagResolved {
        flag_id: FlagId,
        resolution: String,
    },
}

/// Records flags and drives the `active → flagged` transition.
pub struct FlagEngine {
    owner: Identity,
    params: GovernanceParams,
    next_id: FlagId,
    flags: HashMap<FlagId, FlagRecord>,
    /// One-flag-per-pair index.
    flagged_by: HashSet<(ContentId, Identity)>,
    /// Flags per content item. Missing key means zero by convention.
    content_flag_counts: HashMap<ContentId, u64>,
    /// Flags filed per reporter. Missing key means zero by convention.
    reporter_flag_counts: HashMap<Identity, u64>,
    events: Vec<FlagEvent>,
}

impl FlagEngine {
    pub fn new(owner: Identity, params: GovernanceParams) -> Self {
        Self {
            owner,
            params,
            next_id: 1,
            flags: HashMap::new(),
            flagged_by: HashSet::new(),
            content_flag_counts: HashMap::new(),
            reporter_flag_counts: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Flag a content item.
    ///
    /// The reporter's balance is checked against the oracle at call time,
    /// never snapshotted. Only the 0→1 transition of the per-content flag
    /// counter calls into the ledger; content already `Flagged` stays put.
    pub fn flag_content(
        &mut self,
        ledger: &mut ContentLedger,
        oracle: &dyn BalanceOracle,
        content_id: ContentId,
        reason: FlagReason,
        description: impl Into<String>,
        reporter: &Identity,
        now: BlockHeight,
    ) -> Result<FlagId, FlagError> {
        let content = ledger
            .get(content_id)
            .ok_or(FlagError::ContentNotFound(content_id))?;
        if content.status == ContentStatus::Archived {
            return Err(FlagError::ContentArchived(content_id));
        }
        let author = content.author.clone();

        let balance = oracle.balance_of(reporter)?;
        if balance < self.params.min_flag_balance {
            return Err(FlagError::InsufficientTokens {
                have: balance,
                need: self.params.min_flag_balance,
            });
        }
        if self.flagged_by.contains(&(content_id, reporter.clone())) {
            return Err(FlagError::AlreadyFlagged(content_id));
        }
        if *reporter == author {
            return Err(FlagError::CannotFlagOwnContent);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.flags.insert(
            id,
            FlagRecord {
                id,
                content_id,
                reporter: reporter.clone(),
                reason,
                description: description.into(),
                created_at: now,
                resolved: false,
                resolution: None,
            },
        );
        self.flagged_by.insert((content_id, reporter.clone()));
        let count = self.content_flag_counts.entry(content_id).or_insert(0);
        *count += 1;
        let first_flag = *count == 1;
        *self
            .reporter_flag_counts
            .entry(reporter.clone())
            .or_insert(0) += 1;

        if first_flag {
            ledger.set_status(content_id, ContentStatus::Flagged, &StatusAuthority::Flagging)?;
        }

        tracing::info!(flag_id = id, content_id, reporter = %reporter, ?reason, "content flagged");
        self.events.push(FlagEvent::ContentFlagged {
            flag_id: id,
            content_id,
            reporter: reporter.clone(),
            reason,
        });
        Ok(id)
    }

    /// Stamp a resolution label on a flag. Owner-gated and informational:
    /// content status is untouched.
    pub fn resolve_flag(
        &mut self,
        flag_id: FlagId,
        resolution: impl Into<String>,
        caller: &Identity,
    ) -> Result<(), FlagError> {
        if *caller != self.owner {
            return Err(FlagError::Unauthorized);
        }
        let flag = self
            .flags
            .get_mut(&flag_id)
            .ok_or(FlagError::NotFound(flag_id))?;
        if flag.resolved {
            return Err(FlagError::AlreadyResolved(flag_id));
        }
        let resolution = resolution.into();
        flag.resolved = true;
        flag.resolution = Some(resolution.clone());

        tracing::info!(flag_id, %resolution, "flag resolved");
        self.events.push(FlagEvent::FlagResolved { flag_id, resolution });
        Ok(())
    }

    pub fn get(&self, flag_id: FlagId) -> Option<&FlagRecord> {
        self.flags.get(&flag_id)
    }

    /// Flags recorded against a content item. Zero for unknown ids by
    /// convention.
    pub fn flag_count_of(&self, content_id: ContentId) -> u64 {
        self.content_flag_counts
            .get(&content_id)
            .copied()
            .unwrap_or(0)
    }

    /// Flags a reporter has filed. Zero for unknown reporters by convention.
    pub fn flags_filed_by(&self, reporter: &Identity) -> u64 {
        self.reporter_flag_counts
            .get(reporter)
            .copied()
            .unwrap_or(0)
    }

    /// The append-only audit trail.
    pub fn events(&self) -> &[FlagEvent] {
        &self.events
    }
}
