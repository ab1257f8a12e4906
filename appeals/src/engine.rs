//! The appeal engine.

use crate::appeal::{Appeal, AppealResult};
use crate::error::AppealError;
use curia_content::{ContentError, ContentLedger, StatusAuthority};
use curia_governance::ballot::{quorum_threshold, BallotRecord, Ballots, VotingWindow};
use curia_oracle::BalanceOracle;
use curia_types::{
    AppealId, BlockHeight, ContentId, ContentStatus, GovernanceParams, Identity, TokenAmount,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Audit events emitted by the appeal engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppealEvent {
    AppealCreated {
        appeal_id: AppealId,
        content_id: ContentId,
        appellant: Identity,
    },
    AppealVoteCast {
        appeal_id: AppealId,
        voter: Identity,
        in_favor: bool,
        power: TokenAmount,
    },
    AppealResolved {
        appeal_id: AppealId,
        result: AppealResult,
    },
}

/// Creates, tallies, and resolves appeals against removals.
pub struct AppealEngine {
    params: GovernanceParams,
    next_id: AppealId,
    appeals: HashMap<AppealId, Appeal>,
    /// content → appeal, first-write-wins. Never cleared: one appeal per
    /// content item, ever, with no re-appeal after resolution.
    by_content: HashMap<ContentId, AppealId>,
    ballots: Ballots,
    events: Vec<AppealEvent>,
}

impl AppealEngine {
    pub fn new(params: GovernanceParams) -> Self {
        Self {
            params,
            next_id: 1,
            appeals: HashMap::new(),
            by_content: HashMap::new(),
            ballots: Ballots::new(),
            events: Vec::new(),
        }
    }

    /// Open an appeal on removed content. Only the registered author may
    /// appeal, and only once per content item, ever.
    pub fn create_appeal(
        &mut self,
        ledger: &mut ContentLedger,
        oracle: &dyn BalanceOracle,
        content_id: ContentId,
        reason: impl Into<String>,
        evidence: impl Into<String>,
        appellant: &Identity,
        now: BlockHeight,
    ) -> Result<AppealId, AppealError> {
        let balance = oracle.balance_of(appellant)?;
        if balance < self.params.min_appeal_stake {
            return Err(AppealError::InsufficientTokens {
                have: balance,
                need: self.params.min_appeal_stake,
            });
        }
        let content = ledger
            .get(content_id)
            .ok_or(ContentError::NotFound(content_id))?;
        if content.status != ContentStatus::Removed {
            return Err(AppealError::ContentNotRemoved(content_id));
        }
        if content.author != *appellant {
            return Err(AppealError::NotContentAuthor);
        }
        if let Some(&appeal_id) = self.by_content.get(&content_id) {
            return Err(AppealError::AppealAlreadyExists { content_id, appeal_id });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.appeals.insert(
            id,
            Appeal {
                id,
                content_id,
                appellant: appellant.clone(),
                reason: reason.into(),
                evidence: evidence.into(),
                tally: Default::default(),
                window: VotingWindow::opening_at(now, self.params.voting_period),
                resolved: false,
                result: None,
            },
        );
        self.by_content.insert(content_id, id);
        ledger.set_status(content_id, ContentStatus::Appealing, &StatusAuthority::Appeals)?;

        tracing::info!(appeal_id = id, content_id, appellant = %appellant, "appeal created");
        self.events.push(AppealEvent::AppealCreated {
            appeal_id: id,
            content_id,
            appellant: appellant.clone(),
        });
        Ok(id)
    }

    /// Cast a token-weighted vote on an appeal. Power is the voter's oracle
    /// balance at cast time, as in the proposal engine.
    pub fn vote_on_appeal(
        &mut self,
        oracle: &dyn BalanceOracle,
        appeal_id: AppealId,
        in_favor: bool,
        voter: &Identity,
        now: BlockHeight,
    ) -> Result<(), AppealError> {
        let appeal = self
            .appeals
            .get(&appeal_id)
            .ok_or(AppealError::NotFound(appeal_id))?;
        if appeal.window.has_ended(now) {
            return Err(AppealError::VotingEnded);
        }
        if !appeal.window.has_started(now) {
            return Err(AppealError::VotingNotStarted);
        }
        if self.ballots.has_voted(appeal_id, voter) {
            return Err(AppealError::AlreadyVoted);
        }
        let power = oracle.balance_of(voter)?;
        if power == 0 {
            return Err(AppealError::InsufficientTokens { have: 0, need: 1 });
        }

        self.ballots.record(
            appeal_id,
            voter.clone(),
            BallotRecord { in_favor, power, cast_at: now },
        );
        let appeal = self
            .appeals
            .get_mut(&appeal_id)
            .ok_or(AppealError::NotFound(appeal_id))?;
        appeal.tally.add(in_favor, power);

        tracing::debug!(appeal_id, voter = %voter, in_favor, power, "appeal vote cast");
        self.events.push(AppealEvent::AppealVoteCast {
            appeal_id,
            voter: voter.clone(),
            in_favor,
            power,
        });
        Ok(())
    }

    /// Resolve an expired appeal. Callable by anyone.
    ///
    /// Same windowing/quorum/tie arithmetic as proposal execution, but BOTH
    /// outcomes write content status — the content must leave the transient
    /// `Appealing` state regardless of the result: `Active` when upheld,
    /// `Removed` when rejected.
    pub fn resolve_appeal(
        &mut self,
        ledger: &mut ContentLedger,
        oracle: &dyn BalanceOracle,
        appeal_id: AppealId,
        now: BlockHeight,
    ) -> Result<AppealResult, AppealError> {
        let appeal = self
            .appeals
            .get(&appeal_id)
            .ok_or(AppealError::NotFound(appeal_id))?;
        if !appeal.window.has_ended(now) {
            return Err(AppealError::VotingNotEnded);
        }
        if appeal.resolved {
            return Err(AppealError::AlreadyResolved(appeal_id));
        }

        let total_supply = oracle.total_supply()?;
        let need = quorum_threshold(total_supply, self.params.quorum_bps);
        let have = appeal.tally.turnout();
        if have < need {
            return Err(AppealError::QuorumNotReached { have, need });
        }

        let (result, target) = if appeal.tally.passed() {
            (AppealResult::Upheld, ContentStatus::Active)
        } else {
            (AppealResult::Rejected, ContentStatus::Removed)
        };
        // Content archived mid-appeal is out of governance for good; the
        // outcome is recorded but never overwrites `Archived`.
        if ledger.status(appeal.content_id)? != ContentStatus::Archived {
            ledger.set_status(appeal.content_id, target, &StatusAuthority::Appeals)?;
        }

        let appeal = self
            .appeals
            .get_mut(&appeal_id)
            .ok_or(AppealError::NotFound(appeal_id))?;
        appeal.resolved = true;
        appeal.result = Some(result);

        tracing::info!(appeal_id, ?result, "appeal resolved");
        self.events.push(AppealEvent::AppealResolved { appeal_id, result });
        Ok(result)
    }

    pub fn get(&self, appeal_id: AppealId) -> Option<&Appeal> {
        self.appeals.get(&appeal_id)
    }

    /// The one appeal ever opened for a content item, if any.
    pub fn appeal_for(&self, content_id: ContentId) -> Option<&Appeal> {
        self.by_content
            .get(&content_id)
            .and_then(|id| self.appeals.get(id))
    }

    pub fn vote_of(&self, appeal_id: AppealId, voter: &Identity) -> Option<&BallotRecord> {
        self.ballots.get(appeal_id, voter)
    }

    /// The append-only audit trail.
    pub fn events(&self) -> &[AppealEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curia_oracle::StaticBalances;

    const VOTING_PERIOD: u64 = 100;

    fn setup() -> (ContentLedger, AppealEngine, StaticBalances, ContentId) {
        let mut ledger = ContentLedger::new(Identity::from("owner"));
        let id = ledger
            .register("cid", "Title", "misc", Identity::from("alice"), BlockHeight::new(1))
            .unwrap();
        ledger
            .set_status(id, ContentStatus::Removed, &StatusAuthority::Proposals)
            .unwrap();
        let engine = AppealEngine::new(GovernanceParams::default());
        let mut oracle = StaticBalances::new(10_000);
        oracle.set_balance("alice", 1_000);
        oracle.set_balance("v1", 1_000);
        oracle.set_balance("v2", 1_000);
        oracle.set_balance("v3", 1_000);
        (ledger, engine, oracle, id)
    }

    fn open_appeal(
        ledger: &mut ContentLedger,
        engine: &mut AppealEngine,
        oracle: &StaticBalances,
        content: ContentId,
    ) -> AppealId {
        engine
            .create_appeal(ledger, oracle, content, "unfair", "see context", &Identity::from("alice"), BlockHeight::new(10))
            .unwrap()
    }

    #[test]
    fn appeal_opens_and_sets_appealing() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Appealing);
        assert_eq!(engine.appeal_for(id).unwrap().id, aid);
    }

    #[test]
    fn only_author_may_appeal() {
        let (mut ledger, mut engine, mut oracle, id) = setup();
        oracle.set_balance("mallory", 1_000);
        let err = engine
            .create_appeal(&mut ledger, &oracle, id, "", "", &Identity::from("mallory"), BlockHeight::new(10))
            .unwrap_err();
        assert!(matches!(err, AppealError::NotContentAuthor));
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Removed);
    }

    #[test]
    fn appeal_requires_removed_status_and_stake() {
        let (mut ledger, mut engine, mut oracle, id) = setup();
        oracle.set_balance("alice", 5);
        let err = engine
            .create_appeal(&mut ledger, &oracle, id, "", "", &Identity::from("alice"), BlockHeight::new(10))
            .unwrap_err();
        assert!(matches!(err, AppealError::InsufficientTokens { have: 5, need: 100 }));

        oracle.set_balance("alice", 1_000);
        ledger
            .set_status(id, ContentStatus::Active, &StatusAuthority::Proposals)
            .unwrap();
        let err = engine
            .create_appeal(&mut ledger, &oracle, id, "", "", &Identity::from("alice"), BlockHeight::new(10))
            .unwrap_err();
        assert!(matches!(err, AppealError::ContentNotRemoved(i) if i == id));
    }

    #[test]
    fn one_appeal_per_content_ever() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, false, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        engine.vote_on_appeal(&oracle, aid, false, &Identity::from("v2"), BlockHeight::new(20)).unwrap();
        engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap();
        // Rejected appeal leaves content removed; no second chance.
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Removed);
        let err = engine
            .create_appeal(&mut ledger, &oracle, id, "again", "", &Identity::from("alice"), BlockHeight::new(201))
            .unwrap_err();
        assert!(matches!(
            err,
            AppealError::AppealAlreadyExists { appeal_id, .. } if appeal_id == aid
        ));
    }

    #[test]
    fn upheld_appeal_restores_content() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v2"), BlockHeight::new(20)).unwrap();
        engine.vote_on_appeal(&oracle, aid, false, &Identity::from("v3"), BlockHeight::new(20)).unwrap();
        let result = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap();
        assert_eq!(result, AppealResult::Upheld);
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Active);
    }

    #[test]
    fn rejected_appeal_still_writes_status() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, false, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v2"), BlockHeight::new(20)).unwrap();
        // Tie rejects, exactly as in proposal execution.
        let before = ledger.events().len();
        let result = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap();
        assert_eq!(result, AppealResult::Rejected);
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Removed);
        // Unlike a rejected proposal, rejection here still wrote status.
        assert_eq!(ledger.events().len(), before + 1);
    }

    #[test]
    fn resolve_respects_window_quorum_and_idempotence() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();

        let err = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(10 + VOTING_PERIOD))
            .unwrap_err();
        assert!(matches!(err, AppealError::VotingNotEnded));

        // One 1_000-power vote exactly meets the 10% quorum of 10_000.
        let result = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap();
        assert_eq!(result, AppealResult::Upheld);

        let err = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(201))
            .unwrap_err();
        assert!(matches!(err, AppealError::AlreadyResolved(a) if a == aid));
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Active);
    }

    #[test]
    fn under_quorum_appeal_stays_open() {
        let (mut ledger, mut engine, mut oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        oracle.set_balance("v1", 500);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        let err = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap_err();
        assert!(matches!(err, AppealError::QuorumNotReached { have: 500, need: 1_000 }));
        assert!(!engine.get(aid).unwrap().resolved);
        // Failed resolution wrote nothing; still in the transient state.
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Appealing);
    }

    #[test]
    fn oracle_outage_aborts_resolution() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();

        let err = engine
            .resolve_appeal(&mut ledger, &curia_oracle::UnavailableOracle, aid, BlockHeight::new(200))
            .unwrap_err();
        assert!(matches!(err, AppealError::Oracle(_)));
        assert!(!engine.get(aid).unwrap().resolved);
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Appealing);
    }

    #[test]
    fn resolution_never_unarchives_content() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        // Owner shelves the content while the appeal is still open.
        ledger.archive(id, &Identity::from("owner")).unwrap();

        let result = engine
            .resolve_appeal(&mut ledger, &oracle, aid, BlockHeight::new(200))
            .unwrap();
        // The outcome is recorded on the appeal but the archive stands.
        assert_eq!(result, AppealResult::Upheld);
        assert!(engine.get(aid).unwrap().resolved);
        assert_eq!(ledger.status(id).unwrap(), ContentStatus::Archived);
    }

    #[test]
    fn appeal_vote_checks_mirror_proposals() {
        let (mut ledger, mut engine, oracle, id) = setup();
        let aid = open_appeal(&mut ledger, &mut engine, &oracle, id);
        engine.vote_on_appeal(&oracle, aid, true, &Identity::from("v1"), BlockHeight::new(20)).unwrap();
        let err = engine
            .vote_on_appeal(&oracle, aid, false, &Identity::from("v1"), BlockHeight::new(21))
            .unwrap_err();
        assert!(matches!(err, AppealError::AlreadyVoted));
        let err = engine
            .vote_on_appeal(&oracle, aid, true, &Identity::from("v2"), BlockHeight::new(10 + VOTING_PERIOD + 1))
            .unwrap_err();
        assert!(matches!(err, AppealError::VotingEnded));
        let err = engine
            .vote_on_appeal(&oracle, aid, true, &Identity::from("broke"), BlockHeight::new(20))
            .unwrap_err();
        assert!(matches!(err, AppealError::InsufficientTokens { have: 0, .. }));
        let err = engine
            .vote_on_appeal(&oracle, 99, true, &Identity::from("v2"), BlockHeight::new(20))
            .unwrap_err();
        assert!(matches!(err, AppealError::NotFound(99)));
    }
}
