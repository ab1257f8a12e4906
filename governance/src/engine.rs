//! The proposal engine.

use crate::ballot::{BallotRecord, Ballots, VotingWindow, quorum_threshold};
use crate::error::ProposalError;
use crate::proposal::{Proposal, ProposalKind, ProposalResult};
use curia_content::{ContentLedger, StatusAuthority};
use curia_oracle::BalanceOracle;
use curia_types::{
    BlockHeight, ContentId, ContentStatus, GovernanceParams, Identity, ProposalId, TokenAmount,
    MAX_QUORUM_BPS, MIN_QUORUM_BPS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Audit events emitted by the proposal engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalEvent {
    ProposalCreated {
        proposal_id: ProposalId,
        content_id: ContentId,
        proposer: Identity,
        kind: ProposalKind,
    },
    VoteCast {
        proposal_id: ProposalId,
        voter: Identity,
        in_favor: bool,
        power: TokenAmount,
    },
    ProposalExecuted {
        proposal_id: ProposalId,
        result: ProposalResult,
    },
    QuorumChanged {
        quorum_bps: u32,
    },
}

/// Creates, tallies, and executes removal/keep proposals.
pub struct ProposalEngine {
    owner: Identity,
    params: GovernanceParams,
    next_id: ProposalId,
    proposals: HashMap<ProposalId, Proposal>,
    /// content → latest proposal. Overwritten only once the previous
    /// proposal has executed; an unexecuted entry blocks new proposals.
    by_content: HashMap<ContentId, ProposalId>,
    ballots: Ballots,
    events: Vec<ProposalEvent>,
}

impl ProposalEngine {
    pub fn new(owner: Identity, params: GovernanceParams) -> Self {
        Self {
            owner,
            params,
            next_id: 1,
            proposals: HashMap::new(),
            by_content: HashMap::new(),
            ballots: Ballots::new(),
            events: Vec::new(),
        }
    }

    /// Open a removal/keep vote on flagged content.
    pub fn create_proposal(
        &mut self,
        ledger: &ContentLedger,
        oracle: &dyn BalanceOracle,
        content_id: ContentId,
        kind: ProposalKind,
        description: impl Into<String>,
        proposer: &Identity,
        now: BlockHeight,
    ) -> Result<ProposalId, ProposalError> {
        let balance = oracle.balance_of(proposer)?;
        if balance < self.params.min_proposal_stake {
            return Err(ProposalError::InsufficientTokens {
                have: balance,
                need: self.params.min_proposal_stake,
            });
        }
        if ledger.status(content_id)? != ContentStatus::Flagged {
            return Err(ProposalError::ContentNotFlagged(content_id));
        }
        if let Some(open) = self.proposal_for(content_id) {
            if !open.executed {
                return Err(ProposalError::ProposalAlreadyOpen {
                    content_id,
                    proposal_id: open.id,
                });
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.proposals.insert(
            id,
            Proposal {
                id,
                content_id,
                proposer: proposer.clone(),
                kind,
                description: description.into(),
                tally: Default::default(),
                window: VotingWindow::opening_at(now, self.params.voting_period),
                executed: false,
                result: None,
            },
        );
        self.by_content.insert(content_id, id);

        tracing::info!(proposal_id = id, content_id, proposer = %proposer, ?kind, "proposal created");
        self.events.push(ProposalEvent::ProposalCreated {
            proposal_id: id,
            content_id,
            proposer: proposer.clone(),
            kind,
        });
        Ok(id)
    }

    /// Cast a token-weighted vote.
    ///
    /// Voting power is the voter's oracle balance at cast time, not a
    /// snapshot taken when the proposal opened. Tokens acquired after the
    /// window opened count at full weight, and nothing locks balances
    /// between casts.
    pub fn vote(
        &mut self,
        oracle: &dyn BalanceOracle,
        proposal_id: ProposalId,
        in_favor: bool,
        voter: &Identity,
        now: BlockHeight,
    ) -> Result<(), ProposalError> {
        let proposal = self
            .proposals
            .get(&proposal_id)
            .ok_or(ProposalError::NotFound(proposal_id))?;
        if proposal.window.has_ended(now) {
            return Err(ProposalError::VotingEnded);
        }
        if !proposal.window.has_started(now) {
            return Err(ProposalError::VotingNotStarted);
        }
        if self.ballots.has_voted(proposal_id, voter) {
            return Err(ProposalError::AlreadyVoted);
        }
        let power = oracle.balance_of(voter)?;
        if power == 0 {
            return Err(ProposalError::InsufficientTokens { have: 0, need: 1 });
        }

        self.ballots.record(
            proposal_id,
            voter.clone(),
            BallotRecord { in_favor, power, cast_at: now },
        );
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(ProposalError::NotFound(proposal_id))?;
        proposal.tally.add(in_favor, power);

        tracing::debug!(proposal_id, voter = %voter, in_favor, power, "vote cast");
        self.events.push(ProposalEvent::VoteCast {
            proposal_id,
            voter: voter.clone(),
            in_favor,
            power,
        });
        Ok(())
    }

    /// Execute an expired proposal. Callable by anyone; not owner-gated.
    ///
    /// Approved iff votes-for strictly exceeds votes-against; ties reject.
    /// Only an approved outcome writes content status (`Removed` for a
    /// `Remove` proposal, `Active` for `Keep`); a write that would be a
    /// no-op is skipped.
    pub fn execute_proposal(
        &mut self,
        ledger: &mut ContentLedger,
        oracle: &dyn BalanceOracle,
        proposal_id: ProposalId,
        now: BlockHeight,
    ) -> Result<ProposalResult, ProposalError> {
        let proposal = self
            .proposals
            .get(&proposal_id)
            .ok_or(ProposalError::NotFound(proposal_id))?;
        if !proposal.window.has_ended(now) {
            return Err(ProposalError::VotingNotEnded);
        }
        if proposal.executed {
            return Err(ProposalError::AlreadyExecuted(proposal_id));
        }

        let total_supply = oracle.total_supply()?;
        let need = quorum_threshold(total_supply, self.params.quorum_bps);
        let have = proposal.tally.turnout();
        if have < need {
            return Err(ProposalError::QuorumNotReached { have, need });
        }

        let result = if proposal.tally.passed() {
            ProposalResult::Approved
        } else {
            ProposalResult::Rejected
        };

        if result == ProposalResult::Approved {
            let target = match proposal.kind {
                ProposalKind::Remove => ContentStatus::Removed,
                ProposalKind::Keep => ContentStatus::Active,
            };
            let content_id = proposal.content_id;
            let current = ledger.status(content_id)?;
            // Content archived mid-vote is out of governance for good; the
            // outcome is recorded but never overwrites `Archived`.
            if current != target && current != ContentStatus::Archived {
                ledger.set_status(content_id, target, &StatusAuthority::Proposals)?;
            }
        }

        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(ProposalError::NotFound(proposal_id))?;
        proposal.executed = true;
        proposal.result = Some(result);

        tracing::info!(proposal_id, ?result, "proposal executed");
        self.events.push(ProposalEvent::ProposalExecuted { proposal_id, result });
        Ok(result)
    }

    /// Owner-gated governance tuning, bounded so the quorum can never be
    /// set to something unreachable or meaningless.
    pub fn set_quorum_bps(&mut self, caller: &Identity, quorum_bps: u32) -> Result<(), ProposalError> {
        if *caller != self.owner {
            return Err(ProposalError::Unauthorized);
        }
        if !(MIN_QUORUM_BPS..=MAX_QUORUM_BPS).contains(&quorum_bps) {
            return Err(ProposalError::QuorumOutOfBounds {
                bps: quorum_bps,
                min: MIN_QUORUM_BPS,
                max: MAX_QUORUM_BPS,
            });
        }
        self.params.quorum_bps = quorum_bps;
        tracing::info!(quorum_bps, "quorum updated");
        self.events.push(ProposalEvent::QuorumChanged { quorum_bps });
        Ok(())
    }

    pub fn quorum_bps(&self) -> u32 {
        self.params.quorum_bps
    }

    pub fn get(&self, proposal_id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&proposal_id)
    }

    /// The latest proposal opened for a content item, if any.
    pub fn proposal_for(&self, content_id: ContentId) -> Option<&Proposal> {
        self.by_content
            .get(&content_id)
            .and_then(|id| self.proposals.get(id))
    }

    pub fn vote_of(&self, proposal_id: ProposalId, voter: &Identity) -> Option<&BallotRecord> {
        self.ballots.get(proposal_id, voter)
    }

    /// The append-only audit trail.
    pub fn events(&self) -> &[ProposalEvent] {
        &self.events
    }
}
