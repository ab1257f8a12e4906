//! Window, tally, and quorum arithmetic shared by both voting engines.

use curia_types::{BlockHeight, Identity, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Basis-point denominator: 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Minimum combined voting power required before an outcome may execute.
pub fn quorum_threshold(total_supply: TokenAmount, quorum_bps: u32) -> TokenAmount {
    total_supply.saturating_mul(quorum_bps as u128) / BPS_DENOMINATOR
}

/// A voting window on the logical clock. Votes are accepted at heights in
/// `start..=end`; execution is allowed strictly after `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingWindow {
    pub start: BlockHeight,
    pub end: BlockHeight,
}

impl VotingWindow {
    /// Open a window of `period` blocks starting now.
    pub fn opening_at(now: BlockHeight, period: u64) -> Self {
        Self {
            start: now,
            end: now.plus(period),
        }
    }

    pub fn has_started(&self, now: BlockHeight) -> bool {
        now >= self.start
    }

    /// True strictly after the last votable height.
    pub fn has_ended(&self, now: BlockHeight) -> bool {
        now > self.end
    }
}

/// Token-weighted for/against totals. Monotonically non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub votes_for: TokenAmount,
    pub votes_against: TokenAmount,
}

impl Tally {
    pub fn add(&mut self, in_favor: bool, power: TokenAmount) {
        if in_favor {
            self.votes_for = self.votes_for.saturating_add(power);
        } else {
            self.votes_against = self.votes_against.saturating_add(power);
        }
    }

    pub fn turnout(&self) -> TokenAmount {
        self.votes_for.saturating_add(self.votes_against)
    }

    /// Ties lose: a tally passes only on a strict for-majority.
    pub fn passed(&self) -> bool {
        self.votes_for > self.votes_against
    }

    pub fn meets_quorum(&self, total_supply: TokenAmount, quorum_bps: u32) -> bool {
        self.turnout() >= quorum_threshold(total_supply, quorum_bps)
    }
}

/// A recorded vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub in_favor: bool,
    /// Oracle balance at the moment the vote was cast. Not a snapshot taken
    /// at window open; see the engine docs for the consequences.
    pub power: TokenAmount,
    pub cast_at: BlockHeight,
}

/// One-vote-per-voter storage, keyed by scope id then voter.
///
/// The scope id is a proposal id or an appeal id depending on which engine
/// owns the box. Nesting the maps lets lookups borrow the voter identity
/// instead of cloning it into a composite key.
#[derive(Clone, Debug, Default)]
pub struct Ballots {
    votes: HashMap<u64, HashMap<Identity, BallotRecord>>,
}

impl Ballots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, scope: u64, voter: &Identity) -> bool {
        self.votes
            .get(&scope)
            .is_some_and(|by_voter| by_voter.contains_key(voter))
    }

    pub fn record(&mut self, scope: u64, voter: Identity, ballot: BallotRecord) {
        self.votes.entry(scope).or_default().insert(voter, ballot);
    }

    pub fn get(&self, scope: u64, voter: &Identity) -> Option<&BallotRecord> {
        self.votes.get(&scope).and_then(|by_voter| by_voter.get(voter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_boundaries() {
        let window = VotingWindow::opening_at(BlockHeight::new(10), 5);
        assert!(!window.has_started(BlockHeight::new(9)));
        assert!(window.has_started(BlockHeight::new(10)));
        // The end height itself is still votable; ended is strict.
        assert!(!window.has_ended(BlockHeight::new(15)));
        assert!(window.has_ended(BlockHeight::new(16)));
    }

    #[test]
    fn tie_does_not_pass() {
        let mut tally = Tally::default();
        tally.add(true, 50);
        tally.add(false, 50);
        assert!(!tally.passed());
        tally.add(true, 1);
        assert!(tally.passed());
    }

    #[test]
    fn quorum_threshold_basis_points() {
        // 10% of 10_000 supply.
        assert_eq!(quorum_threshold(10_000, 1_000), 1_000);
        // Integer division truncates.
        assert_eq!(quorum_threshold(999, 1_000), 99);
        assert_eq!(quorum_threshold(10_000, 10_000), 10_000);
    }

    #[test]
    fn quorum_threshold_saturates_on_huge_supply() {
        // Supplies near the amount ceiling must not overflow the bps
        // multiply; the threshold pins to the maximum instead.
        let need = quorum_threshold(u128::MAX, 200);
        assert_eq!(need, u128::MAX / BPS_DENOMINATOR);
        assert!(quorum_threshold(u128::MAX, 10_000) <= u128::MAX);
    }

    #[test]
    fn ballots_one_vote_per_voter() {
        let mut ballots = Ballots::new();
        let alice = Identity::from("alice");
        assert!(!ballots.has_voted(1, &alice));
        ballots.record(
            1,
            alice.clone(),
            BallotRecord { in_favor: true, power: 10, cast_at: BlockHeight::new(1) },
        );
        assert!(ballots.has_voted(1, &alice));
        // Same voter, different scope.
        assert!(!ballots.has_voted(2, &alice));
    }
}
