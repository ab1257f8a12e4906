use proptest::prelude::*;

use curia_governance::ballot::{quorum_threshold, Tally, VotingWindow, BPS_DENOMINATOR};
use curia_types::BlockHeight;

proptest! {
    /// The quorum threshold never exceeds total supply and scales with bps.
    #[test]
    fn quorum_threshold_bounded_by_supply(
        supply in 0u128..1_000_000_000_000,
        bps in 0u32..=10_000,
    ) {
        let need = quorum_threshold(supply, bps);
        prop_assert!(need <= supply);
        prop_assert_eq!(need, supply * bps as u128 / BPS_DENOMINATOR);
    }

    /// A higher quorum percentage never lowers the threshold.
    #[test]
    fn quorum_threshold_monotonic_in_bps(
        supply in 0u128..1_000_000_000_000,
        bps in 0u32..10_000,
    ) {
        prop_assert!(quorum_threshold(supply, bps) <= quorum_threshold(supply, bps + 1));
    }

    /// Tally totals are monotonically non-decreasing under any vote sequence.
    #[test]
    fn tally_monotonic(votes in prop::collection::vec((any::<bool>(), 0u128..1_000_000), 0..50)) {
        let mut tally = Tally::default();
        let mut last_turnout = 0u128;
        for (in_favor, power) in votes {
            tally.add(in_favor, power);
            prop_assert!(tally.turnout() >= last_turnout);
            last_turnout = tally.turnout();
        }
        prop_assert_eq!(tally.turnout(), tally.votes_for + tally.votes_against);
    }

    /// Exact ties never pass, regardless of magnitude.
    #[test]
    fn ties_always_reject(weight in 0u128..1_000_000_000) {
        let mut tally = Tally::default();
        tally.add(true, weight);
        tally.add(false, weight);
        prop_assert!(!tally.passed());
    }

    /// Within the window start..=end votes are accepted; execution is only
    /// possible strictly after end, so the two regimes never overlap.
    #[test]
    fn window_votable_and_ended_disjoint(
        start in 0u64..1_000_000,
        period in 0u64..10_000,
        offset in 0u64..20_000,
    ) {
        let window = VotingWindow::opening_at(BlockHeight::new(start), period);
        let now = BlockHeight::new(start + offset);
        let votable = window.has_started(now) && !window.has_ended(now);
        prop_assert_eq!(votable, offset <= period);
        prop_assert_eq!(window.has_ended(now), offset > period);
    }
}
