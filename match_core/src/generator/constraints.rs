// hard-constraint bookkeeping for the Schedule Generator

use crate::generator::candidate::CandidateMatch;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

type Pair = (Uuid, Uuid);

/// which hard/soft rules are active for this generation run.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintToggles {
    pub no_repeat_teammate_in_event: bool,
    pub no_repeat_teammate_from_previous_event: bool,
    pub no_repeat_opponent_in_event: bool,
}

/// teammate/opponent pairs already committed, either earlier in the event
/// or tentatively within the round currently being packed.
#[derive(Debug, Default, Clone)]
pub struct PairTracker {
    pub teammate_pairs: HashSet<Pair>,
    pub opponent_counts: HashMap<Pair, u32>,
}

impl PairTracker {
    pub fn record(&mut self, m: &CandidateMatch) {
        for pair in m.teammate_pairs() {
            self.teammate_pairs.insert(pair);
        }
        for pair in m.opponent_pairs() {
            *self.opponent_counts.entry(pair).or_insert(0) += 1;
        }
    }
}

/// checks a candidate match against both the event-wide tracker and the
/// round-local tracker accumulated so far, as the spec's "combined" check.
pub fn satisfies_hard_constraints(
    m: &CandidateMatch,
    toggles: &ConstraintToggles,
    previous_event_pairs: &HashSet<Pair>,
    event_tracker: &PairTracker,
    round_tracker: &PairTracker,
) -> bool {
    for pair in m.teammate_pairs() {
        if toggles.no_repeat_teammate_in_event
            && (event_tracker.teammate_pairs.contains(&pair) || round_tracker.teammate_pairs.contains(&pair))
        {
            return false;
        }
        if toggles.no_repeat_teammate_from_previous_event && previous_event_pairs.contains(&pair) {
            return false;
        }
    }
    if toggles.no_repeat_opponent_in_event {
        for pair in m.opponent_pairs() {
            let count = event_tracker.opponent_counts.get(&pair).copied().unwrap_or(0)
                + round_tracker.opponent_counts.get(&pair).copied().unwrap_or(0);
            // up to two meetings are allowed; a third is a violation.
            if count >= 2 {
                return false;
            }
        }
    }
    true
}
