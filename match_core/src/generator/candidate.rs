// candidate pool construction

use crate::generator::ParticipantRating;
use app_core::{unordered, Team};

/// one disjoint-team match among the candidate pool, already filtered for
/// rating balance at a given `elo_diff`.
#[derive(Debug, Clone, Copy)]
pub struct CandidateMatch {
    pub team1: Team,
    pub team2: Team,
}

impl CandidateMatch {
    pub fn teammate_pairs(&self) -> [(uuid::Uuid, uuid::Uuid); 2] {
        [
            unordered(self.team1.0, self.team1.1),
            unordered(self.team2.0, self.team2.1),
        ]
    }

    pub fn opponent_pairs(&self) -> [(uuid::Uuid, uuid::Uuid); 4] {
        [
            unordered(self.team1.0, self.team2.0),
            unordered(self.team1.0, self.team2.1),
            unordered(self.team1.1, self.team2.0),
            unordered(self.team1.1, self.team2.1),
        ]
    }
}

/// `diff = |r1 - r2| / max(r1, r2)`; a `max == 0` pair is always balanced.
pub fn rating_balanced(r1: f64, r2: f64, elo_diff: f64) -> bool {
    let max_rating = r1.max(r2);
    if max_rating == 0.0 {
        return true;
    }
    (r1 - r2).abs() / max_rating <= elo_diff
}

/// enumerate every disjoint pairing of 2-subsets of `participants`, filtered
/// by rating balance at `elo_diff`. Built once per relax iteration.
pub fn build_candidate_pool(participants: &[ParticipantRating], elo_diff: f64) -> Vec<CandidateMatch> {
    let pairs: Vec<Team> = participants
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            participants[i + 1..]
                .iter()
                .map(move |b| (a.id, b.id))
        })
        .collect();

    let rating_of = |id: uuid::Uuid| -> f64 {
        participants.iter().find(|p| p.id == id).map(|p| p.rating).unwrap_or(0.0)
    };

    let mut matches = Vec::new();
    for &team1 in &pairs {
        for &team2 in &pairs {
            if team1.0 == team2.0 || team1.0 == team2.1 || team1.1 == team2.0 || team1.1 == team2.1 {
                continue;
            }
            let team1_rating = (rating_of(team1.0) + rating_of(team1.1)) / 2.0;
            let team2_rating = (rating_of(team2.0) + rating_of(team2.1)) / 2.0;
            if rating_balanced(team1_rating, team2_rating, elo_diff) {
                matches.push(CandidateMatch { team1, team2 });
            }
        }
    }
    matches
}
