//! Match, Stage, and recorded-result data structures.

use crate::models::team::{GroupId, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match ("M01".."M104", encodes round and slot).
pub type MatchId = String;

/// Phase of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    ThirdPlace,
    Final,
}

impl Stage {
    /// Everything past the group stage must produce a winner.
    pub fn is_knockout(self) -> bool {
        self != Stage::Group
    }
}

/// A score entered for a match, from an edit or a result source.
/// `tie_break_winner` is required only when a knockout match ends level
/// (e.g. the penalty-shootout winner).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub tie_break_winner: Option<TeamId>,
}

/// A single match. Participants are `None` until the qualifying source
/// match or standing is known; scores are both-or-neither set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub finished: bool,
    pub stage: Stage,
    /// Group letter, group-stage matches only.
    pub group: Option<GroupId>,
    /// Set when finished; for group matches only derived for display (None on a draw).
    pub winner_id: Option<TeamId>,
    /// Static schedule metadata, assigned at construction and never recomputed.
    pub date: NaiveDate,
    pub venue: String,
}

impl Match {
    /// A group-stage match, fully seeded from the draw.
    pub fn group_match(
        id: MatchId,
        group: GroupId,
        home: TeamId,
        away: TeamId,
        date: NaiveDate,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            id,
            home_team_id: Some(home),
            away_team_id: Some(away),
            home_score: None,
            away_score: None,
            finished: false,
            stage: Stage::Group,
            group: Some(group),
            winner_id: None,
            date,
            venue: venue.into(),
        }
    }

    /// A knockout match shell with unresolved participants.
    pub fn knockout(id: MatchId, stage: Stage, date: NaiveDate, venue: impl Into<String>) -> Self {
        Self {
            id,
            home_team_id: None,
            away_team_id: None,
            home_score: None,
            away_score: None,
            finished: false,
            stage,
            group: None,
            winner_id: None,
            date,
            venue: venue.into(),
        }
    }

    /// Both participants known and no result recorded yet.
    pub fn is_ready(&self) -> bool {
        !self.finished && self.home_team_id.is_some() && self.away_team_id.is_some()
    }

    /// Clear the recorded result. Participants and schedule metadata are kept.
    pub fn reset_result(&mut self) {
        self.home_score = None;
        self.away_score = None;
        self.finished = false;
        self.winner_id = None;
    }

    /// The losing side of a finished match (feeds the third-place playoff).
    pub fn loser_id(&self) -> Option<TeamId> {
        let winner = self.winner_id.as_ref()?;
        match (&self.home_team_id, &self.away_team_id) {
            (Some(h), Some(a)) if winner == h => Some(a.clone()),
            (Some(h), Some(a)) if winner == a => Some(h.clone()),
            _ => None,
        }
    }
}
