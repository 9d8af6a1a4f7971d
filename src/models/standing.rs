//! Per-team group standing. Entirely derived: always recomputed in full
//! from the finished group matches, never patched incrementally.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl Standing {
    /// Zeroed standing for a team.
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Credit one finished match from this team's perspective:
    /// 3 points for a win, 1 for a draw, 0 for a loss.
    pub fn apply_score(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference += scored as i32 - conceded as i32;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += 3;
            }
            Ordering::Less => self.lost += 1,
            Ordering::Equal => {
                self.drawn += 1;
                self.points += 1;
            }
        }
    }

    /// Ranking key: points, then goal difference, then goals for, all
    /// descending. Exact ties keep stable input order (no further tiebreak
    /// is defined for this tournament).
    pub fn rank_key(&self) -> (u32, i32, u32) {
        (self.points, self.goal_difference, self.goals_for)
    }
}
