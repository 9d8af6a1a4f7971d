//! Tournament: the engine object owning matches and standings.

use crate::data;
use crate::models::fixture::{Match, MatchId, Stage};
use crate::models::standing::Standing;
use crate::models::team::{Group, GroupId, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// No team with this id in the roster.
    TeamNotFound(TeamId),
    /// No match with this id.
    MatchNotFound(MatchId),
    /// Match participants are not resolved yet, so no result can be recorded.
    MatchNotReady(MatchId),
    /// A knockout match ended level and no tie-break winner was supplied.
    DrawNeedsTieBreak(MatchId),
    /// The supplied tie-break winner is not one of the match participants.
    InvalidTieBreakWinner(MatchId),
    /// The external result source could not produce a result.
    SourceUnavailable(String),
    /// The embedded team roster failed to parse.
    Roster(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::MatchNotReady(id) => {
                write!(f, "Match {} has unresolved participants", id)
            }
            TournamentError::DrawNeedsTieBreak(id) => {
                write!(f, "Match {} is a knockout draw and needs a tie-break winner", id)
            }
            TournamentError::InvalidTieBreakWinner(id) => {
                write!(f, "Tie-break winner is not playing in match {}", id)
            }
            TournamentError::SourceUnavailable(reason) => {
                write!(f, "Result source unavailable: {}", reason)
            }
            TournamentError::Roster(reason) => write!(f, "Bad team roster: {}", reason),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Picking the team to follow; nothing played yet.
    #[default]
    TeamSelect,
    /// Group matches being played or edited.
    GroupStage,
    /// Knockout bracket built; group results stay editable.
    Knockout,
}

/// Full tournament state: roster, groups, matches, standings, and phase.
/// Standings are derived and safe to omit from storage; a loaded snapshot
/// is brought back in sync by `logic::settle`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub teams: HashMap<TeamId, Team>,
    pub groups: Vec<Group>,
    /// All matches in schedule order; knockout matches exist only after
    /// the group stage is closed.
    pub matches: Vec<Match>,
    #[serde(default)]
    pub standings: HashMap<TeamId, Standing>,
    pub selected_team: Option<TeamId>,
    pub phase: Phase,
}

impl Tournament {
    /// Create a new tournament: 48-team roster, 12 groups, the 72-match
    /// group schedule, zeroed standings.
    pub fn new() -> Result<Self, TournamentError> {
        let teams = data::load_roster()?;
        let groups = data::groups();
        let matches = data::group_schedule(&groups);
        let standings = teams
            .keys()
            .map(|id| (id.clone(), Standing::new(id.clone())))
            .collect();
        Ok(Self {
            id: Uuid::new_v4(),
            teams,
            groups,
            matches,
            standings,
            selected_team: None,
            phase: Phase::TeamSelect,
        })
    }

    /// Pick the team to follow and enter the group stage.
    pub fn select_team(&mut self, team_id: &str) -> Result<(), TournamentError> {
        if self.phase != Phase::TeamSelect {
            return Err(TournamentError::InvalidState);
        }
        if !self.teams.contains_key(team_id) {
            return Err(TournamentError::TeamNotFound(team_id.to_string()));
        }
        self.selected_team = Some(team_id.to_string());
        self.phase = Phase::GroupStage;
        Ok(())
    }

    /// Full restart: same roster and schedule, all results gone. Keeps the
    /// tournament id so clients stay addressable.
    pub fn restart(&mut self) -> Result<(), TournamentError> {
        if self.phase == Phase::TeamSelect {
            return Err(TournamentError::InvalidState);
        }
        let id = self.id;
        *self = Self::new()?;
        self.id = id;
        Ok(())
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    /// The group a team was drawn into.
    pub fn group_of(&self, team_id: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.teams.iter().any(|t| t == team_id))
            .map(|g| g.id)
    }

    pub fn match_by_id(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_index(&self, id: &str) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    pub fn matches_by_stage(&self, stage: Stage) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.stage == stage).collect()
    }

    pub fn matches_for_group(&self, group: GroupId) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.group == Some(group)).collect()
    }

    pub fn standing(&self, team_id: &str) -> Option<&Standing> {
        self.standings.get(team_id)
    }

    /// True once the knockout matches have been instantiated.
    pub fn has_bracket(&self) -> bool {
        self.matches.iter().any(|m| m.stage == Stage::RoundOf32)
    }
}
