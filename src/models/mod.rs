//! Data structures for the tournament: teams, groups, matches, standings.

mod fixture;
mod standing;
mod team;
mod tournament;

pub use fixture::{Match, MatchId, MatchResult, Stage};
pub use standing::Standing;
pub use team::{Group, GroupId, Team, TeamId};
pub use tournament::{Phase, Tournament, TournamentError, TournamentId};
