//! World Cup 2026 tournament tracker: library with models and engine logic.

pub mod data;
pub mod logic;
pub mod models;

pub use logic::{
    apply_result, close_group_stage, compute_standings, group_positions, qualified_thirds,
    ranked_thirds, select_r32_pairings, settle, simulate_match, simulate_phase, R32Pairing,
    RatingSimulator, ResultSource,
};
pub use models::{
    Group, GroupId, Match, MatchId, MatchResult, Phase, Stage, Standing, Team, TeamId, Tournament,
    TournamentError, TournamentId,
};
