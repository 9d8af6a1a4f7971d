//! Result sources: where scores come from when the user does not type them.
//!
//! The engine is agnostic to the source implementation (remote predictor,
//! scripted fixture, test double). When a source fails, the local
//! rating-weighted simulator steps in so the state machine is never blocked.

use crate::logic::propagation::{apply_result, record_result, settle};
use crate::models::{MatchResult, Phase, Stage, Team, Tournament, TournamentError};
use rand::Rng;

/// Supplies a score (and, for knockout draws, a tie-break winner) for a
/// pairing. Implementations may fail; the engine falls back locally.
pub trait ResultSource {
    fn result_for(
        &mut self,
        home: &Team,
        away: &Team,
        stage: Stage,
    ) -> Result<MatchResult, TournamentError>;
}

/// Local fallback simulator: five attack rolls biased by the rating gap,
/// knockout ties broken by a coin-flip extra goal. Never fails.
pub struct RatingSimulator;

impl ResultSource for RatingSimulator {
    fn result_for(
        &mut self,
        home: &Team,
        away: &Team,
        stage: Stage,
    ) -> Result<MatchResult, TournamentError> {
        let mut rng = rand::thread_rng();
        let diff = f64::from(home.rating) - f64::from(away.rating);
        let home_chance = 0.5 + diff / 100.0;
        let mut home_score = 0u32;
        let mut away_score = 0u32;
        for _ in 0..5 {
            if rng.gen::<f64>() < home_chance {
                if rng.gen::<f64>() > 0.6 {
                    home_score += 1;
                }
            } else if rng.gen::<f64>() > 0.6 {
                away_score += 1;
            }
        }
        if stage.is_knockout() && home_score == away_score {
            if rng.gen_bool(0.5) {
                home_score += 1;
            } else {
                away_score += 1;
            }
        }
        Ok(MatchResult {
            home_score,
            away_score,
            tie_break_winner: None,
        })
    }
}

/// Simulate one match through the given source and propagate the result.
pub fn simulate_match(
    tournament: &mut Tournament,
    match_id: &str,
    source: &mut dyn ResultSource,
) -> Result<(), TournamentError> {
    if tournament.phase == Phase::TeamSelect {
        return Err(TournamentError::InvalidState);
    }
    let result = fetch_result(tournament, match_id, source)?;
    apply_result(tournament, match_id, &result)
}

/// Simulate every unplayed, ready match of a stage: one atomic apply per
/// match, then a single settle pass for the whole batch. Returns the number
/// of matches simulated.
pub fn simulate_phase(
    tournament: &mut Tournament,
    stage: Stage,
    source: &mut dyn ResultSource,
) -> Result<usize, TournamentError> {
    if tournament.phase == Phase::TeamSelect {
        return Err(TournamentError::InvalidState);
    }
    let pending: Vec<String> = tournament
        .matches_by_stage(stage)
        .iter()
        .filter(|m| m.is_ready())
        .map(|m| m.id.clone())
        .collect();

    let mut simulated = 0;
    for match_id in &pending {
        let result = fetch_result(tournament, match_id, source)?;
        if let Err(e) = record_result(tournament, match_id, &result) {
            // Keep the already-recorded results consistent before bailing.
            settle(tournament);
            return Err(e);
        }
        simulated += 1;
    }
    settle(tournament);
    Ok(simulated)
}

/// Ask the source for a result, substituting the local simulator when it
/// fails. Only a well-formed result ever reaches the mutation path.
fn fetch_result(
    tournament: &Tournament,
    match_id: &str,
    source: &mut dyn ResultSource,
) -> Result<MatchResult, TournamentError> {
    let m = tournament
        .match_by_id(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    let (Some(home_id), Some(away_id)) = (&m.home_team_id, &m.away_team_id) else {
        return Err(TournamentError::MatchNotReady(match_id.to_string()));
    };
    let home = tournament
        .team(home_id)
        .ok_or_else(|| TournamentError::TeamNotFound(home_id.clone()))?;
    let away = tournament
        .team(away_id)
        .ok_or_else(|| TournamentError::TeamNotFound(away_id.clone()))?;

    match source.result_for(home, away, m.stage) {
        Ok(result) => Ok(result),
        Err(e) => {
            log::warn!("Result source failed for {} ({}); using local simulator", match_id, e);
            let mut fallback = RatingSimulator;
            fallback.result_for(home, away, m.stage)
        }
    }
}
