//! Propagation and invalidation engine.
//!
//! Every result mutation (manual edit, single-match simulation, batch
//! simulation) funnels through `apply_result` and ends in
//! `settle`, an idempotent fixed-point pass that re-derives standings,
//! re-diffs the Round-of-32 pairings against the live bracket, and walks
//! winners (and semi-final losers) forward through the adjacency table,
//! resetting exactly the matches whose participants changed.

use crate::data::{self, Feed};
use crate::logic::qualifiers::select_r32_pairings;
use crate::logic::standings::compute_standings;
use crate::models::{MatchResult, Phase, Stage, TeamId, Tournament, TournamentError};

/// Record a result and propagate all consequences. The one entry point for
/// every result mutation.
pub fn apply_result(
    tournament: &mut Tournament,
    match_id: &str,
    result: &MatchResult,
) -> Result<(), TournamentError> {
    record_result(tournament, match_id, result)?;
    settle(tournament);
    Ok(())
}

/// Validate and apply one score to one match. No propagation; on any error
/// the match is left exactly as it was.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: &str,
    result: &MatchResult,
) -> Result<(), TournamentError> {
    if tournament.phase == Phase::TeamSelect {
        return Err(TournamentError::InvalidState);
    }
    let index = tournament
        .match_index(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

    let m = &tournament.matches[index];
    let (Some(home), Some(away)) = (m.home_team_id.clone(), m.away_team_id.clone()) else {
        return Err(TournamentError::MatchNotReady(match_id.to_string()));
    };

    let winner = resolve_winner(m.stage, &home, &away, match_id, result)?;

    let m = &mut tournament.matches[index];
    m.home_score = Some(result.home_score);
    m.away_score = Some(result.away_score);
    m.finished = true;
    m.winner_id = winner;
    Ok(())
}

/// Winner of a recorded score. Knockout draws must carry a tie-break winner
/// naming one of the participants; group draws have no winner.
fn resolve_winner(
    stage: Stage,
    home: &TeamId,
    away: &TeamId,
    match_id: &str,
    result: &MatchResult,
) -> Result<Option<TeamId>, TournamentError> {
    if result.home_score > result.away_score {
        return Ok(Some(home.clone()));
    }
    if result.away_score > result.home_score {
        return Ok(Some(away.clone()));
    }
    if !stage.is_knockout() {
        return Ok(None);
    }
    match &result.tie_break_winner {
        None => Err(TournamentError::DrawNeedsTieBreak(match_id.to_string())),
        Some(w) if w == home || w == away => Ok(Some(w.clone())),
        Some(_) => Err(TournamentError::InvalidTieBreakWinner(match_id.to_string())),
    }
}

/// Re-derive everything downstream of the recorded results until nothing
/// changes: full standings recompute, Round-of-32 re-pairing when a bracket
/// exists, then the forward walk. Running it on an already-consistent
/// tournament mutates nothing, so callers may invoke it freely: after each
/// single apply, once after a batch, or after loading a snapshot.
pub fn settle(tournament: &mut Tournament) {
    tournament.standings = compute_standings(&tournament.teams, &tournament.matches);
    if !tournament.has_bracket() {
        return;
    }
    refresh_round_of_32(tournament);
    while advance_pass(tournament) {}
}

/// Diff the computed Round-of-32 pairings against the live matches and
/// overwrite any side whose identity changed, resetting finished matches
/// whose participants moved.
fn refresh_round_of_32(tournament: &mut Tournament) {
    let pairings = select_r32_pairings(&tournament.groups, &tournament.standings);
    for pairing in pairings {
        let Some(index) = tournament.match_index(&pairing.match_id) else {
            continue;
        };
        let m = &mut tournament.matches[index];
        let mut touched = false;
        if m.home_team_id != pairing.home {
            m.home_team_id = pairing.home;
            touched = true;
        }
        if m.away_team_id != pairing.away {
            m.away_team_id = pairing.away;
            touched = true;
        }
        if touched && m.finished {
            m.reset_result();
            log::info!("{}: pairing changed, result reset", m.id);
        }
    }
}

/// One pass over the adjacency table in round order. Returns whether any
/// slot changed; the caller loops until a pass is a no-op (fixed point).
fn advance_pass(tournament: &mut Tournament) -> bool {
    let mut changed = false;
    for rule in data::ADVANCEMENT.iter() {
        let home_incoming = feed_team(tournament, rule.home);
        let away_incoming = feed_team(tournament, rule.away);
        let Some(index) = tournament.match_index(&data::match_id(rule.target)) else {
            continue;
        };
        let m = &mut tournament.matches[index];
        let mut touched = false;
        if m.home_team_id != home_incoming {
            m.home_team_id = home_incoming;
            touched = true;
        }
        if m.away_team_id != away_incoming {
            m.away_team_id = away_incoming;
            touched = true;
        }
        if touched {
            changed = true;
            if m.finished {
                m.reset_result();
                log::info!("{}: upstream result changed, result reset", m.id);
            }
        }
    }
    changed
}

/// The team a feed currently delivers: the source's winner (or loser, for
/// the third-place playoff) when the source is finished, unresolved
/// otherwise. An unfinished source is a valid, stable state, not an error.
fn feed_team(tournament: &Tournament, feed: Feed) -> Option<TeamId> {
    let (num, want_loser) = match feed {
        Feed::WinnerOf(n) => (n, false),
        Feed::LoserOf(n) => (n, true),
    };
    let source = tournament.match_by_id(&data::match_id(num))?;
    if !source.finished {
        return None;
    }
    if want_loser {
        source.loser_id()
    } else {
        source.winner_id.clone()
    }
}
