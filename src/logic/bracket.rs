//! Bracket builder: instantiate the fixed knockout topology when the group
//! stage is closed.

use crate::data;
use crate::logic::propagation::settle;
use crate::models::{Phase, Tournament, TournamentError};

/// Close the group stage: build the 32 knockout match shells (M73-M104)
/// if they do not exist yet and seed the Round of 32 from the current
/// standings. Idempotent: re-entering re-diffs the pairings against the
/// live bracket instead of duplicating or discarding matches.
pub fn close_group_stage(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.phase == Phase::TeamSelect {
        return Err(TournamentError::InvalidState);
    }
    if !tournament.has_bracket() {
        tournament.matches.extend(data::knockout_matches());
        log::info!("Knockout bracket built (M73-M104)");
    }
    tournament.phase = Phase::Knockout;
    settle(tournament);
    Ok(())
}
