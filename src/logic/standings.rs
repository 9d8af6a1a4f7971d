//! Standings calculator: a pure fold over the finished group matches.

use crate::models::{Match, Stage, Standing, Team, TeamId};
use std::collections::HashMap;

/// Derive every team's standing from scratch. Called after every mutation;
/// there is deliberately no incremental update path, so the table can never
/// drift from the match set it was computed from.
pub fn compute_standings(
    teams: &HashMap<TeamId, Team>,
    matches: &[Match],
) -> HashMap<TeamId, Standing> {
    let mut standings: HashMap<TeamId, Standing> = teams
        .keys()
        .map(|id| (id.clone(), Standing::new(id.clone())))
        .collect();

    for m in matches {
        if m.stage != Stage::Group || !m.finished {
            continue;
        }
        let (Some(home), Some(away)) = (&m.home_team_id, &m.away_team_id) else {
            continue;
        };
        let (Some(home_score), Some(away_score)) = (m.home_score, m.away_score) else {
            continue;
        };
        if let Some(s) = standings.get_mut(home) {
            s.apply_score(home_score, away_score);
        }
        if let Some(s) = standings.get_mut(away) {
            s.apply_score(away_score, home_score);
        }
    }

    standings
}

/// Sort team ids by their standings, best first. The sort is stable, so
/// teams that tie on points, goal difference, and goals-for keep the order
/// they were passed in.
pub fn rank_teams(team_ids: &[TeamId], standings: &HashMap<TeamId, Standing>) -> Vec<TeamId> {
    let mut ranked: Vec<TeamId> = team_ids.to_vec();
    ranked.sort_by(|a, b| {
        let ka = standings.get(a).map(Standing::rank_key).unwrap_or_default();
        let kb = standings.get(b).map(Standing::rank_key).unwrap_or_default();
        kb.cmp(&ka)
    });
    ranked
}
