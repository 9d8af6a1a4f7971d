//! Qualifier selector: group positions, the best eight third-placed teams,
//! and the Round-of-32 pairings. Pure and deterministic given standings;
//! safe to re-call whenever standings change.

use crate::data::{self, Seed};
use crate::logic::standings::rank_teams;
use crate::models::{Group, GroupId, MatchId, Standing, TeamId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// The computed pairing for one Round-of-32 slot. A side is `None` only
/// when no qualified third was left for it (unresolved, not an error).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct R32Pairing {
    pub match_id: MatchId,
    pub home: Option<TeamId>,
    pub away: Option<TeamId>,
}

/// Each group's four teams sorted by the ranking order, best first.
pub fn group_positions(
    groups: &[Group],
    standings: &HashMap<TeamId, Standing>,
) -> HashMap<GroupId, Vec<TeamId>> {
    groups
        .iter()
        .map(|g| (g.id, rank_teams(&g.teams, standings)))
        .collect()
}

/// All twelve third-placed teams in ranking order, best first.
pub fn ranked_thirds(
    groups: &[Group],
    standings: &HashMap<TeamId, Standing>,
) -> Vec<TeamId> {
    let positions = group_positions(groups, standings);
    let thirds: Vec<TeamId> = groups
        .iter()
        .filter_map(|g| positions.get(&g.id).and_then(|p| p.get(2)).cloned())
        .collect();
    rank_teams(&thirds, standings)
}

/// The eight third-placed teams that advance to the knockouts.
pub fn qualified_thirds(
    groups: &[Group],
    standings: &HashMap<TeamId, Standing>,
) -> Vec<TeamId> {
    let mut thirds = ranked_thirds(groups, standings);
    thirds.truncate(8);
    thirds
}

/// Resolve every Round-of-32 slot from the current standings.
///
/// Placed seeds ("1A", "2B") read straight off the group positions.
/// Third-place slots are filled greedily in plan order: the highest-ranked
/// still-unassigned qualified third whose origin group is in the slot's
/// allow-list, falling back to the best remaining qualified third when the
/// allow-list was exhausted by earlier slots, and to unresolved when none
/// remain at all.
pub fn select_r32_pairings(
    groups: &[Group],
    standings: &HashMap<TeamId, Standing>,
) -> Vec<R32Pairing> {
    let positions = group_positions(groups, standings);
    let qualified = qualified_thirds(groups, standings);
    let origin: HashMap<TeamId, GroupId> = groups
        .iter()
        .flat_map(|g| g.teams.iter().map(|t| (t.clone(), g.id)))
        .collect();
    let mut assigned: HashSet<TeamId> = HashSet::new();

    data::R32_PLAN
        .iter()
        .map(|slot| {
            let home = resolve_seed(&slot.home, &positions, &qualified, &origin, &mut assigned);
            let away = resolve_seed(&slot.away, &positions, &qualified, &origin, &mut assigned);
            R32Pairing {
                match_id: data::match_id(slot.num),
                home,
                away,
            }
        })
        .collect()
}

fn resolve_seed(
    seed: &Seed,
    positions: &HashMap<GroupId, Vec<TeamId>>,
    qualified: &[TeamId],
    origin: &HashMap<TeamId, GroupId>,
    assigned: &mut HashSet<TeamId>,
) -> Option<TeamId> {
    match seed {
        Seed::Placed { rank, group } => positions.get(group)?.get(rank - 1).cloned(),
        Seed::BestThird { allowed } => {
            let pick = qualified
                .iter()
                .find(|t| {
                    !assigned.contains(*t)
                        && origin.get(*t).is_some_and(|g| allowed.contains(g))
                })
                .or_else(|| qualified.iter().find(|t| !assigned.contains(*t)))?;
            assigned.insert(pick.clone());
            Some(pick.clone())
        }
    }
}
