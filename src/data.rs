//! Fixed tournament configuration: the 48-team roster, the 12 groups, the
//! 72-match group schedule, the Round-of-32 seeding plan (with the
//! hand-curated third-place allow-lists), and the source-to-target
//! adjacency for every knockout round. All of this is data created once at
//! initialization and read-only thereafter; propagation walks these tables
//! instead of deriving bracket structure from match-id arithmetic.

use crate::models::{Group, GroupId, Match, MatchId, Stage, Team, TeamId, TournamentError};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Embedded roster, parsed with `csv` at tournament creation.
const TEAMS_CSV: &str = include_str!("../data/teams.csv");

/// Group draw: 12 groups of 4 team codes, in draw order.
const GROUP_DRAW: [(GroupId, [&str; 4]); 12] = [
    ('A', ["MEX", "RSA", "KOR", "DEN"]),
    ('B', ["CAN", "ITA", "QAT", "SUI"]),
    ('C', ["BRA", "MAR", "HAI", "SCO"]),
    ('D', ["USA", "PAR", "AUS", "TUR"]),
    ('E', ["GER", "CUW", "CIV", "ECU"]),
    ('F', ["NED", "JPN", "UKR", "TUN"]),
    ('G', ["BEL", "EGY", "IRN", "NZL"]),
    ('H', ["ESP", "CPV", "KSA", "URU"]),
    ('I', ["FRA", "SEN", "BOL", "NOR"]),
    ('J', ["ARG", "ALG", "AUT", "JOR"]),
    ('K', ["POR", "JAM", "UZB", "COL"]),
    ('L', ["ENG", "CRO", "GHA", "PAN"]),
];

/// One group-stage fixture: match number, group, in-group pairing indices,
/// day of June 2026, venue.
struct GroupFixture {
    num: u8,
    group: GroupId,
    pairing: (usize, usize),
    day: u32,
    venue: &'static str,
}

const fn gf(num: u8, group: GroupId, h: usize, a: usize, day: u32, venue: &'static str) -> GroupFixture {
    GroupFixture { num, group, pairing: (h, a), day, venue }
}

/// Matches M01-M72, June 11-27 2026.
const GROUP_SCHEDULE: [GroupFixture; 72] = [
    gf(1, 'A', 0, 1, 11, "Estadio Azteca"),
    gf(2, 'A', 2, 3, 11, "Estadio Akron"),
    gf(3, 'B', 0, 1, 12, "BMO Field"),
    gf(4, 'D', 0, 1, 12, "SoFi Stadium"),
    gf(5, 'C', 0, 1, 13, "Gillette Stadium"),
    gf(6, 'D', 2, 3, 13, "BC Place"),
    gf(7, 'C', 2, 3, 13, "MetLife Stadium"),
    gf(8, 'B', 2, 3, 13, "Levi's Stadium"),
    gf(9, 'E', 0, 1, 14, "Lincoln Financial Field"),
    gf(10, 'E', 2, 3, 14, "NRG Stadium"),
    gf(11, 'F', 0, 1, 14, "AT&T Stadium"),
    gf(12, 'F', 2, 3, 14, "Estadio BBVA"),
    gf(13, 'H', 0, 1, 15, "Hard Rock Stadium"),
    gf(14, 'H', 2, 3, 15, "Mercedes-Benz Stadium"),
    gf(15, 'G', 0, 1, 15, "SoFi Stadium"),
    gf(16, 'G', 2, 3, 15, "Lumen Field"),
    gf(17, 'I', 0, 1, 16, "MetLife Stadium"),
    gf(18, 'I', 2, 3, 16, "Gillette Stadium"),
    gf(19, 'J', 0, 1, 16, "Arrowhead Stadium"),
    gf(20, 'J', 2, 3, 16, "Levi's Stadium"),
    gf(21, 'L', 0, 1, 17, "BMO Field"),
    gf(22, 'L', 2, 3, 17, "AT&T Stadium"),
    gf(23, 'K', 0, 1, 17, "NRG Stadium"),
    gf(24, 'K', 2, 3, 17, "Estadio Azteca"),
    gf(25, 'A', 1, 2, 18, "Mercedes-Benz Stadium"),
    gf(26, 'B', 1, 3, 18, "SoFi Stadium"),
    gf(27, 'B', 0, 2, 18, "BC Place"),
    gf(28, 'A', 0, 3, 18, "Estadio Akron"),
    gf(29, 'C', 0, 2, 19, "Lincoln Financial Field"),
    gf(30, 'C', 1, 3, 19, "Gillette Stadium"),
    gf(31, 'D', 1, 3, 19, "Levi's Stadium"),
    gf(32, 'D', 0, 2, 19, "Lumen Field"),
    gf(33, 'E', 0, 2, 20, "BMO Field"),
    gf(34, 'E', 1, 3, 20, "Arrowhead Stadium"),
    gf(35, 'F', 0, 2, 20, "NRG Stadium"),
    gf(36, 'F', 1, 3, 20, "Estadio BBVA"),
    gf(37, 'H', 0, 2, 21, "Hard Rock Stadium"),
    gf(38, 'H', 1, 3, 21, "Mercedes-Benz Stadium"),
    gf(39, 'G', 0, 2, 21, "SoFi Stadium"),
    gf(40, 'G', 1, 3, 21, "BC Place"),
    gf(41, 'I', 0, 2, 22, "MetLife Stadium"),
    gf(42, 'I', 1, 3, 22, "Lincoln Financial Field"),
    gf(43, 'J', 0, 2, 22, "AT&T Stadium"),
    gf(44, 'J', 1, 3, 22, "Levi's Stadium"),
    gf(45, 'L', 0, 2, 23, "Gillette Stadium"),
    gf(46, 'L', 1, 3, 23, "BMO Field"),
    gf(47, 'K', 0, 2, 23, "NRG Stadium"),
    gf(48, 'K', 1, 3, 23, "Estadio Akron"),
    gf(49, 'C', 3, 0, 24, "Hard Rock Stadium"),
    gf(50, 'C', 1, 2, 24, "Mercedes-Benz Stadium"),
    gf(51, 'B', 0, 3, 24, "BC Place"),
    gf(52, 'B', 1, 2, 24, "Lumen Field"),
    gf(53, 'A', 0, 2, 24, "Estadio Azteca"),
    gf(54, 'A', 1, 3, 24, "Estadio BBVA"),
    gf(55, 'E', 3, 0, 25, "Lincoln Financial Field"),
    gf(56, 'E', 1, 2, 25, "MetLife Stadium"),
    gf(57, 'F', 3, 0, 25, "AT&T Stadium"),
    gf(58, 'F', 1, 2, 25, "Arrowhead Stadium"),
    gf(59, 'D', 3, 0, 25, "SoFi Stadium"),
    gf(60, 'D', 1, 2, 25, "Levi's Stadium"),
    gf(61, 'I', 3, 0, 26, "Gillette Stadium"),
    gf(62, 'I', 1, 2, 26, "BMO Field"),
    gf(63, 'G', 3, 0, 26, "Lumen Field"),
    gf(64, 'G', 1, 2, 26, "BC Place"),
    gf(65, 'H', 3, 0, 26, "NRG Stadium"),
    gf(66, 'H', 1, 2, 26, "Estadio Akron"),
    gf(67, 'L', 3, 0, 27, "MetLife Stadium"),
    gf(68, 'L', 1, 2, 27, "Lincoln Financial Field"),
    gf(69, 'J', 3, 0, 27, "Arrowhead Stadium"),
    gf(70, 'J', 1, 2, 27, "AT&T Stadium"),
    gf(71, 'K', 3, 0, 27, "Hard Rock Stadium"),
    gf(72, 'K', 1, 2, 27, "Mercedes-Benz Stadium"),
];

/// How a Round-of-32 side is filled from the final group standings.
#[derive(Clone, Copy, Debug)]
pub enum Seed {
    /// A specific rank in a specific group, e.g. rank 1 of group 'A'.
    Placed { rank: usize, group: GroupId },
    /// One of the eight best third-placed teams. The allow-list names the
    /// groups whose third may legally fill this slot; it is hand-curated
    /// anti-collision configuration and is never re-derived.
    BestThird { allowed: [GroupId; 5] },
}

/// One Round-of-32 slot of the seeding plan.
pub struct R32Slot {
    pub num: u8,
    pub home: Seed,
    pub away: Seed,
}

const fn placed(rank: usize, group: GroupId) -> Seed {
    Seed::Placed { rank, group }
}

const fn third(allowed: [GroupId; 5]) -> Seed {
    Seed::BestThird { allowed }
}

/// Matches M73-M88. Walked in this order when assigning best thirds.
pub const R32_PLAN: [R32Slot; 16] = [
    R32Slot { num: 73, home: placed(2, 'A'), away: placed(2, 'B') },
    R32Slot { num: 74, home: placed(1, 'K'), away: third(['A', 'B', 'C', 'D', 'E']) },
    R32Slot { num: 75, home: placed(1, 'C'), away: placed(2, 'D') },
    R32Slot { num: 76, home: placed(1, 'F'), away: third(['E', 'G', 'I', 'J', 'K']) },
    R32Slot { num: 77, home: placed(1, 'A'), away: third(['C', 'D', 'F', 'G', 'H']) },
    R32Slot { num: 78, home: placed(1, 'E'), away: placed(2, 'F') },
    R32Slot { num: 79, home: placed(1, 'I'), away: third(['B', 'E', 'F', 'J', 'L']) },
    R32Slot { num: 80, home: placed(1, 'L'), away: third(['A', 'D', 'G', 'H', 'I']) },
    R32Slot { num: 81, home: placed(1, 'B'), away: third(['E', 'F', 'I', 'K', 'L']) },
    R32Slot { num: 82, home: placed(1, 'J'), away: placed(2, 'H') },
    R32Slot { num: 83, home: placed(1, 'D'), away: third(['B', 'C', 'G', 'J', 'K']) },
    R32Slot { num: 84, home: placed(1, 'G'), away: placed(2, 'I') },
    R32Slot { num: 85, home: placed(1, 'H'), away: third(['A', 'C', 'I', 'J', 'L']) },
    R32Slot { num: 86, home: placed(2, 'C'), away: placed(2, 'E') },
    R32Slot { num: 87, home: placed(2, 'G'), away: placed(2, 'J') },
    R32Slot { num: 88, home: placed(2, 'K'), away: placed(2, 'L') },
];

/// Schedule metadata for knockout matches M73-M104.
struct KnockoutSlot {
    num: u8,
    stage: Stage,
    month: u32,
    day: u32,
    venue: &'static str,
}

const fn ks(num: u8, stage: Stage, month: u32, day: u32, venue: &'static str) -> KnockoutSlot {
    KnockoutSlot { num, stage, month, day, venue }
}

const KNOCKOUT_SLOTS: [KnockoutSlot; 32] = [
    ks(73, Stage::RoundOf32, 6, 28, "SoFi Stadium"),
    ks(74, Stage::RoundOf32, 6, 28, "NRG Stadium"),
    ks(75, Stage::RoundOf32, 6, 28, "AT&T Stadium"),
    ks(76, Stage::RoundOf32, 6, 29, "Estadio Azteca"),
    ks(77, Stage::RoundOf32, 6, 29, "Hard Rock Stadium"),
    ks(78, Stage::RoundOf32, 6, 30, "Gillette Stadium"),
    ks(79, Stage::RoundOf32, 6, 30, "MetLife Stadium"),
    ks(80, Stage::RoundOf32, 6, 30, "BC Place"),
    ks(81, Stage::RoundOf32, 7, 1, "Lumen Field"),
    ks(82, Stage::RoundOf32, 7, 1, "Levi's Stadium"),
    ks(83, Stage::RoundOf32, 7, 2, "Arrowhead Stadium"),
    ks(84, Stage::RoundOf32, 7, 2, "Lincoln Financial Field"),
    ks(85, Stage::RoundOf32, 7, 2, "Mercedes-Benz Stadium"),
    ks(86, Stage::RoundOf32, 7, 3, "BMO Field"),
    ks(87, Stage::RoundOf32, 7, 3, "Estadio BBVA"),
    ks(88, Stage::RoundOf32, 7, 4, "Estadio Akron"),
    ks(89, Stage::RoundOf16, 7, 4, "NRG Stadium"),
    ks(90, Stage::RoundOf16, 7, 4, "AT&T Stadium"),
    ks(91, Stage::RoundOf16, 7, 5, "SoFi Stadium"),
    ks(92, Stage::RoundOf16, 7, 5, "Lumen Field"),
    ks(93, Stage::RoundOf16, 7, 6, "Hard Rock Stadium"),
    ks(94, Stage::RoundOf16, 7, 6, "MetLife Stadium"),
    ks(95, Stage::RoundOf16, 7, 7, "Gillette Stadium"),
    ks(96, Stage::RoundOf16, 7, 7, "BC Place"),
    ks(97, Stage::QuarterFinal, 7, 9, "Gillette Stadium"),
    ks(98, Stage::QuarterFinal, 7, 10, "SoFi Stadium"),
    ks(99, Stage::QuarterFinal, 7, 11, "Arrowhead Stadium"),
    ks(100, Stage::QuarterFinal, 7, 12, "Hard Rock Stadium"),
    ks(101, Stage::SemiFinal, 7, 14, "AT&T Stadium"),
    ks(102, Stage::SemiFinal, 7, 15, "Mercedes-Benz Stadium"),
    ks(103, Stage::ThirdPlace, 7, 18, "Hard Rock Stadium"),
    ks(104, Stage::Final, 7, 19, "MetLife Stadium"),
];

/// How a later-round side is fed from a source match.
#[derive(Clone, Copy, Debug)]
pub enum Feed {
    WinnerOf(u8),
    /// Only the third-place playoff takes losers (of the two semi-finals).
    LoserOf(u8),
}

/// One knockout slot past the Round of 32, with its one or two sources.
pub struct AdvanceRule {
    pub target: u8,
    pub home: Feed,
    pub away: Feed,
}

const fn adv(target: u8, home: Feed, away: Feed) -> AdvanceRule {
    AdvanceRule { target, home, away }
}

/// The full source-to-target adjacency, in round order. Propagation walks
/// this table; within one pass every target sees its sources already
/// updated, and the walk repeats until a pass changes nothing.
pub const ADVANCEMENT: [AdvanceRule; 16] = [
    adv(89, Feed::WinnerOf(73), Feed::WinnerOf(74)),
    adv(90, Feed::WinnerOf(75), Feed::WinnerOf(76)),
    adv(91, Feed::WinnerOf(77), Feed::WinnerOf(78)),
    adv(92, Feed::WinnerOf(79), Feed::WinnerOf(80)),
    adv(93, Feed::WinnerOf(81), Feed::WinnerOf(82)),
    adv(94, Feed::WinnerOf(83), Feed::WinnerOf(84)),
    adv(95, Feed::WinnerOf(85), Feed::WinnerOf(86)),
    adv(96, Feed::WinnerOf(87), Feed::WinnerOf(88)),
    adv(97, Feed::WinnerOf(89), Feed::WinnerOf(90)),
    adv(98, Feed::WinnerOf(91), Feed::WinnerOf(92)),
    adv(99, Feed::WinnerOf(93), Feed::WinnerOf(94)),
    adv(100, Feed::WinnerOf(95), Feed::WinnerOf(96)),
    adv(101, Feed::WinnerOf(97), Feed::WinnerOf(98)),
    adv(102, Feed::WinnerOf(99), Feed::WinnerOf(100)),
    adv(103, Feed::LoserOf(101), Feed::LoserOf(102)),
    adv(104, Feed::WinnerOf(101), Feed::WinnerOf(102)),
];

/// Stable match id for a match number: "M01".."M104".
pub fn match_id(num: u8) -> MatchId {
    format!("M{:02}", num)
}

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid fixture date")
}

/// Parse the embedded roster. Rejects short/long rosters so a bad edit to
/// the CSV fails loudly at startup rather than as a missing-team panic later.
pub fn load_roster() -> Result<HashMap<TeamId, Team>, TournamentError> {
    let mut reader = csv::Reader::from_reader(TEAMS_CSV.as_bytes());
    let mut teams = HashMap::new();
    for record in reader.deserialize::<Team>() {
        let team = record.map_err(|e| TournamentError::Roster(e.to_string()))?;
        teams.insert(team.id.clone(), team);
    }
    if teams.len() != 48 {
        return Err(TournamentError::Roster(format!(
            "expected 48 teams, got {}",
            teams.len()
        )));
    }
    Ok(teams)
}

/// The twelve groups in draw order.
pub fn groups() -> Vec<Group> {
    GROUP_DRAW
        .iter()
        .map(|(id, codes)| Group {
            id: *id,
            teams: [
                codes[0].to_string(),
                codes[1].to_string(),
                codes[2].to_string(),
                codes[3].to_string(),
            ],
        })
        .collect()
}

/// The 72 group-stage matches, fully seeded from the draw.
pub fn group_schedule(groups: &[Group]) -> Vec<Match> {
    GROUP_SCHEDULE
        .iter()
        .filter_map(|f| {
            let group = groups.iter().find(|g| g.id == f.group)?;
            Some(Match::group_match(
                match_id(f.num),
                f.group,
                group.teams[f.pairing.0].clone(),
                group.teams[f.pairing.1].clone(),
                day(6, f.day),
                f.venue,
            ))
        })
        .collect()
}

/// The 32 knockout match shells M73-M104, participants unresolved.
pub fn knockout_matches() -> Vec<Match> {
    KNOCKOUT_SLOTS
        .iter()
        .map(|s| Match::knockout(match_id(s.num), s.stage, day(s.month, s.day), s.venue))
        .collect()
}
