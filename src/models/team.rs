//! Team and Group data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team (three-letter code, e.g. "MEX").
pub type TeamId = String;

/// Group letter, 'A' through 'L'.
pub type GroupId = char;

/// A national team in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub code: String,
    /// Strength rating 1-100, used only by the local fallback simulator.
    pub rating: u8,
    pub confederation: String,
}

/// A group of exactly four teams, fixed for the tournament's lifetime.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Team ids in draw order.
    pub teams: [TeamId; 4],
}
