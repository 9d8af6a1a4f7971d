//! Tournament business logic: standings, qualifiers, bracket, propagation.

mod bracket;
mod propagation;
mod qualifiers;
mod simulate;
mod standings;

pub use bracket::close_group_stage;
pub use propagation::{apply_result, record_result, settle};
pub use qualifiers::{
    group_positions, qualified_thirds, ranked_thirds, select_r32_pairings, R32Pairing,
};
pub use simulate::{simulate_match, simulate_phase, RatingSimulator, ResultSource};
pub use standings::{compute_standings, rank_teams};
