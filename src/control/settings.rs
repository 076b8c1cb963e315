use crate::search::penalty::PenaltyFactor;

/// controller configuration. every field is a CLI flag so self-play tuning
/// sweeps can vary them without rebuilding.
#[derive(Debug, Clone, clap::Args)]
pub struct Settings {
    /// bot name announced to the engine
    #[arg(long, default_value = "flotilla")]
    pub name: String,

    /// stop after this many turns, for profiling; -1 plays the whole match
    #[arg(long, default_value_t = -1)]
    pub max_turns: i64,

    /// depth cap for the per-unit search
    #[arg(long, default_value_t = 100)]
    pub max_search_depth: usize,

    /// scales the payback estimate in the spawn decision
    #[arg(long, default_value_t = 0.5)]
    pub ship_build_factor: f32,

    /// project enemy harvest targets into the world model
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub simulate_enemy: bool,

    /// recompute stale plans by divergence priority
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub recalculate_paths: bool,

    /// sidestep cells an enemy may enter next turn; defaults on in 4-player
    /// games
    #[arg(long, action = clap::ArgAction::Set)]
    pub avoid_enemy_collisions: Option<bool>,

    /// movement-penalty weighting for the search
    #[arg(long, value_enum, default_value_t = PenaltyFactor::Decaying)]
    pub penalty_factor: PenaltyFactor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "flotilla".to_string(),
            max_turns: -1,
            max_search_depth: 100,
            ship_build_factor: 0.5,
            simulate_enemy: true,
            recalculate_paths: true,
            avoid_enemy_collisions: None,
            penalty_factor: PenaltyFactor::Decaying,
        }
    }
}
