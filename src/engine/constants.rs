use crate::Halite;
use anyhow::Context;
use serde::Deserialize;

/// the game-constants table, delivered by the match engine as a JSON object
/// in the first handshake line. keys the engine does not send fall back to
/// the standard table. inspiration parameters are carried for completeness
/// but never applied by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Constants {
    #[serde(rename = "MAX_TURNS")]
    pub max_turns: u32,
    #[serde(rename = "NEW_ENTITY_ENERGY_COST")]
    pub spawn_cost: Halite,
    #[serde(rename = "MAX_ENERGY")]
    pub max_cargo: Halite,
    #[serde(rename = "EXTRACT_RATIO")]
    pub extract_ratio: Halite,
    #[serde(rename = "MOVE_COST_RATIO")]
    pub move_cost_ratio: Halite,
    #[serde(rename = "INSPIRATION_SHIP_COUNT")]
    pub inspiration_ship_count: u32,
    #[serde(rename = "INSPIRED_BONUS_MULTIPLIER")]
    pub inspired_bonus_multiplier: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            max_turns: 400,
            spawn_cost: 1_000,
            max_cargo: 1_000,
            extract_ratio: 4,
            move_cost_ratio: 10,
            inspiration_ship_count: 2,
            inspired_bonus_multiplier: 2.0,
        }
    }
}

impl Constants {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        serde_json::from_str(line).context("malformed constants line")
    }
}
