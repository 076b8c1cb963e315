use crate::Halite;

/// movement-penalty weighting applied by the path search. the penalty is a
/// pseudo-cost on the score only; actual cargo arithmetic is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PenaltyFactor {
    /// movement is free
    Zero,
    /// full move cost early, fading to nothing by the last turn
    Decaying,
    /// full move cost
    One,
}

impl PenaltyFactor {
    /// pseudo-cost charged for leaving a cell whose move cost is
    /// `move_cost` at absolute turn `turn`
    pub fn price(&self, move_cost: Halite, turn: u32, max_turns: u32) -> f32 {
        match self {
            Self::Zero => 0.0,
            Self::One => move_cost as f32,
            Self::Decaying => move_cost as f32 * (1.0 - turn as f32 / max_turns as f32),
        }
    }
}

impl std::fmt::Display for PenaltyFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Decaying => write!(f, "decaying"),
            Self::One => write!(f, "one"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing() {
        assert!(PenaltyFactor::Zero.price(80, 10, 400) == 0.0);
        assert!(PenaltyFactor::One.price(80, 10, 400) == 80.0);
        assert!(PenaltyFactor::Decaying.price(80, 0, 400) == 80.0);
        assert!(PenaltyFactor::Decaying.price(80, 400, 400) == 0.0);
        let halfway = PenaltyFactor::Decaying.price(80, 200, 400);
        assert!(halfway == 40.0);
    }
}
