pub mod control;
pub mod engine;
pub mod flow;
pub mod game;
pub mod grid;
pub mod model;
pub mod search;

/// dimensional analysis types
pub type Halite = i32;
pub type PlayerId = usize;
pub type ShipId = u32;

// reservation model parameters
pub const MINING_SLOTS: u32 = 25;
pub const BARREN_SLOT: u32 = 30;

// scheduler parameters
pub const ACCEPT_SEARCH_DEPTH: usize = 80;
pub const FRESH_PLAN_PRIORITY: Halite = 100_000;
pub const DEFENSIVE_TURNS: u32 = 150;
pub const DROPOFF_RUSH_TURNS: u32 = 15;
pub const ENDGAME_SEARCH_MARGIN: u32 = 4;
pub const TURN_BUDGET: std::time::Duration = std::time::Duration::from_millis(1_200);

/// random generation, for tests
pub trait Arbitrary {
    fn random() -> Self;
}

/// integer division rounding up; callers only pass non-negative numerators
pub fn ceil_div(a: Halite, b: Halite) -> Halite {
    (a + b - 1) / b
}

/// initialize logging. stdout belongs to the engine protocol, so everything
/// goes to a timestamped file under logs/, with warnings mirrored on stderr.
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}-{}.log", time, std::process::id()))
            .expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Warn,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div_rounds_up() {
        assert!(ceil_div(0, 4) == 0);
        assert!(ceil_div(1, 4) == 1);
        assert!(ceil_div(4, 4) == 1);
        assert!(ceil_div(5, 4) == 2);
        assert!(ceil_div(800, 4) == 200);
    }
}
