use clap::Parser;
use flotilla::control::controller::Controller;
use flotilla::control::planner::Planner;
use flotilla::control::settings::Settings;
use flotilla::engine::input::Input;
use flotilla::engine::state::Game;
use flotilla::game::frame::Frame;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// rng seed for tie-breaking; defaults to the wall clock
    seed: Option<u32>,

    #[command(flatten)]
    settings: Settings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0)
    });
    flotilla::init();

    let mut input = Input::stdin();
    let mut game = Game::handshake(&mut input)?;
    let mut bot = Controller::Planner(Planner::new(cli.settings.clone(), seed as u64));
    game.ready(bot.name())?;
    log::info!(
        "{} ready as player {} on {}x{}, seed {}",
        bot.name(),
        game.my_id,
        game.torus.width(),
        game.torus.height(),
        seed,
    );

    loop {
        if cli.settings.max_turns >= 0 && game.turn as i64 >= cli.settings.max_turns {
            log::info!("stopping at the configured turn cap");
            break;
        }
        if let Err(error) = game.update(&mut input) {
            log::info!("match over: {:#}", error);
            break;
        }
        let deadline = Instant::now() + flotilla::TURN_BUDGET;
        let frame = Frame::from(&game);
        let commands = bot.run(&frame, deadline);
        if let Err(error) = game.end_turn(&commands) {
            log::warn!("engine write failed: {:#}", error);
            break;
        }
    }
    Ok(())
}
