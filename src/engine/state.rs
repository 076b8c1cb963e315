use super::command::Command;
use super::constants::Constants;
use super::input::Input;
use crate::game::player::Player;
use crate::game::ship::Ship;
use crate::grid::position::Position;
use crate::grid::torus::Torus;
use crate::{Halite, PlayerId, ShipId};
use anyhow::Context;
use std::io::BufRead;
use std::io::Write;

/// persistent engine-facing state, updated in place from the line protocol
/// every turn. the planner never reads this directly; it consumes the
/// per-turn Frame snapshot instead.
#[derive(Debug)]
pub struct Game {
    pub constants: Constants,
    pub torus: Torus,
    pub my_id: PlayerId,
    pub turn: u32,
    pub halite: Vec<Halite>,
    pub players: Vec<Player>,
    pub ships: Vec<Ship>,
}

impl Game {
    /// handshake: constants line, roster of shipyards, board dimensions and
    /// the initial halite grid.
    pub fn handshake<R: BufRead>(input: &mut Input<R>) -> anyhow::Result<Self> {
        let constants = Constants::parse(&input.line().context("constants line")?)?;
        let num_players = input.next::<usize>().context("player count")?;
        let my_id = input.next::<PlayerId>().context("own player id")?;
        let mut players = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let id = input.next::<PlayerId>().context("player id")?;
            let x = input.next::<i32>()?;
            let y = input.next::<i32>()?;
            players.push(Player::new(id, Position { x, y }));
        }
        let width = input.next::<i32>().context("board width")?;
        let height = input.next::<i32>().context("board height")?;
        let torus = Torus::new(width, height);
        let mut halite = Vec::with_capacity(torus.area());
        for _ in 0..torus.area() {
            halite.push(input.next::<Halite>().context("initial halite cell")?);
        }
        anyhow::ensure!(
            players.iter().any(|player| player.id == my_id),
            "own id {} missing from roster",
            my_id,
        );
        Ok(Self {
            constants,
            torus,
            my_id,
            turn: 0,
            halite,
            players,
            ships: Vec::new(),
        })
    }

    /// one turn of observations: banks, fleets, dropoffs, changed cells.
    pub fn update<R: BufRead>(&mut self, input: &mut Input<R>) -> anyhow::Result<()> {
        self.turn = input.next::<u32>().context("turn number")?;
        self.ships.clear();
        for _ in 0..self.players.len() {
            let id = input.next::<PlayerId>().context("player id")?;
            let num_ships = input.next::<usize>()?;
            let num_dropoffs = input.next::<usize>()?;
            let bank = input.next::<Halite>()?;
            for _ in 0..num_ships {
                let ship = input.next::<ShipId>()?;
                let x = input.next::<i32>()?;
                let y = input.next::<i32>()?;
                let cargo = input.next::<Halite>()?;
                self.ships.push(Ship {
                    id: ship,
                    owner: id,
                    position: self.torus.normalize(Position { x, y }),
                    halite: cargo,
                });
            }
            let mut dropoffs = Vec::with_capacity(num_dropoffs);
            for _ in 0..num_dropoffs {
                let _dropoff = input.next::<u32>()?;
                let x = input.next::<i32>()?;
                let y = input.next::<i32>()?;
                dropoffs.push(self.torus.normalize(Position { x, y }));
            }
            let player = self
                .players
                .iter_mut()
                .find(|player| player.id == id)
                .context("observation for an unknown player")?;
            player.halite = bank;
            player.dropoffs = dropoffs;
        }
        let updates = input.next::<usize>().context("update count")?;
        for _ in 0..updates {
            let x = input.next::<i32>()?;
            let y = input.next::<i32>()?;
            let amount = input.next::<Halite>()?;
            let index = self.torus.index(Position { x, y });
            self.halite[index] = amount;
        }
        Ok(())
    }

    /// handshake reply: announce the bot and start playing.
    pub fn ready(&self, name: &str) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", name).context("write bot name")?;
        out.flush().context("flush bot name")
    }

    /// send this turn's command vector. an error here means the match is
    /// over.
    pub fn end_turn(&self, commands: &[Command]) -> anyhow::Result<()> {
        let line = commands
            .iter()
            .map(Command::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line).context("write commands")?;
        out.flush().context("flush commands")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANDSHAKE: &str = "\
{\"MAX_TURNS\":50,\"NEW_ENTITY_ENERGY_COST\":1000,\"MAX_ENERGY\":1000}
2 0
0 0 0
1 2 2
4 4
0 0 0 0
0 100 0 0
0 0 0 0
0 0 0 900
";

    const TURN: &str = "\
1
0 1 0 950
5 1 0 50
1 1 1 800
6 2 2 0
3 3 3
2
1 1 90
3 3 444
";

    #[test]
    fn handshake_then_update() {
        let stream = format!("{}{}", HANDSHAKE, TURN);
        let mut input = Input::new(stream.as_bytes());
        let mut game = Game::handshake(&mut input).unwrap();
        assert!(game.constants.max_turns == 50);
        assert!(game.my_id == 0);
        assert!(game.torus.area() == 16);
        assert!(game.players.len() == 2);
        assert!(game.halite[game.torus.index(Position { x: 1, y: 1 })] == 100);
        assert!(game.halite[game.torus.index(Position { x: 3, y: 3 })] == 900);

        game.update(&mut input).unwrap();
        assert!(game.turn == 1);
        assert!(game.ships.len() == 2);
        let mine = game.ships.iter().find(|ship| ship.id == 5).unwrap();
        assert!(mine.owner == 0);
        assert!(mine.position == Position { x: 1, y: 0 });
        assert!(mine.halite == 50);
        let theirs = game.ships.iter().find(|ship| ship.id == 6).unwrap();
        assert!(theirs.owner == 1);
        let enemy = game.players.iter().find(|player| player.id == 1).unwrap();
        assert!(enemy.halite == 800);
        assert!(enemy.dropoffs == vec![Position { x: 3, y: 3 }]);
        assert!(game.halite[game.torus.index(Position { x: 1, y: 1 })] == 90);
        assert!(game.halite[game.torus.index(Position { x: 3, y: 3 })] == 444);
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let mut input = Input::new("{}\n2 0\n0 0 0\n".as_bytes());
        assert!(Game::handshake(&mut input).is_err());
    }
}
