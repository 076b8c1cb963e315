pub mod frame;
pub use frame::*;

pub mod player;
pub use player::*;

pub mod ship;
pub use ship::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::frame::Frame;
    use super::player::Player;
    use super::ship::Ship;
    use crate::engine::constants::Constants;
    use crate::grid::position::Position;
    use crate::grid::torus::Torus;
    use crate::{Halite, ShipId};

    /// the scenario table: 8x8 board, 50 turns, standard costs
    pub fn constants() -> Constants {
        Constants {
            max_turns: 50,
            ..Constants::default()
        }
    }

    /// two-player 8x8 frame with shipyards at (0,0) and (4,4); all cells are
    /// barren except the ones listed
    pub fn frame(turn: u32, halite: &[(Position, Halite)], ships: Vec<Ship>) -> Frame {
        frame_with(constants(), turn, halite, ships)
    }

    pub fn frame_with(
        constants: Constants,
        turn: u32,
        halite: &[(Position, Halite)],
        ships: Vec<Ship>,
    ) -> Frame {
        let torus = Torus::new(8, 8);
        let mut cells = vec![0; torus.area()];
        for (position, amount) in halite {
            cells[torus.index(*position)] = *amount;
        }
        let players = vec![
            Player::new(0, Position { x: 0, y: 0 }),
            Player::new(1, Position { x: 4, y: 4 }),
        ];
        Frame::new(constants, torus, turn, 0, cells, players, ships)
    }

    pub fn ship(id: ShipId, x: i32, y: i32, halite: Halite) -> Ship {
        Ship {
            id,
            owner: 0,
            position: Position { x, y },
            halite,
        }
    }

    pub fn enemy(id: ShipId, x: i32, y: i32, halite: Halite) -> Ship {
        Ship {
            id,
            owner: 1,
            position: Position { x, y },
            halite,
        }
    }
}
