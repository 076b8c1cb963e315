use super::player::Player;
use super::ship::Ship;
use crate::engine::constants::Constants;
use crate::engine::state::Game;
use crate::grid::position::Position;
use crate::grid::torus::Torus;
use crate::{Halite, PlayerId, ShipId};

/// immutable view of one turn: constants, board, roster. built once per
/// turn from the engine state and read-only for the duration of planning;
/// entities are plain values looked up by id, never pointers.
#[derive(Debug, Clone)]
pub struct Frame {
    constants: Constants,
    torus: Torus,
    turn: u32,
    me: PlayerId,
    halite: Vec<Halite>,
    players: Vec<Player>,
    ships: Vec<Ship>,
}

impl From<&Game> for Frame {
    fn from(game: &Game) -> Self {
        Self::new(
            game.constants,
            game.torus,
            game.turn,
            game.my_id,
            game.halite.clone(),
            game.players.clone(),
            game.ships.clone(),
        )
    }
}

impl Frame {
    pub fn new(
        constants: Constants,
        torus: Torus,
        turn: u32,
        me: PlayerId,
        halite: Vec<Halite>,
        players: Vec<Player>,
        ships: Vec<Ship>,
    ) -> Self {
        assert!(halite.len() == torus.area());
        assert!(players.iter().any(|player| player.id == me));
        Self {
            constants,
            torus,
            turn,
            me,
            halite,
            players,
            ships,
        }
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }
    pub fn torus(&self) -> Torus {
        self.torus
    }
    pub fn turn(&self) -> u32 {
        self.turn
    }
    pub fn turns_left(&self) -> u32 {
        self.constants.max_turns.saturating_sub(self.turn)
    }
    pub fn my_id(&self) -> PlayerId {
        self.me
    }
    pub fn me(&self) -> &Player {
        self.players
            .iter()
            .find(|player| player.id == self.me)
            .expect("own id in roster")
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }
    pub fn my_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|ship| ship.owner == self.me)
    }
    pub fn enemy_ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|ship| ship.owner != self.me)
    }
    pub fn halite_at(&self, position: Position) -> Halite {
        self.halite[self.torus.index(position)]
    }
    /// total halite still on the board
    pub fn halite_left(&self) -> Halite {
        self.halite.iter().sum()
    }
    pub fn ship_at(&self, position: Position) -> bool {
        let position = self.torus.normalize(position);
        self.ships.iter().any(|ship| ship.position == position)
    }
    /// owner of the nearest shipyard; ties go to the lowest player id
    pub fn closest_shipyard(&self, position: Position) -> PlayerId {
        self.players
            .iter()
            .min_by_key(|player| (self.torus.distance(position, player.shipyard), player.id))
            .expect("at least one player")
            .id
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use crate::grid::position::Position;

    #[test]
    fn roster_lookups() {
        let frame = fixtures::frame(
            1,
            &[],
            vec![fixtures::ship(3, 1, 0, 50), fixtures::enemy(9, 5, 5, 0)],
        );
        assert!(frame.me().id == 0);
        assert!(frame.my_ships().count() == 1);
        assert!(frame.enemy_ships().count() == 1);
        assert!(frame.ship(3).unwrap().halite == 50);
        assert!(frame.ship(4).is_none());
        assert!(frame.ship_at(Position { x: 5, y: 5 }));
        assert!(!frame.ship_at(Position { x: 2, y: 2 }));
    }

    #[test]
    fn halite_accounting() {
        let frame = fixtures::frame(
            1,
            &[(Position { x: 4, y: 0 }, 800), (Position { x: 1, y: 1 }, 25)],
            vec![],
        );
        assert!(frame.halite_at(Position { x: 4, y: 0 }) == 800);
        assert!(frame.halite_at(Position { x: 0, y: 0 }) == 0);
        assert!(frame.halite_left() == 825);
        assert!(frame.turns_left() == 49);
    }

    #[test]
    fn shipyard_proximity() {
        let frame = fixtures::frame(1, &[], vec![]);
        assert!(frame.closest_shipyard(Position { x: 1, y: 0 }) == 0);
        assert!(frame.closest_shipyard(Position { x: 4, y: 3 }) == 1);
        // equidistant cells go to the lower id
        assert!(frame.closest_shipyard(Position { x: 2, y: 2 }) == 0);
    }
}
