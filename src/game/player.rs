use crate::grid::position::Position;
use crate::{Halite, PlayerId};

/// one participant: bank, home shipyard and any dropoffs built during the
/// match. every structure cell is an infinite cargo sink that never yields
/// mining gain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub halite: Halite,
    pub shipyard: Position,
    pub dropoffs: Vec<Position>,
}

impl Player {
    pub fn new(id: PlayerId, shipyard: Position) -> Self {
        Self {
            id,
            halite: 0,
            shipyard,
            dropoffs: Vec::new(),
        }
    }

    /// shipyard first, then dropoffs
    pub fn structures(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.shipyard).chain(self.dropoffs.iter().copied())
    }
}
