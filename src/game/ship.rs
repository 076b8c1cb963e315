use crate::grid::position::Position;
use crate::{Halite, PlayerId, ShipId};

/// a harvester unit. identity is the stable engine-assigned id; everything
/// else is re-observed every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    pub id: ShipId,
    pub owner: PlayerId,
    pub position: Position,
    pub halite: Halite,
}

impl std::fmt::Display for Ship {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{} @ {} [{}]", self.id, self.position, self.halite)
    }
}
