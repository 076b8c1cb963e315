use super::plan::Plan;
use crate::game::frame::Frame;
use crate::game::ship::Ship;
use crate::grid::direction::Direction;
use crate::grid::position::Position;
use crate::{ceil_div, Halite, PlayerId, MINING_SLOTS};
use std::collections::VecDeque;

/// shared predicted world for one turn of planning. every committed plan's
/// future mining events are recorded bit-per-cell, so concurrent per-unit
/// searches see each other's commitments and never contend for the same
/// mining event; projected enemy occupation and structure ownership ride
/// along. built fresh each turn, discarded at turn end.
pub struct WorldModel<'a> {
    frame: &'a Frame,
    /// 25-bit mask of available mining slots per cell; bit k set means the
    /// k-th future mining there is still unclaimed
    minings: Vec<u32>,
    /// cells treated as enemy-owned from the recorded depth onwards
    occupied_after: Vec<Option<u32>>,
    structures: Vec<Option<PlayerId>>,
}

impl<'a> From<&'a Frame> for WorldModel<'a> {
    fn from(frame: &'a Frame) -> Self {
        let area = frame.torus().area();
        let mut structures = vec![None; area];
        for player in frame.players() {
            for position in player.structures() {
                structures[frame.torus().index(position)] = Some(player.id);
            }
        }
        Self {
            frame,
            minings: vec![Self::FULL_MASK; area],
            occupied_after: vec![None; area],
            structures,
        }
    }
}

impl WorldModel<'_> {
    pub(crate) const FULL_MASK: u32 = (1 << MINING_SLOTS) - 1;

    pub fn frame(&self) -> &Frame {
        self.frame
    }

    /// fold a plan's remaining reservations into the shared map. the XOR is
    /// its own inverse, so committing twice cancels out.
    pub fn commit(&mut self, plan: &Plan, ship: &Ship) {
        let torus = self.frame.torus();
        let mut position = ship.position;
        for segment in plan.remaining() {
            if segment.direction == Direction::Still {
                let index = torus.index(position);
                self.minings[index] ^= 1 << segment.mining_slot;
            }
            position = torus.step(position, segment.direction);
        }
    }

    /// lift a plan's reservations before recomputing it, so the map
    /// reflects every other unit's commitments and nothing else.
    pub fn retract(&mut self, plan: &Plan, ship: &Ship) {
        self.commit(plan, ship);
    }

    /// whether the k-th mining at `position` is claimed by some plan
    pub fn is_reserved(&self, position: Position, slot: u32) -> bool {
        let index = self.frame.torus().index(position);
        self.minings[index] & (1 << slot) == 0
    }

    /// availability mask consulted by the search
    pub fn available_minings(&self, position: Position) -> u32 {
        self.minings[self.frame.torus().index(position)]
    }

    pub(crate) fn reset_reservations(&mut self) {
        self.minings.fill(Self::FULL_MASK);
    }

    /// cargo the unit should hold on completing its plan, priced against
    /// reservations as they stand now, without mutating them. a Still whose
    /// reservation was lost to a double-commit is priced one mining later,
    /// which is what surfaces contention as recompute priority.
    pub fn expectation(&self, plan: &Plan, ship: &Ship) -> Halite {
        let torus = self.frame.torus();
        let constants = self.frame.constants();
        let mut cargo = ship.halite;
        let mut position = ship.position;
        for segment in plan.remaining() {
            match segment.direction {
                Direction::Still => {
                    let slot = if self.is_reserved(position, segment.mining_slot) {
                        segment.mining_slot
                    } else {
                        segment.mining_slot + 1
                    };
                    let sea = self.halite_after_mines(position, slot);
                    cargo = (cargo + ceil_div(sea, constants.extract_ratio)).min(constants.max_cargo);
                }
                _ => {
                    let sea = self.halite_after_mines(position, segment.mining_slot);
                    cargo -= sea / constants.move_cost_ratio;
                }
            }
            position = torus.step(position, segment.direction);
        }
        cargo
    }

    /// record that `position` is projected to be harvested by an enemy
    /// `turns` from now
    pub fn occupy(&mut self, position: Position, turns: u32) {
        let index = self.frame.torus().index(position);
        self.occupied_after[index] = Some(turns);
    }

    pub fn is_occupied(&self, position: Position, depth: u32) -> bool {
        match self.occupied_after[self.frame.torus().index(position)] {
            Some(turns) => turns <= depth,
            None => false,
        }
    }

    pub fn has_structure(&self, position: Position) -> bool {
        self.structures[self.frame.torus().index(position)].is_some()
    }

    pub fn is_own_structure(&self, position: Position, player: PlayerId) -> bool {
        self.structures[self.frame.torus().index(position)] == Some(player)
    }

    /// halite remaining at `position` after `mines` successful mining events
    pub fn halite_after_mines(&self, position: Position, mines: u32) -> Halite {
        let mut halite = self.frame.halite_at(position);
        for _ in 0..mines {
            halite -= halite / self.frame.constants().extract_ratio;
        }
        halite
    }

    /// project where a unit standing at `start` will harvest next: breadth
    /// first over the whole board, maximizing first-mine yield per turn of
    /// travel. a halite-bearing start cell dominates outright.
    pub fn nearest_halite(&self, start: Position) -> Position {
        let torus = self.frame.torus();
        let mut visited = vec![false; torus.area()];
        let mut best = start;
        let mut best_per_turn = 0.0f32;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(position) = queue.pop_front() {
            let index = torus.index(position);
            if visited[index] {
                continue;
            }
            visited[index] = true;
            let halite = self.halite_after_mines(position, 0);
            let distance = torus.distance(start, position);
            let per_turn = match distance {
                0 if halite > 0 => f32::INFINITY,
                0 => 0.0,
                _ => halite as f32 / distance as f32,
            };
            if per_turn > best_per_turn {
                best_per_turn = per_turn;
                best = position;
            }
            for direction in Direction::cardinals() {
                queue.push_back(torus.step(position, *direction));
            }
        }
        best
    }
}
