use super::penalty::PenaltyFactor;
use crate::game::ship::Ship;
use crate::grid::direction::Direction;
use crate::grid::position::Position;
use crate::model::plan::PathSegment;
use crate::model::plan::Plan;
use crate::model::world::WorldModel;
use crate::{ceil_div, Halite, BARREN_SLOT};
use std::rc::Rc;
use std::time::Instant;

/// outcome of one bounded search: how many depth layers completed before
/// the deadline, the cargo at the chosen arrival, and the trajectory
/// itself. an empty path means no positive-score trajectory exists.
#[derive(Debug, Clone, Default)]
pub struct OptimalPath {
    pub search_depth: usize,
    pub final_halite: Halite,
    pub path: Vec<PathSegment>,
}

impl From<OptimalPath> for Plan {
    fn from(optimal: OptimalPath) -> Self {
        Plan::new(optimal.path, optimal.final_halite)
    }
}

/// per-trajectory overrides of the shared minings baseline, structurally
/// shared between search nodes so relaxation stays O(1). reads walk the
/// chain back to the baseline.
#[derive(Debug, Clone, Default)]
struct Deltas(Option<Rc<Delta>>);

#[derive(Debug)]
struct Delta {
    cell: usize,
    mask: u32,
    rest: Deltas,
}

impl Deltas {
    fn get(&self, cell: usize) -> Option<u32> {
        let mut chain = self;
        while let Some(delta) = &chain.0 {
            if delta.cell == cell {
                return Some(delta.mask);
            }
            chain = &delta.rest;
        }
        None
    }
    fn with(&self, cell: usize, mask: u32) -> Self {
        Self(Some(Rc::new(Delta {
            cell,
            mask,
            rest: self.clone(),
        })))
    }
}

/// search state per (depth, cell)
#[derive(Debug, Clone)]
struct Node {
    visited: bool,
    halite: Halite,
    penalty: f32,
    mining_slot: u32,
    in_direction: Direction,
    deltas: Deltas,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            visited: false,
            halite: 0,
            penalty: 0.0,
            mining_slot: 0,
            in_direction: Direction::Still,
            deltas: Deltas::default(),
        }
    }
}

/// ties keep the incumbent, so trajectories are deterministic for a
/// deterministic reservation map
fn relaxes(node: &Node, halite: Halite, penalty: f32) -> bool {
    !node.visited || halite as f32 - penalty > node.halite as f32 - node.penalty
}

impl WorldModel<'_> {
    /// bounded forward search for the trajectory maximizing halite gained
    /// per elapsed turn back to `end`, against the reservations currently
    /// committed to this model. layers complete whole: the deadline is
    /// checked between depths and partial results use the last finished
    /// depth.
    pub fn optimal_path(
        &self,
        ship: &Ship,
        turns_underway: u32,
        penalty_factor: PenaltyFactor,
        end: Position,
        deadline: Instant,
        max_depth: usize,
        defensive_turns: u32,
    ) -> OptimalPath {
        let frame = self.frame();
        let torus = frame.torus();
        let constants = frame.constants();
        let start = ship.position;
        let layers = max_depth.max(1);
        let mut nodes = vec![Node::default(); layers * torus.area()];

        let origin = torus.depth_index(0, start);
        nodes[origin].visited = true;
        nodes[origin].halite = ship.halite;

        let mut search_depth = 0;
        while search_depth + 1 < max_depth && Instant::now() < deadline {
            let current_turn = frame.turn() + search_depth as u32;
            let span_x = (search_depth as i32).min(torus.width() / 2);
            let span_y = (search_depth as i32).min(torus.height() / 2);
            for dy in -span_y..=span_y {
                for dx in -span_x..=span_x {
                    let position = torus.shift(start, dx, dy);
                    let cell = torus.index(position);
                    let current = torus.depth_index(search_depth, position);
                    if !nodes[current].visited {
                        continue;
                    }
                    let cargo = nodes[current].halite;
                    let spent = nodes[current].penalty;

                    let available = nodes[current]
                        .deltas
                        .get(cell)
                        .unwrap_or_else(|| self.available_minings(position));
                    let mining_possible = available != 0 && !self.has_structure(position);
                    let slot = if mining_possible {
                        available.trailing_zeros()
                    } else {
                        0
                    };
                    let sea = if mining_possible && !self.is_occupied(position, search_depth as u32)
                    {
                        self.halite_after_mines(position, slot)
                    } else {
                        0
                    };

                    let move_cost = sea / constants.move_cost_ratio;
                    let after_move = cargo - move_cost;
                    let after_gather =
                        (cargo + ceil_div(sea, constants.extract_ratio)).min(constants.max_cargo);
                    let price = penalty_factor.price(move_cost, current_turn, constants.max_turns);
                    let recorded_slot = if mining_possible { slot } else { BARREN_SLOT };

                    if after_move >= 0 {
                        for direction in Direction::cardinals() {
                            let next_position = torus.step(position, *direction);
                            if search_depth == 0 && frame.ship_at(next_position) {
                                continue;
                            }
                            let defensive =
                                frame.closest_shipyard(next_position) == frame.my_id();
                            if current_turn < defensive_turns && !defensive {
                                continue;
                            }
                            let next = torus.depth_index(search_depth + 1, next_position);
                            if relaxes(&nodes[next], after_move, spent + price) {
                                let deltas = nodes[current].deltas.clone();
                                let node = &mut nodes[next];
                                node.visited = true;
                                node.halite = after_move;
                                node.penalty = spent + price;
                                node.mining_slot = recorded_slot;
                                node.in_direction = *direction;
                                node.deltas = deltas;
                            }
                        }
                    }
                    if mining_possible {
                        let next = torus.depth_index(search_depth + 1, position);
                        if relaxes(&nodes[next], after_gather, spent) {
                            let deltas =
                                nodes[current].deltas.with(cell, available ^ (1 << slot));
                            let node = &mut nodes[next];
                            node.visited = true;
                            node.halite = after_gather;
                            node.penalty = spent;
                            node.mining_slot = slot;
                            node.in_direction = Direction::Still;
                            node.deltas = deltas;
                        }
                    }
                }
            }
            search_depth += 1;
        }

        let mut best_depth = 0;
        let mut best_per_turn = 0.0f32;
        let mut best_halite = 0;
        for depth in 1..search_depth {
            let node = &nodes[torus.depth_index(depth, end)];
            let score = node.halite as f32 - node.penalty;
            let per_turn = score / (depth as u32 + turns_underway) as f32;
            if per_turn > best_per_turn {
                best_per_turn = per_turn;
                best_depth = depth;
                best_halite = node.halite;
            }
        }

        OptimalPath {
            search_depth,
            final_halite: best_halite,
            path: match best_depth {
                0 => Vec::new(),
                depth => self.reconstruct(&nodes, end, depth),
            },
        }
    }

    /// walk the in-direction pointers back from (depth, end) to the origin
    fn reconstruct(&self, nodes: &[Node], end: Position, depth: usize) -> Vec<PathSegment> {
        let torus = self.frame().torus();
        let blank = PathSegment {
            direction: Direction::Still,
            halite: 0,
            mining_slot: 0,
        };
        let mut path = vec![blank; depth];
        let mut position = end;
        for layer in (1..=depth).rev() {
            let index = torus.depth_index(layer, position);
            let came_from = torus.step(position, nodes[index].in_direction.invert());
            let previous = torus.depth_index(layer - 1, came_from);
            path[layer - 1] = PathSegment {
                direction: nodes[index].in_direction,
                halite: nodes[previous].halite,
                mining_slot: nodes[index].mining_slot,
            };
            position = came_from;
        }
        path
    }
}
