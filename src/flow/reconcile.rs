use super::graph::FlowGraph;
use super::graph::SINK;
use super::graph::SOURCE;
use crate::game::frame::Frame;
use crate::grid::direction::Direction;
use crate::ShipId;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

const SPAWN: usize = 2;

/// the dropoff's sink capacity while collisions there are forgiven, letting
/// the fleet pile home at the end of the game
const DROPOFF_PILE: u32 = 10;

/// collision-free move assignment plus the spawn verdict for one turn
#[derive(Debug, Clone)]
pub struct Resolution {
    pub safe_moves: BTreeMap<ShipId, Direction>,
    pub is_spawn_possible: bool,
}

impl Frame {
    /// reduce the turn's desired moves to a two-phase max-flow problem.
    /// phase one maximizes the number of units granted their desired move;
    /// phase two parks every remaining unit (and withdraws an unsafe spawn)
    /// without disturbing phase one's count.
    pub fn reconcile(
        &self,
        moves: &BTreeMap<ShipId, Direction>,
        ignore_collisions_at_dropoff: bool,
        spawn_desired: bool,
    ) -> Resolution {
        let torus = self.torus();
        let me = self.me();
        let units = moves
            .iter()
            .map(|(&id, &direction)| {
                let ship = self.ship(id).expect("move for a unit in the frame");
                (id, ship.position, direction)
            })
            .collect::<Vec<_>>();

        let unit_node = |unit: usize| 3 + unit;
        let cell_node = |cell: usize| 3 + units.len() + cell;
        let own_cells = me
            .structures()
            .map(|position| torus.index(position))
            .collect::<BTreeSet<_>>();
        let shipyard = cell_node(torus.index(me.shipyard));

        let mut graph = FlowGraph::new(3 + units.len() + torus.area());
        for (unit, &(_, position, direction)) in units.iter().enumerate() {
            graph.add_edge(SOURCE, unit_node(unit), 1);
            let destination = torus.index(torus.step(position, direction));
            graph.add_edge(unit_node(unit), cell_node(destination), 1);
        }
        for cell in 0..torus.area() {
            let capacity = if ignore_collisions_at_dropoff && own_cells.contains(&cell) {
                DROPOFF_PILE
            } else {
                1
            };
            graph.add_edge(cell_node(cell), SINK, capacity);
        }
        if spawn_desired {
            graph.add_edge(SOURCE, SPAWN, 1);
            graph.add_edge(SPAWN, shipyard, 1);
        }
        graph.saturate();

        // fallbacks: a displaced unit stands still, a contested spawn is
        // dropped
        for (unit, &(_, position, direction)) in units.iter().enumerate() {
            if direction != Direction::Still {
                graph.add_edge(unit_node(unit), cell_node(torus.index(position)), 1);
            }
        }
        if spawn_desired {
            graph.add_edge(SPAWN, SINK, 1);
        }
        graph.saturate();

        let is_spawn_possible = graph.flow(SPAWN, shipyard) > 0;
        let safe_moves = units
            .iter()
            .enumerate()
            .map(|(unit, &(id, position, direction))| {
                let parked = graph.flow(unit_node(unit), cell_node(torus.index(position))) > 0;
                let safe = if parked { Direction::Still } else { direction };
                (id, safe)
            })
            .collect();
        Resolution {
            safe_moves,
            is_spawn_possible,
        }
    }
}
