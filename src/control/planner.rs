use super::settings::Settings;
use crate::engine::command::Command;
use crate::game::frame::Frame;
use crate::game::ship::Ship;
use crate::grid::direction::Direction;
use crate::grid::position::Position;
use crate::grid::torus::Torus;
use crate::model::plan::Plan;
use crate::model::world::WorldModel;
use crate::search::path::OptimalPath;
use crate::{
    Halite, ShipId, ACCEPT_SEARCH_DEPTH, DEFENSIVE_TURNS, DROPOFF_RUSH_TURNS,
    ENDGAME_SEARCH_MARGIN, FRESH_PLAN_PRIORITY,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::time::Instant;

/// the turn scheduler. owns the plan cache across turns, decides which
/// stale plans to recompute inside the wall-clock budget, reconciles the
/// fleet's desired moves and emits the turn's commands.
pub struct Planner {
    settings: Settings,
    plans: BTreeMap<ShipId, Plan>,
    turns_underway: BTreeMap<ShipId, u32>,
    last_positions: BTreeMap<ShipId, Position>,
    should_build: bool,
    /// reserved for tie-breaking; no tie-breaker is currently wired in
    #[allow(dead_code)]
    rng: SmallRng,
}

impl Planner {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            plans: BTreeMap::new(),
            turns_underway: BTreeMap::new(),
            last_positions: BTreeMap::new(),
            should_build: true,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn run(&mut self, frame: &Frame, deadline: Instant) -> Vec<Command> {
        self.update_turns_underway(frame);
        self.prune_plans(frame);

        let mut model = WorldModel::from(frame);
        for (id, plan) in &self.plans {
            model.commit(plan, self.ship(frame, *id));
        }
        if self.settings.simulate_enemy {
            self.project_enemies(&mut model, frame);
        }

        let recomputed = self.recompute_plans(&mut model, frame, deadline);
        self.compact_slots(&mut model, frame);

        let mut moves = self.desired_moves(frame);
        self.enforce_feasibility(&mut moves, frame);
        if self.avoiding_enemies(frame) {
            self.avoid_enemies(&mut moves, frame);
        }

        let spawn_desired =
            frame.me().halite >= frame.constants().spawn_cost && self.should_build;
        let rush = frame.turns_left() < DROPOFF_RUSH_TURNS;
        let resolution = frame.reconcile(&moves, rush, spawn_desired);

        log::info!(
            "turn {:>3} fleet {:>3} bank {:>6} left {:>8} recomputed {}",
            frame.turn(),
            frame.my_ships().count(),
            frame.me().halite,
            frame.halite_left(),
            recomputed,
        );

        let mut commands = Vec::new();
        for (&id, &safe) in &resolution.safe_moves {
            let plan = self.plans.entry(id).or_default();
            if safe == plan.next_move() {
                plan.advance();
            }
            commands.push(Command::Move(id, safe));
        }
        if resolution.is_spawn_possible {
            commands.push(Command::Spawn);
        }
        self.remember_positions(frame);
        commands
    }

    fn ship<'a>(&self, frame: &'a Frame, id: ShipId) -> &'a Ship {
        frame.ship(id).expect("cache pruned to live units")
    }

    /// reset the counter on any unit touching one of our structures,
    /// advance it otherwise, and forget destroyed units
    fn update_turns_underway(&mut self, frame: &Frame) {
        let mut next = BTreeMap::new();
        for ship in frame.my_ships() {
            let docked = frame
                .me()
                .structures()
                .any(|structure| structure == ship.position);
            let turns = if docked {
                0
            } else {
                self.turns_underway.get(&ship.id).map_or(0, |t| t + 1)
            };
            next.insert(ship.id, turns);
        }
        self.turns_underway = next;
    }

    /// drop cache entries for destroyed units; give new units an empty
    /// (finished) plan so they surface at the top of the priority order
    fn prune_plans(&mut self, frame: &Frame) {
        let alive = frame.my_ships().map(|ship| ship.id).collect::<BTreeSet<_>>();
        self.plans.retain(|id, _| alive.contains(id));
        for id in alive {
            self.plans.entry(id).or_default();
        }
    }

    /// mark each enemy unit's projected harvest cell as lost to us from the
    /// turn that unit can reach it
    fn project_enemies(&self, model: &mut WorldModel, frame: &Frame) {
        for ship in frame.enemy_ships() {
            let target = model.nearest_halite(ship.position);
            let turns = frame.torus().distance(ship.position, target) as u32;
            model.occupy(target, turns);
            log::debug!("enemy {} projected onto {}", ship, target);
        }
    }

    /// a finished plan must be replaced; otherwise priority is how far the
    /// world has drifted from what the plan promised: missed mines show up
    /// against actual cargo, stolen reservations against the expectation
    fn priorities(&self, model: &WorldModel, frame: &Frame) -> Vec<(ShipId, Halite)> {
        let mut priorities = self
            .plans
            .iter()
            .map(|(&id, plan)| {
                let ship = self.ship(frame, id);
                let priority = if plan.is_finished() {
                    FRESH_PLAN_PRIORITY
                } else if self.settings.recalculate_paths {
                    (plan.expected_halite() - ship.halite).abs()
                        + (plan.expected_total_halite() - model.expectation(plan, ship)).abs()
                } else {
                    0
                };
                (id, priority)
            })
            .collect::<Vec<_>>();
        priorities.sort_by(|a, b| b.1.cmp(&a.1));
        priorities
    }

    /// replace stale plans in priority order until the deadline. a search
    /// too shallow to be trusted, or one that found nothing, leaves the old
    /// plan in place.
    fn recompute_plans(&mut self, model: &mut WorldModel, frame: &Frame, deadline: Instant) -> usize {
        let defensive_turns = if frame.players().len() == 4 {
            DEFENSIVE_TURNS
        } else {
            0
        };
        let max_depth = self
            .settings
            .max_search_depth
            .min(frame.turns_left().saturating_sub(ENDGAME_SEARCH_MARGIN) as usize);
        let mut recomputed = 0;
        for (id, priority) in self.priorities(model, frame) {
            if priority <= 0 {
                break;
            }
            if Instant::now() >= deadline {
                break;
            }
            let ship = self.ship(frame, id);
            let plan = self.plans.get(&id).expect("cache entry per unit").clone();
            let turns_underway = self.turns_underway.get(&id).copied().unwrap_or(0);
            model.retract(&plan, ship);
            let optimal = model.optimal_path(
                ship,
                turns_underway,
                self.settings.penalty_factor,
                frame.me().shipyard,
                deadline,
                max_depth,
                defensive_turns,
            );
            if optimal.search_depth > ACCEPT_SEARCH_DEPTH && !optimal.path.is_empty() {
                if plan.is_finished() {
                    self.consider_spawn_economics(&optimal, turns_underway, frame);
                }
                let replacement = Plan::from(optimal);
                model.commit(&replacement, ship);
                self.plans.insert(id, replacement);
                recomputed += 1;
            } else {
                model.commit(&plan, ship);
            }
        }
        recomputed
    }

    /// permanent latch: stop spawning the first time a fresh plan's yield
    /// says a new unit could not pay for itself before the game ends
    fn consider_spawn_economics(
        &mut self,
        optimal: &OptimalPath,
        turns_underway: u32,
        frame: &Frame,
    ) {
        let rate =
            optimal.final_halite as f32 / (optimal.path.len() as u32 + turns_underway) as f32;
        let payback = self.settings.ship_build_factor * rate * frame.turns_left() as f32;
        if payback < frame.constants().spawn_cost as f32 {
            log::debug!("spawning retired: payback {:.0} per unit", payback);
            self.should_build = false;
        }
    }

    /// renumber the union of reserved mining slots on each cell to the
    /// dense prefix 0..k, preserving order, so slot indices stay inside the
    /// mask over a long game; reservations are replayed afterwards
    fn compact_slots(&mut self, model: &mut WorldModel, frame: &Frame) {
        let torus = frame.torus();
        let mut used: BTreeMap<usize, BTreeSet<u32>> = BTreeMap::new();
        for (id, plan) in &self.plans {
            let mut position = self.ship(frame, *id).position;
            for segment in plan.remaining() {
                if segment.direction == Direction::Still {
                    used.entry(torus.index(position))
                        .or_default()
                        .insert(segment.mining_slot);
                }
                position = torus.step(position, segment.direction);
            }
        }
        for (id, plan) in self.plans.iter_mut() {
            let mut position = frame.ship(*id).expect("cache pruned to live units").position;
            for segment in plan.remaining_mut() {
                if segment.direction == Direction::Still {
                    let slots = &used[&torus.index(position)];
                    let rank = slots
                        .iter()
                        .position(|&slot| slot == segment.mining_slot)
                        .expect("slot recorded in the first pass");
                    segment.mining_slot = rank as u32;
                }
                position = torus.step(position, segment.direction);
            }
        }
        model.reset_reservations();
        for (id, plan) in &self.plans {
            model.commit(plan, self.ship(frame, *id));
        }
    }

    fn desired_moves(&self, frame: &Frame) -> BTreeMap<ShipId, Direction> {
        frame
            .my_ships()
            .map(|ship| {
                let desired = self
                    .plans
                    .get(&ship.id)
                    .map_or(Direction::Still, Plan::next_move);
                (ship.id, desired)
            })
            .collect()
    }

    /// a unit that cannot pay the move cost of its own cell stays put
    fn enforce_feasibility(&self, moves: &mut BTreeMap<ShipId, Direction>, frame: &Frame) {
        for ship in frame.my_ships() {
            let cost = frame.halite_at(ship.position) / frame.constants().move_cost_ratio;
            if cost > ship.halite {
                moves.insert(ship.id, Direction::Still);
            }
        }
    }

    fn avoiding_enemies(&self, frame: &Frame) -> bool {
        self.settings
            .avoid_enemy_collisions
            .unwrap_or(frame.players().len() == 4)
    }

    /// stand still rather than enter a cell an enemy could occupy next
    /// turn, assuming each enemy repeats its last observed move
    fn avoid_enemies(&self, moves: &mut BTreeMap<ShipId, Direction>, frame: &Frame) {
        let torus = frame.torus();
        let threatened = frame
            .enemy_ships()
            .map(|ship| match self.last_move(torus, ship) {
                Some(direction) => torus.step(ship.position, direction),
                None => ship.position,
            })
            .collect::<BTreeSet<_>>();
        for ship in frame.my_ships() {
            let destination = torus.step(ship.position, moves[&ship.id]);
            if threatened.contains(&destination) {
                moves.insert(ship.id, Direction::Still);
            }
        }
    }

    fn last_move(&self, torus: Torus, ship: &Ship) -> Option<Direction> {
        let previous = self.last_positions.get(&ship.id)?;
        Direction::all()
            .iter()
            .copied()
            .find(|&direction| torus.step(*previous, direction) == ship.position)
    }

    fn remember_positions(&mut self, frame: &Frame) {
        self.last_positions = frame
            .ships()
            .iter()
            .map(|ship| (ship.id, ship.position))
            .collect();
    }
}
