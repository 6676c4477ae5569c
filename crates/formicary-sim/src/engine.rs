//! The colony: owns the board and runs the turn loop.
//!
//! `Colony` mediates every placement and removal, invokes the placement
//! policy, the hive, the ants and the bees in a fixed order, and
//! produces a `ColonySnapshot` after each turn. Completely headless and
//! deterministic for a given seed.

use std::fmt;
use std::ops::ControlFlow;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use formicary_behavior::profiles::{ant_profile, bee_profile};
use formicary_core::components::Affliction;
use formicary_core::constants::{DEFAULT_FOOD, DEFAULT_SEED};
use formicary_core::enums::{AntKind, BeeKind, Faction, GamePhase, Outcome, StatusEffect};
use formicary_core::error::{ColonyError, Result};
use formicary_core::events::GameEvent;
use formicary_core::state::ColonySnapshot;
use formicary_core::types::{Dimensions, GameClock, PlaceId};

use crate::assault::AssaultPlan;
use crate::board::{Board, DeathHook, Flow};
use crate::strategy::Strategy;
use crate::systems;
use crate::systems::ants::BuffRegistry;
use crate::systems::hive::Hive;
use crate::tunnel::Tunnel;
use crate::world_setup;

/// Configuration for starting a new colony.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed. Same seed, same game.
    pub seed: u64,
    /// Food available before the first turn.
    pub food: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            food: DEFAULT_FOOD,
        }
    }
}

/// One game of ants against bees.
pub struct Colony {
    board: Board,
    clock: GameClock,
    phase: GamePhase,
    strategy: Option<Box<dyn Strategy>>,
    hive: Hive,
    ant_types: Vec<AntKind>,
    active_bees: Vec<Entity>,
    buffs: BuffRegistry,
    queen_claimed: bool,
    dimensions: Dimensions,
    despawn_buffer: Vec<Entity>,
}

impl Colony {
    /// Build a colony: register the layout's places around the base and
    /// fill the hive with every bee of `plan`.
    ///
    /// Fails when the layout does, or when bees are planned but no place
    /// lets them in.
    pub fn new<S, L>(
        strategy: S,
        plan: &AssaultPlan,
        ant_types: &[AntKind],
        layout: L,
        dimensions: Dimensions,
        config: SimConfig,
    ) -> Result<Self>
    where
        S: Strategy + 'static,
        L: FnOnce(&mut Tunnel, PlaceId, Dimensions) -> Result<()>,
    {
        let mut tunnel = Tunnel::new();
        let base = tunnel.base();
        layout(&mut tunnel, base, dimensions)?;
        if plan.total() > 0 && tunnel.bee_entrances().is_empty() {
            return Err(ColonyError::NoBeeEntrance(plan.total()));
        }

        let mut board = Board::new(tunnel, ChaCha8Rng::seed_from_u64(config.seed), config.food);
        let hive = Hive::populate(&mut board, plan);
        tracing::info!(
            "colony ready: {} places, {} bees planned",
            board.tunnel.len(),
            plan.total()
        );

        Ok(Self {
            board,
            clock: GameClock::default(),
            phase: GamePhase::default(),
            strategy: Some(Box::new(strategy)),
            hive,
            ant_types: ant_types.to_vec(),
            active_bees: Vec::new(),
            buffs: BuffRegistry::default(),
            queen_claimed: false,
            dimensions,
            despawn_buffer: Vec::new(),
        })
    }

    /// Play one turn and return the resulting snapshot.
    ///
    /// Once the game is over this only reports the final state.
    pub fn turn(&mut self) -> ColonySnapshot {
        if self.phase == GamePhase::Running {
            if let ControlFlow::Break(outcome) = self.run_systems() {
                self.finish(outcome);
            }
        }

        systems::cleanup::run(&mut self.board.world, &mut self.despawn_buffer);
        let world = &self.board.world;
        self.active_bees.retain(|&bee| world.contains(bee));

        let events = std::mem::take(&mut self.board.events);
        systems::snapshot::build_snapshot(
            &self.board,
            self.clock,
            self.phase,
            self.bees_remaining(),
            events,
        )
    }

    /// Play until the game is decided.
    pub fn simulate(&mut self) -> Outcome {
        loop {
            self.turn();
            if let Some(outcome) = self.phase.outcome() {
                return outcome;
            }
        }
    }

    /// Play at most `max_turns` turns; `None` if still undecided.
    pub fn simulate_for(&mut self, max_turns: u64) -> Option<Outcome> {
        for _ in 0..max_turns {
            self.turn();
            if let Some(outcome) = self.phase.outcome() {
                return Some(outcome);
            }
        }
        self.phase.outcome()
    }

    fn run_systems(&mut self) -> Flow {
        if let Some(mut strategy) = self.strategy.take() {
            strategy.deploy(self);
            self.strategy = Some(strategy);
        }
        if let Some(outcome) = self.phase.outcome() {
            return ControlFlow::Break(outcome);
        }

        let turn = self.clock.turn;
        systems::hive::run(&mut self.board, &mut self.hive, turn, &mut self.active_bees)?;
        systems::ants::run(&mut self.board, &mut self.buffs)?;
        systems::bees::run(&mut self.board, &mut self.active_bees, turn)?;

        if self.bees_remaining() == 0 {
            return ControlFlow::Break(Outcome::AntsWin);
        }
        self.clock.advance();
        ControlFlow::Continue(())
    }

    /// Record the outcome. The first one sticks.
    fn finish(&mut self, outcome: Outcome) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Over(outcome);
        match outcome {
            Outcome::AntsWin => tracing::info!("All bees are vanquished. You win!"),
            Outcome::BeesWin => {
                tracing::info!("The ant queen has perished. Please try again.")
            }
        }
        self.board.events.push(GameEvent::GameOver { outcome });
    }

    fn absorb(&mut self, flow: Flow) {
        if let ControlFlow::Break(outcome) = flow {
            self.finish(outcome);
        }
    }

    // --- placement ---

    /// Deploy an ant of the named type, paying its food cost.
    ///
    /// `Ok(None)` when the colony cannot afford it.
    pub fn deploy_ant(&mut self, place_name: &str, ant_name: &str) -> Result<Option<Entity>> {
        let kind = AntKind::from_name(ant_name)
            .filter(|kind| self.ant_types.contains(kind))
            .ok_or_else(|| ColonyError::UnknownAntType(ant_name.to_string()))?;
        let place = self.board.tunnel.lookup(place_name)?;

        let cost = ant_profile(kind).food_cost;
        if self.board.food < cost {
            tracing::warn!("Not enough food remains to place {kind}");
            self.board.events.push(GameEvent::DeployDeclined {
                ant: kind,
                cost,
                food: self.board.food,
            });
            return Ok(None);
        }

        let ant = self.spawn_ant(kind);
        if let Err(err) = self.place(place, ant) {
            self.discard(ant);
            return Err(err);
        }
        self.board.food -= cost;

        tracing::info!("deployed {kind} at {place_name}");
        self.board.events.push(GameEvent::AntDeployed {
            ant: kind,
            place: place_name.to_string(),
        });
        Ok(Some(ant))
    }

    /// Withdraw the visible ant at the named place, if any.
    ///
    /// A withdrawn ant is despawned; a container hands its place to the
    /// ant it concealed.
    pub fn remove_ant(&mut self, place_name: &str) -> Result<()> {
        let place = self.board.tunnel.lookup(place_name)?;
        let Some(ant) = self.board.tunnel.place(place).ant() else {
            return Ok(());
        };

        systems::occupancy::remove_insect(&mut self.board, place, ant)?;
        if self.board.place_of(ant).is_none() {
            if let Some(kind) = self.board.ant_kind(ant) {
                tracing::info!("removed {kind} from {place_name}");
                self.board.events.push(GameEvent::AntRemoved {
                    ant: kind,
                    place: place_name.to_string(),
                });
            }
            let _ = self.board.world.despawn(ant);
        }
        Ok(())
    }

    /// Put a status effect on a bee.
    ///
    /// Returns `false` when the bee is immune or the effect lasts zero turns.
    /// A destroyed bee is no longer in the colony.
    pub fn afflict(&mut self, bee: Entity, effect: StatusEffect) -> Result<bool> {
        let kind = match self.board.bee_kind(bee) {
            Some(kind) if self.board.is_alive(bee) => kind,
            _ => return Err(ColonyError::NoSuchInsect(format!("{bee:?}"))),
        };
        if bee_profile(kind).status_immune || effect.turns() == 0 {
            return Ok(false);
        }

        let affliction = Affliction {
            effect,
            remaining: effect.turns(),
        };
        self.board
            .world
            .insert_one(bee, affliction)
            .map_err(|_| ColonyError::NoSuchInsect(format!("{bee:?}")))?;

        tracing::debug!("{} afflicted with {effect:?}", self.board.label(bee));
        self.board
            .events
            .push(GameEvent::BeeAfflicted { bee: kind, effect });
        Ok(true)
    }

    /// Spawn a detached ant with its catalog armor.
    ///
    /// The first queen spawned in a colony is the true queen.
    pub fn spawn_ant(&mut self, kind: AntKind) -> Entity {
        self.spawn_ant_with_armor(kind, ant_profile(kind).armor)
    }

    pub fn spawn_ant_with_armor(&mut self, kind: AntKind, armor: f64) -> Entity {
        let impostor = kind == AntKind::Queen && std::mem::replace(&mut self.queen_claimed, true);
        world_setup::spawn_ant(&mut self.board.world, kind, armor, impostor)
    }

    /// Spawn a detached bee.
    pub fn spawn_bee(&mut self, kind: BeeKind, armor: f64) -> Entity {
        world_setup::spawn_bee(&mut self.board.world, kind, armor)
    }

    /// Put a spawned insect into the named place.
    pub fn place_insect(&mut self, place_name: &str, insect: Entity) -> Result<()> {
        let place = self.board.tunnel.lookup(place_name)?;
        self.place(place, insect)
    }

    fn place(&mut self, place: PlaceId, insect: Entity) -> Result<()> {
        let flow = systems::occupancy::add_insect(&mut self.board, place, insect)?;
        self.absorb(flow);
        Ok(())
    }

    /// Take an insect out of the named place.
    pub fn remove_insect(&mut self, place_name: &str, insect: Entity) -> Result<()> {
        let place = self.board.tunnel.lookup(place_name)?;
        systems::occupancy::remove_insect(&mut self.board, place, insect)
    }

    /// Damage an insect through the normal path (mitigation, fire, queen loss).
    pub fn reduce_armor(&mut self, insect: Entity, amount: f64) -> Result<()> {
        self.board.require(insect)?;
        let flow = systems::damage::reduce_armor(&mut self.board, insect, amount);
        self.absorb(flow);
        Ok(())
    }

    /// Run one ant's action outside the turn loop.
    pub fn ant_act(&mut self, ant: Entity) -> Result<()> {
        if self.board.require(ant)? != Faction::Ant {
            return Err(ColonyError::NoSuchInsect(format!("{ant:?}")));
        }
        let flow = systems::ants::act(&mut self.board, &mut self.buffs, ant);
        self.absorb(flow);
        Ok(())
    }

    /// Run one bee's action outside the turn loop.
    pub fn bee_act(&mut self, bee: Entity) -> Result<()> {
        if self.board.require(bee)? != Faction::Bee {
            return Err(ColonyError::NoSuchInsect(format!("{bee:?}")));
        }
        let flow = systems::bees::act(&mut self.board, bee, self.clock.turn);
        self.absorb(flow);
        Ok(())
    }

    fn discard(&mut self, ant: Entity) {
        if self.board.is_true_queen(ant) {
            self.queen_claimed = false;
        }
        let _ = self.board.world.despawn(ant);
    }

    /// Register a callback fired for every destroyed insect.
    pub fn set_death_hook(&mut self, hook: DeathHook) {
        self.board.death_hook = Some(hook);
    }

    // --- queries ---

    /// Visible ants, one per occupied place, in place order.
    pub fn ants(&self) -> Vec<Entity> {
        self.board
            .tunnel
            .places()
            .filter_map(|(_, place)| place.ant())
            .collect()
    }

    /// Bees in every place, the hive included.
    pub fn bees(&self) -> Vec<Entity> {
        self.board
            .tunnel
            .places()
            .flat_map(|(_, place)| place.bees().iter().copied())
            .collect()
    }

    pub fn insects(&self) -> Vec<Entity> {
        let mut insects = self.ants();
        insects.extend(self.bees());
        insects
    }

    /// Bees not yet defeated: those in the hive plus the active ones.
    pub fn bees_remaining(&self) -> usize {
        let hive = self.board.tunnel.hive();
        let waiting = self.board.tunnel.place(hive).bees().len();
        let active = self
            .active_bees
            .iter()
            .filter(|&&bee| self.board.is_alive(bee))
            .count();
        waiting + active
    }

    pub fn food(&self) -> u32 {
        self.board.food
    }

    /// Index of the current turn.
    pub fn time(&self) -> u64 {
        self.clock.turn
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn ant_types(&self) -> &[AntKind] {
        &self.ant_types
    }

    pub fn active_bees(&self) -> &[Entity] {
        &self.active_bees
    }

    pub fn buffs(&self) -> &BuffRegistry {
        &self.buffs
    }

    pub fn hive(&self) -> &Hive {
        &self.hive
    }

    pub fn tunnel(&self) -> &Tunnel {
        &self.board.tunnel
    }

    pub fn world(&self) -> &World {
        &self.board.world
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn armor(&self, insect: Entity) -> Option<f64> {
        self.board.armor(insect)
    }

    pub fn damage(&self, insect: Entity) -> f64 {
        self.board.damage_of(insect)
    }

    /// Name of the place the insect stands in.
    pub fn place_of(&self, insect: Entity) -> Option<&str> {
        self.board
            .place_of(insect)
            .map(|id| self.board.tunnel.name(id))
    }

    /// The visible ant of the named place.
    pub fn ant_at(&self, place_name: &str) -> Option<Entity> {
        let place = self.board.tunnel.find(place_name)?;
        self.board.tunnel.place(place).ant()
    }

    /// The ant concealed inside `container`.
    pub fn contained(&self, container: Entity) -> Option<Entity> {
        self.board.contained(container)
    }

    pub fn bees_at(&self, place_name: &str) -> Vec<Entity> {
        self.board
            .tunnel
            .find(place_name)
            .map(|id| self.board.tunnel.place(id).bees().to_vec())
            .unwrap_or_default()
    }

    /// `Name(armor, place)` of an insect.
    pub fn label(&self, insect: Entity) -> String {
        self.board.label(insect)
    }

    /// Snapshot of the board without playing a turn.
    pub fn snapshot(&self) -> ColonySnapshot {
        systems::snapshot::build_snapshot(
            &self.board,
            self.clock,
            self.phase,
            self.bees_remaining(),
            Vec::new(),
        )
    }
}

impl fmt::Display for Colony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.insects().into_iter().map(|i| self.label(i)).collect();
        write!(
            f,
            "{:?} (Food: {}, Time: {})",
            labels,
            self.board.food,
            self.clock.turn
        )
    }
}
