//! Hive system: holds every planned bee and releases each wave on time.

use std::ops::ControlFlow;

use hecs::Entity;
use rand::seq::SliceRandom;

use formicary_core::events::GameEvent;

use crate::assault::AssaultPlan;
use crate::board::{Board, Flow};
use crate::systems::occupancy;
use crate::world_setup;

/// Bees waiting in the hive for one turn.
#[derive(Debug, Clone)]
pub struct HiveWave {
    /// Turn at which these bees leave.
    pub release_at: u64,
    pub bees: Vec<Entity>,
    /// Whether this wave has already left.
    pub released: bool,
}

/// The hive's release schedule, as spawned entities.
#[derive(Debug, Clone, Default)]
pub struct Hive {
    pub waves: Vec<HiveWave>,
}

impl Hive {
    /// Spawn every planned bee into the hive place.
    pub fn populate(board: &mut Board, plan: &AssaultPlan) -> Self {
        let hive = board.tunnel.hive();
        let mut waves = Vec::with_capacity(plan.waves.len());

        for (&turn, spawns) in &plan.waves {
            let mut bees = Vec::with_capacity(spawns.len());
            for spawn in spawns {
                let bee = world_setup::spawn_bee(&mut board.world, spawn.kind, spawn.armor);
                board.tunnel.place_mut(hive).bees.push(bee);
                board.set_place(bee, Some(hive));
                bees.push(bee);
            }
            waves.push(HiveWave {
                release_at: turn,
                bees,
                released: false,
            });
        }
        Self { waves }
    }

    /// Bees still inside that have not been released yet.
    pub fn waiting(&self) -> usize {
        self.waves
            .iter()
            .filter(|w| !w.released)
            .map(|w| w.bees.len())
            .sum()
    }
}

/// Release every wave that is due, each bee into a random bee entrance.
pub fn run(board: &mut Board, hive: &mut Hive, turn: u64, active: &mut Vec<Entity>) -> Flow {
    let home = board.tunnel.hive();

    for wave in &mut hive.waves {
        if wave.released || turn < wave.release_at {
            continue;
        }
        wave.released = true;

        for &bee in &wave.bees {
            if board.place_of(bee) != Some(home) {
                continue;
            }
            let Some(&entrance) = board.tunnel.bee_entrances().choose(&mut board.rng) else {
                tracing::warn!("no bee entrance; {} stays in the hive", board.label(bee));
                continue;
            };
            match occupancy::move_insect(board, bee, home, entrance) {
                Ok(flow) => {
                    active.push(bee);
                    if let Some(kind) = board.bee_kind(bee) {
                        let place = board.tunnel.name(entrance).to_string();
                        tracing::info!("{kind} released into {place}");
                        board.events.push(GameEvent::BeeReleased { bee: kind, place });
                    }
                    flow?;
                }
                Err(err) => tracing::warn!("release failed: {err}"),
            }
        }
    }
    ControlFlow::Continue(())
}
