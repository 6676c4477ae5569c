//! Tests for the tunnel graph, occupancy, insect actions, and the turn loop.

use std::cell::RefCell;
use std::rc::Rc;

use formicary_core::commands::{PlacementCommand, ScheduledCommand};
use formicary_core::components::Digestion;
use formicary_core::enums::*;
use formicary_core::error::ColonyError;
use formicary_core::events::GameEvent;
use formicary_core::types::{Dimensions, PlaceId};

use crate::assault::AssaultPlan;
use crate::board::InsectDeath;
use crate::engine::{Colony, SimConfig};
use crate::layout::{dry_layout, wet_layout};
use crate::scenario::build_plan;
use crate::strategy::{Passive, ScriptedStrategy};
use crate::tunnel::Tunnel;

fn one_tunnel(length: usize) -> Dimensions {
    Dimensions { tunnels: 1, length }
}

/// One dry tunnel of nine places, no bees, plenty of food.
fn sandbox() -> Colony {
    Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 100,
            ..Default::default()
        },
    ).unwrap()
}

fn wet_sandbox() -> Colony {
    Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        wet_layout,
        one_tunnel(9),
        SimConfig {
            food: 100,
            ..Default::default()
        },
    ).unwrap()
}

fn drop_bee(colony: &mut Colony, kind: BeeKind, armor: f64, place: &str) -> hecs::Entity {
    let bee = colony.spawn_bee(kind, armor);
    colony.place_insect(place, bee).unwrap();
    bee
}

fn drop_ant(colony: &mut Colony, kind: AntKind, armor: f64, place: &str) -> hecs::Entity {
    let ant = colony.spawn_ant_with_armor(kind, armor);
    colony.place_insect(place, ant).unwrap();
    ant
}

// ---- Tunnel graph ----

#[test]
fn test_exit_entrance_backlinks() {
    let colony = Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        wet_layout,
        Dimensions::default(),
        SimConfig::default(),
    ).unwrap();
    let tunnel = colony.tunnel();
    let base = tunnel.base();

    for (id, place) in tunnel.places() {
        if let Some(exit) = place.exit() {
            if exit != base {
                assert_eq!(tunnel.place(exit).entrance(), Some(id));
            }
        }
    }
    assert_eq!(tunnel.place(base).entrance(), None);
}

#[test]
fn test_place_names_are_unique_and_exits_known() {
    let mut tunnel = Tunnel::new();
    let base = tunnel.base();
    let first = tunnel
        .add_place("tunnel_0_0", PlaceKind::Ground, Some(base), false)
        .unwrap();

    assert_eq!(
        tunnel.add_place("tunnel_0_0", PlaceKind::Water, Some(first), true),
        Err(ColonyError::DuplicatePlace("tunnel_0_0".to_string()))
    );
    assert!(matches!(
        tunnel.add_place("tunnel_0_1", PlaceKind::Ground, Some(PlaceId(99)), true),
        Err(ColonyError::UnknownPlace(_))
    ));
    assert!(tunnel.get(PlaceId(99)).is_none());
    assert_eq!(tunnel.len(), 3);
    assert!(tunnel.bee_entrances().is_empty());
    assert_eq!(tunnel.place(first).kind, PlaceKind::Ground);
}

#[test]
fn test_planned_bees_need_an_entrance() {
    let built = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        Dimensions { tunnels: 0, length: 9 },
        SimConfig::default(),
    );
    assert!(matches!(built, Err(ColonyError::NoBeeEntrance(2))));

    let closed = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        |tunnel: &mut Tunnel, base, _| {
            tunnel.add_place("dead_end", PlaceKind::Ground, Some(base), false)?;
            Ok(())
        },
        one_tunnel(1),
        SimConfig::default(),
    );
    assert!(matches!(closed, Err(ColonyError::NoBeeEntrance(_))));

    let mut empty = Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        dry_layout,
        Dimensions { tunnels: 0, length: 9 },
        SimConfig::default(),
    )
    .unwrap();
    assert_eq!(empty.simulate_for(5), Some(Outcome::AntsWin));
}

#[test]
fn test_wet_layout_names_and_entrances() {
    let colony = wet_sandbox();
    let tunnel = colony.tunnel();

    // 9 places plus hive and base.
    assert_eq!(tunnel.len(), 11);
    assert!(tunnel.find("tunnel_0_0").is_some());
    assert_eq!(
        tunnel.place(tunnel.lookup("water_0_2").unwrap()).kind,
        PlaceKind::Water
    );
    assert_eq!(
        tunnel.place(tunnel.lookup("water_0_8").unwrap()).kind,
        PlaceKind::Water
    );

    let entrances = tunnel.bee_entrances();
    assert_eq!(entrances.len(), 1);
    assert_eq!(tunnel.name(entrances[0]), "water_0_8");
    assert_eq!(tunnel.place(entrances[0]).entrance(), Some(tunnel.hive()));

    let first = tunnel.lookup("tunnel_0_0").unwrap();
    assert_eq!(tunnel.place(first).exit(), Some(tunnel.base()));
}

#[test]
fn test_dry_layout_has_no_water() {
    let colony = Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        dry_layout,
        Dimensions::default(),
        SimConfig::default(),
    ).unwrap();
    assert_eq!(colony.tunnel().bee_entrances().len(), 3);
    assert!(colony
        .tunnel()
        .places()
        .all(|(_, place)| place.kind != PlaceKind::Water));
}

#[test]
fn test_unknown_place_lookup_fails() {
    let colony = sandbox();
    assert_eq!(
        colony.tunnel().lookup("nowhere"),
        Err(ColonyError::UnknownPlace("nowhere".to_string()))
    );
}

// ---- Occupancy ----

#[test]
fn test_second_ant_is_rejected() {
    let mut colony = sandbox();
    colony.deploy_ant("tunnel_0_0", "Thrower").unwrap();

    let err = colony.deploy_ant("tunnel_0_0", "Harvester").unwrap_err();
    assert_eq!(
        err,
        ColonyError::Occupied {
            place: "tunnel_0_0".to_string()
        }
    );
    assert_eq!(err.to_string(), "Two ants in tunnel_0_0");
    // The failed deployment costs nothing.
    assert_eq!(colony.food(), 97);
}

#[test]
fn test_container_takes_in_ant_placed_after_it() {
    let mut colony = sandbox();
    let guard = colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();

    assert_eq!(colony.ant_at("tunnel_0_0"), Some(guard));
    assert_eq!(colony.contained(guard), Some(thrower));
    assert_eq!(colony.place_of(thrower), Some("tunnel_0_0"));
}

#[test]
fn test_container_wraps_ant_already_present() {
    let mut colony = sandbox();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();
    let guard = colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap().unwrap();

    assert_eq!(colony.ant_at("tunnel_0_0"), Some(guard));
    assert_eq!(colony.contained(guard), Some(thrower));
}

#[test]
fn test_containers_never_nest() {
    let mut colony = sandbox();
    colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap();
    assert!(matches!(
        colony.deploy_ant("tunnel_0_0", "Tank"),
        Err(ColonyError::Occupied { .. })
    ));

    colony.deploy_ant("tunnel_0_1", "Tank").unwrap();
    colony.deploy_ant("tunnel_0_1", "Thrower").unwrap();
    assert!(matches!(
        colony.deploy_ant("tunnel_0_1", "Harvester"),
        Err(ColonyError::Occupied { .. })
    ));
}

#[test]
fn test_removing_container_promotes_contained_ant() {
    let mut colony = sandbox();
    let guard = colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();

    colony.remove_ant("tunnel_0_0").unwrap();
    assert_eq!(colony.ant_at("tunnel_0_0"), Some(thrower));
    assert_eq!(colony.place_of(guard), None);
    assert_eq!(colony.contained(guard), None);
}

#[test]
fn test_removing_contained_ant_keeps_container() {
    let mut colony = sandbox();
    let guard = colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();

    colony.remove_insect("tunnel_0_0", thrower).unwrap();
    assert_eq!(colony.ant_at("tunnel_0_0"), Some(guard));
    assert_eq!(colony.contained(guard), None);
    assert_eq!(colony.place_of(thrower), None);
}

#[test]
fn test_removing_absent_insect_fails() {
    let mut colony = sandbox();
    let thrower = colony.spawn_ant(AntKind::Thrower);
    let err = colony.remove_insect("tunnel_0_1", thrower).unwrap_err();
    assert_eq!(err.to_string(), "Thrower(1, None) is not in tunnel_0_1");

    let bee = colony.spawn_bee(BeeKind::Bee, 3.0);
    assert!(matches!(
        colony.remove_insect("tunnel_0_1", bee),
        Err(ColonyError::NotPresent { .. })
    ));
}

#[test]
fn test_deploy_then_withdraw_restores_place() {
    let mut colony = sandbox();
    colony.deploy_ant("tunnel_0_3", "Thrower").unwrap();
    assert_eq!(colony.food(), 97);

    colony.remove_ant("tunnel_0_3").unwrap();
    assert_eq!(colony.ant_at("tunnel_0_3"), None);
    assert_eq!(colony.food(), 97);
}

#[test]
fn test_withdrawn_ants_leave_the_world() {
    let mut colony = sandbox();
    let before = colony.world().len();

    for _ in 0..20 {
        let ant = colony.deploy_ant("tunnel_0_3", "Thrower").unwrap().unwrap();
        colony.remove_ant("tunnel_0_3").unwrap();
        assert!(!colony.world().contains(ant));
        colony.turn();
    }
    assert_eq!(colony.world().len(), before);

    let guard = colony.deploy_ant("tunnel_0_3", "Bodyguard").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_3", "Thrower").unwrap().unwrap();
    colony.remove_ant("tunnel_0_3").unwrap();
    assert!(!colony.world().contains(guard));
    assert_eq!(colony.place_of(thrower), Some("tunnel_0_3"));
}

#[test]
fn test_remove_from_empty_place_is_noop() {
    let mut colony = sandbox();
    colony.remove_ant("tunnel_0_3").unwrap();
    assert_eq!(colony.food(), 100);
}

#[test]
fn test_base_and_hive_reject_ants() {
    let mut colony = sandbox();
    let err = colony.deploy_ant("AntQueen", "Thrower").unwrap_err();
    assert!(matches!(err, ColonyError::Uninhabitable { .. }));
    assert_eq!(colony.food(), 100);

    let ant = colony.spawn_ant(AntKind::Wall);
    assert!(matches!(
        colony.place_insect("Hive", ant),
        Err(ColonyError::Uninhabitable { .. })
    ));
}

#[test]
fn test_hive_rejects_bees_from_outside_the_plan() {
    let mut colony = sandbox();
    let bee = colony.spawn_bee(BeeKind::Bee, 3.0);
    assert!(matches!(
        colony.place_insect("Hive", bee),
        Err(ColonyError::Uninhabitable { .. })
    ));
    assert_eq!(colony.place_of(bee), None);
    assert_eq!(colony.bees_remaining(), 0);

    assert_eq!(colony.simulate_for(10), Some(Outcome::AntsWin));
    assert_eq!(colony.time(), 0);
}

#[test]
fn test_water_drowns_non_watersafe_insects() {
    let mut colony = wet_sandbox();
    let harvester = colony.spawn_ant_with_armor(AntKind::Harvester, 5.0);
    colony.place_insect("water_0_2", harvester).unwrap();

    assert!(colony.armor(harvester).unwrap() <= 0.0);
    assert_eq!(colony.place_of(harvester), None);
    assert_eq!(colony.ant_at("water_0_2"), None);
}

#[test]
fn test_water_spares_watersafe_insects() {
    let mut colony = wet_sandbox();
    let scuba = colony.deploy_ant("water_0_2", "Scuba").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "water_0_2");

    assert_eq!(colony.armor(scuba), Some(1.0));
    assert_eq!(colony.armor(bee), Some(3.0));
    assert_eq!(colony.ant_at("water_0_2"), Some(scuba));
}

// ---- Deployment ----

#[test]
fn test_deploy_unknown_names_fail() {
    let mut colony = sandbox();
    assert_eq!(
        colony.deploy_ant("nowhere", "Thrower").unwrap_err(),
        ColonyError::UnknownPlace("nowhere".to_string())
    );
    assert_eq!(
        colony.deploy_ant("tunnel_0_0", "Dragon").unwrap_err(),
        ColonyError::UnknownAntType("Dragon".to_string())
    );
}

#[test]
fn test_deploy_limited_to_colony_ant_types() {
    let mut colony = Colony::new(
        Passive,
        &AssaultPlan::new(),
        &[AntKind::Harvester, AntKind::Thrower],
        dry_layout,
        one_tunnel(3),
        SimConfig::default(),
    ).unwrap();
    assert!(matches!(
        colony.deploy_ant("tunnel_0_0", "Wall"),
        Err(ColonyError::UnknownAntType(_))
    ));
    assert_eq!(colony.ant_types().len(), 2);
}

#[test]
fn test_deploy_without_food_is_declined() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig::default(),
    ).unwrap();
    assert_eq!(colony.deploy_ant("tunnel_0_0", "Thrower"), Ok(None));
    assert_eq!(colony.food(), 2);
    assert_eq!(colony.ant_at("tunnel_0_0"), None);

    let snapshot = colony.turn();
    assert!(snapshot.events.contains(&GameEvent::DeployDeclined {
        ant: AntKind::Thrower,
        cost: 3,
        food: 2,
    }));
}

// ---- Ant actions ----

#[test]
fn test_harvester_gathers_food() {
    let mut colony = Colony::new(
        Passive,
        &AssaultPlan::new(),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig::default(),
    ).unwrap();
    colony.deploy_ant("tunnel_0_0", "Harvester").unwrap();
    assert_eq!(colony.food(), 0);

    let snapshot = colony.turn();
    assert_eq!(snapshot.food, 1);
    assert_eq!(colony.food(), 1);
}

#[test]
fn test_thrower_hits_nearest_bee() {
    let mut colony = sandbox();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();
    let near = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_2");
    let far = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");

    colony.ant_act(thrower).unwrap();
    assert_eq!(colony.armor(near), Some(2.0));
    assert_eq!(colony.armor(far), Some(3.0));
}

#[test]
fn test_thrower_hits_bee_in_own_place() {
    let mut colony = sandbox();
    let thrower = colony.deploy_ant("tunnel_0_4", "Thrower").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_4");

    colony.ant_act(thrower).unwrap();
    assert_eq!(colony.armor(bee), Some(2.0));
}

#[test]
fn test_thrower_never_looks_toward_base() {
    let mut colony = sandbox();
    let thrower = colony.deploy_ant("tunnel_0_4", "Thrower").unwrap().unwrap();
    let behind = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_1");

    colony.ant_act(thrower).unwrap();
    assert_eq!(colony.armor(behind), Some(3.0));
}

#[test]
fn test_thrower_ignores_hive() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 10,
            ..Default::default()
        },
    ).unwrap();
    let thrower = colony.deploy_ant("tunnel_0_8", "Thrower").unwrap().unwrap();
    colony.ant_act(thrower).unwrap();

    for bee in colony.bees() {
        assert_eq!(colony.armor(bee), Some(3.0));
    }
}

#[test]
fn test_long_thrower_minimum_range() {
    let mut colony = sandbox();
    let long = colony.deploy_ant("tunnel_0_0", "Long").unwrap().unwrap();
    let close = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_4");

    colony.ant_act(long).unwrap();
    assert_eq!(colony.armor(close), Some(3.0));

    let distant = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");
    colony.ant_act(long).unwrap();
    assert_eq!(colony.armor(close), Some(3.0));
    assert_eq!(colony.armor(distant), Some(2.0));
}

#[test]
fn test_short_thrower_maximum_range() {
    let mut colony = sandbox();
    let short = colony.deploy_ant("tunnel_0_0", "Short").unwrap().unwrap();
    let edge = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_4");

    colony.ant_act(short).unwrap();
    assert_eq!(colony.armor(edge), Some(3.0));

    let inside = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");
    colony.ant_act(short).unwrap();
    assert_eq!(colony.armor(inside), Some(2.0));
    assert_eq!(colony.armor(edge), Some(3.0));
}

#[test]
fn test_fire_ant_lethal_blast() {
    let mut colony = sandbox();
    let fire = drop_ant(&mut colony, AntKind::Fire, 1.0, "tunnel_0_0");
    let a = drop_bee(&mut colony, BeeKind::Bee, 2.0, "tunnel_0_0");
    let b = drop_bee(&mut colony, BeeKind::Bee, 2.0, "tunnel_0_0");

    colony.reduce_armor(fire, 1.0).unwrap();

    assert!(colony.armor(a).unwrap() <= 0.0);
    assert!(colony.armor(b).unwrap() <= 0.0);
    assert!(colony.bees_at("tunnel_0_0").is_empty());
    assert_eq!(colony.ant_at("tunnel_0_0"), None);
    assert_eq!(colony.place_of(fire), None);
}

#[test]
fn test_fire_ant_reflects_non_lethal_damage() {
    let mut colony = sandbox();
    let fire = colony.deploy_ant("tunnel_0_0", "Fire").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_0");

    colony.reduce_armor(fire, 1.0).unwrap();
    assert_eq!(colony.armor(fire), Some(2.0));
    assert_eq!(colony.armor(bee), Some(2.0));
}

#[test]
fn test_hungry_ant_eats_then_digests() {
    let mut colony = sandbox();
    let hungry = colony.deploy_ant("tunnel_0_0", "Hungry").unwrap().unwrap();
    let first = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_0");

    colony.ant_act(hungry).unwrap();
    assert!(colony.armor(first).unwrap() <= 0.0);
    assert_eq!(
        colony.world().get::<&Digestion>(hungry).unwrap().remaining,
        3
    );

    let second = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_0");
    for _ in 0..3 {
        colony.ant_act(hungry).unwrap();
        assert_eq!(colony.armor(second), Some(3.0));
    }
    colony.ant_act(hungry).unwrap();
    assert!(colony.armor(second).unwrap() <= 0.0);
}

#[test]
fn test_hungry_ant_waits_for_prey_without_digesting() {
    let mut colony = sandbox();
    let hungry = colony.deploy_ant("tunnel_0_0", "Hungry").unwrap().unwrap();

    colony.ant_act(hungry).unwrap();
    assert_eq!(
        colony.world().get::<&Digestion>(hungry).unwrap().remaining,
        0
    );
}

#[test]
fn test_hungry_ant_bite_is_mitigated_by_boss() {
    let mut colony = sandbox();
    let hungry = colony.deploy_ant("tunnel_0_0", "Hungry").unwrap().unwrap();
    let boss = drop_bee(&mut colony, BeeKind::Boss, 15.0, "tunnel_0_0");

    colony.ant_act(hungry).unwrap();
    let expected = 15.0 - 15.0 * 8.0 / 23.0;
    assert!((colony.armor(boss).unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_ninja_ant_strikes_all_and_lets_bees_pass() {
    let mut colony = sandbox();
    let ninja = colony.deploy_ant("tunnel_0_3", "Ninja").unwrap().unwrap();
    let a = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");
    let b = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");

    colony.ant_act(ninja).unwrap();
    assert_eq!(colony.armor(a), Some(2.0));
    assert_eq!(colony.armor(b), Some(2.0));

    colony.bee_act(a).unwrap();
    assert_eq!(colony.place_of(a), Some("tunnel_0_2"));
    assert_eq!(colony.armor(ninja), Some(1.0));
}

#[test]
fn test_wall_blocks_and_absorbs() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_3", "Wall").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");

    colony.bee_act(bee).unwrap();
    assert_eq!(colony.place_of(bee), Some("tunnel_0_3"));
    assert_eq!(colony.armor(wall), Some(3.0));
}

#[test]
fn test_bodyguard_acts_for_contained_ant_and_takes_stings() {
    let mut colony = sandbox();
    let guard = colony.deploy_ant("tunnel_0_3", "Bodyguard").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_3", "Thrower").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");

    colony.ant_act(guard).unwrap();
    assert_eq!(colony.armor(bee), Some(2.0));

    let stinger = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");
    colony.bee_act(stinger).unwrap();
    assert_eq!(colony.armor(guard), Some(1.0));
    assert_eq!(colony.armor(thrower), Some(1.0));
}

#[test]
fn test_tank_acts_for_contained_ant_then_sweeps() {
    let mut colony = sandbox();
    let tank = colony.deploy_ant("tunnel_0_3", "Tank").unwrap().unwrap();
    colony.deploy_ant("tunnel_0_3", "Thrower").unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_3");

    colony.ant_act(tank).unwrap();
    assert_eq!(colony.armor(bee), Some(1.0));
}

// ---- Queen ----

#[test]
fn test_queen_doubles_ants_behind_her_once() {
    let mut colony = sandbox();
    let thrower = colony.deploy_ant("tunnel_0_0", "Thrower").unwrap().unwrap();
    let guard = colony.deploy_ant("tunnel_0_1", "Bodyguard").unwrap().unwrap();
    let inner = colony.deploy_ant("tunnel_0_1", "Thrower").unwrap().unwrap();
    let ahead = colony.deploy_ant("tunnel_0_3", "Thrower").unwrap().unwrap();
    let queen = colony.deploy_ant("tunnel_0_2", "Queen").unwrap().unwrap();

    colony.ant_act(queen).unwrap();
    colony.ant_act(queen).unwrap();

    assert_eq!(colony.damage(thrower), 2.0);
    assert_eq!(colony.damage(inner), 2.0);
    assert_eq!(colony.damage(guard), 0.0);
    assert_eq!(colony.damage(ahead), 1.0);
    assert!(colony.buffs().contains(thrower));
    assert!(!colony.buffs().contains(ahead));
}

#[test]
fn test_buffed_fire_ant_blasts_harder() {
    let mut colony = sandbox();
    let fire = drop_ant(&mut colony, AntKind::Fire, 1.0, "tunnel_0_0");
    let queen = colony.deploy_ant("tunnel_0_1", "Queen").unwrap().unwrap();
    colony.ant_act(queen).unwrap();
    assert_eq!(colony.damage(fire), 6.0);

    let bee = drop_bee(&mut colony, BeeKind::Bee, 7.0, "tunnel_0_0");
    colony.reduce_armor(fire, 1.0).unwrap();
    assert_eq!(colony.armor(bee), Some(0.0));
}

#[test]
fn test_true_queen_cannot_be_removed() {
    let mut colony = sandbox();
    let queen = colony.deploy_ant("tunnel_0_2", "Queen").unwrap().unwrap();
    let impostor = colony.deploy_ant("tunnel_0_4", "Queen").unwrap().unwrap();

    colony.remove_ant("tunnel_0_2").unwrap();
    colony.remove_ant("tunnel_0_2").unwrap();
    assert_eq!(colony.ant_at("tunnel_0_2"), Some(queen));
    assert_eq!(colony.ant_at("tunnel_0_4"), Some(impostor));
    assert!(colony.board().is_true_queen(queen));
    assert!(!colony.board().is_true_queen(impostor));
}

#[test]
fn test_impostor_queen_can_be_removed() {
    let mut colony = sandbox();
    colony.deploy_ant("tunnel_0_2", "Queen").unwrap();
    colony.deploy_ant("tunnel_0_4", "Queen").unwrap();

    colony.remove_ant("tunnel_0_4").unwrap();
    assert_eq!(colony.ant_at("tunnel_0_4"), None);
}

#[test]
fn test_impostor_queen_destroys_itself() {
    let mut colony = sandbox();
    let queen = colony.deploy_ant("tunnel_0_2", "Queen").unwrap().unwrap();
    let thrower = colony.deploy_ant("tunnel_0_3", "Thrower").unwrap().unwrap();
    let impostor = colony.deploy_ant("tunnel_0_4", "Queen").unwrap().unwrap();

    colony.ant_act(impostor).unwrap();
    assert_eq!(colony.ant_at("tunnel_0_4"), None);
    assert!(colony.armor(impostor).unwrap() <= 0.0);
    assert_eq!(colony.damage(thrower), 1.0);
    assert_eq!(colony.ant_at("tunnel_0_2"), Some(queen));
    assert_eq!(colony.phase(), GamePhase::Running);
}

#[test]
fn test_queen_death_ends_game() {
    let mut colony = sandbox();
    let queen = colony.deploy_ant("tunnel_0_2", "Queen").unwrap().unwrap();

    colony.reduce_armor(queen, 1.0).unwrap();
    assert_eq!(colony.phase(), GamePhase::Over(Outcome::BeesWin));
}

// ---- Bee actions ----

#[test]
fn test_bee_advances_toward_base() {
    let mut colony = sandbox();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");

    colony.bee_act(bee).unwrap();
    assert_eq!(colony.place_of(bee), Some("tunnel_0_4"));
    assert!(colony.bees_at("tunnel_0_5").is_empty());
    assert_eq!(colony.bees_at("tunnel_0_4"), vec![bee]);
}

#[test]
fn test_bee_entering_base_wins() {
    let mut colony = sandbox();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_0");

    colony.bee_act(bee).unwrap();
    assert_eq!(colony.phase(), GamePhase::Over(Outcome::BeesWin));
}

#[test]
fn test_wasp_and_hornet_sting_rates() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_3", "Wall").unwrap().unwrap();
    let wasp = drop_bee(&mut colony, BeeKind::Wasp, 3.0, "tunnel_0_3");
    colony.bee_act(wasp).unwrap();
    assert_eq!(colony.armor(wall), Some(2.0));

    let other = colony.deploy_ant("tunnel_0_6", "Wall").unwrap().unwrap();
    let hornet = drop_bee(&mut colony, BeeKind::Hornet, 3.0, "tunnel_0_6");
    colony.bee_act(hornet).unwrap();
    assert_eq!(colony.armor(other), Some(3.5));
}

#[test]
fn test_ninja_bee_is_never_blocked() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_3", "Wall").unwrap().unwrap();
    let ninja = drop_bee(&mut colony, BeeKind::NinjaBee, 3.0, "tunnel_0_3");

    colony.bee_act(ninja).unwrap();
    assert_eq!(colony.place_of(ninja), Some("tunnel_0_2"));
    assert_eq!(colony.armor(wall), Some(4.0));
}

#[test]
fn test_boss_moves_twice() {
    let mut colony = sandbox();
    let boss = drop_bee(&mut colony, BeeKind::Boss, 20.0, "tunnel_0_5");

    colony.bee_act(boss).unwrap();
    assert_eq!(colony.place_of(boss), Some("tunnel_0_3"));
}

#[test]
fn test_boss_rechecks_block_between_actions() {
    let mut colony = sandbox();
    let wall = drop_ant(&mut colony, AntKind::Wall, 2.0, "tunnel_0_5");
    let boss = drop_bee(&mut colony, BeeKind::Boss, 20.0, "tunnel_0_5");

    colony.bee_act(boss).unwrap();
    assert!(colony.armor(wall).unwrap() <= 0.0);
    assert_eq!(colony.place_of(boss), Some("tunnel_0_4"));
}

#[test]
fn test_boss_mitigates_damage() {
    let mut colony = sandbox();
    let boss = drop_bee(&mut colony, BeeKind::Boss, 15.0, "tunnel_0_5");

    colony.reduce_armor(boss, 8.0).unwrap();
    assert_eq!(colony.armor(boss), Some(11.0));
}

#[test]
fn test_dead_bee_does_not_act() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_3", "Wall").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 1.0, "tunnel_0_3");
    colony.reduce_armor(bee, 1.0).unwrap();

    colony.bee_act(bee).unwrap();
    assert_eq!(colony.armor(wall), Some(4.0));
}

// ---- Status effects ----

#[test]
fn test_stun_holds_bee_in_place() {
    let mut colony = sandbox();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");
    assert!(colony.afflict(bee, StatusEffect::Stun { turns: 2 }).unwrap());

    colony.bee_act(bee).unwrap();
    colony.bee_act(bee).unwrap();
    assert_eq!(colony.place_of(bee), Some("tunnel_0_5"));

    colony.bee_act(bee).unwrap();
    assert_eq!(colony.place_of(bee), Some("tunnel_0_4"));
}

#[test]
fn test_slow_allows_action_on_even_turn() {
    let mut colony = sandbox();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_5");
    assert!(colony.afflict(bee, StatusEffect::Slow { turns: 3 }).unwrap());

    assert_eq!(colony.time(), 0);
    colony.bee_act(bee).unwrap();
    assert_eq!(colony.place_of(bee), Some("tunnel_0_4"));
}

#[test]
fn test_immune_bees_refuse_effects() {
    let mut colony = sandbox();
    let hornet = drop_bee(&mut colony, BeeKind::Hornet, 3.0, "tunnel_0_5");
    let boss = drop_bee(&mut colony, BeeKind::Boss, 20.0, "tunnel_0_6");

    assert!(!colony.afflict(hornet, StatusEffect::Stun { turns: 2 }).unwrap());
    assert!(!colony.afflict(boss, StatusEffect::Slow { turns: 2 }).unwrap());

    colony.bee_act(hornet).unwrap();
    assert_eq!(colony.place_of(hornet), Some("tunnel_0_3"));
}

#[test]
fn test_afflicting_a_destroyed_bee_fails() {
    let mut colony = sandbox();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 1.0, "tunnel_0_5");
    colony.reduce_armor(bee, 1.0).unwrap();

    assert!(matches!(
        colony.afflict(bee, StatusEffect::Stun { turns: 2 }),
        Err(ColonyError::NoSuchInsect(_))
    ));
    assert!(colony.turn().events.iter().all(|e| !matches!(e, GameEvent::BeeAfflicted { .. })));
}

#[test]
fn test_afflicting_an_ant_fails() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_3", "Wall").unwrap().unwrap();
    assert!(matches!(
        colony.afflict(wall, StatusEffect::Stun { turns: 1 }),
        Err(ColonyError::NoSuchInsect(_))
    ));
}

// ---- Turn loop ----

#[test]
fn test_bees_held_in_hive_until_their_turn() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig::default(),
    ).unwrap();
    assert_eq!(colony.bees_at("Hive").len(), 2);
    assert_eq!(colony.bees_remaining(), 2);

    colony.turn();
    colony.turn();
    assert_eq!(colony.bees_at("Hive").len(), 2);

    let snapshot = colony.turn();
    assert_eq!(colony.bees_at("Hive").len(), 1);
    assert_eq!(colony.active_bees().len(), 1);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::BeeReleased { bee: BeeKind::Bee, .. })));
    // Released into tunnel_0_8, then moved once.
    assert_eq!(colony.bees_at("tunnel_0_7").len(), 1);
}

#[test]
fn test_undefended_colony_falls() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(3),
        SimConfig::default(),
    ).unwrap();
    assert_eq!(colony.simulate(), Outcome::BeesWin);
    assert!(!colony.phase().outcome().unwrap().ants_won());
}

#[test]
fn test_throwers_defend_colony() {
    let script = vec![
        ScheduledCommand {
            turn: 0,
            command: PlacementCommand::Deploy {
                place: "tunnel_0_0".to_string(),
                ant: "Thrower".to_string(),
            },
        },
        ScheduledCommand {
            turn: 0,
            command: PlacementCommand::Deploy {
                place: "tunnel_0_1".to_string(),
                ant: "Thrower".to_string(),
            },
        },
    ];
    let mut colony = Colony::new(
        ScriptedStrategy::new(script),
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 20,
            ..Default::default()
        },
    ).unwrap();

    assert_eq!(colony.simulate(), Outcome::AntsWin);
    assert_eq!(colony.food(), 14);
    assert_eq!(colony.bees_remaining(), 0);
    assert_eq!(colony.time(), 4);
}

#[test]
fn test_game_over_is_final() {
    let mut colony = sandbox();
    let snapshot = colony.turn();
    assert_eq!(snapshot.phase, GamePhase::Over(Outcome::AntsWin));
    assert!(snapshot
        .events
        .contains(&GameEvent::GameOver { outcome: Outcome::AntsWin }));

    let again = colony.turn();
    assert_eq!(again.phase, GamePhase::Over(Outcome::AntsWin));
    assert_eq!(again.clock, snapshot.clock);
    assert!(again.events.is_empty());
}

#[test]
fn test_closure_strategy_runs_each_turn() {
    let calls = Rc::new(RefCell::new(0u32));
    let seen = Rc::clone(&calls);
    let mut colony = Colony::new(
        move |colony: &mut Colony| {
            *seen.borrow_mut() += 1;
            if colony.time() == 0 {
                colony.deploy_ant("tunnel_0_0", "Wall").unwrap();
            }
        },
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 10,
            ..Default::default()
        },
    ).unwrap();
    for _ in 0..3 {
        colony.turn();
    }
    assert_eq!(*calls.borrow(), 3);
    assert_eq!(colony.food(), 6);
}

#[test]
fn test_dead_insects_are_despawned_after_turn() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig::default(),
    ).unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 1.0, "tunnel_0_4");
    colony.reduce_armor(bee, 1.0).unwrap();
    assert!(colony.world().contains(bee));

    colony.turn();
    assert!(!colony.world().contains(bee));
}

#[test]
fn test_death_hook_sees_every_death() {
    let deaths = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&deaths);

    let mut colony = sandbox();
    colony.set_death_hook(Box::new(move |death: &InsectDeath| {
        log.borrow_mut()
            .push((death.faction, death.name, death.place.clone()));
    }));
    let fire = drop_ant(&mut colony, AntKind::Fire, 1.0, "tunnel_0_2");
    drop_bee(&mut colony, BeeKind::Wasp, 1.0, "tunnel_0_2");
    colony.reduce_armor(fire, 5.0).unwrap();

    let deaths = deaths.borrow();
    assert_eq!(deaths.len(), 2);
    assert!(deaths.contains(&(Faction::Bee, "Wasp", Some("tunnel_0_2".to_string()))));
    assert!(deaths.contains(&(Faction::Ant, "Fire", Some("tunnel_0_2".to_string()))));
}

#[test]
fn test_status_line() {
    let mut colony = Colony::new(
        Passive,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 5,
            ..Default::default()
        },
    ).unwrap();
    colony.deploy_ant("tunnel_0_0", "Thrower").unwrap();
    assert_eq!(
        colony.to_string(),
        r#"["Thrower(1, tunnel_0_0)", "Bee(3, Hive)", "Bee(3, Hive)"] (Food: 2, Time: 0)"#
    );
}

#[test]
fn test_queries_list_ants_then_bees() {
    let mut colony = sandbox();
    let wall = colony.deploy_ant("tunnel_0_1", "Wall").unwrap().unwrap();
    let harvester = colony.deploy_ant("tunnel_0_0", "Harvester").unwrap().unwrap();
    let bee = drop_bee(&mut colony, BeeKind::Bee, 3.0, "tunnel_0_4");

    assert_eq!(colony.ants(), vec![harvester, wall]);
    assert_eq!(colony.bees(), vec![bee]);
    assert_eq!(colony.insects(), vec![harvester, wall, bee]);
}

// ---- Snapshots ----

#[test]
fn test_snapshot_describes_board() {
    let mut colony = sandbox();
    colony.deploy_ant("tunnel_0_0", "Bodyguard").unwrap();
    colony.deploy_ant("tunnel_0_0", "Thrower").unwrap();
    drop_bee(&mut colony, BeeKind::Wasp, 3.0, "tunnel_0_4");

    let snapshot = colony.snapshot();
    assert_eq!(snapshot.places.len(), 11);
    assert_eq!(snapshot.food, 100 - 4 - 3);

    let place = snapshot
        .places
        .iter()
        .find(|p| p.name == "tunnel_0_0")
        .unwrap();
    assert_eq!(place.exit.as_deref(), Some("AntQueen"));
    assert_eq!(place.ant.as_ref().unwrap().name, "Bodyguard");
    assert_eq!(place.contained.as_ref().unwrap().name, "Thrower");

    let place = snapshot
        .places
        .iter()
        .find(|p| p.name == "tunnel_0_4")
        .unwrap();
    assert_eq!(place.bees.len(), 1);
    assert_eq!(place.bees[0].faction, Faction::Bee);
    assert_eq!(place.bees[0].damage, 2.0);
}

#[test]
fn test_turn_snapshot_carries_deploy_events() {
    let mut colony = Colony::new(
        |colony: &mut Colony| {
            if colony.time() == 0 {
                colony.deploy_ant("tunnel_0_0", "Thrower").unwrap();
            }
        },
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 10,
            ..Default::default()
        },
    ).unwrap();
    let snapshot = colony.turn();
    assert_eq!(
        snapshot.events,
        vec![GameEvent::AntDeployed {
            ant: AntKind::Thrower,
            place: "tunnel_0_0".to_string(),
        }]
    );
    assert_eq!(snapshot.clock.turn, 1);
    assert_eq!(snapshot.phase, GamePhase::Running);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let build = || {
        Colony::new(
            |colony: &mut Colony| {
                if colony.time() == 0 {
                    let _ = colony.deploy_ant("tunnel_0_0", "Harvester");
                } else if colony.food() >= 3 {
                    let place = format!("tunnel_{}_1", colony.time() % 3);
                    let _ = colony.deploy_ant(&place, "Thrower");
                }
            },
            &build_plan(Difficulty::Easy),
            &AntKind::ALL,
            wet_layout,
            Dimensions::default(),
            SimConfig {
                seed: 12345,
                ..Default::default()
            },
        ).unwrap()
    };
    let mut a = build();
    let mut b = build();

    for _ in 0..60 {
        let snap_a = serde_json::to_string(&a.turn()).unwrap();
        let snap_b = serde_json::to_string(&b.turn()).unwrap();
        assert_eq!(snap_a, snap_b, "Snapshots diverged with same seed");
    }
    assert_eq!(a.to_string(), b.to_string());
}

// ---- Assault plans ----

#[test]
fn test_assault_plan_queries() {
    let mut plan = AssaultPlan::new();
    plan.add_wave(BeeKind::Bee, 3.0, 2, 2)
        .add_wave(BeeKind::Wasp, 4.0, 2, 1)
        .add_wave(BeeKind::Boss, 15.0, 7, 1);

    assert_eq!(plan.total(), 4);
    assert_eq!(plan.bees_at(2).len(), 3);
    assert_eq!(plan.bees_at(2)[2].kind, BeeKind::Wasp);
    assert!(plan.bees_at(3).is_empty());

    let turns: Vec<u64> = plan.all_bees().map(|(turn, _)| turn).collect();
    assert_eq!(turns, vec![2, 2, 2, 7]);
}

#[test]
fn test_preset_plans() {
    assert_eq!(build_plan(Difficulty::Test).total(), 2);
    assert_eq!(build_plan(Difficulty::Easy).total(), 11);

    let easy = build_plan(Difficulty::Easy);
    assert_eq!(easy.bees_at(16)[0].kind, BeeKind::Boss);
    assert_eq!(easy.bees_at(16)[0].armor, 15.0);

    let hard = build_plan(Difficulty::Hard);
    let extra = build_plan(Difficulty::ExtraHard);
    assert!(extra.total() > hard.total());
    assert!(hard.total() > build_plan(Difficulty::Normal).total());
    assert_eq!(extra.bees_at(2)[0].kind, BeeKind::Hornet);
}

#[test]
fn test_scripted_strategy_logs_failures_and_continues() {
    let script = vec![
        ScheduledCommand {
            turn: 1,
            command: PlacementCommand::Deploy {
                place: "tunnel_0_2".to_string(),
                ant: "Wall".to_string(),
            },
        },
        ScheduledCommand {
            turn: 0,
            command: PlacementCommand::Deploy {
                place: "nowhere".to_string(),
                ant: "Wall".to_string(),
            },
        },
        ScheduledCommand {
            turn: 2,
            command: PlacementCommand::Remove {
                place: "tunnel_0_2".to_string(),
            },
        },
    ];
    let strategy = ScriptedStrategy::new(script);
    assert_eq!(strategy.pending()[0].turn, 0);

    let mut colony = Colony::new(
        strategy,
        &build_plan(Difficulty::Test),
        &AntKind::ALL,
        dry_layout,
        one_tunnel(9),
        SimConfig {
            food: 10,
            ..Default::default()
        },
    ).unwrap();
    colony.turn();
    assert_eq!(colony.ant_at("tunnel_0_2"), None);
    colony.turn();
    assert!(colony.ant_at("tunnel_0_2").is_some());
    colony.turn();
    assert_eq!(colony.ant_at("tunnel_0_2"), None);
    assert_eq!(colony.food(), 6);
}
