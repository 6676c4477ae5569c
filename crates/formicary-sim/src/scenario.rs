//! Scenario definitions: preset assault plans per difficulty.
//!
//! Bees come every other turn in two surges (turns 3..16 and 21..30),
//! with specialists mixed in and a boss closing each plan.

use formicary_core::enums::{BeeKind, Difficulty};

use crate::assault::AssaultPlan;

/// Build the assault plan for a difficulty.
pub fn build_plan(difficulty: Difficulty) -> AssaultPlan {
    match difficulty {
        Difficulty::Test => build_test(),
        Difficulty::Easy => build_easy(),
        Difficulty::Normal => build_normal(),
        Difficulty::Hard => hard_surges(4.0, 1),
        Difficulty::ExtraHard => build_extra_hard(),
    }
}

/// Two plain bees, one turn apart.
fn build_test() -> AssaultPlan {
    AssaultPlan::new()
        .with_wave(BeeKind::Bee, 3.0, 2, 1)
        .with_wave(BeeKind::Bee, 3.0, 3, 1)
}

/// One surge, a single specialist of each kind, a 15-armor boss.
fn build_easy() -> AssaultPlan {
    let mut plan = AssaultPlan::new();
    for turn in (3..16).step_by(2) {
        plan.add_wave(BeeKind::Bee, 3.0, turn, 1);
    }
    plan.add_wave(BeeKind::Wasp, 3.0, 4, 1)
        .add_wave(BeeKind::NinjaBee, 3.0, 8, 1)
        .add_wave(BeeKind::Hornet, 3.0, 12, 1)
        .add_wave(BeeKind::Boss, 15.0, 16, 1);
    plan
}

/// Two surges of paired bees, a 20-armor boss.
fn build_normal() -> AssaultPlan {
    let mut plan = AssaultPlan::new();
    for turn in (3..16).step_by(2) {
        plan.add_wave(BeeKind::Bee, 3.0, turn, 2);
    }
    plan.add_wave(BeeKind::Wasp, 3.0, 4, 1)
        .add_wave(BeeKind::NinjaBee, 3.0, 8, 1)
        .add_wave(BeeKind::Hornet, 3.0, 12, 1)
        .add_wave(BeeKind::Wasp, 3.0, 16, 1);

    for turn in (21..30).step_by(2) {
        plan.add_wave(BeeKind::Bee, 3.0, turn, 2);
    }
    plan.add_wave(BeeKind::Wasp, 3.0, 22, 2)
        .add_wave(BeeKind::Hornet, 3.0, 24, 2)
        .add_wave(BeeKind::NinjaBee, 3.0, 26, 2)
        .add_wave(BeeKind::Hornet, 3.0, 28, 2)
        .add_wave(BeeKind::Boss, 20.0, 30, 1);
    plan
}

/// The hard plan with an early hornet raid and two bosses.
fn build_extra_hard() -> AssaultPlan {
    let mut plan = hard_surges(5.0, 2);
    plan.add_wave(BeeKind::Hornet, 5.0, 2, 2);
    plan
}

/// Tougher bees in larger groups; `armor` for all but the bosses.
fn hard_surges(armor: f64, bosses: usize) -> AssaultPlan {
    let mut plan = AssaultPlan::new();
    for turn in (3..16).step_by(2) {
        plan.add_wave(BeeKind::Bee, armor, turn, 2);
    }
    plan.add_wave(BeeKind::Hornet, armor, 4, 2)
        .add_wave(BeeKind::Wasp, armor, 8, 2)
        .add_wave(BeeKind::NinjaBee, armor, 12, 2)
        .add_wave(BeeKind::Wasp, armor, 15, 3);

    for turn in (21..30).step_by(2) {
        plan.add_wave(BeeKind::Bee, armor, turn, 3);
    }
    plan.add_wave(BeeKind::Wasp, armor, 22, 2)
        .add_wave(BeeKind::Hornet, armor, 24, 2)
        .add_wave(BeeKind::NinjaBee, armor, 26, 2)
        .add_wave(BeeKind::Hornet, armor, 28, 2)
        .add_wave(BeeKind::Boss, 30.0, 30, bosses);
    plan
}
