//! Pure decision rules evaluated by the engine's systems.
//!
//! Each function answers one question about an insect's turn from plain
//! inputs, so the rules can be tested without building a colony.

use formicary_core::constants::HUNGRY_DIGEST_TURNS;
use formicary_core::enums::StatusEffect;

/// Whether a place `hops` entrances away lies inside a thrower's range.
pub fn in_throw_range(hops: u32, min_range: u32, max_range: Option<u32>) -> bool {
    hops >= min_range && max_range.map_or(true, |max| hops < max)
}

/// Damage that registers after diminishing-returns mitigation.
///
/// `effective = raw * cap / (cap + raw)`, so no single hit ever registers
/// `cap` or more.
pub fn mitigate(raw: f64, cap: Option<f64>) -> f64 {
    match cap {
        Some(cap) if raw > 0.0 => raw * cap / (cap + raw),
        _ => raw,
    }
}

/// Damage a fire ant passes on to each co-located bee.
pub fn fire_splash(incoming: f64, bonus: f64, lethal: bool) -> f64 {
    if lethal {
        incoming + bonus
    } else {
        incoming
    }
}

/// One turn of a hungry ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestStep {
    /// Still chewing; store the new countdown and do nothing else.
    Digest { remaining: u32 },
    /// Free to eat. If a bee is eaten, the countdown resets to `reset_to`.
    Hunt { reset_to: u32 },
}

pub fn digest(remaining: u32) -> DigestStep {
    if remaining > 0 {
        DigestStep::Digest {
            remaining: remaining - 1,
        }
    } else {
        DigestStep::Hunt {
            reset_to: HUNGRY_DIGEST_TURNS,
        }
    }
}

/// Input to a single bee sub-action.
#[derive(Debug, Clone, Copy)]
pub struct BeeContext {
    pub armor: f64,
    /// Whether the visible ant in the bee's place blocks paths (`None` if no ant).
    pub ant_blocks: Option<bool>,
    pub unblockable: bool,
    pub has_exit: bool,
}

/// What a bee does with one sub-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeeIntent {
    /// Sting the ant that blocks the way.
    Sting,
    /// Move to the exit of the current place.
    Advance,
    /// Nothing to do.
    Idle,
}

/// Whether a bee is held in place by the ant it shares a place with.
pub fn is_blocked(ant_blocks: Option<bool>, unblockable: bool) -> bool {
    !unblockable && ant_blocks == Some(true)
}

pub fn bee_intent(ctx: &BeeContext) -> BeeIntent {
    if ctx.armor <= 0.0 {
        return BeeIntent::Idle;
    }
    if is_blocked(ctx.ant_blocks, ctx.unblockable) {
        BeeIntent::Sting
    } else if ctx.has_exit {
        BeeIntent::Advance
    } else {
        BeeIntent::Idle
    }
}

/// Whether an afflicted bee may act on the given turn.
pub fn affliction_allows(effect: StatusEffect, turn: u64) -> bool {
    match effect {
        StatusEffect::Slow { .. } => turn % 2 == 0,
        StatusEffect::Stun { .. } => false,
    }
}
