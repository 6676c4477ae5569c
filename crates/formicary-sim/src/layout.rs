//! Tunnel layouts: callbacks that register the places of a colony.
//!
//! Every tunnel runs from the base outward; the last place of each one
//! is where bees come in.

use formicary_core::constants::DEFAULT_MOAT_FREQUENCY;
use formicary_core::enums::PlaceKind;
use formicary_core::error::Result;
use formicary_core::types::{Dimensions, PlaceId};

use crate::tunnel::Tunnel;

/// Dry tunnels with a moat every third place.
pub fn wet_layout(tunnel: &mut Tunnel, base: PlaceId, dimensions: Dimensions) -> Result<()> {
    wet_layout_with_moats(tunnel, base, dimensions, DEFAULT_MOAT_FREQUENCY)
}

/// Tunnels where every `moat_frequency`-th step is water. Zero means none.
pub fn wet_layout_with_moats(
    tunnel: &mut Tunnel,
    base: PlaceId,
    dimensions: Dimensions,
    moat_frequency: usize,
) -> Result<()> {
    for t in 0..dimensions.tunnels {
        let mut exit = base;
        for step in 0..dimensions.length {
            let wet = moat_frequency != 0 && (step + 1) % moat_frequency == 0;
            let (name, kind) = if wet {
                (format!("water_{t}_{step}"), PlaceKind::Water)
            } else {
                (format!("tunnel_{t}_{step}"), PlaceKind::Ground)
            };
            let bee_entrance = step + 1 == dimensions.length;
            exit = tunnel.add_place(name, kind, Some(exit), bee_entrance)?;
        }
    }
    Ok(())
}

/// Tunnels with no water at all.
pub fn dry_layout(tunnel: &mut Tunnel, base: PlaceId, dimensions: Dimensions) -> Result<()> {
    wet_layout_with_moats(tunnel, base, dimensions, 0)
}
