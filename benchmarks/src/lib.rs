//! Shared helpers for the cavern benchmark suites.

use cavern_harness::world::CavernWorld;
use cavern_harness::worlds::lattice;

/// Grid sides used by every size-parameterised group.
pub const GRID_SIDES: &[u16] = &[8, 16, 32];

/// Fresh square grid world.
///
/// # Panics
///
/// Panics if the generated world is invalid. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn grid_world(side: u16) -> CavernWorld {
    lattice::grid(side, side)
        .into_world()
        .expect("generated grid is a valid world")
}

/// Fresh serpentine world: one long corridor, worst case for exploration.
///
/// # Panics
///
/// Panics if the generated world is invalid.
#[must_use]
pub fn serpentine_world(side: u16) -> CavernWorld {
    lattice::serpentine(side, side)
        .into_world()
        .expect("generated serpentine is a valid world")
}
