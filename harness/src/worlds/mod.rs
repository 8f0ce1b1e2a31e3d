//! Canned worlds for tests, benches and the CLI.
//!
//! Every world is returned as a [`CavernFixture`] so that it can be written
//! to disk as-is or turned into a [`crate::world::CavernWorld`] with
//! [`CavernFixture::into_world`].

pub mod lattice;
pub mod small;

use crate::fixture::CavernFixture;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "ring4",
    "line5",
    "start_on_orb",
    "twin_paths",
    "grid8",
    "serpentine8",
];

/// Look up a canned world.
#[must_use]
pub fn by_name(name: &str) -> Option<CavernFixture> {
    Some(match name {
        "ring4" => small::ring4(),
        "line5" => small::line5(),
        "start_on_orb" => small::start_on_orb(),
        "twin_paths" => small::twin_paths(),
        "grid8" => lattice::grid(8, 8),
        "serpentine8" => lattice::serpentine(8, 8),
        _ => return None,
    })
}
