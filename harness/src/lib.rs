//! Cavern Harness: the environment side of an episode.
//!
//! The harness owns everything the search core deliberately does not: the
//! concrete world behind the handle traits, fixtures, canned worlds, the
//! episode runner that sequences exploration and escape, report
//! persistence, and the `cavern` CLI.
//!
//! The harness does NOT implement search logic; it delegates to
//! `cavern_search` and binds the results into digests computed by
//! `cavern_kernel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod fixture;
pub mod heuristic;
pub mod logging;
pub mod report;
pub mod report_dir;
pub mod runner;
pub mod world;
pub mod worlds;
