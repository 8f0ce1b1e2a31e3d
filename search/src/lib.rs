//! Cavern Search: orb search under partial observability, escape under full
//! observability.
//!
//! This crate depends only on `cavern_kernel`. It never constructs an
//! environment; it drives whatever implements the handle contracts.
//!
//! # Crate dependency graph
//!
//! ```text
//! cavern_kernel  ←  cavern_search  ←  cavern_harness
//! (graph, proof)    (explore, escape)  (world, runner, reports)
//! ```
//!
//! # Key entry points
//!
//! - [`explore::explore`] -- greedy backtracking traversal toward the orb
//! - [`escape::escape`] -- shortest path to the exit, walked while collecting gold
//! - [`escape::plan_escape`] -- the handle-free planning half of `escape`
//! - [`shortest::shortest_paths`] -- single-source Dijkstra over a cavern
//!
//! # Key types
//!
//! - [`contract::ExplorationHandle`] / [`contract::EscapeHandle`] -- environment seams
//! - [`status::NeighborStatus`] -- one neighbour as sensed during exploration
//! - [`policy::ExplorePolicy`] / [`policy::EscapePolicy`] -- run configuration
//! - [`trace::ExploreTrace`] / [`trace::EscapeTrace`] -- audit logs with digests

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod error;
pub mod escape;
pub mod explore;
pub mod frontier;
pub mod path;
pub mod policy;
pub mod shortest;
pub mod status;
pub mod trace;
