//! Cavern Kernel: the static cavern graph and its canonical audit surface.
//!
//! # API Surface
//!
//! - [`graph::cavern::Cavern`] -- the immutable, undirected, weighted graph
//!   built through [`graph::cavern::CavernBuilder`]
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON encoder
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `graph` ← `proof`
//!
//! `graph` uses `proof` only to digest itself. Nothing in the kernel depends on
//! the search or harness crates.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;
pub mod proof;
