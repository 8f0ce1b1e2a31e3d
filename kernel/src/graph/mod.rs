//! Graph module: node identity, tiles, weighted edges and the cavern itself.
//!
//! The graph is static once built. Nothing here models movement, time or
//! gold collection; those belong to whoever owns a cavern and hands it out.

pub mod cavern;
pub mod error;
pub mod node;
