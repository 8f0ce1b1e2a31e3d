//! Proof module: canonical JSON and domain-separated content hashing.
//!
//! Every digest in the workspace is produced here. Callers pick a
//! [`hash::HashDomain`]; they never feed bytes to SHA-256 directly.

pub mod canon;
pub mod hash;
pub mod hash_domain;
