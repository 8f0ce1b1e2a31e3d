//! Shared support for the lock tests.

pub mod cavern_test_helpers;
