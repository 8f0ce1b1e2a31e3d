//! Hand-drawn worlds with known answers.

use crate::fixture::{CavernFixture, EdgeFixture, NodeFixture};

fn node(id: u64, row: i32, col: i32, gold: u32) -> NodeFixture {
    NodeFixture { id, row, col, gold }
}

fn edge(a: u64, b: u64, weight: u64) -> EdgeFixture {
    EdgeFixture { a, b, weight }
}

/// Unit-weight square 1-2-3-4-1, orb opposite the start.
///
/// ```text
/// 1 - 2
/// |   |
/// 4 - 3*
/// ```
#[must_use]
pub fn ring4() -> CavernFixture {
    CavernFixture {
        name: "ring4".into(),
        nodes: vec![
            node(1, 0, 0, 0),
            node(2, 0, 1, 2),
            node(3, 1, 1, 0),
            node(4, 1, 0, 5),
        ],
        edges: vec![edge(1, 2, 1), edge(2, 3, 1), edge(3, 4, 1), edge(4, 1, 1)],
        start: 1,
        orb: 3,
        exit: 1,
        time_budget: None,
        heuristic: None,
    }
}

/// Straight corridor 1-2-3-4-5 with weights 1, 2, 1, 3. The orb sits on 1,
/// the exit on 5, gold on every node past the orb.
#[must_use]
pub fn line5() -> CavernFixture {
    CavernFixture {
        name: "line5".into(),
        nodes: vec![
            node(1, 0, 0, 100),
            node(2, 0, 1, 1),
            node(3, 0, 2, 2),
            node(4, 0, 3, 3),
            node(5, 0, 4, 4),
        ],
        edges: vec![edge(1, 2, 1), edge(2, 3, 2), edge(3, 4, 1), edge(4, 5, 3)],
        start: 3,
        orb: 1,
        exit: 5,
        time_budget: None,
        heuristic: None,
    }
}

/// The agent is dropped on the orb.
#[must_use]
pub fn start_on_orb() -> CavernFixture {
    CavernFixture {
        name: "start_on_orb".into(),
        nodes: vec![node(1, 0, 0, 0), node(2, 0, 1, 0), node(3, 0, 2, 9)],
        edges: vec![edge(1, 2, 1), edge(2, 3, 4)],
        start: 2,
        orb: 2,
        exit: 3,
        time_budget: Some(10),
        heuristic: None,
    }
}

/// Two equal-cost routes from the orb to the exit. The lower-id branch wins
/// the tie, so only its gold is collected.
///
/// ```text
///     2($5)
///    /     \
/// 1*        4 (exit)
///    \     /
///     3($7)
/// ```
#[must_use]
pub fn twin_paths() -> CavernFixture {
    CavernFixture {
        name: "twin_paths".into(),
        nodes: vec![
            node(1, 1, 0, 0),
            node(2, 0, 1, 5),
            node(3, 2, 1, 7),
            node(4, 1, 2, 0),
        ],
        edges: vec![edge(1, 2, 2), edge(1, 3, 2), edge(2, 4, 2), edge(3, 4, 2)],
        start: 4,
        orb: 1,
        exit: 4,
        time_budget: None,
        heuristic: None,
    }
}
