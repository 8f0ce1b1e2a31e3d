//! Generated rectangular worlds.
//!
//! Node `(r, c)` has id `r * cols + c + 1` and sits at tile `(r, c)`. Weights
//! and gold are fixed functions of the coordinates, so the same arguments
//! always give the same world.

use crate::fixture::{CavernFixture, EdgeFixture, NodeFixture};

fn id(cols: u16, r: u16, c: u16) -> u64 {
    u64::from(r) * u64::from(cols) + u64::from(c) + 1
}

fn nodes(rows: u16, cols: u16) -> Vec<NodeFixture> {
    let mut out = Vec::with_capacity(usize::from(rows) * usize::from(cols));
    for r in 0..rows {
        for c in 0..cols {
            out.push(NodeFixture {
                id: id(cols, r, c),
                row: i32::from(r),
                col: i32::from(c),
                gold: u32::from((r * 3 + c * 5) % 7),
            });
        }
    }
    out
}

fn weight(r: u16, c: u16) -> u64 {
    1 + u64::from((r * 7 + c * 3) % 4)
}

/// Fully connected grid. Start top-left, orb bottom-right, exit top-right.
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
#[must_use]
pub fn grid(rows: u16, cols: u16) -> CavernFixture {
    assert!(rows > 0 && cols > 0, "grid needs at least one row and column");
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                edges.push(EdgeFixture {
                    a: id(cols, r, c),
                    b: id(cols, r, c + 1),
                    weight: weight(r, c),
                });
            }
            if r + 1 < rows {
                edges.push(EdgeFixture {
                    a: id(cols, r, c),
                    b: id(cols, r + 1, c),
                    weight: weight(c, r),
                });
            }
        }
    }
    CavernFixture {
        name: if rows == cols {
            format!("grid{rows}")
        } else {
            format!("grid{rows}x{cols}")
        },
        nodes: nodes(rows, cols),
        edges,
        start: id(cols, 0, 0),
        orb: id(cols, rows - 1, cols - 1),
        exit: id(cols, 0, cols - 1),
        time_budget: None,
        heuristic: None,
    }
}

/// Snake-shaped corridor: each row is open left to right, rows join at
/// alternating ends. Every node is on the only route, so the heuristic
/// cannot help and exploration walks the whole corridor.
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
#[must_use]
pub fn serpentine(rows: u16, cols: u16) -> CavernFixture {
    assert!(rows > 0 && cols > 0, "serpentine needs at least one row and column");
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols.saturating_sub(1) {
            edges.push(EdgeFixture {
                a: id(cols, r, c),
                b: id(cols, r, c + 1),
                weight: weight(r, c),
            });
        }
        if r + 1 < rows {
            let c = if r % 2 == 0 { cols - 1 } else { 0 };
            edges.push(EdgeFixture {
                a: id(cols, r, c),
                b: id(cols, r + 1, c),
                weight: 1,
            });
        }
    }
    let last_row = rows - 1;
    let orb_col = if last_row % 2 == 0 { cols - 1 } else { 0 };
    CavernFixture {
        name: if rows == cols {
            format!("serpentine{rows}")
        } else {
            format!("serpentine{rows}x{cols}")
        },
        nodes: nodes(rows, cols),
        edges,
        start: id(cols, 0, 0),
        orb: id(cols, last_row, orb_col),
        exit: id(cols, 0, 0),
        time_budget: None,
        heuristic: None,
    }
}
