//! Escape: shortest path from the orb to the exit, walked while collecting
//! the gold lying on it.
//!
//! Planning ([`plan_escape`]) is pure and needs only the cavern. Execution
//! ([`escape`]) drives an [`EscapeHandle`] along the planned route and
//! re-queries position and gold from the handle after every move.

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::NodeId;
use tracing::{debug, info, warn};

use crate::contract::EscapeHandle;
use crate::error::EscapeError;
use crate::path::{reconstruct_path, EscapePath};
use crate::policy::{BudgetCheck, EscapePolicy};
use crate::shortest::{shortest_paths, ShortestPathTree};
use crate::trace::{EscapeStep, EscapeTrace};

/// A computed route plus the tree it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapePlan {
    pub tree: ShortestPathTree,
    pub path: EscapePath,
}

/// Result of a completed escape. The handle stands on the exit.
#[derive(Debug, Clone)]
pub struct EscapeOutcome {
    pub path: EscapePath,
    /// Gold picked up along the route. The source node is never collected.
    pub gold_collected: u64,
    /// Time the handle reports as spent during the walk.
    pub time_spent: u64,
    pub trace: EscapeTrace,
}

/// Compute the shortest route from `source` to `exit`.
///
/// # Errors
///
/// - [`EscapeError::UnknownNode`] if either endpoint is missing.
/// - Any reconstruction error from [`reconstruct_path`], including
///   [`EscapeError::WeightOverflow`].
pub fn plan_escape(
    cavern: &Cavern,
    source: NodeId,
    exit: NodeId,
    policy: &EscapePolicy,
) -> Result<EscapePlan, EscapeError> {
    if !cavern.contains(exit) {
        return Err(EscapeError::UnknownNode(exit));
    }
    let tree = shortest_paths(cavern, source, policy.selection)?;
    let path = reconstruct_path(cavern, &tree, exit)?;
    debug!(
        source = %source,
        exit = %exit,
        hops = path.len(),
        weight = path.total_weight,
        "escape route planned"
    );
    Ok(EscapePlan { tree, path })
}

/// Plan and walk the escape route.
///
/// Under [`BudgetCheck::Trust`] the remaining time is never consulted; the
/// environment is relied on to grant enough. Under [`BudgetCheck::Verify`]
/// the route weight is compared with the remaining time before the first
/// move.
///
/// # Errors
///
/// - Planning errors from [`plan_escape`] (nothing has moved).
/// - [`EscapeError::InsufficientTime`] under `Verify` (nothing has moved).
/// - [`EscapeError::Handle`] if the handle refuses a move or a collection.
/// - [`EscapeError::NotOnExit`] if the walk ends anywhere but the exit.
pub fn escape<H: EscapeHandle + ?Sized>(
    handle: &mut H,
    policy: &EscapePolicy,
) -> Result<EscapeOutcome, EscapeError> {
    let source = handle.current_node();
    let exit = handle.exit_node();
    let EscapePlan { path, .. } = plan_escape(handle.cavern(), source, exit, policy)?;

    let start_time = handle.time_remaining();
    if policy.budget_check == BudgetCheck::Verify && path.total_weight > start_time {
        warn!(
            needed = path.total_weight,
            remaining = start_time,
            "escape route does not fit the time budget"
        );
        return Err(EscapeError::InsufficientTime {
            needed: path.total_weight,
            remaining: start_time,
        });
    }

    let mut trace = EscapeTrace::default();
    let mut gold_collected: u64 = 0;
    for step in &path.steps {
        handle.move_to(step.node)?;
        let mut gold = 0;
        if policy.collect_gold && handle.gold_here() != 0 {
            gold = handle.collect_gold()?;
            gold_collected += u64::from(gold);
        }
        let time_remaining = handle.time_remaining();
        trace.push(EscapeStep {
            node: step.node,
            weight: step.weight,
            gold,
            time_remaining,
        });
        debug!(node = %step.node, weight = step.weight, gold, time_remaining, "escape step");
    }

    let actual = handle.current_node();
    if actual != exit {
        warn!(actual = %actual, exit = %exit, "escape walk ended off the exit");
        return Err(EscapeError::NotOnExit { actual, exit });
    }

    let time_spent = start_time.saturating_sub(handle.time_remaining());
    info!(
        exit = %exit,
        hops = path.len(),
        gold = gold_collected,
        time_spent,
        "exit reached"
    );
    Ok(EscapeOutcome {
        path,
        gold_collected,
        time_spent,
        trace,
    })
}
