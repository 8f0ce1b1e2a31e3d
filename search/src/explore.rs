//! Greedy backtracking exploration toward the orb.
//!
//! Depth-first over an explicit stack of frames. Each frame holds the node it
//! was opened on, the node it was entered from (its return point) and the
//! neighbours still to try, most promising first. A frame with nothing left
//! to try is a dead end: the agent walks back to the return point and the
//! frame is discarded.

use std::collections::{BTreeSet, VecDeque};

use cavern_kernel::graph::node::NodeId;
use tracing::{debug, info, trace, warn};

use crate::contract::ExplorationHandle;
use crate::error::ExploreError;
use crate::policy::ExplorePolicy;
use crate::status::NeighborStatus;
use crate::trace::{ExploreEvent, ExploreTrace};

/// Result of a successful exploration. The handle stands on the orb.
#[derive(Debug, Clone)]
pub struct ExploreOutcome {
    /// Where the agent started.
    pub start: NodeId,
    /// The orb (where the agent now stands).
    pub target: NodeId,
    /// Total moves made, advances and backtracks.
    pub moves: u64,
    /// Distinct nodes the agent has stood on, start included.
    pub visited: usize,
    /// Deepest frame stack reached.
    pub max_depth: usize,
    pub trace: ExploreTrace,
}

struct Frame {
    node: NodeId,
    return_to: Option<NodeId>,
    candidates: VecDeque<NeighborStatus>,
}

impl Frame {
    fn open<H: ExplorationHandle + ?Sized>(
        handle: &H,
        return_to: Option<NodeId>,
        visited: &BTreeSet<NodeId>,
    ) -> Self {
        let mut candidates: Vec<NeighborStatus> = handle
            .neighbor_statuses()
            .into_iter()
            .filter(|s| !visited.contains(&s.id))
            .collect();
        candidates.sort_by(NeighborStatus::by_heuristic);
        let node = handle.current_location();
        trace!(node = %node, candidates = candidates.len(), "frame opened");
        Self {
            node,
            return_to,
            candidates: candidates.into(),
        }
    }

    /// Next candidate not entered since this frame was opened.
    fn next_unvisited(&mut self, visited: &BTreeSet<NodeId>) -> Option<NeighborStatus> {
        while let Some(candidate) = self.candidates.pop_front() {
            if !visited.contains(&candidate.id) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Explore until the handle reports a heuristic distance of zero.
///
/// On success the handle is left on the orb and no further moves are made.
/// Every node is entered at most once; the heuristic only decides the order
/// in which neighbours are tried.
///
/// # Errors
///
/// - [`ExploreError::Policy`] if the policy fails validation (no moves made).
/// - [`ExploreError::TargetUnreachable`] if every reachable node was entered
///   without finding the orb; the agent is back on the start node.
/// - [`ExploreError::MoveBudgetExceeded`] if `policy.max_moves` runs out.
/// - [`ExploreError::Handle`] if the handle refuses a move.
pub fn explore<H: ExplorationHandle + ?Sized>(
    handle: &mut H,
    policy: &ExplorePolicy,
) -> Result<ExploreOutcome, ExploreError> {
    policy.validate()?;

    let start = handle.current_location();
    let mut visited: BTreeSet<NodeId> = BTreeSet::from([start]);
    let mut trace = ExploreTrace::default();
    let mut moves: u64 = 0;

    let finish = |target: NodeId,
                  moves: u64,
                  visited: usize,
                  max_depth: usize,
                  trace: ExploreTrace| {
        info!(start = %start, target = %target, moves, visited, "orb reached");
        ExploreOutcome {
            start,
            target,
            moves,
            visited,
            max_depth,
            trace,
        }
    };

    if handle.distance_to_target() == 0 {
        return Ok(finish(start, 0, 1, 0, trace));
    }

    let mut stack = vec![Frame::open(handle, None, &visited)];
    let mut max_depth = stack.len();

    while let Some(frame) = stack.last_mut() {
        if let Some(candidate) = frame.next_unvisited(&visited) {
            let from = frame.node;
            spend_move(&mut moves, policy)?;
            handle.move_to(candidate.id)?;
            visited.insert(candidate.id);
            trace.push(ExploreEvent::Advance {
                from,
                to: candidate.id,
                heuristic: candidate.distance,
            });
            debug!(from = %from, to = %candidate.id, heuristic = candidate.distance, "advance");

            if handle.distance_to_target() == 0 {
                let target = handle.current_location();
                return Ok(finish(target, moves, visited.len(), max_depth, trace));
            }

            stack.push(Frame::open(handle, Some(from), &visited));
            max_depth = max_depth.max(stack.len());
            continue;
        }

        // Dead end: the loop condition guarantees a frame to pop.
        let Some(dead) = stack.pop() else { break };
        let Some(back) = dead.return_to else {
            warn!(start = %start, explored = visited.len(), "search space exhausted");
            return Err(ExploreError::TargetUnreachable {
                start,
                explored: visited.len(),
            });
        };
        spend_move(&mut moves, policy)?;
        handle.move_to(back)?;
        trace.push(ExploreEvent::Backtrack {
            from: dead.node,
            to: back,
        });
        debug!(from = %dead.node, to = %back, "backtrack");
    }

    Err(ExploreError::TargetUnreachable {
        start,
        explored: visited.len(),
    })
}

fn spend_move(moves: &mut u64, policy: &ExplorePolicy) -> Result<(), ExploreError> {
    if *moves >= policy.max_moves {
        return Err(ExploreError::MoveBudgetExceeded {
            max_moves: policy.max_moves,
        });
    }
    *moves += 1;
    Ok(())
}
