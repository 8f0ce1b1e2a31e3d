//! `CavernWorld`: the environment both phases run against.
//!
//! The world owns the cavern, the agent's position, the live gold on each
//! node and the escape clock. The search core only ever sees it through the
//! two views, which implement the handle contracts:
//!
//! - [`ExplorationView`]: neighbour statuses and heuristic distance, no gold,
//!   no clock.
//! - [`EscapeView`]: full graph, clock charged per edge, gold collection.
//!   Only available once the agent stands on the orb.

use std::collections::BTreeMap;

use cavern_kernel::graph::cavern::Cavern;
use cavern_kernel::graph::node::NodeId;
use cavern_search::contract::{EscapeHandle, ExplorationHandle, HandleError};
use cavern_search::policy::SelectionStrategy;
use cavern_search::shortest::shortest_paths;
use cavern_search::status::NeighborStatus;
use tracing::debug;

use crate::heuristic::Heuristic;

/// Episode phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    Escaping,
}

impl Phase {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exploring => "exploring",
            Self::Escaping => "escaping",
        }
    }
}

/// Where an episode starts and ends, and how it is sensed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldLayout {
    pub start: NodeId,
    pub orb: NodeId,
    pub exit: NodeId,
    pub heuristic: Heuristic,
    /// Escape clock. `None` grants exactly the shortest orb-to-exit distance.
    pub time_budget: Option<u64>,
}

/// World construction or phase-transition failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("{role} node {id} is not part of the cavern")]
    UnknownNode { role: &'static str, id: NodeId },

    #[error("heuristic has no distance for node {0}")]
    HeuristicIncomplete(NodeId),

    #[error("heuristic is zero at {0}, which is not the orb")]
    HeuristicFalseZero(NodeId),

    #[error("heuristic is {0} at the orb, expected zero")]
    HeuristicNonZeroAtOrb(u64),

    #[error("exit {exit} is unreachable from orb {orb}")]
    ExitUnreachable { orb: NodeId, exit: NodeId },

    #[error("every route from orb {orb} to exit {exit} weighs more than u64::MAX")]
    ExitTooFar { orb: NodeId, exit: NodeId },

    #[error("operation requires phase {expected}, world is {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("escape can only begin on the orb ({orb}); agent is on {actual}")]
    NotOnOrb { orb: NodeId, actual: NodeId },
}

/// The environment.
#[derive(Debug, Clone)]
pub struct CavernWorld {
    name: String,
    cavern: Cavern,
    layout: WorldLayout,
    time_budget: u64,
    position: NodeId,
    phase: Phase,
    gold: BTreeMap<NodeId, u32>,
    time_remaining: u64,
    moves: u64,
    gold_collected: u64,
}

impl CavernWorld {
    /// Validate the layout against the cavern and place the agent on the
    /// start node.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UnknownNode`] if start, orb or exit is missing.
    /// - `Heuristic*` variants unless the heuristic answers for every node
    ///   and is zero exactly on the orb.
    /// - [`WorldError::ExitUnreachable`] if no orb-to-exit path exists.
    /// - [`WorldError::ExitTooFar`] if the shortest orb-to-exit distance
    ///   does not fit in a `u64`.
    pub fn new(
        name: impl Into<String>,
        cavern: Cavern,
        layout: WorldLayout,
    ) -> Result<Self, WorldError> {
        for (role, id) in [
            ("start", layout.start),
            ("orb", layout.orb),
            ("exit", layout.exit),
        ] {
            if !cavern.contains(id) {
                return Err(WorldError::UnknownNode { role, id });
            }
        }

        for id in cavern.node_ids() {
            let d = layout
                .heuristic
                .distance(&cavern, id, layout.orb)
                .ok_or(WorldError::HeuristicIncomplete(id))?;
            if id == layout.orb && d != 0 {
                return Err(WorldError::HeuristicNonZeroAtOrb(d));
            }
            if id != layout.orb && d == 0 {
                return Err(WorldError::HeuristicFalseZero(id));
            }
        }

        let tree = shortest_paths(&cavern, layout.orb, SelectionStrategy::BinaryHeap).map_err(
            |_| WorldError::UnknownNode {
                role: "orb",
                id: layout.orb,
            },
        )?;
        if tree.overflows(layout.exit) {
            return Err(WorldError::ExitTooFar {
                orb: layout.orb,
                exit: layout.exit,
            });
        }
        let shortest = tree
            .distance(layout.exit)
            .ok_or(WorldError::ExitUnreachable {
                orb: layout.orb,
                exit: layout.exit,
            })?;
        let time_budget = layout.time_budget.unwrap_or(shortest);

        let gold = cavern.nodes().map(|n| (n.id(), n.gold())).collect();
        let name = name.into();
        debug!(
            world = %name,
            nodes = cavern.len(),
            edges = cavern.edge_count(),
            time_budget,
            "world created"
        );
        Ok(Self {
            name,
            position: layout.start,
            phase: Phase::Exploring,
            gold,
            time_remaining: time_budget,
            time_budget,
            moves: 0,
            gold_collected: 0,
            cavern,
            layout,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cavern(&self) -> &Cavern {
        &self.cavern
    }

    #[must_use]
    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    #[must_use]
    pub fn position(&self) -> NodeId {
        self.position
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Clock granted when the escape begins.
    #[must_use]
    pub fn time_budget(&self) -> u64 {
        self.time_budget
    }

    #[must_use]
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    /// Moves made so far, both phases.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[must_use]
    pub fn gold_collected(&self) -> u64 {
        self.gold_collected
    }

    /// Gold still lying on `id`.
    #[must_use]
    pub fn gold_at(&self, id: NodeId) -> u32 {
        self.gold.get(&id).copied().unwrap_or(0)
    }

    /// Handle for the exploration phase.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::WrongPhase`] once the escape has begun.
    pub fn exploration(&mut self) -> Result<ExplorationView<'_>, WorldError> {
        self.require(Phase::Exploring)?;
        Ok(ExplorationView { world: self })
    }

    /// Switch to the escape phase and hand out its handle.
    ///
    /// # Errors
    ///
    /// - [`WorldError::WrongPhase`] if the escape already began.
    /// - [`WorldError::NotOnOrb`] if the agent has not reached the orb.
    pub fn begin_escape(&mut self) -> Result<EscapeView<'_>, WorldError> {
        self.require(Phase::Exploring)?;
        if self.position != self.layout.orb {
            return Err(WorldError::NotOnOrb {
                orb: self.layout.orb,
                actual: self.position,
            });
        }
        self.phase = Phase::Escaping;
        self.time_remaining = self.time_budget;
        debug!(world = %self.name, time = self.time_budget, "escape begun");
        Ok(EscapeView { world: self })
    }

    fn require(&self, expected: Phase) -> Result<(), WorldError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(WorldError::WrongPhase {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            })
        }
    }

    fn heuristic_at(&self, id: NodeId) -> u64 {
        // Construction checked coverage; an unknown id can only come from a
        // caller bypassing neighbour statuses.
        self.layout
            .heuristic
            .distance(&self.cavern, id, self.layout.orb)
            .unwrap_or(u64::MAX)
    }

    fn edge_to(&self, to: NodeId) -> Result<u64, HandleError> {
        if !self.cavern.contains(to) {
            return Err(HandleError::UnknownNode(to));
        }
        self.cavern
            .edge_weight(self.position, to)
            .ok_or(HandleError::NotAdjacent {
                from: self.position,
                to,
            })
    }
}

/// Partially observable view used while looking for the orb.
pub struct ExplorationView<'w> {
    world: &'w mut CavernWorld,
}

impl ExplorationHandle for ExplorationView<'_> {
    fn current_location(&self) -> NodeId {
        self.world.position
    }

    fn neighbor_statuses(&self) -> Vec<NeighborStatus> {
        let Some(node) = self.world.cavern.node(self.world.position) else {
            return Vec::new();
        };
        node.neighbors()
            .map(|id| NeighborStatus::new(id, self.world.heuristic_at(id)))
            .collect()
    }

    fn distance_to_target(&self) -> u64 {
        self.world.heuristic_at(self.world.position)
    }

    fn move_to(&mut self, to: NodeId) -> Result<(), HandleError> {
        self.world.edge_to(to)?;
        self.world.position = to;
        self.world.moves += 1;
        Ok(())
    }
}

/// Fully observable view used while escaping.
pub struct EscapeView<'w> {
    world: &'w mut CavernWorld,
}

impl EscapeHandle for EscapeView<'_> {
    fn current_node(&self) -> NodeId {
        self.world.position
    }

    fn exit_node(&self) -> NodeId {
        self.world.layout.exit
    }

    fn cavern(&self) -> &Cavern {
        &self.world.cavern
    }

    fn time_remaining(&self) -> u64 {
        self.world.time_remaining
    }

    fn gold_here(&self) -> u32 {
        self.world.gold_at(self.world.position)
    }

    fn move_to(&mut self, to: NodeId) -> Result<(), HandleError> {
        let cost = self.world.edge_to(to)?;
        if cost > self.world.time_remaining {
            return Err(HandleError::OutOfTime {
                to,
                cost,
                remaining: self.world.time_remaining,
            });
        }
        self.world.time_remaining -= cost;
        self.world.position = to;
        self.world.moves += 1;
        Ok(())
    }

    fn collect_gold(&mut self) -> Result<u32, HandleError> {
        let here = self.world.position;
        let amount = self.world.gold.get(&here).copied().unwrap_or(0);
        if amount == 0 {
            return Err(HandleError::NoGold(here));
        }
        self.world.gold.insert(here, 0);
        self.world.gold_collected += u64::from(amount);
        Ok(amount)
    }
}
