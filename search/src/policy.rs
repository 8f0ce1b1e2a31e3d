//! Search and escape policy types.

use crate::error::PolicyError;

/// Default cap on exploration moves (advances plus backtracks): unlimited.
pub const DEFAULT_MAX_MOVES: u64 = u64::MAX;

/// Exploration configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorePolicy {
    /// Hard cap on moves. A depth-first traversal of `n` reachable nodes
    /// needs at most `2 * (n - 1)` moves. The default places no limit; set a
    /// lower cap to bound runaway handles.
    pub max_moves: u64,
}

impl ExplorePolicy {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::ZeroMoveBudget`] if `max_moves` is zero.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_moves == 0 {
            return Err(PolicyError::ZeroMoveBudget);
        }
        Ok(())
    }

    /// JSON projection bound into episode reports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_moves": self.max_moves,
        })
    }
}

impl Default for ExplorePolicy {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
        }
    }
}

/// How Dijkstra picks the next node to settle.
///
/// Both strategies settle nodes in exactly the same order: smallest tentative
/// distance first, ties broken by the lower node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Scan every unsettled node each round. O(V²), no auxiliary structure.
    #[default]
    LinearScan,
    /// Lazy-deletion binary heap keyed by `(distance, id)`. O((V + E) log V).
    BinaryHeap,
}

impl SelectionStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LinearScan => "linear_scan",
            Self::BinaryHeap => "binary_heap",
        }
    }
}

/// Whether the planner consults the time budget before walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetCheck {
    /// Rely on the environment's guarantee that the shortest path fits.
    #[default]
    Trust,
    /// Refuse to start walking a path longer than the remaining time.
    Verify,
}

impl BudgetCheck {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trust => "trust",
            Self::Verify => "verify",
        }
    }
}

/// Escape configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapePolicy {
    pub selection: SelectionStrategy,
    /// Collect gold found on path nodes. Off only for dry walks.
    pub collect_gold: bool,
    pub budget_check: BudgetCheck,
}

impl EscapePolicy {
    /// JSON projection bound into episode reports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "budget_check": self.budget_check.as_str(),
            "collect_gold": self.collect_gold,
            "selection": self.selection.as_str(),
        })
    }
}

impl Default for EscapePolicy {
    fn default() -> Self {
        Self {
            selection: SelectionStrategy::LinearScan,
            collect_gold: true,
            budget_check: BudgetCheck::Trust,
        }
    }
}
