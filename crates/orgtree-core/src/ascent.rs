//! Ascent to the nearest enclosing city.
//!
//! An ascent starts at a node (usually an employee's department), inspects
//! it, and follows `parent_id` references until it meets a city or a root.
//! Two adapters implement it: [`crate::ForestIndex`] walks an in-memory
//! snapshot, [`crate::QueryEngine`] walks a store with one point query per
//! step. Both must stop, fail and report identically.

use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::{NodeId, OrgNode};

pub trait CityAscent: Send + Sync {
    /// Walk from `start` to the nearest city, `start` included.
    ///
    /// Returns `Ok(None)` when the chain reaches a root without meeting a
    /// city. A reference to an absent node fails with
    /// [`OrgTreeError::MissingNode`]; revisiting a node fails with
    /// [`OrgTreeError::CycleDetected`].
    fn ascend_to_city(
        &self,
        start: NodeId,
    ) -> impl Future<Output = OrgTreeResult<Option<OrgNode>>> + Send;
}

/// Build the cycle error for a walk that came back to `revisited`.
///
/// `path` holds the ids visited so far, in walk order. Members are reported
/// in ascending order.
pub(crate) fn cycle_error(path: &[NodeId], revisited: NodeId) -> OrgTreeError {
    let start = path.iter().position(|&id| id == revisited).unwrap_or(0);
    let mut members = path[start..].to_vec();
    members.sort_unstable();
    OrgTreeError::CycleDetected { members }
}
