//! CityId resolution over an in-memory forest snapshot.
//!
//! [`resolve`] runs once, before the bulk load. It rejects snapshots with
//! duplicate ids, dangling parent references or parent cycles, and fills in
//! `city_id` for every employee. The store never consults the resolver again.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::ascent::{CityAscent, cycle_error};
use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::{NodeId, OrgNode};

/// Id-keyed view of a complete node snapshot.
///
/// Construction guarantees unique ids and that every `parent_id` names a
/// node in the snapshot. Cycles are still possible and are detected by the
/// walks.
#[derive(Debug, Clone, Default)]
pub struct ForestIndex {
    nodes: HashMap<NodeId, OrgNode>,
}

impl ForestIndex {
    pub fn build(nodes: Vec<OrgNode>) -> OrgTreeResult<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            if index.insert(id, node).is_some() {
                return Err(OrgTreeError::Validation {
                    message: format!("duplicate node id {id}"),
                });
            }
        }

        // Report the smallest dangling target so the error is deterministic.
        let dangling = index
            .values()
            .filter_map(|node| node.parent_id)
            .filter(|parent_id| !index.contains_key(parent_id))
            .min();
        if let Some(id) = dangling {
            return Err(OrgTreeError::MissingNode { id });
        }

        Ok(Self { nodes: index })
    }

    pub fn get(&self, id: NodeId) -> Option<&OrgNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> OrgTreeResult<&OrgNode> {
        self.nodes.get(&id).ok_or(OrgTreeError::MissingNode { id })
    }

    fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Nearest city reachable from `start`, `start` included.
    pub fn nearest_city(&self, start: NodeId) -> OrgTreeResult<Option<&OrgNode>> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;

        loop {
            if !seen.insert(current) {
                return Err(cycle_error(&path, current));
            }
            path.push(current);

            let node = self.node(current)?;
            if node.is_city() {
                return Ok(Some(node));
            }
            match node.parent_id {
                Some(parent_id) => current = parent_id,
                None => return Ok(None),
            }
        }
    }

    /// For every node, the id of its nearest strict ancestor city.
    ///
    /// Each walk stops at the first node whose answer is already known, so
    /// shared ancestors are walked once. A walk never holds more ids than the
    /// snapshot contains.
    fn cities_above(&self) -> OrgTreeResult<HashMap<NodeId, Option<NodeId>>> {
        let mut memo: HashMap<NodeId, Option<NodeId>> = HashMap::with_capacity(self.len());

        for start in self.sorted_ids() {
            if memo.contains_key(&start) {
                continue;
            }

            let mut path = Vec::new();
            let mut on_path = HashSet::new();
            let mut current = start;

            let city = loop {
                if let Some(&known) = memo.get(&current) {
                    break known;
                }
                if !on_path.insert(current) {
                    return Err(cycle_error(&path, current));
                }
                path.push(current);

                match self.node(current)?.parent_id {
                    None => break None,
                    Some(parent_id) => {
                        if self.node(parent_id)?.is_city() {
                            break Some(parent_id);
                        }
                        current = parent_id;
                    }
                }
            };

            // No node on the path has a city parent except possibly the last,
            // so they all share the answer.
            for id in path {
                memo.insert(id, city);
            }
        }

        Ok(memo)
    }

    /// Consume the index, returning nodes ordered by id.
    pub fn into_nodes(self) -> Vec<OrgNode> {
        let mut nodes: Vec<OrgNode> = self.nodes.into_values().collect();
        nodes.sort_unstable_by_key(|node| node.id);
        nodes
    }
}

impl CityAscent for ForestIndex {
    async fn ascend_to_city(&self, start: NodeId) -> OrgTreeResult<Option<OrgNode>> {
        self.nearest_city(start).map(|city| city.cloned())
    }
}

/// Populate `city_id` on every node of a snapshot.
///
/// Cities and departments get `None`. An employee gets the id of its nearest
/// strict ancestor city, or `None` when its chain ends at a root first. Any
/// `city_id` already present on the input is ignored, so resolving resolved
/// output is a no-op. On error nothing is returned.
pub fn resolve(nodes: Vec<OrgNode>) -> OrgTreeResult<Vec<OrgNode>> {
    let index = ForestIndex::build(nodes)?;
    let cities_above = index.cities_above()?;

    let mut resolved = index.into_nodes();
    for node in &mut resolved {
        node.city_id = if node.is_employee() {
            cities_above.get(&node.id).copied().flatten()
        } else {
            None
        };
    }

    debug!(nodes = resolved.len(), "Resolved city references");
    Ok(resolved)
}
