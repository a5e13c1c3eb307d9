//! In-process implementation of [`NodeRepository`].
//!
//! Keeps the node set in an id-ordered map with secondary indexes on
//! `parent_id` and `city_id`. Clones share the same data.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use orgtree_core::error::{OrgTreeError, OrgTreeResult};
use orgtree_core::models::node::{NodeId, OrgNode};
use orgtree_core::repository::{NodeRepository, check_unique_ids};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct MemoryState {
    nodes: BTreeMap<NodeId, OrgNode>,
    by_parent: HashMap<NodeId, Vec<NodeId>>,
    by_city: HashMap<NodeId, Vec<NodeId>>,
}

impl MemoryState {
    fn build(nodes: Vec<OrgNode>) -> OrgTreeResult<Self> {
        check_unique_ids(&nodes)?;
        let mut state = Self {
            nodes: nodes.into_iter().map(|node| (node.id, node)).collect(),
            ..Self::default()
        };
        // Ids are visited in ascending order, so each index list stays sorted.
        for node in state.nodes.values() {
            if let Some(parent_id) = node.parent_id {
                state.by_parent.entry(parent_id).or_default().push(node.id);
            }
            if let Some(city_id) = node.city_id {
                state.by_city.entry(city_id).or_default().push(node.id);
            }
        }
        Ok(state)
    }

    fn collect(&self, ids: Option<&Vec<NodeId>>) -> Vec<OrgNode> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
            .cloned()
            .collect()
    }
}

/// In-memory node repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryNodeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeRepository for MemoryNodeRepository {
    async fn exists(&self) -> OrgTreeResult<bool> {
        Ok(!self.state.read().await.nodes.is_empty())
    }

    async fn bulk_load(&self, nodes: Vec<OrgNode>) -> OrgTreeResult<()> {
        let mut state = self.state.write().await;
        if !state.nodes.is_empty() {
            return Err(OrgTreeError::AlreadyExists);
        }

        // Build off to the side so a rejected load leaves the store empty.
        let loaded = MemoryState::build(nodes)?;
        let count = loaded.nodes.len();
        *state = loaded;

        info!(nodes = count, "Bulk-loaded in-memory store");
        Ok(())
    }

    async fn find_by_id(&self, id: NodeId) -> OrgTreeResult<OrgNode> {
        self.state
            .read()
            .await
            .nodes
            .get(&id)
            .cloned()
            .ok_or(OrgTreeError::NotFound { id })
    }

    async fn all_nodes(&self) -> OrgTreeResult<Vec<OrgNode>> {
        Ok(self.state.read().await.nodes.values().cloned().collect())
    }

    async fn siblings_of(&self, parent_id: NodeId) -> OrgTreeResult<Vec<OrgNode>> {
        let state = self.state.read().await;
        Ok(state.collect(state.by_parent.get(&parent_id)))
    }

    async fn employees_of_city(&self, city_id: NodeId) -> OrgTreeResult<Vec<OrgNode>> {
        let state = self.state.read().await;
        Ok(state.collect(state.by_city.get(&city_id)))
    }
}
