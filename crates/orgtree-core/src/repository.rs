//! Storage contract for the organization forest.
//!
//! Every backend implements [`NodeRepository`] identically. The node set is
//! written once through [`NodeRepository::bulk_load`] and is read-only after
//! that, so all other operations are lookups. Listing operations return nodes
//! ordered by ascending id.

use std::collections::HashSet;

use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::{NodeId, OrgNode};

/// Reject a node set that repeats an id.
///
/// Backends run this before writing so that every backend reports a
/// duplicate as [`OrgTreeError::Validation`].
pub fn check_unique_ids(nodes: &[OrgNode]) -> OrgTreeResult<()> {
    let mut seen = HashSet::with_capacity(nodes.len());
    match nodes.iter().find(|node| !seen.insert(node.id)) {
        Some(node) => Err(OrgTreeError::Validation {
            message: format!("duplicate node id {}", node.id),
        }),
        None => Ok(()),
    }
}

pub trait NodeRepository: Send + Sync {
    /// Whether the backing data set has already been initialized.
    fn exists(&self) -> impl Future<Output = OrgTreeResult<bool>> + Send;

    /// Insert the full resolved node set in one atomic operation.
    ///
    /// Fails with [`OrgTreeError::AlreadyExists`] when the store is already
    /// initialized and with [`OrgTreeError::Validation`] when an id repeats.
    /// Nothing is written on failure.
    fn bulk_load(&self, nodes: Vec<OrgNode>) -> impl Future<Output = OrgTreeResult<()>> + Send;

    fn find_by_id(&self, id: NodeId) -> impl Future<Output = OrgTreeResult<OrgNode>> + Send;

    fn all_nodes(&self) -> impl Future<Output = OrgTreeResult<Vec<OrgNode>>> + Send;

    /// Nodes whose `parent_id` equals `parent_id` exactly.
    fn siblings_of(
        &self,
        parent_id: NodeId,
    ) -> impl Future<Output = OrgTreeResult<Vec<OrgNode>>> + Send;

    /// Nodes whose derived `city_id` equals `city_id` exactly.
    fn employees_of_city(
        &self,
        city_id: NodeId,
    ) -> impl Future<Output = OrgTreeResult<Vec<OrgNode>>> + Send;
}
