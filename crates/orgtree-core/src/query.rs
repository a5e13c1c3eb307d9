//! Point queries against a loaded store.

use std::collections::HashSet;

use tracing::debug;

use crate::ascent::{CityAscent, cycle_error};
use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::{NodeId, OrgNode};
use crate::repository::NodeRepository;

/// A city together with every employee whose resolved `city_id` names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityColleagues {
    pub city: OrgNode,
    pub employees: Vec<OrgNode>,
}

impl CityColleagues {
    pub fn city_name(&self) -> &str {
        &self.city.name
    }
}

/// Query engine.
///
/// Generic over the repository so that queries run unchanged on every
/// backend. Holds no state between queries.
pub struct QueryEngine<R: NodeRepository> {
    repo: R,
}

impl<R: NodeRepository> QueryEngine<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn find_entity(&self, id: NodeId) -> OrgTreeResult<OrgNode> {
        self.repo.find_by_id(id).await
    }

    /// Nodes sharing the parent `parent_id` (department colleagues).
    pub async fn siblings_of(&self, parent_id: NodeId) -> OrgTreeResult<Vec<OrgNode>> {
        self.repo.siblings_of(parent_id).await
    }

    /// Ascend from an employee's parent to its city, then list everyone
    /// resolved to that city. `Ok(None)` when no city encloses the start.
    pub async fn colleagues_in_city(
        &self,
        employee_parent_id: NodeId,
    ) -> OrgTreeResult<Option<CityColleagues>> {
        let Some(city) = self.ascend_to_city(employee_parent_id).await? else {
            return Ok(None);
        };
        let employees = self.repo.employees_of_city(city.id).await?;
        Ok(Some(CityColleagues { city, employees }))
    }
}

impl<R: NodeRepository> CityAscent for QueryEngine<R> {
    async fn ascend_to_city(&self, start: NodeId) -> OrgTreeResult<Option<OrgNode>> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;

        loop {
            if !seen.insert(current) {
                return Err(cycle_error(&path, current));
            }
            path.push(current);

            let node = match self.repo.find_by_id(current).await {
                Ok(node) => node,
                Err(OrgTreeError::NotFound { id }) => return Err(OrgTreeError::MissingNode { id }),
                Err(e) => return Err(e),
            };
            debug!(id = node.id, kind = %node.kind, "Ascent step");

            if node.is_city() {
                return Ok(Some(node));
            }
            match node.parent_id {
                Some(parent_id) => current = parent_id,
                None => return Ok(None),
            }
        }
    }
}
