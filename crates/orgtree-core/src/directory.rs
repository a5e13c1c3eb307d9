//! Organization directory: load and lookup orchestration.
//!
//! Ties the resolver (at load time) and the query engine (at query time) to
//! a single repository. Query-time misses degrade to negative results
//! instead of errors.

use tracing::{info, warn};

use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::{NodeId, NodeKind, OrgNode};
use crate::query::{CityColleagues, QueryEngine};
use crate::repository::NodeRepository;
use crate::resolver::resolve;

/// Result of [`OrgDirectory::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store already held data; the snapshot was not read into it.
    AlreadyInitialized,
    /// The snapshot was resolved and inserted.
    Loaded { nodes: usize },
}

/// Node counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrgSummary {
    pub cities: usize,
    pub departments: usize,
    pub employees: usize,
}

/// Answer to a lookup by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    NotFound { id: NodeId },
    City(OrgNode),
    Department(OrgNode),
    Employee {
        employee: OrgNode,
        /// Everyone sharing the employee's parent, the employee included.
        department: Vec<OrgNode>,
        /// `None` when no city encloses the employee.
        city: Option<CityColleagues>,
    },
}

/// Directory service.
///
/// Generic over the repository so that the orchestration has no dependency
/// on any storage backend.
pub struct OrgDirectory<R: NodeRepository> {
    engine: QueryEngine<R>,
}

impl<R: NodeRepository> OrgDirectory<R> {
    pub fn new(repo: R) -> Self {
        Self {
            engine: QueryEngine::new(repo),
        }
    }

    pub fn engine(&self) -> &QueryEngine<R> {
        &self.engine
    }

    /// Resolve `seed` and bulk-load it, unless the store is already
    /// initialized.
    ///
    /// Resolution errors abort before anything is written.
    pub async fn initialize(&self, seed: Vec<OrgNode>) -> OrgTreeResult<LoadOutcome> {
        self.initialize_from(|| Ok(seed)).await
    }

    /// Like [`Self::initialize`], but the snapshot is produced by `load`,
    /// which only runs when the store is still empty.
    pub async fn initialize_from<F>(&self, load: F) -> OrgTreeResult<LoadOutcome>
    where
        F: FnOnce() -> OrgTreeResult<Vec<OrgNode>>,
    {
        let repo = self.engine.repository();

        if repo.exists().await? {
            warn!("Store already initialized; skipping seed load");
            return Ok(LoadOutcome::AlreadyInitialized);
        }

        let resolved = resolve(load()?)?;
        let nodes = resolved.len();
        repo.bulk_load(resolved).await?;

        info!(nodes, "Loaded organization snapshot");
        Ok(LoadOutcome::Loaded { nodes })
    }

    pub async fn summary(&self) -> OrgTreeResult<OrgSummary> {
        let nodes = self.engine.repository().all_nodes().await?;

        let mut summary = OrgSummary::default();
        for node in &nodes {
            match node.kind {
                NodeKind::City => summary.cities += 1,
                NodeKind::Department => summary.departments += 1,
                NodeKind::Employee => summary.employees += 1,
            }
        }
        Ok(summary)
    }

    /// Describe the entity with the given id.
    ///
    /// For an employee this also gathers department colleagues and, when a
    /// city encloses them, every employee of that city. Store failures and
    /// malformed chains are returned as errors.
    pub async fn lookup(&self, id: NodeId) -> OrgTreeResult<Lookup> {
        let node = match self.engine.find_entity(id).await {
            Ok(node) => node,
            Err(OrgTreeError::NotFound { id }) => return Ok(Lookup::NotFound { id }),
            Err(e) => return Err(e),
        };

        match node.kind {
            NodeKind::City => Ok(Lookup::City(node)),
            NodeKind::Department => Ok(Lookup::Department(node)),
            NodeKind::Employee => {
                let (department, city) = match node.parent_id {
                    Some(parent_id) => (
                        self.engine.siblings_of(parent_id).await?,
                        self.engine.colleagues_in_city(parent_id).await?,
                    ),
                    None => (vec![node.clone()], None),
                };
                Ok(Lookup::Employee {
                    employee: node,
                    department,
                    city,
                })
            }
        }
    }
}
