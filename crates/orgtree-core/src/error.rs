//! Error types for orgtree.

use thiserror::Error;

use crate::models::node::NodeId;

#[derive(Debug, Error, PartialEq)]
pub enum OrgTreeError {
    #[error("Node not found: {id}")]
    NotFound { id: NodeId },

    #[error("Parent reference to missing node {id}")]
    MissingNode { id: NodeId },

    #[error("Cycle detected in parent chain through nodes {members:?}")]
    CycleDetected { members: Vec<NodeId> },

    #[error("Store is already initialized")]
    AlreadyExists,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Seed error: {0}")]
    Seed(String),
}

impl OrgTreeError {
    /// Errors raised while resolving a snapshot. These abort the load.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MissingNode { .. } | Self::CycleDetected { .. } | Self::Validation { .. }
        )
    }
}

pub type OrgTreeResult<T> = Result<T, OrgTreeError>;
