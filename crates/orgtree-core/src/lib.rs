//! orgtree core: the organizational forest model, the CityId resolver,
//! the storage contract and the queries that walk parent chains.
//!
//! Storage backends live in `orgtree-db`; this crate has no dependency on
//! any database driver.

pub mod ascent;
pub mod directory;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod seed;

pub use ascent::CityAscent;
pub use directory::{LoadOutcome, Lookup, OrgDirectory, OrgSummary};
pub use error::{OrgTreeError, OrgTreeResult};
pub use models::node::{NodeId, NodeKind, OrgNode};
pub use query::{CityColleagues, QueryEngine};
pub use repository::{NodeRepository, check_unique_ids};
pub use resolver::{ForestIndex, resolve};
