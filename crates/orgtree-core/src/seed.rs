//! Seed snapshot loading.
//!
//! A snapshot is a JSON array of records shaped
//! `{"id": 3, "ParentId": 2, "Name": "Alice", "Type": 3}`. `CityId` may be
//! present but is recomputed by the resolver.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{OrgTreeError, OrgTreeResult};
use crate::models::node::OrgNode;

pub fn parse_seed(json: &str) -> OrgTreeResult<Vec<OrgNode>> {
    serde_json::from_str(json).map_err(|e| OrgTreeError::Seed(e.to_string()))
}

pub fn load_seed(path: impl AsRef<Path>) -> OrgTreeResult<Vec<OrgNode>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| OrgTreeError::Seed(format!("failed to read {}: {e}", path.display())))?;
    let nodes = parse_seed(&json)?;
    info!(path = %path.display(), records = nodes.len(), "Read seed snapshot");
    Ok(nodes)
}
