//! SurrealDB implementation of [`NodeRepository`].

use orgtree_core::error::{OrgTreeError, OrgTreeResult};
use orgtree_core::models::node::{NodeId, NodeKind, OrgNode};
use orgtree_core::repository::{NodeRepository, check_unique_ids};
use serde_json::{Map, Value};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

/// DB-side row struct. The primary key lives in `node_id`; SurrealDB record
/// ids are generated and never exposed.
#[derive(Debug, SurrealValue)]
struct NodeRow {
    node_id: i64,
    parent_id: Option<i64>,
    name: String,
    kind: i64,
    city_id: Option<i64>,
}

impl NodeRow {
    fn try_into_node(self) -> Result<OrgNode, DbError> {
        let kind = u8::try_from(self.kind)
            .map_err(|e| DbError::Decode(format!("node {}: {e}", self.node_id)))
            .and_then(|code| {
                NodeKind::try_from(code)
                    .map_err(|e| DbError::Decode(format!("node {}: {e}", self.node_id)))
            })?;
        Ok(OrgNode {
            id: self.node_id,
            parent_id: self.parent_id,
            name: self.name,
            kind,
            city_id: self.city_id,
        })
    }
}

fn rows_to_nodes(rows: Vec<NodeRow>) -> OrgTreeResult<Vec<OrgNode>> {
    rows.into_iter()
        .map(NodeRow::try_into_node)
        .collect::<Result<Vec<_>, DbError>>()
        .map_err(Into::into)
}

/// Insert payload for one node. Absent references are left out rather than
/// written as null so that `option<int>` fields hold NONE.
fn node_to_object(node: OrgNode) -> Value {
    let mut object = Map::new();
    object.insert("node_id".into(), node.id.into());
    if let Some(parent_id) = node.parent_id {
        object.insert("parent_id".into(), parent_id.into());
    }
    object.insert("name".into(), node.name.into());
    object.insert("kind".into(), node.kind.code().into());
    if let Some(city_id) = node.city_id {
        object.insert("city_id".into(), city_id.into());
    }
    Value::Object(object)
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the node repository.
#[derive(Clone)]
pub struct SurrealNodeRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNodeRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_where(
        &self,
        condition: &str,
        key: &'static str,
        value: NodeId,
    ) -> OrgTreeResult<Vec<OrgNode>> {
        let query = format!(
            "SELECT node_id, parent_id, name, kind, city_id FROM org_node \
             WHERE {condition} ORDER BY node_id ASC"
        );

        let mut result = self
            .db
            .query(query)
            .bind((key, value))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NodeRow> = result.take(0).map_err(DbError::from)?;
        rows_to_nodes(rows)
    }
}

impl<C: Connection> NodeRepository for SurrealNodeRepository<C> {
    async fn exists(&self) -> OrgTreeResult<bool> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM org_node GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }

    async fn bulk_load(&self, nodes: Vec<OrgNode>) -> OrgTreeResult<()> {
        if self.exists().await? {
            return Err(OrgTreeError::AlreadyExists);
        }
        check_unique_ids(&nodes)?;
        if nodes.is_empty() {
            return Ok(());
        }

        let count = nodes.len();
        let rows = Value::Array(nodes.into_iter().map(node_to_object).collect());

        // One transaction: a row the schema rejects rolls back the whole load.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 INSERT INTO org_node $rows; \
                 COMMIT TRANSACTION;",
            )
            .bind(("rows", rows))
            .await
            .map_err(DbError::from)?;

        result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        info!(nodes = count, "Bulk-loaded org_node table");
        Ok(())
    }

    async fn find_by_id(&self, id: NodeId) -> OrgTreeResult<OrgNode> {
        let mut result = self
            .db
            .query(
                "SELECT node_id, parent_id, name, kind, city_id FROM org_node \
                 WHERE node_id = $id LIMIT 1",
            )
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NodeRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or(DbError::NotFound { id })?;

        Ok(row.try_into_node()?)
    }

    async fn all_nodes(&self) -> OrgTreeResult<Vec<OrgNode>> {
        let mut result = self
            .db
            .query(
                "SELECT node_id, parent_id, name, kind, city_id FROM org_node \
                 ORDER BY node_id ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NodeRow> = result.take(0).map_err(DbError::from)?;
        rows_to_nodes(rows)
    }

    async fn siblings_of(&self, parent_id: NodeId) -> OrgTreeResult<Vec<OrgNode>> {
        self.select_where("parent_id = $parent_id", "parent_id", parent_id)
            .await
    }

    async fn employees_of_city(&self, city_id: NodeId) -> OrgTreeResult<Vec<OrgNode>> {
        self.select_where("city_id = $city_id", "city_id", city_id)
            .await
    }
}
