//! Remote SurrealDB handle for the directory store.
//!
//! The CLI opens one WebSocket session per process. Opening it also brings
//! the `org_node` schema up to date, so a [`DbManager`] never hands out a
//! client for an unmigrated database.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::{debug, info};

use crate::error::DbError;
use crate::repository::SurrealNodeRepository;

/// Where the directory lives and how to sign in to it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// `host:port` of the server, without a scheme.
    pub url: String,
    /// Namespace holding the directory database.
    pub namespace: String,
    /// Database holding the `org_node` table.
    pub database: String,
    pub username: String,
    pub password: String,
}

impl DbConfig {
    fn credentials(&self) -> Root {
        Root {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "orgtree".into(),
            database: "directory".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Migrated session on the directory database.
///
/// Clones share the session. It closes once the manager and every
/// repository built from it are dropped.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open the session and apply pending `org_node` migrations.
    ///
    /// Any failure along the way (unreachable server, rejected credentials,
    /// a failing migration) is returned as [`DbError`].
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Opening directory store"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(config.credentials()).await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;
        debug!(username = %config.username, "Signed in");

        crate::schema::run_migrations(&db).await?;

        info!("Directory store ready");
        Ok(Self { db })
    }

    /// Node repository sharing this session.
    pub fn node_repository(&self) -> SurrealNodeRepository<Client> {
        SurrealNodeRepository::new(self.db.clone())
    }
}
