use tracing::debug;

use crate::database::devices::DEVICE_COLUMNS;
use crate::database::manager::{Database, DatabaseError};
use crate::database::models::{Device, NetworkNode, NetworkNodeChanges, NewNetworkNode, NodeId};

const NODE_COLUMNS: &str = "id, name, description, parent_id, created_at, updated_at";

/// Every node and device, read from a single consistent snapshot
#[derive(Debug, Default)]
pub struct ForestSnapshot {
    pub nodes: Vec<NetworkNode>,
    pub devices: Vec<Device>,
}

/// What a node deletion detached before removing the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachSummary {
    pub devices_detached: u64,
    pub children_promoted: u64,
}

#[derive(Clone, Debug)]
pub struct NetworkNodeRepository {
    db: Database,
}

impl NetworkNodeRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, node: &NewNetworkNode) -> Result<NetworkNode, DatabaseError> {
        let created = sqlx::query_as::<_, NetworkNode>(&format!(
            "INSERT INTO network_nodes (name, description, parent_id) VALUES ($1, $2, $3) RETURNING {}",
            NODE_COLUMNS
        ))
        .bind(&node.name)
        .bind(&node.description)
        .bind(node.parent_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(created)
    }

    pub async fn get(&self, id: NodeId) -> Result<NetworkNode, DatabaseError> {
        sqlx::query_as::<_, NetworkNode>(&format!(
            "SELECT {} FROM network_nodes WHERE id = $1",
            NODE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Network node {} not found", id)))
    }

    pub async fn exists(&self, id: NodeId) -> Result<bool, DatabaseError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM network_nodes WHERE id = $1)")
            .bind(id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(exists)
    }

    pub async fn list(&self) -> Result<Vec<NetworkNode>, DatabaseError> {
        let nodes = sqlx::query_as::<_, NetworkNode>(&format!(
            "SELECT {} FROM network_nodes ORDER BY id",
            NODE_COLUMNS
        ))
        .fetch_all(self.db.pool())
        .await?;

        Ok(nodes)
    }

    /// Direct children of `id` (one level only)
    pub async fn children_of(&self, id: NodeId) -> Result<Vec<NetworkNode>, DatabaseError> {
        let nodes = sqlx::query_as::<_, NetworkNode>(&format!(
            "SELECT {} FROM network_nodes WHERE parent_id = $1 ORDER BY id",
            NODE_COLUMNS
        ))
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(nodes)
    }

    /// `id` followed by every ancestor up to its root. `UNION` stops on a cycle.
    pub async fn ancestor_chain(&self, id: NodeId) -> Result<Vec<NodeId>, DatabaseError> {
        let ids: Vec<NodeId> = sqlx::query_scalar(
            "WITH RECURSIVE chain (id, parent_id) AS (
                 SELECT id, parent_id FROM network_nodes WHERE id = $1
                 UNION
                 SELECT n.id, n.parent_id FROM network_nodes n JOIN chain c ON n.id = c.parent_id
             )
             SELECT id FROM chain",
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(ids)
    }

    /// Apply the fields present in `changes`; absent fields keep their stored value.
    pub async fn update(&self, id: NodeId, changes: &NetworkNodeChanges) -> Result<NetworkNode, DatabaseError> {
        let sql = format!(
            "UPDATE network_nodes SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                parent_id = CASE WHEN $4 THEN $5 ELSE parent_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            NODE_COLUMNS
        );

        sqlx::query_as::<_, NetworkNode>(&sql)
            .bind(id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.parent_id.is_some())
            .bind(changes.parent_id.flatten())
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Network node {} not found", id)))
    }

    /// Delete a node after detaching its devices and promoting its children to roots.
    ///
    /// All three steps share one transaction. Any error returns before `commit`,
    /// and dropping the transaction rolls the partial work back.
    pub async fn delete_with_detach(&self, id: NodeId) -> Result<DetachSummary, DatabaseError> {
        let mut tx = self.db.begin().await?;

        // Row lock blocks concurrent inserts that would reference this node
        let locked: Option<NodeId> = sqlx::query_scalar("SELECT id FROM network_nodes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(DatabaseError::NotFound(format!("Network node {} not found", id)));
        }

        let devices_detached = sqlx::query(
            "UPDATE devices SET network_node_id = NULL, updated_at = NOW() WHERE network_node_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let children_promoted = sqlx::query(
            "UPDATE network_nodes SET parent_id = NULL, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM network_nodes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            "Deleted network node {} ({} devices detached, {} children promoted)",
            id, devices_detached, children_promoted
        );
        Ok(DetachSummary {
            devices_detached,
            children_promoted,
        })
    }

    /// Load every node and device under one repeatable-read transaction
    pub async fn snapshot(&self) -> Result<ForestSnapshot, DatabaseError> {
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let nodes = sqlx::query_as::<_, NetworkNode>(&format!(
            "SELECT {} FROM network_nodes ORDER BY id",
            NODE_COLUMNS
        ))
        .fetch_all(&mut *tx)
        .await?;

        let devices = sqlx::query_as::<_, Device>(&format!(
            "SELECT {} FROM devices WHERE network_node_id IS NOT NULL ORDER BY id",
            DEVICE_COLUMNS
        ))
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ForestSnapshot { nodes, devices })
    }
}
