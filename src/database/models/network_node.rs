use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type NodeId = i64;

/// A location in the network hierarchy. `parent_id == None` marks a root.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NetworkNode {
    pub id: NodeId,
    pub name: String,
    pub description: String,
    pub parent_id: Option<NodeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNetworkNode {
    pub name: String,
    pub description: String,
    pub parent_id: Option<NodeId>,
}

/// Field-wise patch. `None` keeps the stored value; `parent_id: Some(None)` detaches.
#[derive(Debug, Clone, Default)]
pub struct NetworkNodeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Option<NodeId>>,
}
