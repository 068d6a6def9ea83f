use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::network_node::NodeId;

pub const DEFAULT_DEVICE_STATUS: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub device_type: String,
    pub vendor: String,
    pub model: String,
    pub serial: String,
    pub location: String,
    pub status: String,
    pub network_node_id: Option<NodeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    /// Label used for device entries in the tree view.
    pub fn display_name(&self) -> String {
        format!("{}: {}", self.device_type, self.model)
    }
}

#[derive(Debug, Clone)]
pub struct NewDevice {
    pub device_type: String,
    pub vendor: String,
    pub model: String,
    pub serial: String,
    pub location: String,
    pub status: String,
    pub network_node_id: Option<NodeId>,
}

/// Field-wise patch. `network_node_id: Some(None)` detaches the device.
#[derive(Debug, Clone, Default)]
pub struct DeviceChanges {
    pub device_type: Option<String>,
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub network_node_id: Option<Option<NodeId>>,
}
