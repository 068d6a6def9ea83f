use serde::{Deserialize, Serialize};

use super::devices::DeviceResponse;
use super::{nullable, FieldErrors};
use crate::database::models::{NetworkNode, NetworkNodeChanges, NewNetworkNode, NodeId};
use crate::error::ApiError;
use crate::tree::TreeNode;

#[derive(Debug, Deserialize)]
pub struct CreateNetworkNodeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parent_id: Option<NodeId>,
}

impl CreateNetworkNodeRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.require("name", &self.name);
        errors.into_result()
    }

    pub fn into_new_node(self) -> NewNetworkNode {
        NewNetworkNode {
            name: self.name,
            description: self.description,
            parent_id: self.parent_id,
        }
    }
}

/// Patch body: omitted keys are left untouched, `"parent_id": null` makes the node a root.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNetworkNodeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<NodeId>>,
}

impl UpdateNetworkNodeRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.non_empty_if_present("name", self.name.as_deref());
        errors.into_result()
    }

    pub fn into_changes(self) -> NetworkNodeChanges {
        NetworkNodeChanges {
            name: self.name,
            description: self.description,
            parent_id: self.parent_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNodeResponse {
    pub id: NodeId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NetworkNodeResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<DeviceResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<NetworkNode> for NetworkNodeResponse {
    fn from(node: NetworkNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            description: node.description,
            parent_id: node.parent_id,
            children: Vec::new(),
            devices: Vec::new(),
            created_at: node.created_at.to_rfc3339(),
            updated_at: node.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeNode>,
}
