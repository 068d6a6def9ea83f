use tracing::{info, warn};

use super::ServiceError;
use crate::database::models::{Device, NetworkNode, NetworkNodeChanges, NewNetworkNode, NodeId};
use crate::database::{DeviceRepository, NetworkNodeRepository};
use crate::tree::{Forest, TreeNode};

/// A node with its direct children and directly attached devices
#[derive(Debug, Clone)]
pub struct NodeDetail {
    pub node: NetworkNode,
    pub children: Vec<NetworkNode>,
    pub devices: Vec<Device>,
}

#[derive(Clone, Debug)]
pub struct NetworkNodeService {
    nodes: NetworkNodeRepository,
    devices: DeviceRepository,
}

impl NetworkNodeService {
    pub fn new(nodes: NetworkNodeRepository, devices: DeviceRepository) -> Self {
        Self { nodes, devices }
    }

    pub async fn create(&self, node: NewNetworkNode) -> Result<NetworkNode, ServiceError> {
        if let Some(parent_id) = node.parent_id {
            if !self.nodes.exists(parent_id).await? {
                return Err(ServiceError::validation(
                    "parent_id",
                    format!("Parent node {} does not exist", parent_id),
                ));
            }
        }

        let created = self.nodes.create(&node).await?;
        info!("Created network node {} '{}'", created.id, created.name);
        Ok(created)
    }

    /// One level deep: direct children and direct devices only
    pub async fn get(&self, id: NodeId) -> Result<NodeDetail, ServiceError> {
        let node = self.nodes.get(id).await?;
        let children = self.nodes.children_of(id).await?;
        let devices = self.devices.list_by_node(id).await?;

        Ok(NodeDetail { node, children, devices })
    }

    pub async fn list(&self) -> Result<Vec<NetworkNode>, ServiceError> {
        Ok(self.nodes.list().await?)
    }

    pub async fn update(&self, id: NodeId, changes: NetworkNodeChanges) -> Result<NetworkNode, ServiceError> {
        if let Some(Some(parent_id)) = changes.parent_id {
            self.check_reparent(id, parent_id).await?;
        }

        let updated = self.nodes.update(id, &changes).await?;
        info!("Updated network node {}", id);
        Ok(updated)
    }

    /// Reject a parent that is missing, the node itself, or one of its descendants.
    async fn check_reparent(&self, id: NodeId, parent_id: NodeId) -> Result<(), ServiceError> {
        if parent_id == id {
            return Err(ServiceError::validation("parent_id", "A node cannot be its own parent"));
        }

        let chain = self.nodes.ancestor_chain(parent_id).await?;
        if chain.is_empty() {
            return Err(ServiceError::validation(
                "parent_id",
                format!("Parent node {} does not exist", parent_id),
            ));
        }
        if chain.contains(&id) {
            return Err(ServiceError::validation(
                "parent_id",
                format!("Node {} is a descendant of node {}", parent_id, id),
            ));
        }
        Ok(())
    }

    /// Detach devices, promote children to roots, then delete, atomically.
    pub async fn delete(&self, id: NodeId) -> Result<(), ServiceError> {
        let summary = self.nodes.delete_with_detach(id).await?;
        info!(
            "Deleted network node {}: {} devices detached, {} children promoted to roots",
            id, summary.devices_detached, summary.children_promoted
        );
        Ok(())
    }

    pub async fn full_tree(&self) -> Result<Vec<TreeNode>, ServiceError> {
        let snapshot = self.nodes.snapshot().await?;
        let forest = Forest::new(snapshot.nodes, snapshot.devices);

        let tree = forest.assemble();
        let unreachable = forest.unreachable_count();
        if unreachable > 0 {
            warn!("{} network nodes are not reachable from any root (parent cycle)", unreachable);
        }
        Ok(tree)
    }
}
