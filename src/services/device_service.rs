use tracing::info;

use super::ServiceError;
use crate::database::models::{Device, DeviceChanges, NewDevice, NodeId};
use crate::database::{DeviceRepository, NetworkNodeRepository};

#[derive(Clone, Debug)]
pub struct DeviceService {
    devices: DeviceRepository,
    nodes: NetworkNodeRepository,
}

impl DeviceService {
    pub fn new(devices: DeviceRepository, nodes: NetworkNodeRepository) -> Self {
        Self { devices, nodes }
    }

    async fn ensure_node_exists(&self, node_id: NodeId) -> Result<(), ServiceError> {
        if !self.nodes.exists(node_id).await? {
            return Err(ServiceError::validation(
                "network_node_id",
                format!("Network node {} does not exist", node_id),
            ));
        }
        Ok(())
    }

    pub async fn create(&self, device: NewDevice) -> Result<Device, ServiceError> {
        if let Some(node_id) = device.network_node_id {
            self.ensure_node_exists(node_id).await?;
        }

        let created = self.devices.create(&device).await?;
        info!("Created device {} (serial {})", created.id, created.serial);
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Device, ServiceError> {
        Ok(self.devices.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Device>, ServiceError> {
        Ok(self.devices.list().await?)
    }

    pub async fn update(&self, id: i64, changes: DeviceChanges) -> Result<Device, ServiceError> {
        if let Some(Some(node_id)) = changes.network_node_id {
            self.ensure_node_exists(node_id).await?;
        }

        let updated = self.devices.update(id, &changes).await?;
        info!("Updated device {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.devices.delete(id).await?;
        info!("Deleted device {}", id);
        Ok(())
    }
}
