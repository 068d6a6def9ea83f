pub mod device;
pub mod network_node;
pub mod user;

pub use device::{Device, DeviceChanges, NewDevice};
pub use network_node::{NetworkNode, NetworkNodeChanges, NewNetworkNode, NodeId};
pub use user::User;
