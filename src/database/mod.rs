pub mod devices;
pub mod manager;
pub mod models;
pub mod network_nodes;
pub mod schema;
pub mod users;

pub use devices::DeviceRepository;
pub use manager::{Database, DatabaseError};
pub use network_nodes::{DetachSummary, ForestSnapshot, NetworkNodeRepository};
pub use users::UserRepository;
