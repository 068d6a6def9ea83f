// Bearer token required. Create/update/delete handlers are mounted behind the admin role check.

pub mod devices;
pub mod network_nodes;
