//! Rebuilds the network hierarchy from flat rows.
//!
//! Nodes live in an arena (`Vec<NetworkNode>`) and are linked through a
//! parent-index map rather than owning references, so the nested view is
//! reconstructed on demand. Assembly walks the arena with an explicit stack;
//! depth is bounded only by the data, not by the call stack.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::database::models::{Device, NetworkNode, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeKind {
    Node,
    Device,
}

/// One entry of the tree view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: TreeNodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn from_node(node: &NetworkNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            description: Some(node.description.clone()).filter(|d| !d.is_empty()),
            kind: TreeNodeKind::Node,
            children: Vec::new(),
        }
    }

    fn from_device(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.display_name(),
            description: None,
            kind: TreeNodeKind::Device,
            children: Vec::new(),
        }
    }
}

/// Arena of nodes indexed by parent id, plus devices indexed by node id
#[derive(Debug)]
pub struct Forest {
    nodes: Vec<NetworkNode>,
    devices: Vec<Device>,
    children_by_parent: HashMap<Option<NodeId>, Vec<usize>>,
    devices_by_node: HashMap<NodeId, Vec<usize>>,
}

impl Forest {
    /// Index the rows. Input order is preserved within every sibling group.
    pub fn new(nodes: Vec<NetworkNode>, devices: Vec<Device>) -> Self {
        let mut children_by_parent: HashMap<Option<NodeId>, Vec<usize>> = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            children_by_parent.entry(node.parent_id).or_default().push(idx);
        }

        let mut devices_by_node: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (idx, device) in devices.iter().enumerate() {
            if let Some(node_id) = device.network_node_id {
                devices_by_node.entry(node_id).or_default().push(idx);
            }
        }

        Self {
            nodes,
            devices,
            children_by_parent,
            devices_by_node,
        }
    }

    fn child_indices(&self, parent: Option<NodeId>) -> &[usize] {
        self.children_by_parent
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Arena indices in pre-order, each paired with its parent's position in that order.
    ///
    /// A node sits in exactly one sibling list (its parent's), and a list is
    /// expanded only when its parent is visited, so every reachable node is
    /// visited once. Nodes on a parent cycle never connect to a root and are skipped.
    fn preorder(&self) -> Vec<(usize, Option<usize>)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, Option<usize>)> = self
            .child_indices(None)
            .iter()
            .rev()
            .map(|&idx| (idx, None))
            .collect();

        while let Some((idx, parent_pos)) = stack.pop() {
            let pos = order.len();
            order.push((idx, parent_pos));

            let node_id = self.nodes[idx].id;
            stack.extend(
                self.child_indices(Some(node_id))
                    .iter()
                    .rev()
                    .map(|&child| (child, Some(pos))),
            );
        }

        order
    }

    /// Number of nodes that cannot be reached from any root
    pub fn unreachable_count(&self) -> usize {
        self.nodes.len() - self.preorder().len()
    }

    /// Render the nested view: for each node, its devices first, then its child nodes.
    pub fn assemble(&self) -> Vec<TreeNode> {
        let order = self.preorder();

        let mut child_positions: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
        let mut roots = Vec::new();
        for (pos, &(_, parent_pos)) in order.iter().enumerate() {
            match parent_pos {
                Some(parent) => child_positions[parent].push(pos),
                None => roots.push(pos),
            }
        }

        // Children always follow their parent in pre-order, so a reverse sweep
        // finds every child already built.
        let mut built: Vec<Option<TreeNode>> = vec![None; order.len()];
        for pos in (0..order.len()).rev() {
            let node = &self.nodes[order[pos].0];
            let mut entry = TreeNode::from_node(node);

            if let Some(device_indices) = self.devices_by_node.get(&node.id) {
                entry
                    .children
                    .extend(device_indices.iter().map(|&d| TreeNode::from_device(&self.devices[d])));
            }
            entry
                .children
                .extend(child_positions[pos].iter().filter_map(|&c| built[c].take()));

            built[pos] = Some(entry);
        }

        roots.into_iter().filter_map(|pos| built[pos].take()).collect()
    }
}
