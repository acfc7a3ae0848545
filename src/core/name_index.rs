// --- File: src/core/name_index.rs
use crate::core::dataset::Dataset;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct IndexNode {
    children: HashMap<u8, usize>,
    /// Names whose lowercase form ends at this node.
    name_ids: Vec<usize>,
}

/// A byte trie over lowercased dataset names, for prefix lookups without
/// scanning every name. Ids are positions in dataset order.
#[derive(Debug, Clone)]
pub struct NameIndex {
    nodes: Vec<IndexNode>,
    names: Vec<String>,
}

impl NameIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = Self { nodes: vec![IndexNode::default()], names: Vec::with_capacity(dataset.len()) };
        for (id, name) in dataset.names().enumerate() {
            index.insert(&name.to_lowercase(), id);
            index.names.push(name.to_string());
        }
        index
    }

    /// O(k) in the key length.
    fn insert(&mut self, key: &str, name_id: usize) {
        let mut node_idx = 0;
        for &byte in key.as_bytes() {
            node_idx = match self.nodes[node_idx].children.get(&byte) {
                Some(&id) => id,
                None => {
                    let new_node_id = self.nodes.len();
                    self.nodes.push(IndexNode::default());
                    self.nodes[node_idx].children.insert(byte, new_node_id);
                    new_node_id
                }
            };
        }
        self.nodes[node_idx].name_ids.push(name_id);
    }

    /// Every name whose lowercase form starts with `prefix` lowercased, in
    /// dataset order.
    pub fn with_prefix(&self, prefix: &str) -> Vec<&str> {
        let mut node_idx = 0;
        for &byte in prefix.to_lowercase().as_bytes() {
            match self.nodes[node_idx].children.get(&byte) {
                Some(&next_idx) => node_idx = next_idx,
                None => return vec![],
            }
        }

        let mut ids = Vec::new();
        self.collect(node_idx, &mut ids);
        ids.sort_unstable();
        ids.into_iter().map(|id| self.names[id].as_str()).collect()
    }

    fn collect(&self, node_idx: usize, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx];
        out.extend_from_slice(&node.name_ids);
        for &child_idx in node.children.values() {
            self.collect(child_idx, out);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
