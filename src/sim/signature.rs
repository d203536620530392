//! Buckets of candidate-equivalent nodes, keyed by simulation signature.

use std::{
    collections::{HashMap, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
};

use crate::{FraigNode, NodeId};

/// Hash of the simulation words of `node`, normalized so that a node and its complement
/// share the same signature (see [`FraigNode::signature_inverted`]).
pub fn signature(node: &FraigNode) -> u64 {
    let mask = if node.signature_inverted() { u64::MAX } else { 0 };
    let mut hasher = DefaultHasher::new();
    for word in node.pattern() {
        (word ^ mask).hash(&mut hasher);
    }
    hasher.finish()
}

/// True if the words of `node1` equal the words of `node2`, complemented if `complement` is set.
pub fn same_pattern(node1: &FraigNode, node2: &FraigNode, complement: bool) -> bool {
    let mask = if complement { u64::MAX } else { 0 };
    node1.pattern().len() == node2.pattern().len()
        && node1
            .pattern()
            .iter()
            .zip(node2.pattern())
            .all(|(w1, w2)| *w1 == w2 ^ mask)
}

/// Groups the nodes that might be equivalent (up to complement) under the patterns simulated so far.
///
/// Every signature shifts when a counterexample is folded, so the buckets are thrown away by
/// [`invalidate`] and rebuilt from the member list the next time they are probed.
///
/// [`invalidate`]: SignatureTable::invalidate
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    /// Nodes that are their own representative, in creation order.
    members: Vec<NodeId>,
    buckets: HashMap<u64, Vec<NodeId>>,
    valid: bool,
}

impl SignatureTable {
    pub fn new() -> Self {
        SignatureTable {
            members: Vec::new(),
            buckets: HashMap::new(),
            valid: true,
        }
    }

    /// Register a node as the representative of its function.
    pub fn insert(&mut self, id: NodeId, nodes: &[FraigNode]) {
        self.members.push(id);
        if self.valid {
            self.buckets.entry(signature(&nodes[id])).or_default().push(id);
        }
    }

    /// Drop every bucket, signatures are stale.
    pub fn invalidate(&mut self) {
        self.buckets.clear();
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn rebuild(&mut self, nodes: &[FraigNode]) {
        self.buckets.clear();
        for &id in &self.members {
            self.buckets.entry(signature(&nodes[id])).or_default().push(id);
        }
        self.valid = true;
    }

    /// Members sharing the signature of node `id`, oldest first.
    ///
    /// Signatures are only hashes: callers must still compare the full patterns.
    pub fn candidates(&mut self, id: NodeId, nodes: &[FraigNode]) -> Vec<NodeId> {
        if !self.valid {
            self.rebuild(nodes);
        }
        self.buckets
            .get(&signature(&nodes[id]))
            .map(|bucket| bucket.iter().copied().filter(|&other| other != id).collect())
            .unwrap_or_default()
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NodeKind;

    fn input_with(id: NodeId, words: &[u64]) -> FraigNode {
        let mut node = FraigNode::new(id, NodeKind::Input(id));
        for &word in words {
            node.push_word(word);
        }
        node
    }

    #[test]
    fn signature_polarity_test() {
        let a = input_with(0, &[0b1010, 7]);
        let b = input_with(1, &[!0b1010, !7]);
        let c = input_with(2, &[0b1010, 8]);
        assert_eq!(signature(&a), signature(&b));
        assert_ne!(signature(&a), signature(&c));
        assert!(same_pattern(&a, &b, true));
        assert!(!same_pattern(&a, &b, false));
        assert!(same_pattern(&a, &a, false));
        assert!(!same_pattern(&a, &c, false));
    }

    #[test]
    fn candidates_test() {
        let nodes = vec![
            input_with(0, &[0b1010]),
            input_with(1, &[!0b1010]),
            input_with(2, &[0b1100]),
            input_with(3, &[0b1010]),
        ];
        let mut table = SignatureTable::new();
        table.insert(0, &nodes);
        table.insert(1, &nodes);
        table.insert(2, &nodes);
        assert_eq!(table.candidates(3, &nodes), vec![0, 1]);
        assert_eq!(table.candidates(2, &nodes), Vec::<NodeId>::new());
    }

    #[test]
    fn lazy_rebuild_test() {
        let mut nodes = vec![input_with(0, &[1]), input_with(1, &[2])];
        let mut table = SignatureTable::new();
        table.insert(0, &nodes);
        assert!(table.candidates(1, &nodes).is_empty());

        // the patterns change, the table is rebuilt on the next probe
        nodes[0].push_word(5);
        nodes[1] = input_with(1, &[1, 5]);
        table.invalidate();
        assert!(!table.is_valid());
        table.insert(1, &nodes);
        assert_eq!(table.members(), &[0, 1]);
        assert_eq!(table.candidates(1, &nodes), vec![0]);
        assert!(table.is_valid());
    }
}
