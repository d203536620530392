//! Structural hashing (strashing) of AND gates.

use std::collections::HashMap;

use super::{FraigHandle, NodeId};

/// Maps the canonical fanin pair of every AND gate to the gate itself.
///
/// No two AND nodes of a manager share the same canonical fanins: the manager always looks
/// the pair up before materializing a node. Entries are never removed, even when the node
/// is later merged into an older one.
#[derive(Debug, Clone, Default)]
pub struct StructuralTable {
    table: HashMap<(FraigHandle, FraigHandle), NodeId>,
}

impl StructuralTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders the fanins so that `fanin0` has the larger node id.
    ///
    /// This is the same convention as the AIGER format, and it makes the key independent
    /// of the order in which the fanins were given.
    pub fn canonical(a: FraigHandle, b: FraigHandle) -> (FraigHandle, FraigHandle) {
        if a.get_node_id() < b.get_node_id() {
            (b, a)
        } else {
            (a, b)
        }
    }

    /// Retrieves the AND gate with the given canonical fanins.
    pub fn find(&self, fanin0: FraigHandle, fanin1: FraigHandle) -> Option<NodeId> {
        self.table.get(&(fanin0, fanin1)).copied()
    }

    /// Registers a new AND gate. The fanins must be canonical and not registered yet.
    pub fn insert(&mut self, fanin0: FraigHandle, fanin1: FraigHandle, id: NodeId) {
        let previous = self.table.insert((fanin0, fanin1), id);
        assert!(
            previous.is_none(),
            "fanins ({}, {}) are already used by node n{}",
            fanin0,
            fanin1,
            previous.unwrap_or_default()
        );
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_test() {
        let a = FraigHandle::new(1, true);
        let b = FraigHandle::new(2, false);
        assert_eq!(StructuralTable::canonical(a, b), (b, a));
        assert_eq!(StructuralTable::canonical(b, a), (b, a));
    }

    #[test]
    fn find_insert_test() {
        let mut table = StructuralTable::new();
        let a = FraigHandle::new(2, false);
        let b = FraigHandle::new(1, false);
        assert!(table.is_empty());
        assert_eq!(table.find(a, b), None);
        table.insert(a, b, 3);
        assert_eq!(table.find(a, b), Some(3));
        assert_eq!(table.find(a, !b), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    #[should_panic]
    fn duplicate_insert_test() {
        let mut table = StructuralTable::new();
        let a = FraigHandle::new(2, false);
        let b = FraigHandle::new(1, false);
        table.insert(a, b, 3);
        table.insert(a, b, 4);
    }
}
