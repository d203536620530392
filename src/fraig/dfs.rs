//! Provides a DFS visitor to allow simple traversal of the cone of some handles.
//!
//! See [`Dfs`] for details.

use std::collections::HashSet;

use crate::{Fraig, FraigHandle, NodeId, SatSolver};

/// A simple DFS visitor over node ids.
///
/// Nodes are yielded in preorder. You can:
/// - start a DFS from a single handle using [`from_handle`]
/// - or visit the union of the cones of several handles using [`from_handles`].
///
/// Complement flags are ignored: the traversal only follows node ids.
/// The DFS does not borrow the manager, which can still be mutated between two calls.
///
/// [`from_handle`]: Dfs::from_handle
/// [`from_handles`]: Dfs::from_handles
///
/// ```rust
/// use fraig::{Fraig, dfs::Dfs};
/// let mut fraig = Fraig::new();
/// let x = fraig.make_input();
/// let y = fraig.make_input();
/// let a = fraig.make_and(x, !y);
/// let mut dfs = Dfs::from_handle(a);
/// let mut visited = 0;
/// while let Some(_id) = dfs.next(&fraig) {
///     visited += 1;
/// }
/// assert_eq!(visited, 3);
/// ```
pub struct Dfs {
    /// All nodes on the stack have not been visited yet,
    /// but are already in `seen` so they are only pushed once.
    stack: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl Dfs {
    pub fn from_handle(start: FraigHandle) -> Self {
        Self::from_handles(&[start])
    }

    pub fn from_handles(starts: &[FraigHandle]) -> Self {
        let mut dfs = Dfs {
            stack: Vec::new(),
            seen: HashSet::new(),
        };
        // reversed so that the first handle is explored first
        for start in starts.iter().rev() {
            dfs.push(start.get_node_id());
        }
        dfs
    }

    fn push(&mut self, id: NodeId) {
        if self.seen.insert(id) {
            self.stack.push(id);
        }
    }

    /// Yield the next node of the DFS, or None if it is done.
    ///
    /// Panics if a start handle does not belong to `fraig`.
    pub fn next<S: SatSolver>(&mut self, fraig: &Fraig<S>) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = fraig
            .node(id)
            .unwrap_or_else(|| panic!("node {} does not belong to this manager", id));
        for fanin in node.get_fanins() {
            self.push(fanin.get_node_id());
        }
        Some(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_handle_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, !y);

        let mut dfs = Dfs::from_handle(!a);
        assert_eq!(dfs.next(&fraig), Some(a.get_node_id()));
        let mut children = vec![dfs.next(&fraig).unwrap(), dfs.next(&fraig).unwrap()];
        children.sort();
        assert_eq!(children, vec![x.get_node_id(), y.get_node_id()]);
        assert!(dfs.next(&fraig).is_none());
        assert!(dfs.next(&fraig).is_none());
    }

    #[test]
    fn shared_cone_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let z = fraig.make_input();
        let a = fraig.make_and(x, y);
        let b = fraig.make_and(a, z);
        let c = fraig.make_and(!a, x);

        let mut visited = Vec::new();
        let mut dfs = Dfs::from_handles(&[b, c, x]);
        while let Some(id) = dfs.next(&fraig) {
            visited.push(id);
        }
        // the first handle comes first, every node is visited once
        assert_eq!(visited[0], b.get_node_id());
        visited.sort();
        let mut expected: Vec<NodeId> = [x, y, z, a, b, c]
            .iter()
            .map(|h| h.get_node_id())
            .collect();
        expected.sort();
        assert_eq!(visited, expected);
    }

    #[test]
    fn constant_test() {
        let fraig = Fraig::new();
        let mut dfs = Dfs::from_handle(FraigHandle::one());
        assert_eq!(dfs.next(&fraig), Some(0));
        assert!(dfs.next(&fraig).is_none());
    }
}
