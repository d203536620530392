use super::{FaninId, FraigHandle};

/// A node id.
///
/// Ids are dense indices into the node arena of a [`Fraig`], assigned once and never reused.
/// The constant node [`NodeKind::False`] has id 0 by convention.
///
/// [`Fraig`]: crate::Fraig
pub type NodeId = usize;

/// What a node computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The constant low/false signal.
    False,
    /// A primary input, carrying its position among the inputs of the manager.
    Input(usize),
    /// An AND gate with two fanins, stored in canonical order (`fanin0` has the larger id).
    And {
        fanin0: FraigHandle,
        fanin1: FraigHandle,
    },
}

/// A FRAIG node.
///
/// Besides its structure, a node carries its simulation patterns (64 patterns per word)
/// and two flags recording whether some simulated pattern ever evaluated to 0 or to 1.
/// Those flags let the manager skip constant checks that simulation already refutes.
///
/// A node that was proven equivalent to an older node (or to a constant) after its creation
/// stays in the arena, but records the handle of its representative.
#[derive(Debug, Clone)]
pub struct FraigNode {
    id: NodeId,
    kind: NodeKind,
    pattern: Vec<u64>,
    seen_zero: bool,
    seen_one: bool,
    representative: Option<FraigHandle>,
}

impl FraigNode {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        if let NodeKind::And { fanin0, fanin1 } = kind {
            assert!(
                fanin0.get_node_id() < id && fanin1.get_node_id() < id,
                "and gate n{} must only use older nodes as fanins (got {} and {})",
                id,
                fanin0,
                fanin1
            );
        }
        FraigNode {
            id,
            kind,
            pattern: Vec::new(),
            seen_zero: false,
            seen_one: false,
            representative: None,
        }
    }

    pub fn get_id(&self) -> NodeId {
        self.id
    }

    pub fn get_kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_false(&self) -> bool {
        matches!(self.kind, NodeKind::False)
    }

    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self.kind, NodeKind::And { .. })
    }

    /// Position of the input among the inputs of the manager, if the node is an input.
    pub fn input_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Input(index) => Some(index),
            _ => None,
        }
    }

    pub fn get_fanins(&self) -> Vec<FraigHandle> {
        match self.kind {
            NodeKind::And { fanin0, fanin1 } => vec![fanin0, fanin1],
            _ => vec![],
        }
    }

    /// Returns the requested fanin.
    ///
    /// Asking the constant node or an input for a fanin is a broken API usage, so this panics.
    pub fn get_fanin(&self, fanin_id: FaninId) -> FraigHandle {
        match (self.kind, fanin_id) {
            (NodeKind::And { fanin0, .. }, FaninId::Fanin0) => fanin0,
            (NodeKind::And { fanin1, .. }, FaninId::Fanin1) => fanin1,
            _ => panic!("node n{} has no fanin (it is not an and gate)", self.id),
        }
    }

    /// The simulation words computed so far.
    pub fn pattern(&self) -> &[u64] {
        &self.pattern
    }

    /// True if some simulated pattern evaluated this node to 0.
    pub fn seen_zero(&self) -> bool {
        self.seen_zero
    }

    /// True if some simulated pattern evaluated this node to 1.
    pub fn seen_one(&self) -> bool {
        self.seen_one
    }

    /// True if bit 0 of the first simulation word is set.
    /// Signatures are computed on the complemented vector in that case.
    pub fn signature_inverted(&self) -> bool {
        self.pattern.first().is_some_and(|word| word & 1 == 1)
    }

    pub(crate) fn push_word(&mut self, word: u64) {
        self.seen_zero |= word != u64::MAX;
        self.seen_one |= word != 0;
        self.pattern.push(word);
    }

    pub(crate) fn reserve_words(&mut self, capacity: usize) {
        if capacity > self.pattern.len() {
            self.pattern.reserve_exact(capacity - self.pattern.len());
        }
    }

    /// The handle this node was merged into, or `None` if the node is its own representative.
    pub fn get_representative(&self) -> Option<FraigHandle> {
        self.representative
    }

    /// The handle every user of this node should refer to.
    pub fn representative(&self) -> FraigHandle {
        self.representative
            .unwrap_or(FraigHandle::new(self.id, false))
    }

    pub(crate) fn set_representative(&mut self, representative: FraigHandle) {
        debug_assert!(representative.get_node_id() < self.id);
        self.representative = Some(representative);
    }
}
