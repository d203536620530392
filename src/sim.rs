//! Random simulation of FRAIG nodes.
//!
//! Every node carries the same number of 64-bit simulation words. Inputs start with random
//! words, AND gates compute theirs from their fanins, and each counterexample returned by the
//! SAT solver is folded in as one more word. Two nodes whose words differ are certainly not
//! equivalent, so only nodes with matching words (see [`SignatureTable`]) reach the solver.

pub mod signature;

use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{FraigConfig, FraigHandle, FraigNode, NodeId, NodeKind};

pub use signature::SignatureTable;

/// Probability to flip each of the bits 1..63 of a folded counterexample word.
/// Bit 0 is always the exact counterexample, the other bits explore its neighbourhood.
const FLIP_PROBABILITY: f64 = 0.04;

/// Holds the pattern bookkeeping shared by all nodes of a manager.
#[derive(Debug, Clone)]
pub struct Simulator {
    rng: StdRng,
    /// Number of valid words per node.
    used: usize,
    /// Number of words allocated per node.
    capacity: usize,
    max_words: Option<usize>,
}

impl Simulator {
    pub fn new(config: &FraigConfig) -> Self {
        let used = config.initial_pattern_words;
        let capacity = match config.max_pattern_words {
            Some(max) => (used * 2).min(max),
            None => used * 2,
        };
        Simulator {
            rng: StdRng::seed_from_u64(config.seed),
            used,
            capacity,
            max_words: config.max_pattern_words,
        }
    }

    /// Number of simulation words every node currently holds.
    pub fn pattern_words(&self) -> usize {
        self.used
    }

    /// Number of words allocated per node before the next resize.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Value of `handle` in word `index`. The fanin must already hold that word.
    fn word(nodes: &[FraigNode], handle: FraigHandle, index: usize) -> u64 {
        let word = nodes[handle.get_node_id()].pattern()[index];
        if handle.get_complement() { !word } else { word }
    }

    /// Fill the words of a freshly created node.
    pub fn init_node(&mut self, nodes: &mut [FraigNode], id: NodeId) {
        nodes[id].reserve_words(self.capacity);
        match nodes[id].get_kind() {
            NodeKind::False => {
                for _ in 0..self.used {
                    nodes[id].push_word(0);
                }
            }
            NodeKind::Input(_) => {
                for _ in 0..self.used {
                    let word = self.rng.r#gen::<u64>();
                    nodes[id].push_word(word);
                }
            }
            NodeKind::And { fanin0, fanin1 } => {
                for index in 0..self.used {
                    let word =
                        Self::word(nodes, fanin0, index) & Self::word(nodes, fanin1, index);
                    nodes[id].push_word(word);
                }
            }
        }
    }

    /// Grow the storage of all nodes if it is full.
    /// Returns false if the storage already reached its maximum size.
    fn ensure_capacity(&mut self, nodes: &mut [FraigNode]) -> bool {
        if self.used < self.capacity {
            return true;
        }
        let mut capacity = self.capacity * 2;
        if let Some(max) = self.max_words {
            capacity = capacity.min(max);
        }
        if capacity <= self.used {
            return false;
        }

        info!(
            "resizing simulation patterns from {} to {} words",
            self.capacity, capacity
        );
        for node in nodes.iter_mut() {
            node.reserve_words(capacity);
        }
        self.capacity = capacity;
        true
    }

    /// Append one word to every node, built around the input assignment given by `model`.
    ///
    /// Nodes are visited in creation order, so the fanins of an AND gate already hold the new
    /// word when the gate computes its own. Returns false, leaving every node untouched, if the
    /// storage cannot grow anymore.
    pub fn fold_counterexample(
        &mut self,
        nodes: &mut [FraigNode],
        model: impl Fn(NodeId) -> bool,
    ) -> bool {
        if !self.ensure_capacity(nodes) {
            return false;
        }

        let index = self.used;
        for id in 0..nodes.len() {
            let word = match nodes[id].get_kind() {
                NodeKind::False => 0,
                NodeKind::Input(_) => {
                    let mut word = if model(id) { u64::MAX } else { 0 };
                    for bit in 1..64 {
                        if self.rng.gen_bool(FLIP_PROBABILITY) {
                            word ^= 1 << bit;
                        }
                    }
                    word
                }
                NodeKind::And { fanin0, fanin1 } => {
                    Self::word(nodes, fanin0, index) & Self::word(nodes, fanin1, index)
                }
            };
            nodes[id].push_word(word);
        }
        self.used += 1;
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_inputs_and(sim: &mut Simulator) -> Vec<FraigNode> {
        let mut nodes = vec![
            FraigNode::new(0, NodeKind::False),
            FraigNode::new(1, NodeKind::Input(0)),
            FraigNode::new(2, NodeKind::Input(1)),
            FraigNode::new(
                3,
                NodeKind::And {
                    fanin0: FraigHandle::new(2, true),
                    fanin1: FraigHandle::new(1, false),
                },
            ),
        ];
        for id in 0..nodes.len() {
            sim.init_node(&mut nodes, id);
        }
        nodes
    }

    #[test]
    fn init_node_test() {
        let mut sim = Simulator::new(&FraigConfig::default().with_initial_pattern_words(3));
        let nodes = two_inputs_and(&mut sim);
        assert_eq!(sim.pattern_words(), 3);
        for node in &nodes {
            assert_eq!(node.pattern().len(), 3);
        }
        assert!(nodes[0].pattern().iter().all(|&w| w == 0));
        for index in 0..3 {
            assert_eq!(
                nodes[3].pattern()[index],
                !nodes[2].pattern()[index] & nodes[1].pattern()[index]
            );
        }
    }

    #[test]
    fn fold_counterexample_test() {
        let mut sim = Simulator::new(&FraigConfig::default().with_initial_pattern_words(1));
        let mut nodes = two_inputs_and(&mut sim);
        assert_eq!(sim.capacity(), 2);

        // x0 = 1, x1 = 0 makes the gate true
        assert!(sim.fold_counterexample(&mut nodes, |id| id == 1));
        assert_eq!(sim.pattern_words(), 2);
        assert_eq!(nodes[1].pattern()[1] & 1, 1);
        assert_eq!(nodes[2].pattern()[1] & 1, 0);
        assert_eq!(nodes[3].pattern()[1] & 1, 1);
        assert!(nodes[3].seen_one());

        // storage doubles
        assert!(sim.fold_counterexample(&mut nodes, |_| false));
        assert_eq!(sim.pattern_words(), 3);
        assert_eq!(sim.capacity(), 4);
        assert!(nodes.iter().all(|node| node.pattern().len() == 3));
    }

    #[test]
    fn bounded_storage_test() {
        let config = FraigConfig::default()
            .with_initial_pattern_words(1)
            .with_max_pattern_words(Some(2));
        let mut sim = Simulator::new(&config);
        let mut nodes = two_inputs_and(&mut sim);
        assert!(sim.fold_counterexample(&mut nodes, |_| true));
        assert!(!sim.fold_counterexample(&mut nodes, |_| true));
        assert_eq!(sim.pattern_words(), 2);
        assert!(nodes.iter().all(|node| node.pattern().len() == 2));
    }
}
