//! Module defining the [`Fraig`] manager, as well as [`FraigNode`], [`FraigHandle`] and some others relevant structs.
//!
//! A FRAIG (functionally reduced AND-inverter graph) is an AIG in which no two nodes compute
//! the same Boolean function, up to complement. Every call to [`Fraig::make_and`] combines
//! three techniques to keep it that way:
//! - structural hashing, which catches gates with identical fanins,
//! - random simulation, which buckets the nodes that might be equivalent,
//! - incremental SAT, which proves the equivalence or returns a counterexample that
//!   refines the simulation.

mod builders;
mod config;
pub mod dfs;
pub mod error;
pub mod handle;
mod integrity;
pub mod node;
pub mod strash;

use log::{debug, warn};

pub use config::FraigConfig;
pub use error::{FraigError, Result};
pub use handle::{FaninId, FraigHandle};
pub use node::{FraigNode, NodeId, NodeKind};

use crate::{
    SatBool3, SatSolver, VarisatSolver,
    sat::SatAdapter,
    sim::{
        Simulator,
        signature::{SignatureTable, same_pattern},
    },
    stats::FraigStats,
};
use strash::StructuralTable;

/// Answer of [`Fraig::check_equivalent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquivResult {
    Equal,
    NotEqual,
    /// The SAT solver gave up before reaching a conclusion.
    Unknown,
}

impl From<SatBool3> for EquivResult {
    fn from(value: SatBool3) -> Self {
        match value {
            SatBool3::True => EquivResult::Equal,
            SatBool3::False => EquivResult::NotEqual,
            SatBool3::Unknown => EquivResult::Unknown,
        }
    }
}

/// A FRAIG manager.
///
/// The manager owns every node it creates. Nodes are never freed individually: a node merged
/// into an older equivalent node stays allocated (and keeps being simulated) until the whole
/// manager is dropped. [`FraigHandle`]s are only meaningful for the manager that created them.
///
/// All operations take `&mut self` and run to completion on the caller's stack. To use
/// several threads, create one manager per thread.
///
/// ```rust
/// use fraig::{EquivResult, Fraig};
/// let mut fraig = Fraig::new();
/// let x = fraig.make_input();
/// let y = fraig.make_input();
///
/// // x ^ y, built in two different ways
/// let xor1 = fraig.make_xor(x, y);
/// let a = fraig.make_or(x, y);
/// let b = fraig.make_nand(x, y);
/// let xor2 = fraig.make_and(a, b);
///
/// // the second construction was merged into the first one
/// assert_eq!(xor1, xor2);
/// assert_eq!(fraig.check_equivalent(xor1, xor2), EquivResult::Equal);
/// ```
pub struct Fraig<S: SatSolver = VarisatSolver> {
    /// All nodes, indexed by their id. Node 0 is the constant node.
    nodes: Vec<FraigNode>,
    inputs: Vec<NodeId>,
    strash: StructuralTable,
    signatures: SignatureTable,
    sim: Simulator,
    sat: SatAdapter<S>,
    config: FraigConfig,
    /// Input assignment of the last refuted `check_equivalent`.
    counterexample: Option<Vec<bool>>,
}

impl Fraig<VarisatSolver> {
    /// Create a brand new manager (constant node included) with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(FraigConfig::default(), VarisatSolver::new())
    }

    pub fn with_config(config: FraigConfig) -> Result<Self> {
        Self::with_solver(config, VarisatSolver::new())
    }
}

impl Default for Fraig<VarisatSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SatSolver> Fraig<S> {
    /// Create a manager using a custom SAT backend.
    pub fn with_solver(config: FraigConfig, solver: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, solver))
    }

    fn from_parts(config: FraigConfig, solver: S) -> Self {
        let mut fraig = Fraig {
            nodes: Vec::new(),
            inputs: Vec::new(),
            strash: StructuralTable::new(),
            signatures: SignatureTable::new(),
            sim: Simulator::new(&config),
            sat: SatAdapter::new(solver),
            config,
            counterexample: None,
        };
        fraig.new_node(NodeKind::False);
        fraig
    }

    /// Append a node to the arena, simulate it and describe it to the solver.
    fn new_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(FraigNode::new(id, kind));
        self.sim.init_node(&mut self.nodes, id);
        self.sat.register(&self.nodes[id]);
        id
    }

    /// Handles of another manager (or forged ones) are a broken API usage.
    fn check_handle(&self, handle: FraigHandle) {
        assert!(
            handle.get_node_id() < self.nodes.len(),
            "handle {} does not belong to this manager ({} nodes)",
            handle,
            self.nodes.len()
        );
    }

    pub fn get_config(&self) -> &FraigConfig {
        &self.config
    }

    pub fn input_num(&self) -> usize {
        self.inputs.len()
    }

    /// Handle of the input at position `pos`.
    pub fn input(&self, pos: usize) -> Option<FraigHandle> {
        self.inputs.get(pos).map(|&id| FraigHandle::new(id, false))
    }

    /// Number of nodes, constant node and merged nodes included.
    pub fn node_num(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&FraigNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[FraigNode] {
        &self.nodes
    }

    /// Number of simulation words held by every node.
    pub fn pattern_words(&self) -> usize {
        self.sim.pattern_words()
    }

    /// The handle currently standing for `handle`.
    ///
    /// Handles returned by the manager already are representatives, this only matters for
    /// handles built by hand from a node id.
    pub fn representative(&self, handle: FraigHandle) -> FraigHandle {
        self.check_handle(handle);
        self.nodes[handle.get_node_id()].representative() ^ handle.get_complement()
    }

    pub fn make_const(&self, value: bool) -> FraigHandle {
        FraigHandle::constant(value)
    }

    pub fn make_zero(&self) -> FraigHandle {
        FraigHandle::zero()
    }

    pub fn make_one(&self) -> FraigHandle {
        FraigHandle::one()
    }

    /// Create a new primary input. Two calls never return the same input.
    pub fn make_input(&mut self) -> FraigHandle {
        let index = self.inputs.len();
        let id = self.new_node(NodeKind::Input(index));
        self.inputs.push(id);
        self.signatures.insert(id, &self.nodes);
        let ans = FraigHandle::new(id, false);
        debug!("make_input() -> {}", ans);
        ans
    }

    /// Returns a handle computing `AND(a, b)`.
    ///
    /// At most one node is materialized per call, and only if the function is new: the result
    /// is merged with any existing node proven equivalent to it, up to complement.
    pub fn make_and(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        let a = self.representative(a);
        let b = self.representative(b);

        // Trivial cases
        if a.is_zero() || b.is_zero() {
            return FraigHandle::zero();
        }
        if a.is_one() {
            return b;
        }
        if b.is_one() || a == b {
            return a;
        }
        if a.is_complement_of(&b) {
            return FraigHandle::zero();
        }

        let (fanin0, fanin1) = StructuralTable::canonical(a, b);
        if let Some(id) = self.strash.find(fanin0, fanin1) {
            let ans = self.nodes[id].representative();
            debug!("make_and({}, {}) -> {} (strash)", fanin0, fanin1, ans);
            return ans;
        }

        let id = self.new_node(NodeKind::And { fanin0, fanin1 });
        self.strash.insert(fanin0, fanin1, id);

        let ans = match self.verify_const(id) {
            Some(constant) => constant,
            None => self.find_equivalent(id),
        };
        if ans.get_node_id() != id {
            self.nodes[id].set_representative(ans);
        }
        debug!("make_and({}, {}) -> {} (new node n{})", fanin0, fanin1, ans, id);
        ans
    }

    /// Checks whether node `id` is a constant. Returns the constant if it is.
    ///
    /// A check is skipped when simulation already saw the node take the other value.
    /// Counterexamples are folded before the next check.
    fn verify_const(&mut self, id: NodeId) -> Option<FraigHandle> {
        for value in [false, true] {
            let refuted = if value {
                self.nodes[id].seen_zero()
            } else {
                self.nodes[id].seen_one()
            };
            if refuted {
                continue;
            }
            match self.sat.check_constant(id, value) {
                SatBool3::True => return Some(FraigHandle::constant(value)),
                SatBool3::False => {
                    self.fold_counterexample();
                }
                SatBool3::Unknown => {
                    debug!("could not decide whether n{} is constant {}", id, u8::from(value))
                }
            }
        }
        None
    }

    /// Looks for an older node equivalent to node `id`, up to complement.
    ///
    /// Every refuted candidate yields a counterexample which is folded into the patterns, after
    /// which the search restarts from the fresh buckets. If no candidate survives, the node is
    /// registered as the representative of a new function.
    fn find_equivalent(&mut self, id: NodeId) -> FraigHandle {
        let mut retries = 0;
        'search: loop {
            let candidates = self.signatures.candidates(id, &self.nodes);
            for candidate in candidates {
                let complement =
                    self.nodes[candidate].signature_inverted() ^ self.nodes[id].signature_inverted();
                if !same_pattern(&self.nodes[candidate], &self.nodes[id], complement) {
                    continue;
                }
                match self.sat.check_equivalent(candidate, id, complement) {
                    SatBool3::True => return FraigHandle::new(candidate, complement),
                    SatBool3::False => {
                        if self.config.max_retries.is_some_and(|max| retries >= max) {
                            warn!(
                                "giving up the search for a node equivalent to n{} after {} refinements",
                                id, retries
                            );
                            break 'search;
                        }
                        if self.fold_counterexample() {
                            retries += 1;
                            continue 'search;
                        }
                        warn!("pattern storage is full, n{} is kept apart from n{} unrefined", id, candidate);
                    }
                    SatBool3::Unknown => {
                        debug!("could not decide whether n{} and n{} are equivalent", candidate, id)
                    }
                }
            }
            break;
        }

        self.signatures.insert(id, &self.nodes);
        FraigHandle::new(id, false)
    }

    /// Folds the model of the last refuted query into the simulation patterns.
    fn fold_counterexample(&mut self) -> bool {
        let sat = &self.sat;
        let folded = self
            .sim
            .fold_counterexample(&mut self.nodes, |id| sat.model_value(id));
        if folded {
            self.signatures.invalidate();
        }
        folded
    }

    /// Checks whether two handles compute the same function.
    ///
    /// Unlike [`make_and`], this never creates nodes. [`EquivResult::Unknown`] is returned as is
    /// when the solver gives up. After [`EquivResult::NotEqual`], the distinguishing input
    /// assignment is available through [`counterexample`].
    ///
    /// [`make_and`]: Fraig::make_and
    /// [`counterexample`]: Fraig::counterexample
    pub fn check_equivalent(&mut self, a: FraigHandle, b: FraigHandle) -> EquivResult {
        let a = self.representative(a);
        let b = self.representative(b);
        self.counterexample = None;

        if a == b {
            return EquivResult::Equal;
        }
        if a.is_complement_of(&b) {
            // any assignment distinguishes a function from its complement
            self.counterexample = Some(vec![false; self.inputs.len()]);
            return EquivResult::NotEqual;
        }

        let result = if a.is_const() {
            self.sat
                .check_constant(b.get_node_id(), a.is_one() ^ b.get_complement())
        } else if b.is_const() {
            self.sat
                .check_constant(a.get_node_id(), b.is_one() ^ a.get_complement())
        } else {
            self.sat.check_equivalent(
                a.get_node_id(),
                b.get_node_id(),
                a.get_complement() ^ b.get_complement(),
            )
        };

        if result == SatBool3::False {
            self.counterexample = Some(
                self.inputs
                    .iter()
                    .map(|&id| self.sat.model_value(id))
                    .collect(),
            );
        }
        debug!("check_equivalent({}, {}) -> {:?}", a, b, result);
        result.into()
    }

    /// Input assignment (one value per input, in creation order) distinguishing the handles
    /// of the last [`check_equivalent`] call that answered [`EquivResult::NotEqual`].
    ///
    /// [`check_equivalent`]: Fraig::check_equivalent
    pub fn counterexample(&self) -> Option<&[bool]> {
        self.counterexample.as_deref()
    }

    /// Evaluates `handle` under the given input assignment (one value per input).
    pub fn evaluate(&self, handle: FraigHandle, inputs: &[bool]) -> Result<bool> {
        self.check_handle(handle);
        if inputs.len() != self.inputs.len() {
            return Err(FraigError::InputCountMismatch {
                expected: self.inputs.len(),
                got: inputs.len(),
            });
        }

        // ids are a topological order
        let mut values = vec![false; handle.get_node_id() + 1];
        for id in 0..values.len() {
            values[id] = match self.nodes[id].get_kind() {
                NodeKind::False => false,
                NodeKind::Input(index) => inputs[index],
                NodeKind::And { fanin0, fanin1 } => {
                    (values[fanin0.get_node_id()] ^ fanin0.get_complement())
                        && (values[fanin1.get_node_id()] ^ fanin1.get_complement())
                }
            };
        }
        Ok(values[handle.get_node_id()] ^ handle.get_complement())
    }

    pub fn stats(&self) -> FraigStats {
        let and_nodes = self.nodes.iter().filter(|node| node.is_and()).count();
        let (constant_nodes, merged_nodes) = self
            .nodes
            .iter()
            .filter_map(|node| node.get_representative())
            .fold((0, 0), |(constants, merged), rep| {
                if rep.is_const() {
                    (constants + 1, merged)
                } else {
                    (constants, merged + 1)
                }
            });
        FraigStats {
            nodes: self.nodes.len(),
            inputs: self.inputs.len(),
            and_nodes,
            merged_nodes,
            constant_nodes,
            pattern_words: self.sim.pattern_words(),
            solver: self.sat.get_counters(),
            check_const: self.sat.get_check_const_stats(),
            check_equiv: self.sat.get_check_equiv_stats(),
        }
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::{SolveResult, cnf::{Clause, Lit}};

    /// A backend that gives up on every query.
    struct GivingUp(VarisatSolver);

    impl SatSolver for GivingUp {
        fn add_clause(&mut self, clause: &Clause) {
            self.0.add_clause(clause);
        }

        fn solve(&mut self, _assumptions: &[Lit]) -> SolveResult {
            SolveResult::Unknown
        }

        fn model_value(&self, lit: Lit) -> Option<bool> {
            self.0.model_value(lit)
        }
    }

    #[test]
    fn trivial_cases_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let zero = fraig.make_zero();
        let one = fraig.make_one();
        for h in [x, !x, zero, one] {
            assert_eq!(fraig.make_and(zero, h), zero);
            assert_eq!(fraig.make_and(h, zero), zero);
            assert_eq!(fraig.make_and(one, h), h);
            assert_eq!(fraig.make_and(h, one), h);
            assert_eq!(fraig.make_and(h, h), h);
            assert_eq!(fraig.make_and(h, !h), zero);
        }
        // constant node and one input, nothing else
        assert_eq!(fraig.node_num(), 2);
        assert_eq!(fraig.stats().solver.solve_calls, 0);
    }

    #[test]
    fn inputs_never_alias_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        assert_ne!(x, y);
        assert_eq!(fraig.input_num(), 2);
        assert_eq!(fraig.input(1), Some(y));
        assert_eq!(fraig.input(2), None);
        assert_eq!(fraig.check_equivalent(x, y), EquivResult::NotEqual);
    }

    #[test]
    fn commutative_and_strash_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, !y);
        let nodes = fraig.node_num();
        let calls = fraig.stats().solver.solve_calls;

        let b = fraig.make_and(!y, x);
        let c = fraig.make_and(x, !y);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(fraig.node_num(), nodes);
        assert_eq!(fraig.stats().solver.solve_calls, calls);
    }

    #[test]
    fn constant_degeneration_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, y);
        let b = fraig.make_and(x, !y);
        // (x & y) & (x & !y) is always false
        assert_eq!(fraig.make_and(a, b), fraig.make_zero());
        // !(x & y) | !(x & !y) is always true
        assert_eq!(fraig.make_or(!a, !b), fraig.make_one());
        let stats = fraig.stats();
        assert_eq!(stats.constant_nodes, 1);
        // the same structure hits the degenerate node and returns the constant again
        assert_eq!(fraig.make_and(b, a), fraig.make_zero());
        assert_eq!(fraig.stats().constant_nodes, 1);
        fraig.check_integrity().unwrap();
    }

    #[test]
    fn merge_with_input_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        // x & (x | y) == x
        let x_or_y = fraig.make_or(x, y);
        assert_eq!(fraig.make_and(x, x_or_y), x);
        // !(x & (x | y)) in complemented form
        assert_eq!(fraig.make_and(!x, !x_or_y), !x_or_y);
        fraig.check_integrity().unwrap();
    }

    #[test]
    fn merge_idempotence_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let z = fraig.make_input();
        // x & (y & z) vs (x & y) & z
        let yz = fraig.make_and(y, z);
        let left = fraig.make_and(x, yz);
        let xy = fraig.make_and(x, y);
        let right = fraig.make_and(xy, z);
        assert_eq!(left, right);
        let stats = fraig.stats();
        assert_eq!(stats.merged_nodes, 1);

        // the merged structure keeps answering the representative
        let nodes = fraig.node_num();
        assert_eq!(fraig.make_and(z, xy), left);
        assert_eq!(fraig.node_num(), nodes);
        fraig.check_integrity().unwrap();
    }

    #[test]
    fn check_equivalent_fast_paths_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, y);
        assert_eq!(fraig.check_equivalent(a, a), EquivResult::Equal);
        assert_eq!(fraig.check_equivalent(a, !a), EquivResult::NotEqual);
        assert_eq!(fraig.counterexample().map(|cex| cex.len()), Some(2));
        assert_eq!(
            fraig.check_equivalent(a, fraig.make_zero()),
            EquivResult::NotEqual
        );
        let cex = fraig.counterexample().unwrap().to_vec();
        assert!(fraig.evaluate(a, &cex).unwrap());
        assert_eq!(
            fraig.check_equivalent(fraig.make_one(), !a),
            EquivResult::NotEqual
        );
        let cex = fraig.counterexample().unwrap().to_vec();
        assert!(fraig.evaluate(a, &cex).unwrap());
    }

    #[test]
    fn check_equivalent_counterexample_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_or(x, y);
        let b = fraig.make_xor(x, y);
        assert_eq!(fraig.check_equivalent(a, b), EquivResult::NotEqual);
        let cex = fraig.counterexample().unwrap().to_vec();
        assert_eq!(cex, vec![true, true]);
        assert_ne!(
            fraig.evaluate(a, &cex).unwrap(),
            fraig.evaluate(b, &cex).unwrap()
        );
    }

    #[test]
    fn unknown_is_surfaced_test() {
        let mut fraig = Fraig::with_solver(FraigConfig::default(), GivingUp(VarisatSolver::new()))
            .unwrap();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, y);
        let b = fraig.make_and(y, x);
        assert_eq!(a, b);
        assert_eq!(fraig.check_equivalent(a, x), EquivResult::Unknown);
        assert_eq!(fraig.check_equivalent(a, fraig.make_zero()), EquivResult::Unknown);
        assert!(fraig.counterexample().is_none());
        // fast paths do not need the solver
        assert_eq!(fraig.check_equivalent(a, !a), EquivResult::NotEqual);
        assert!(fraig.stats().check_equiv.aborted.count >= 1);
    }

    #[test]
    fn evaluate_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let y = fraig.make_input();
        let a = fraig.make_and(x, !y);
        assert!(fraig.evaluate(a, &[true, false]).unwrap());
        assert!(!fraig.evaluate(a, &[true, true]).unwrap());
        assert!(fraig.evaluate(!a, &[false, false]).unwrap());
        assert!(fraig.evaluate(fraig.make_one(), &[false, false]).unwrap());
        assert!(matches!(
            fraig.evaluate(a, &[true]),
            Err(FraigError::InputCountMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    #[should_panic]
    fn foreign_handle_test() {
        let mut fraig = Fraig::new();
        let x = fraig.make_input();
        let _ = fraig.make_and(x, FraigHandle::new(42, false));
    }

    #[test]
    fn invalid_config_test() {
        let config = FraigConfig::default().with_initial_pattern_words(0);
        assert!(Fraig::with_config(config).is_err());
    }
}
