//! Literals and clauses used to describe FRAIG nodes to a SAT solver.
//!
//! Every node of a [`Fraig`] owns exactly one SAT variable: node `n` is variable `n + 1`
//! in DIMACS numbering. The constant node is pinned to false by a unit clause, and each AND
//! gate contributes the three Tseitin clauses of [`Clause::and_gate`] when it is created.
//!
//! [`Fraig`]: crate::Fraig

use std::ops::Not;

use crate::{FraigHandle, NodeId};

/// A SAT literal, in DIMACS convention (never 0, negative when complemented).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit(i64);

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl From<i64> for Lit {
    fn from(value: i64) -> Self {
        if value == 0 {
            panic!("Tried to create a Lit from 0. 0 is not a valid literal in DIMACS format.");
        }
        Lit(value)
    }
}

impl From<FraigHandle> for Lit {
    fn from(handle: FraigHandle) -> Self {
        Lit::from_node(handle.get_node_id(), handle.get_complement())
    }
}

impl Lit {
    /// The literal of node `id`, complemented if `complement` is set.
    pub fn from_node(id: NodeId, complement: bool) -> Self {
        let var = i64::try_from(id + 1).expect("node id does not fit in a DIMACS literal");
        Lit(if complement { -var } else { var })
    }

    /// The DIMACS variable index (starting at 1).
    pub fn var(&self) -> usize {
        self.0.unsigned_abs() as usize
    }

    /// The node this literal refers to.
    pub fn node(&self) -> NodeId {
        self.var() - 1
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn to_dimacs(&self) -> i64 {
        self.0
    }
}

/// A SAT clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause(Vec<Lit>);

impl From<Vec<Lit>> for Clause {
    fn from(value: Vec<Lit>) -> Self {
        Clause(value)
    }
}

impl Clause {
    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clauses that encode `z = AND(a, b)`.
    ///
    /// - a is the literal associated with the `fanin0`
    /// - b is the literal associated with the `fanin1`
    /// - z is the literal of the AND gate itself
    pub fn and_gate(z: Lit, a: Lit, b: Lit) -> [Clause; 3] {
        [
            Clause(vec![a, !z]),
            Clause(vec![b, !z]),
            Clause(vec![!a, !b, z]),
        ]
    }

    /// Clauses that encode `a = b`.
    pub fn equivalence(a: Lit, b: Lit) -> [Clause; 2] {
        [Clause(vec![!a, b]), Clause(vec![a, !b])]
    }
}
