use std::time::Instant;

use log::trace;

use crate::{
    FraigNode, NodeId, NodeKind, SatBool3,
    cnf::{Clause, Lit},
    stats::{QueryStats, SolverCounters},
};

use super::{SatSolver, SolveResult};

/// Keeps an incremental solver in sync with the nodes of a manager.
///
/// Each node is registered exactly once, at creation, and owns the SAT variable of
/// [`Lit::from_node`]. Facts proven along the way (a node is constant, two nodes are equal)
/// are added back to the solver as clauses to speed up later queries.
pub struct SatAdapter<S> {
    solver: S,
    counters: SolverCounters,
    check_const: QueryStats,
    check_equiv: QueryStats,
}

impl<S: SatSolver> SatAdapter<S> {
    pub fn new(solver: S) -> Self {
        SatAdapter {
            solver,
            counters: SolverCounters::default(),
            check_const: QueryStats::default(),
            check_equiv: QueryStats::default(),
        }
    }

    fn add_clause(&mut self, clause: &Clause) {
        self.counters.clauses += 1;
        self.solver.add_clause(clause);
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        self.counters.solve_calls += 1;
        self.solver.solve(assumptions)
    }

    /// Allocate the variable of `node` and assert its semantics.
    pub fn register(&mut self, node: &FraigNode) {
        self.counters.variables += 1;
        let z = Lit::from_node(node.get_id(), false);
        match node.get_kind() {
            NodeKind::False => self.add_clause(&Clause::from(vec![!z])),
            NodeKind::Input(_) => (),
            NodeKind::And { fanin0, fanin1 } => {
                for clause in Clause::and_gate(z, fanin0.into(), fanin1.into()) {
                    self.add_clause(&clause);
                }
            }
        }
    }

    /// Is node `id` constantly equal to `value`?
    ///
    /// On [`SatBool3::False`] the model holds an input assignment under which the node
    /// evaluates to `!value`.
    pub fn check_constant(&mut self, id: NodeId, value: bool) -> SatBool3 {
        let start = Instant::now();

        // lit holds exactly when the node differs from value
        let lit = Lit::from_node(id, value);
        let result = match self.solve(&[lit]) {
            SolveResult::Unsat => {
                self.add_clause(&Clause::from(vec![!lit]));
                SatBool3::True
            }
            SolveResult::Sat => SatBool3::False,
            SolveResult::Unknown => SatBool3::Unknown,
        };

        trace!(
            "check_const(n{}, {}) -> {:?}",
            id,
            u8::from(value),
            result
        );
        self.check_const.record(result, start.elapsed());
        result
    }

    /// Is node `id1` equal to node `id2` (complemented if `complement` is set)?
    ///
    /// On [`SatBool3::False`] the model holds an input assignment under which they differ.
    pub fn check_equivalent(&mut self, id1: NodeId, id2: NodeId, complement: bool) -> SatBool3 {
        let start = Instant::now();

        let lit1 = Lit::from_node(id1, false);
        let lit2 = Lit::from_node(id2, complement);

        // The two literals differ iff (!lit1 & lit2) or (lit1 & !lit2) is satisfiable
        let result = match self.solve(&[!lit1, lit2]) {
            SolveResult::Unsat => match self.solve(&[lit1, !lit2]) {
                SolveResult::Unsat => SatBool3::True,
                SolveResult::Sat => SatBool3::False,
                SolveResult::Unknown => SatBool3::Unknown,
            },
            SolveResult::Sat => SatBool3::False,
            SolveResult::Unknown => SatBool3::Unknown,
        };
        if result == SatBool3::True {
            for clause in Clause::equivalence(lit1, lit2) {
                self.add_clause(&clause);
            }
        }

        trace!(
            "check_equiv(n{}, {}n{}) -> {:?}",
            id1,
            if complement { "!" } else { "" },
            id2,
            result
        );
        self.check_equiv.record(result, start.elapsed());
        result
    }

    /// Value of node `id` in the model of the last refuted query.
    /// Variables the solver never saw are reported as false.
    pub fn model_value(&self, id: NodeId) -> bool {
        self.solver
            .model_value(Lit::from_node(id, false))
            .unwrap_or(false)
    }

    pub fn get_counters(&self) -> SolverCounters {
        self.counters
    }

    pub fn get_check_const_stats(&self) -> QueryStats {
        self.check_const
    }

    pub fn get_check_equiv_stats(&self) -> QueryStats {
        self.check_equiv
    }
}
