//! The SAT side of a FRAIG.
//!
//! A [`Fraig`] never decides satisfiability itself. It talks to a [`SatAdapter`], which keeps
//! one incremental solver instance synchronized with the graph and turns node-level questions
//! ("is this node constant?", "are these two nodes equal?") into solver calls under assumptions.
//!
//! The solver is pluggable through the [`SatSolver`] trait. [`VarisatSolver`] is the default
//! backend, built on the [varisat](https://docs.rs/varisat) CDCL solver.
//!
//! [`Fraig`]: crate::Fraig

mod adapter;

use log::warn;
use varisat::ExtendFormula;

use crate::cnf::{Clause, Lit};

pub use adapter::SatAdapter;

/// Answer of a raw solver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The solver gave up (resource limit, interruption, internal error).
    Unknown,
}

/// Three-valued answer of a node-level query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatBool3 {
    /// The property was proven.
    True,
    /// The property was refuted; a distinguishing model is available.
    False,
    /// The solver gave up.
    Unknown,
}

/// An incremental SAT solver.
///
/// Variables follow the DIMACS numbering of [`Lit`]: a solver must accept clauses over any
/// positive variable index, creating variables on demand. Clauses are never retracted.
pub trait SatSolver {
    /// Add a clause permanently.
    fn add_clause(&mut self, clause: &Clause);

    /// Solve the current formula under the given assumptions.
    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult;

    /// Value of `lit` in the model of the last satisfiable call,
    /// or `None` if the solver did not assign its variable.
    fn model_value(&self, lit: Lit) -> Option<bool>;
}

/// A [`SatSolver`] backed by varisat.
pub struct VarisatSolver {
    solver: varisat::Solver<'static>,
    /// Last model, indexed by DIMACS variable.
    model: Vec<Option<bool>>,
}

impl Default for VarisatSolver {
    fn default() -> Self {
        VarisatSolver {
            solver: varisat::Solver::new(),
            model: Vec::new(),
        }
    }
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_varisat(lit: Lit) -> varisat::Lit {
    varisat::Lit::from_dimacs(lit.to_dimacs() as isize)
}

impl SatSolver for VarisatSolver {
    fn add_clause(&mut self, clause: &Clause) {
        let lits: Vec<varisat::Lit> = clause.lits().iter().copied().map(to_varisat).collect();
        self.solver.add_clause(&lits);
    }

    fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        let assumptions: Vec<varisat::Lit> = assumptions.iter().copied().map(to_varisat).collect();
        self.solver.assume(&assumptions);
        match self.solver.solve() {
            Ok(true) => {
                self.model.clear();
                for lit in self.solver.model().unwrap_or_default() {
                    let var = lit.var().to_dimacs() as usize;
                    if self.model.len() <= var {
                        self.model.resize(var + 1, None);
                    }
                    self.model[var] = Some(lit.is_positive());
                }
                SolveResult::Sat
            }
            Ok(false) => SolveResult::Unsat,
            Err(err) => {
                warn!("varisat gave up: {:?}", err);
                SolveResult::Unknown
            }
        }
    }

    fn model_value(&self, lit: Lit) -> Option<bool> {
        let value = self.model.get(lit.var()).copied().flatten()?;
        Some(value ^ lit.is_negative())
    }
}
