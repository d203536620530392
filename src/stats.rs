//! Statistics gathered by a [`Fraig`] manager, mostly for logging.
//!
//! [`Fraig`]: crate::Fraig

use std::{fmt, time::Duration};

use crate::SatBool3;

/// Count and timing of one kind of outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeStat {
    pub count: usize,
    pub total: Duration,
    pub max: Duration,
}

impl TimeStat {
    fn record(&mut self, time: Duration) {
        self.count += 1;
        self.total += time;
        self.max = self.max.max(time);
    }

    pub fn average(&self) -> Option<Duration> {
        u32::try_from(self.count)
            .ok()
            .filter(|&count| count > 0)
            .map(|count| self.total / count)
    }
}

/// Outcomes of one kind of SAT query (constant check or equivalence check).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub proved: TimeStat,
    pub disproved: TimeStat,
    pub aborted: TimeStat,
}

impl QueryStats {
    pub(crate) fn record(&mut self, result: SatBool3, time: Duration) {
        match result {
            SatBool3::True => self.proved.record(time),
            SatBool3::False => self.disproved.record(time),
            SatBool3::Unknown => self.aborted.record(time),
        }
    }

    pub fn total(&self) -> usize {
        self.proved.count + self.disproved.count + self.aborted.count
    }
}

impl fmt::Display for QueryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {} / {}", self.proved.count, self.total())?;
        for (label, stat) in [
            ("success", &self.proved),
            ("failure", &self.disproved),
            ("abort", &self.aborted),
        ] {
            if let Some(average) = stat.average() {
                writeln!(
                    f,
                    "  in {:<7} (total/ave./max): {:?} / {:?} / {:?}",
                    label, stat.total, average, stat.max
                )?;
            }
        }
        Ok(())
    }
}

/// Size of the formula handed to the solver, and number of solver calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverCounters {
    pub variables: usize,
    pub clauses: usize,
    pub solve_calls: usize,
}

/// A snapshot of the state of a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FraigStats {
    /// All nodes, constant node included.
    pub nodes: usize,
    pub inputs: usize,
    pub and_nodes: usize,
    /// AND nodes proven equivalent to an older node after their creation.
    pub merged_nodes: usize,
    /// AND nodes proven constant after their creation.
    pub constant_nodes: usize,
    pub pattern_words: usize,
    pub solver: SolverCounters,
    pub check_const: QueryStats,
    pub check_equiv: QueryStats,
}

impl fmt::Display for FraigStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=====<< FRAIG statistics >>=====")?;
        writeln!(
            f,
            "nodes: {} ({} inputs, {} and gates, {} merged, {} constant)",
            self.nodes, self.inputs, self.and_nodes, self.merged_nodes, self.constant_nodes
        )?;
        writeln!(f, "pattern words: {}", self.pattern_words)?;
        writeln!(f, "--------------------------------")?;
        writeln!(f, "check_const:")?;
        write!(f, "{}", self.check_const)?;
        writeln!(f, "--------------------------------")?;
        writeln!(f, "check_equiv:")?;
        write!(f, "{}", self.check_equiv)?;
        writeln!(f, "--------------------------------")?;
        writeln!(f, "sat:")?;
        writeln!(f, "  variables   : {}", self.solver.variables)?;
        writeln!(f, "  clauses     : {}", self.solver.clauses)?;
        writeln!(f, "  solve calls : {}", self.solver.solve_calls)
    }
}
