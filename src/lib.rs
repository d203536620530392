//! Functionally reduced AND-inverter graphs.
//!
//! A [`Fraig`] manager builds Boolean functions out of two-input AND gates and inverters, and
//! guarantees that no two of its nodes compute the same function (up to complement). Building
//! a function that already exists hands back the existing node, so two handles are equal exactly
//! when the functions they compute were proven equal.
//!
//! ```rust
//! use fraig::{EquivResult, Fraig};
//! let mut fraig = Fraig::new();
//! let a = fraig.make_input();
//! let b = fraig.make_input();
//! let c = fraig.make_input();
//!
//! // distributivity: a & (b | c) == (a & b) | (a & c)
//! let b_or_c = fraig.make_or(b, c);
//! let left = fraig.make_and(a, b_or_c);
//! let ab = fraig.make_and(a, b);
//! let ac = fraig.make_and(a, c);
//! let right = fraig.make_or(ab, ac);
//! assert_eq!(left, right);
//!
//! assert_eq!(fraig.check_equivalent(ab, ac), EquivResult::NotEqual);
//! println!("{}", fraig.stats());
//! ```

pub mod cnf;
pub mod expr;
pub mod fraig;
pub mod sat;
pub mod sim;
pub mod stats;

// Re-exporting symbols and modules.
pub use expr::Expr;
pub use fraig::dfs;
pub use fraig::{
    EquivResult, FaninId, Fraig, FraigConfig, FraigError, FraigHandle, FraigNode, NodeId,
    NodeKind, Result,
};
pub use sat::{SatBool3, SatSolver, SolveResult, VarisatSolver};
pub use stats::FraigStats;
