//! Boolean expressions over numbered variables, see [`Fraig::make_expr`].
//!
//! [`Fraig::make_expr`]: crate::Fraig::make_expr

use std::ops::Not;

/// A Boolean expression. Variable `i` is mapped to an input handle when the expression is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Zero,
    One,
    Literal { var: usize, inv: bool },
    /// Conjunction of the children. Without children, it is 1.
    And(Vec<Expr>),
    /// Disjunction of the children. Without children, it is 0.
    Or(Vec<Expr>),
    /// Parity of the children. Without children, it is 0.
    Xor(Vec<Expr>),
}

impl Expr {
    pub fn zero() -> Self {
        Expr::Zero
    }

    pub fn one() -> Self {
        Expr::One
    }

    pub fn literal(var: usize, inv: bool) -> Self {
        Expr::Literal { var, inv }
    }

    pub fn posi_literal(var: usize) -> Self {
        Expr::literal(var, false)
    }

    pub fn nega_literal(var: usize) -> Self {
        Expr::literal(var, true)
    }

    pub fn and(children: Vec<Expr>) -> Self {
        Expr::And(children)
    }

    pub fn or(children: Vec<Expr>) -> Self {
        Expr::Or(children)
    }

    pub fn xor(children: Vec<Expr>) -> Self {
        Expr::Xor(children)
    }

    /// One more than the largest variable used, 0 if there is none.
    pub fn input_size(&self) -> usize {
        match self {
            Expr::Zero | Expr::One => 0,
            Expr::Literal { var, .. } => var + 1,
            Expr::And(children) | Expr::Or(children) | Expr::Xor(children) => children
                .iter()
                .map(Expr::input_size)
                .max()
                .unwrap_or(0),
        }
    }

    /// Value of the expression when variable `i` is `values[i]`.
    ///
    /// Panics if a variable is out of range.
    pub fn eval(&self, values: &[bool]) -> bool {
        match self {
            Expr::Zero => false,
            Expr::One => true,
            Expr::Literal { var, inv } => values[*var] ^ inv,
            Expr::And(children) => children.iter().all(|child| child.eval(values)),
            Expr::Or(children) => children.iter().any(|child| child.eval(values)),
            Expr::Xor(children) => children
                .iter()
                .fold(false, |acc, child| acc ^ child.eval(values)),
        }
    }
}

impl Not for Expr {
    type Output = Self;

    /// De Morgan for AND/OR, the first child absorbs the inverter of a XOR.
    fn not(self) -> Self::Output {
        match self {
            Expr::Zero => Expr::One,
            Expr::One => Expr::Zero,
            Expr::Literal { var, inv } => Expr::Literal { var, inv: !inv },
            Expr::And(children) => Expr::Or(children.into_iter().map(Not::not).collect()),
            Expr::Or(children) => Expr::And(children.into_iter().map(Not::not).collect()),
            Expr::Xor(mut children) => {
                if children.is_empty() {
                    return Expr::One;
                }
                let first = children.remove(0);
                children.insert(0, !first);
                Expr::Xor(children)
            }
        }
    }
}
