//! A [`FraigHandle`] points at a [`FraigNode`] and can be complemented (indicates the presence of a NOT gate).
//!
//! [`FraigNode`]: crate::FraigNode

use std::{
    fmt,
    ops::{BitXor, Not},
};

use super::NodeId;

/// Unambiguous fanin selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaninId {
    Fanin0,
    Fanin1,
}

impl From<bool> for FaninId {
    fn from(value: bool) -> Self {
        if value {
            FaninId::Fanin1
        } else {
            FaninId::Fanin0
        }
    }
}

impl From<usize> for FaninId {
    fn from(value: usize) -> Self {
        if value == 0 {
            FaninId::Fanin0
        } else if value == 1 {
            FaninId::Fanin1
        } else {
            panic!("could not create FaninId from value={}", value)
        }
    }
}

/// A reference to a node of a [`Fraig`], possibly complemented.
///
/// Inversion is free: no node is ever allocated for a NOT gate.
/// The constant node has id 0, so the two sentinel handles are `(0, false)` for
/// constant 0 and `(0, true)` for constant 1.
///
/// ```rust
/// use fraig::{Fraig, FraigHandle};
/// let mut fraig = Fraig::new();
/// let x = fraig.make_input();
/// assert_eq!(!!x, x);
/// assert_eq!(!FraigHandle::zero(), FraigHandle::one());
/// ```
///
/// Handle equality is structural: two equal handles compute the same function,
/// but the converse only holds once the manager has proven it.
///
/// [`Fraig`]: crate::Fraig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FraigHandle {
    node: NodeId,
    complement: bool,
}

impl Not for FraigHandle {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.complement = !self.complement;
        self
    }
}

impl BitXor<bool> for FraigHandle {
    type Output = Self;

    fn bitxor(self, rhs: bool) -> Self::Output {
        FraigHandle::new(self.node, self.complement ^ rhs)
    }
}

impl From<&FraigHandle> for (NodeId, bool) {
    fn from(handle: &FraigHandle) -> (NodeId, bool) {
        (handle.get_node_id(), handle.get_complement())
    }
}

impl fmt::Display for FraigHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.node, self.complement) {
            (0, false) => write!(f, "0"),
            (0, true) => write!(f, "1"),
            (id, false) => write!(f, "n{}", id),
            (id, true) => write!(f, "!n{}", id),
        }
    }
}

impl FraigHandle {
    pub const fn new(node: NodeId, complement: bool) -> Self {
        FraigHandle { node, complement }
    }

    /// The constant 0 handle.
    pub const fn zero() -> Self {
        FraigHandle::new(0, false)
    }

    /// The constant 1 handle.
    pub const fn one() -> Self {
        FraigHandle::new(0, true)
    }

    pub const fn constant(value: bool) -> Self {
        FraigHandle::new(0, value)
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node
    }

    pub fn get_complement(&self) -> bool {
        self.complement
    }

    /// The same handle without its inverter.
    pub fn regular(&self) -> Self {
        FraigHandle::new(self.node, false)
    }

    pub fn is_zero(&self) -> bool {
        self.node == 0 && !self.complement
    }

    pub fn is_one(&self) -> bool {
        self.node == 0 && self.complement
    }

    pub fn is_const(&self) -> bool {
        self.node == 0
    }

    pub fn is_complement_of(&self, other: &FraigHandle) -> bool {
        self.node == other.node && self.complement ^ other.complement
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constants_test() {
        assert!(FraigHandle::zero().is_zero());
        assert!(FraigHandle::one().is_one());
        assert!(FraigHandle::constant(true).is_one());
        assert_eq!(!FraigHandle::zero(), FraigHandle::one());
        assert!(FraigHandle::one().is_const());
        assert!(!FraigHandle::new(3, false).is_const());
    }

    #[test]
    fn complement_test() {
        let h = FraigHandle::new(4, false);
        assert!(h.is_complement_of(&!h));
        assert!(!h.is_complement_of(&h));
        assert!(!h.is_complement_of(&FraigHandle::new(5, true)));
        assert_eq!(h ^ true, !h);
        assert_eq!(h ^ false, h);
        assert_eq!((!h).regular(), h);
    }

    #[test]
    fn display_test() {
        assert_eq!(FraigHandle::zero().to_string(), "0");
        assert_eq!(FraigHandle::one().to_string(), "1");
        assert_eq!(FraigHandle::new(7, false).to_string(), "n7");
        assert_eq!(FraigHandle::new(7, true).to_string(), "!n7");
    }

    #[test]
    #[should_panic]
    fn invalid_fanin_id_test() {
        let _ = FaninId::from(2usize);
    }
}
