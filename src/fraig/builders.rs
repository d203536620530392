//! Constructors derived from [`Fraig::make_and`].
//!
//! Every function here only combines calls to [`Fraig::make_and`] and complements, so the
//! results are merged exactly like the ones built by hand.

use std::collections::HashMap;

use log::debug;

use crate::{Expr, Fraig, FraigError, FraigHandle, NodeId, NodeKind, Result, SatSolver, dfs::Dfs};

impl<S: SatSolver> Fraig<S> {
    pub fn make_not(&self, a: FraigHandle) -> FraigHandle {
        !a
    }

    pub fn make_buff(&self, a: FraigHandle) -> FraigHandle {
        a
    }

    pub fn make_or(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        !self.make_and(!a, !b)
    }

    pub fn make_nand(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        !self.make_and(a, b)
    }

    pub fn make_nor(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        self.make_and(!a, !b)
    }

    pub fn make_xor(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        let left = self.make_and(a, !b);
        let right = self.make_and(!a, b);
        self.make_or(left, right)
    }

    pub fn make_xnor(&mut self, a: FraigHandle, b: FraigHandle) -> FraigHandle {
        !self.make_xor(a, b)
    }

    /// `sel ? then : otherwise`
    pub fn make_mux(
        &mut self,
        sel: FraigHandle,
        then: FraigHandle,
        otherwise: FraigHandle,
    ) -> FraigHandle {
        let left = self.make_and(sel, then);
        let right = self.make_and(!sel, otherwise);
        self.make_or(left, right)
    }

    /// Combines `handles` as a balanced tree of `op`, or returns `empty` if there is none.
    fn make_balanced(
        &mut self,
        handles: &[FraigHandle],
        empty: FraigHandle,
        op: fn(&mut Self, FraigHandle, FraigHandle) -> FraigHandle,
    ) -> FraigHandle {
        match handles {
            [] => empty,
            [single] => *single,
            _ => {
                let (left, right) = handles.split_at(handles.len() / 2);
                let left = self.make_balanced(left, empty, op);
                let right = self.make_balanced(right, empty, op);
                op(self, left, right)
            }
        }
    }

    /// AND of all handles. The empty AND is 1.
    pub fn make_and_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        self.make_balanced(handles, FraigHandle::one(), Self::make_and)
    }

    /// OR of all handles. The empty OR is 0.
    pub fn make_or_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        self.make_balanced(handles, FraigHandle::zero(), Self::make_or)
    }

    pub fn make_nand_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        !self.make_and_list(handles)
    }

    pub fn make_nor_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        !self.make_or_list(handles)
    }

    /// XOR of all handles. The empty XOR is 0.
    pub fn make_xor_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        self.make_balanced(handles, FraigHandle::zero(), Self::make_xor)
    }

    pub fn make_xnor_list(&mut self, handles: &[FraigHandle]) -> FraigHandle {
        !self.make_xor_list(handles)
    }

    /// Builds `expr`, where variable `i` stands for `inputs[i]`.
    pub fn make_expr(&mut self, expr: &Expr, inputs: &[FraigHandle]) -> Result<FraigHandle> {
        let ans = match expr {
            Expr::Zero => FraigHandle::zero(),
            Expr::One => FraigHandle::one(),
            Expr::Literal { var, inv } => {
                let input = inputs
                    .get(*var)
                    .ok_or(FraigError::UnknownVariable(*var))?;
                *input ^ *inv
            }
            Expr::And(children) => {
                let children = self.make_children(children, inputs)?;
                self.make_and_list(&children)
            }
            Expr::Or(children) => {
                let children = self.make_children(children, inputs)?;
                self.make_or_list(&children)
            }
            Expr::Xor(children) => {
                let children = self.make_children(children, inputs)?;
                self.make_xor_list(&children)
            }
        };
        Ok(ans)
    }

    fn make_children(&mut self, children: &[Expr], inputs: &[FraigHandle]) -> Result<Vec<FraigHandle>> {
        children
            .iter()
            .map(|child| self.make_expr(child, inputs))
            .collect()
    }

    /// Builds the function whose value under assignment `k` is `table[k]`.
    ///
    /// Input `inputs[i]` takes the value of bit `i` of `k`, so `table` must have exactly
    /// `2^inputs.len()` entries.
    pub fn make_truth_table(
        &mut self,
        table: &[bool],
        inputs: &[FraigHandle],
    ) -> Result<FraigHandle> {
        let expected = u32::try_from(inputs.len())
            .ok()
            .and_then(|n| 1usize.checked_shl(n));
        if expected != Some(table.len()) {
            return Err(FraigError::InvalidTruthTable {
                len: table.len(),
                inputs: inputs.len(),
            });
        }
        Ok(self.make_shannon(table, inputs))
    }

    /// Shannon expansion on the last input, whose value is the highest bit of the index.
    fn make_shannon(&mut self, table: &[bool], inputs: &[FraigHandle]) -> FraigHandle {
        match inputs.split_last() {
            None => FraigHandle::constant(table[0]),
            Some((&top, rest)) => {
                let (low, high) = table.split_at(table.len() / 2);
                let otherwise = self.make_shannon(low, rest);
                let then = self.make_shannon(high, rest);
                self.make_mux(top, then, otherwise)
            }
        }
    }

    /// Ids of the cone of `handle`, in increasing order (hence fanins first).
    fn cone(&self, handle: FraigHandle) -> Vec<NodeId> {
        let mut dfs = Dfs::from_handle(handle);
        let mut ids = Vec::new();
        while let Some(id) = dfs.next(self) {
            ids.push(id);
        }
        ids.sort_unstable();
        ids
    }

    /// Inputs `handle` structurally depends on, in creation order.
    pub fn support(&self, handle: FraigHandle) -> Vec<FraigHandle> {
        let handle = self.representative(handle);
        self.cone(handle)
            .into_iter()
            .filter(|&id| self.nodes[id].is_input())
            .map(|id| FraigHandle::new(id, false))
            .collect()
    }

    /// Rebuilds the cone of `handle` with the input at position `input` fixed to `value`.
    pub fn make_cofactor(
        &mut self,
        handle: FraigHandle,
        input: usize,
        value: bool,
    ) -> Result<FraigHandle> {
        if input >= self.inputs.len() {
            return Err(FraigError::InputDoesNotExist(input));
        }
        let handle = self.representative(handle);

        let mut rebuilt: HashMap<NodeId, FraigHandle> = HashMap::new();
        for id in self.cone(handle) {
            let ans = match self.nodes[id].get_kind() {
                NodeKind::False => FraigHandle::zero(),
                NodeKind::Input(index) if index == input => FraigHandle::constant(value),
                NodeKind::Input(_) => FraigHandle::new(id, false),
                NodeKind::And { fanin0, fanin1 } => {
                    let a = rebuilt[&fanin0.get_node_id()] ^ fanin0.get_complement();
                    let b = rebuilt[&fanin1.get_node_id()] ^ fanin1.get_complement();
                    self.make_and(a, b)
                }
            };
            rebuilt.insert(id, ans);
        }

        let ans = rebuilt[&handle.get_node_id()] ^ handle.get_complement();
        debug!("make_cofactor({}, {}, {}) -> {}", handle, input, u8::from(value), ans);
        Ok(ans)
    }
}
