use crate::{Fraig, FraigError, FraigHandle, NodeKind, Result, SatSolver, sim::signature::same_pattern};

use super::strash::StructuralTable;

impl<S: SatSolver> Fraig<S> {
    /// Checking if the FRAIG structure is correct.
    /// This function was written for debug purposes, as the manager is supposed to maintain
    /// integrity at any moment.
    ///
    /// On top of the structural checks, every representative link is checked against the
    /// simulation patterns: a merged node must simulate exactly like its representative.
    pub fn check_integrity(&self) -> Result<()> {
        let words = self.sim.pattern_words();

        for (id, node) in self.nodes.iter().enumerate() {
            if node.get_id() != id {
                return Err(FraigError::InvalidState(format!(
                    "node stored at {} has id {}",
                    id,
                    node.get_id()
                )));
            }
            if node.pattern().len() != words {
                return Err(FraigError::InvalidState(format!(
                    "node {} has {} simulation words instead of {}",
                    id,
                    node.pattern().len(),
                    words
                )));
            }

            match node.get_kind() {
                NodeKind::False => {
                    if id != 0 {
                        return Err(FraigError::InvalidState(format!(
                            "constant node with id {}",
                            id
                        )));
                    }
                }
                NodeKind::Input(index) => {
                    if self.inputs.get(index) != Some(&id) {
                        return Err(FraigError::InvalidState(format!(
                            "input node {} claims position {} which is not its own",
                            id, index
                        )));
                    }
                }
                NodeKind::And { fanin0, fanin1 } => {
                    if id == 0 {
                        return Err(FraigError::InvalidState(
                            "and gate with id 0".to_string(),
                        ));
                    }
                    if (fanin0, fanin1) != StructuralTable::canonical(fanin0, fanin1)
                        || fanin0.get_node_id() >= id
                    {
                        return Err(FraigError::InvalidState(format!(
                            "and gate {} has fanins {} and {} out of order",
                            id, fanin0, fanin1
                        )));
                    }
                    if self.strash.find(fanin0, fanin1) != Some(id) {
                        return Err(FraigError::InvalidState(format!(
                            "and gate {} is missing from the structural table",
                            id
                        )));
                    }
                }
            }

            if let Some(rep) = node.get_representative() {
                self.check_representative(id, rep)?;
            }
        }

        if self.nodes.first().map(|node| node.get_kind()) != Some(NodeKind::False) {
            return Err(FraigError::InvalidState(
                "first node is not the constant node".to_string(),
            ));
        }

        let and_nodes = self.nodes.iter().filter(|node| node.is_and()).count();
        if self.strash.len() != and_nodes {
            return Err(FraigError::InvalidState(format!(
                "structural table holds {} entries for {} and gates",
                self.strash.len(),
                and_nodes
            )));
        }

        Ok(())
    }

    fn check_representative(&self, id: usize, rep: FraigHandle) -> Result<()> {
        let rep_node = self.nodes.get(rep.get_node_id()).ok_or_else(|| {
            FraigError::InvalidState(format!("node {} is merged into unknown {}", id, rep))
        })?;
        if rep.get_node_id() >= id || rep_node.get_representative().is_some() {
            return Err(FraigError::InvalidState(format!(
                "node {} is merged into {} which is not an older representative",
                id, rep
            )));
        }
        if !same_pattern(rep_node, &self.nodes[id], rep.get_complement()) {
            return Err(FraigError::InvalidState(format!(
                "node {} simulates differently from its representative {}",
                id, rep
            )));
        }
        Ok(())
    }
}
