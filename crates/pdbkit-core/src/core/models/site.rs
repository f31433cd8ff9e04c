use super::ids::{AtomId, HetId, ResidueId};
use super::traits::{AtomicStructure, ResidueSet, ResiduicStructure};

/// A named binding or functional site declared by the structure's site records.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbSite {
    pub name: String,
    pub(crate) residues: ResidueSet,
    /// Het groups the site record lists alongside its residues.
    pub(crate) hets: Vec<HetId>,
}

impl PdbSite {
    pub fn het_ids(&self) -> &[HetId] {
        &self.hets
    }
}

impl AtomicStructure for PdbSite {
    fn atom_ids(&self) -> &[AtomId] {
        self.residues.atom_ids()
    }
}

impl ResiduicStructure for PdbSite {
    fn residue_ids(&self) -> &[ResidueId] {
        self.residues.residue_ids()
    }
}
