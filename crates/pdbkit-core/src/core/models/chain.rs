use super::ids::{AtomId, ResidueId};
use super::model::Model;
use super::secondary::{Helix, Strand, StrandRef};
use super::traits::{AtomicStructure, ResidueSet, ResiduicStructure};

/// A polymer chain: its residues in ascending residue-number order plus the
/// secondary structure that lies on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub name: char,
    pub(crate) residues: ResidueSet,
    pub(crate) helices: Vec<Helix>,
    pub(crate) strands: Vec<StrandRef>,
}

impl Chain {
    pub(crate) fn new(name: char, residues: ResidueSet) -> Self {
        Self {
            name,
            residues,
            helices: Vec::new(),
            strands: Vec::new(),
        }
    }

    pub fn helices(&self) -> &[Helix] {
        &self.helices
    }

    /// Strands lying on this chain, resolved through the model's sheets.
    pub fn strands<'m>(&self, model: &'m Model) -> impl Iterator<Item = &'m Strand> {
        self.strands.iter().filter_map(move |r| {
            model
                .sheets()
                .get(r.sheet)
                .and_then(|sheet| sheet.strands().get(r.strand))
        })
    }

    /// One-letter sequence of the chain, with `X` for non-standard residues.
    pub fn sequence(&self, model: &Model) -> String {
        self.residues(model)
            .map(|(_, r)| r.one_letter_code().unwrap_or('X'))
            .collect()
    }
}

impl AtomicStructure for Chain {
    fn atom_ids(&self) -> &[AtomId] {
        self.residues.atom_ids()
    }
}

impl ResiduicStructure for Chain {
    fn residue_ids(&self) -> &[ResidueId] {
        self.residues.residue_ids()
    }
}
