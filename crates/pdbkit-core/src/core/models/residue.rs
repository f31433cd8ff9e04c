use super::ids::{AtomId, ChainId, ResidueId};
use super::model::Model;
use super::site::PdbSite;
use super::traits::AtomicStructure;
use crate::core::topology::residues::{one_letter_code, residue_full_name};
use std::collections::HashMap;

/// Atom membership of a single molecule, indexed by atom name.
///
/// Atom names are not unique within a molecule (alternate locations, sloppy
/// depositions), so every name maps to all atoms carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct MoleculeAtoms {
    atoms: Vec<AtomId>,
    by_name: HashMap<String, Vec<AtomId>>,
}

impl MoleculeAtoms {
    pub(crate) fn add(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.by_name
            .entry(atom_name.to_string())
            .or_default()
            .push(atom_id);
    }

    pub(crate) fn ids(&self) -> &[AtomId] {
        &self.atoms
    }

    pub(crate) fn by_name(&self, name: &str) -> &[AtomId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn sole(&self, name: &str) -> Option<AtomId> {
        match self.by_name(name) {
            [only] => Some(*only),
            _ => None,
        }
    }
}

/// A polymer residue (one amino acid unit of a chain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,
    pub number: isize,
    /// `true` if a chain terminator record references this residue.
    pub terminus: bool,
    pub chain_id: ChainId,
    atoms: MoleculeAtoms,
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            name: name.to_string(),
            number,
            terminus: false,
            chain_id,
            atoms: MoleculeAtoms::default(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.add(atom_name, atom_id);
    }

    pub fn get_atom_ids_by_name(&self, name: &str) -> &[AtomId] {
        self.atoms.by_name(name)
    }

    /// Returns the atom carrying `name` only if exactly one atom does.
    pub fn get_sole_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atoms.sole(name)
    }

    pub fn full_name(&self) -> Option<&'static str> {
        residue_full_name(&self.name)
    }

    pub fn one_letter_code(&self) -> Option<char> {
        one_letter_code(&self.name)
    }

    /// The alpha carbon, falling back to the first carbon and then the first atom.
    pub fn alpha_carbon(&self, model: &Model) -> Option<AtomId> {
        self.atoms
            .by_name("CA")
            .first()
            .copied()
            .or_else(|| self.atoms_by_element(model, "C").first().copied())
            .or_else(|| self.atoms.ids().first().copied())
    }

    /// Residues reached through a single bond from any atom of this residue.
    ///
    /// Het groups bonded to the residue are not included.
    pub fn connected_residues(&self, model: &Model, self_id: ResidueId) -> Vec<ResidueId> {
        let mut connected = Vec::new();
        for &atom_id in self.atoms.ids() {
            for neighbor_id in model.bonded_atoms(atom_id) {
                let Some(residue_id) = model
                    .atom(neighbor_id)
                    .and_then(|atom| atom.molecule().residue())
                else {
                    continue;
                };
                if residue_id != self_id && !connected.contains(&residue_id) {
                    connected.push(residue_id);
                }
            }
        }
        connected
    }
}

impl AtomicStructure for Residue {
    fn atom_ids(&self) -> &[AtomId] {
        self.atoms.ids()
    }
}

/// A non-polymer unit: ligand, cofactor, ion or solvent molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Het {
    pub name: String,
    pub number: isize,
    /// Chain identifier from the het's own records.
    pub chain_name: char,
    /// The polymer chain with the same identifier, if one exists.
    pub chain: Option<ChainId>,
    /// Full chemical name from the heterogen name table.
    pub full_name: Option<String>,
    pub(crate) annotated_binding_site: Option<usize>,
    atoms: MoleculeAtoms,
}

impl Het {
    pub(crate) fn new(number: isize, name: &str, chain_name: char) -> Self {
        Self {
            name: name.to_string(),
            number,
            chain_name,
            chain: None,
            full_name: None,
            annotated_binding_site: None,
            atoms: MoleculeAtoms::default(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.add(atom_name, atom_id);
    }

    pub fn get_atom_ids_by_name(&self, name: &str) -> &[AtomId] {
        self.atoms.by_name(name)
    }

    /// The site that the structure's remarks describe as binding this het.
    pub fn annotated_binding_site<'m>(&self, model: &'m Model) -> Option<&'m PdbSite> {
        self.annotated_binding_site
            .and_then(|index| model.sites().get(index))
    }

    /// Residues with an atom within the model's default ligand-contact cutoff.
    pub fn nearby_residues(&self, model: &Model) -> Vec<ResidueId> {
        self.nearby_residues_within(model, model.contact_params().nearby_residue_cutoff)
    }

    /// Residues with at least one atom within `cutoff` of any atom of this het,
    /// sorted by residue number and then chain name.
    pub fn nearby_residues_within(&self, model: &Model, cutoff: f64) -> Vec<ResidueId> {
        let depth = model.contact_params().nearby_residue_exclusion_depth;
        let own = self.atom_ids();

        let mut residues: Vec<ResidueId> = Vec::new();
        for &atom_id in own {
            for near_id in model.nearby_atoms(atom_id, cutoff, depth) {
                if own.contains(&near_id) {
                    continue;
                }
                if let Some(residue_id) = model.atom(near_id).and_then(|a| a.molecule().residue()) {
                    if !residues.contains(&residue_id) {
                        residues.push(residue_id);
                    }
                }
            }
        }

        residues.sort_by_key(|&id| {
            let residue = model.residue(id);
            let number = residue.map_or(isize::MAX, |r| r.number);
            let chain = residue
                .and_then(|r| model.chain(r.chain_id))
                .map_or(char::MAX, |c| c.name);
            (number, chain)
        });
        residues
    }
}

impl AtomicStructure for Het {
    fn atom_ids(&self) -> &[AtomId] {
        self.atoms.ids()
    }
}
