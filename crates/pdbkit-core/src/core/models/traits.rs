use super::atom::Atom;
use super::ids::{AtomId, BondId, ResidueId};
use super::model::Model;
use super::residue::Residue;
use crate::core::spatial;
use crate::core::utils::geometry::calculate_centroid;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

/// Common queries over any collection of atoms in a [`Model`].
///
/// Implementors only list their atom ids; every query resolves them through
/// the model that owns the atoms.
pub trait AtomicStructure {
    fn atom_ids(&self) -> &[AtomId];

    fn atoms<'m>(&self, model: &'m Model) -> impl Iterator<Item = &'m Atom> {
        self.atom_ids().iter().filter_map(move |&id| model.atom(id))
    }

    fn mass(&self, model: &Model) -> f64 {
        self.atoms(model).map(|atom| atom.mass).sum()
    }

    fn atom_by_serial(&self, model: &Model, serial: usize) -> Option<AtomId> {
        self.atom_ids()
            .iter()
            .copied()
            .find(|&id| model.atom(id).is_some_and(|a| a.serial == serial))
    }

    fn atoms_by_name(&self, model: &Model, name: &str) -> Vec<AtomId> {
        self.atom_ids()
            .iter()
            .copied()
            .filter(|&id| model.atom(id).is_some_and(|a| a.name == name))
            .collect()
    }

    fn atoms_by_element(&self, model: &Model, element: &str) -> Vec<AtomId> {
        self.atom_ids()
            .iter()
            .copied()
            .filter(|&id| {
                model
                    .atom(id)
                    .is_some_and(|a| a.element.eq_ignore_ascii_case(element))
            })
            .collect()
    }

    /// Heavy-atom composition keyed by upper-cased element symbol.
    fn atom_counts(&self, model: &Model) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for atom in self.atoms(model).filter(|a| !a.is_hydrogen()) {
            *counts.entry(atom.element.to_ascii_uppercase()).or_insert(0) += 1;
        }
        counts
    }

    /// Every bond touching at least one atom of this structure, each listed once.
    fn bond_ids(&self, model: &Model) -> Vec<BondId> {
        let mut seen = HashSet::new();
        self.atoms(model)
            .flat_map(|atom| atom.bonds().iter().copied())
            .filter(|&id| seen.insert(id))
            .collect()
    }

    /// Counts `(own atom, other atom)` pairs within `cutoff`, excluding the
    /// covalent neighbourhood of each own atom and atoms the two structures share.
    fn count_atomic_contacts<S>(&self, model: &Model, other: &S, cutoff: f64) -> usize
    where
        S: AtomicStructure + ?Sized,
    {
        let own: HashSet<AtomId> = self.atom_ids().iter().copied().collect();
        let theirs: HashSet<AtomId> = other.atom_ids().iter().copied().collect();
        spatial::count_contacts(
            model,
            self.atom_ids(),
            cutoff,
            model.contact_params().exclusion_depth,
            |id| theirs.contains(&id) && !own.contains(&id),
        )
    }

    /// Counts contacts between atoms of this structure. Each pair is seen from
    /// both ends, so the result is twice the number of distinct pairs.
    fn count_internal_atomic_contacts(&self, model: &Model, cutoff: f64) -> usize {
        let own: HashSet<AtomId> = self.atom_ids().iter().copied().collect();
        spatial::count_contacts(
            model,
            self.atom_ids(),
            cutoff,
            model.contact_params().exclusion_depth,
            |id| own.contains(&id),
        )
    }

    fn centroid(&self, model: &Model) -> Option<Point3<f64>> {
        let points: Vec<Point3<f64>> = self.atoms(model).map(|a| a.position).collect();
        calculate_centroid(&points)
    }

    fn distance_to_structure<S>(&self, model: &Model, other: &S) -> Option<f64>
    where
        S: AtomicStructure + ?Sized,
    {
        Some(nalgebra::distance(&self.centroid(model)?, &other.centroid(model)?))
    }

    /// Selection expression of the form `id 1 | id 2 | ...` over atom serials.
    fn selector_string(&self, model: &Model) -> String {
        self.atoms(model)
            .map(|atom| format!("id {}", atom.serial))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// An atomic structure that is made of whole residues.
pub trait ResiduicStructure: AtomicStructure {
    fn residue_ids(&self) -> &[ResidueId];

    fn residues<'m>(&self, model: &'m Model) -> impl Iterator<Item = (ResidueId, &'m Residue)> {
        self.residue_ids()
            .iter()
            .filter_map(move |&id| model.residue(id).map(|r| (id, r)))
    }

    fn len(&self) -> usize {
        self.residue_ids().len()
    }

    fn is_empty(&self) -> bool {
        self.residue_ids().is_empty()
    }

    fn residues_by_chain(&self, model: &Model, chain: char) -> Vec<ResidueId> {
        self.residues(model)
            .filter(|(_, r)| model.chain(r.chain_id).is_some_and(|c| c.name == chain))
            .map(|(id, _)| id)
            .collect()
    }

    fn residues_by_name(&self, model: &Model, name: &str) -> Vec<ResidueId> {
        self.residues(model)
            .filter(|(_, r)| r.name == name)
            .map(|(id, _)| id)
            .collect()
    }

    /// First residue with the given number, in structure order.
    fn residue_by_number(&self, model: &Model, number: isize) -> Option<ResidueId> {
        self.residues(model)
            .find(|(_, r)| r.number == number)
            .map(|(id, _)| id)
    }

    /// All residues with the given number; more than one when the structure spans chains.
    fn residues_by_number(&self, model: &Model, number: isize) -> Vec<ResidueId> {
        self.residues(model)
            .filter(|(_, r)| r.number == number)
            .map(|(id, _)| id)
            .collect()
    }

    /// Every residue of the owning chain between the lowest and highest residue
    /// number held here, inclusive.
    ///
    /// Structures spanning more than one chain, and single residues, are
    /// returned unchanged.
    fn continuous_sequence(&self, model: &Model) -> ResidueSet {
        let unchanged = || ResidueSet::new(self.residue_ids().to_vec(), model);

        let mut residues = self.residues(model).map(|(_, r)| r);
        let Some(first) = residues.next() else {
            return unchanged();
        };
        let chain_id = first.chain_id;
        let (mut low, mut high) = (first.number, first.number);
        let mut count = 1;
        for residue in residues {
            if residue.chain_id != chain_id {
                return unchanged();
            }
            low = low.min(residue.number);
            high = high.max(residue.number);
            count += 1;
        }
        if count < 2 {
            return unchanged();
        }

        let Some(chain) = model.chain(chain_id) else {
            return unchanged();
        };
        let run = chain
            .residues(model)
            .filter(|(_, r)| (low..=high).contains(&r.number))
            .map(|(id, _)| id)
            .collect();
        ResidueSet::new(run, model)
    }

    /// Selection expression of the form `(resi 3 & chain A) | ...`.
    fn residue_selector_string(&self, model: &Model) -> String {
        self.residues(model)
            .map(|(_, r)| {
                let chain = model.chain(r.chain_id).map_or(' ', |c| c.name);
                format!("(resi {} & chain {})", r.number, chain)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// An ordered group of residues together with their atoms.
///
/// Chains, helices, strands, sheets and sites all hold their residues through
/// this type; it is also what residue-range queries return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResidueSet {
    residues: Vec<ResidueId>,
    atoms: Vec<AtomId>,
}

impl ResidueSet {
    pub fn new(residues: Vec<ResidueId>, model: &Model) -> Self {
        Self::from_store(residues, &model.residues)
    }

    pub(crate) fn from_store(
        residues: Vec<ResidueId>,
        store: &SlotMap<ResidueId, Residue>,
    ) -> Self {
        let atoms = residues
            .iter()
            .filter_map(|&id| store.get(id))
            .flat_map(|r| r.atom_ids().iter().copied())
            .collect();
        Self { residues, atoms }
    }
}

impl AtomicStructure for ResidueSet {
    fn atom_ids(&self) -> &[AtomId] {
        &self.atoms
    }
}

impl ResiduicStructure for ResidueSet {
    fn residue_ids(&self) -> &[ResidueId] {
        &self.residues
    }
}
