use super::atom::Atom;
use super::bond::{BondKind, ChemicalBond};
use super::chain::Chain;
use super::ids::{AtomId, BondId, ChainId, HetId, ResidueId};
use super::residue::{Het, Residue};
use super::secondary::{Helix, Sheet, Strand};
use super::site::PdbSite;
use super::traits::AtomicStructure;
use crate::core::spatial::{self, ContactParams};
use slotmap::SlotMap;
use std::collections::HashMap;
use tracing::warn;

/// One complete set of coordinates with everything that hangs off it.
///
/// A model owns every atom, bond, residue, het group, chain, sheet and site of
/// one conformer. Entities refer to each other through slotmap ids, so any
/// lookup from one entity to a related one goes through the model.
///
/// Models are built by the assembly engine. Once assembly finishes the bond
/// graph is sealed: later bond requests are refused and logged.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) atoms: SlotMap<AtomId, Atom>,
    pub(crate) bonds: SlotMap<BondId, ChemicalBond>,
    pub(crate) residues: SlotMap<ResidueId, Residue>,
    pub(crate) hets: SlotMap<HetId, Het>,
    pub(crate) chains: SlotMap<ChainId, Chain>,
    pub(crate) sheets: Vec<Sheet>,
    pub(crate) sites: Vec<PdbSite>,
    /// Chains in ascending identifier order.
    chain_order: Vec<ChainId>,
    /// Hets in insertion order.
    het_order: Vec<HetId>,
    /// Chain atoms followed by het atoms.
    atom_order: Vec<AtomId>,
    chain_id_map: HashMap<char, ChainId>,
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    het_id_map: HashMap<(char, isize), HetId>,
    serial_map: HashMap<usize, AtomId>,
    contacts: ContactParams,
    sealed: bool,
}

impl Model {
    pub(crate) fn new(contacts: ContactParams) -> Self {
        Self {
            atoms: SlotMap::with_key(),
            bonds: SlotMap::with_key(),
            residues: SlotMap::with_key(),
            hets: SlotMap::with_key(),
            chains: SlotMap::with_key(),
            sheets: Vec::new(),
            sites: Vec::new(),
            chain_order: Vec::new(),
            het_order: Vec::new(),
            atom_order: Vec::new(),
            chain_id_map: HashMap::new(),
            residue_id_map: HashMap::new(),
            het_id_map: HashMap::new(),
            serial_map: HashMap::new(),
            contacts,
            sealed: false,
        }
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms: chain atoms first, then het atoms.
    pub fn atoms_in_order(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    pub fn bond(&self, id: BondId) -> Option<&ChemicalBond> {
        self.bonds.get(id)
    }

    /// Returns an iterator over all bonds in creation order.
    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &ChemicalBond)> {
        self.bonds.iter()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn het(&self, id: HetId) -> Option<&Het> {
        self.hets.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in ascending identifier order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns an iterator over all het groups in the order they were first seen.
    pub fn hets_iter(&self) -> impl Iterator<Item = (HetId, &Het)> {
        self.het_order
            .iter()
            .filter_map(|&id| self.hets.get(id).map(|het| (id, het)))
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sites(&self) -> &[PdbSite] {
        &self.sites
    }

    pub fn contact_params(&self) -> &ContactParams {
        &self.contacts
    }

    /// Returns `true` once assembly has finished and the bond graph is frozen.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Returns an iterator over every helix, chain by chain.
    pub fn helices(&self) -> impl Iterator<Item = &Helix> {
        self.chains_iter().flat_map(|(_, chain)| chain.helices().iter())
    }

    /// Returns an iterator over every strand lying on the given chain.
    pub fn strands_of(&self, chain_id: ChainId) -> impl Iterator<Item = &Strand> {
        self.chain(chain_id)
            .into_iter()
            .flat_map(move |chain| chain.strands(self))
    }

    /// Finds a chain ID by its single-character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue by chain identifier and residue number.
    pub fn find_residue(&self, chain: char, residue_number: isize) -> Option<ResidueId> {
        let chain_id = self.find_chain_by_id(chain)?;
        self.residue_id_map
            .get(&(chain_id, residue_number))
            .copied()
    }

    /// Finds a het group by its chain identifier and residue number.
    pub fn find_het(&self, chain: char, het_number: isize) -> Option<HetId> {
        self.het_id_map.get(&(chain, het_number)).copied()
    }

    /// Finds the first het group (in insertion order) with the given number,
    /// regardless of chain.
    pub fn find_het_by_number(&self, het_number: isize) -> Option<HetId> {
        self.hets_iter()
            .find(|(_, het)| het.number == het_number)
            .map(|(id, _)| id)
    }

    /// Finds an atom by serial number. When serials repeat, the first atom wins.
    pub fn find_atom_by_serial(&self, serial: usize) -> Option<AtomId> {
        self.serial_map.get(&serial).copied()
    }

    /// Finds the bond joining two atoms, if any.
    pub fn find_bond(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<BondId> {
        let atom = self.atoms.get(atom1_id)?;
        atom.bonds()
            .iter()
            .copied()
            .find(|&id| self.bonds.get(id).is_some_and(|b| b.connects(atom1_id, atom2_id)))
    }

    /// Returns the atoms one bond away from `atom_id`, in bond creation order.
    ///
    /// # Arguments
    ///
    /// * `atom_id` - The atom whose neighbours are wanted.
    ///
    /// # Return
    ///
    /// An iterator over neighbour ids; empty if the atom does not exist.
    pub fn bonded_atoms(&self, atom_id: AtomId) -> impl Iterator<Item = AtomId> + '_ {
        self.atoms
            .get(atom_id)
            .map(|atom| atom.bonds())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&bond_id| self.bonds.get(bond_id)?.partner(atom_id))
    }

    /// Returns the atoms within `cutoff` of `atom_id`, excluding those within
    /// `exclusion_depth` bonds of it.
    ///
    /// # Arguments
    ///
    /// * `atom_id` - The centre atom.
    /// * `cutoff` - Maximum distance in Angstroms, inclusive.
    /// * `exclusion_depth` - Number of bonds spanned by the excluded covalent shell.
    ///
    /// # Return
    ///
    /// Matching atom ids in model order. The centre atom is never included.
    pub fn nearby_atoms(&self, atom_id: AtomId, cutoff: f64, exclusion_depth: usize) -> Vec<AtomId> {
        spatial::nearby_atoms(self, atom_id, cutoff, exclusion_depth)
    }

    pub(crate) fn insert_chain(&mut self, chain: Chain) -> ChainId {
        let name = chain.name;
        let chain_id = self.chains.insert(chain);
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(name, chain_id);
        chain_id
    }

    pub(crate) fn insert_residue(&mut self, residue: Residue) -> ResidueId {
        let key = (residue.chain_id, residue.number);
        let residue_id = self.residues.insert(residue);
        self.residue_id_map.insert(key, residue_id);
        residue_id
    }

    pub(crate) fn insert_het(&mut self, het: Het) -> HetId {
        let key = (het.chain_name, het.number);
        let het_id = self.hets.insert(het);
        self.het_order.push(het_id);
        self.het_id_map.entry(key).or_insert(het_id);
        het_id
    }

    /// Stores an atom and appends it to the model atom order.
    pub(crate) fn insert_atom(&mut self, atom: Atom) -> AtomId {
        let serial = atom.serial;
        let atom_id = self.atoms.insert(atom);
        self.atom_order.push(atom_id);
        self.serial_map.entry(serial).or_insert(atom_id);
        atom_id
    }

    pub(crate) fn chain_mut(&mut self, id: ChainId) -> Option<&mut Chain> {
        self.chains.get_mut(id)
    }

    pub(crate) fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    pub(crate) fn het_mut(&mut self, id: HetId) -> Option<&mut Het> {
        self.hets.get_mut(id)
    }

    /// Creates a bond between two distinct atoms.
    ///
    /// This method is idempotent: if the atoms are already bonded, the existing
    /// bond is kept unchanged and its id returned.
    ///
    /// # Arguments
    ///
    /// * `atom1_id` - ID of the first atom.
    /// * `atom2_id` - ID of the second atom.
    /// * `kind` - Classification applied to a newly created bond.
    ///
    /// # Return
    ///
    /// Returns the bond id, or `None` if either atom is missing, the two ids
    /// are the same atom, or the model is sealed.
    pub(crate) fn bond_atoms(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        kind: BondKind,
    ) -> Option<BondId> {
        if self.sealed {
            warn!(
                "Ignoring bond request on sealed model: {:?} - {:?}",
                atom1_id, atom2_id
            );
            return None;
        }
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
        {
            return None;
        }
        if let Some(existing) = self.find_bond(atom1_id, atom2_id) {
            return Some(existing);
        }

        let bond_id = self.bonds.insert(ChemicalBond::new(atom1_id, atom2_id, kind));
        self.atoms[atom1_id].push_bond(bond_id);
        self.atoms[atom2_id].push_bond(bond_id);
        Some(bond_id)
    }

    /// Flags a bond as cis. Refused once the model is sealed.
    pub(crate) fn mark_cis(&mut self, bond_id: BondId, angle: Option<f64>) -> bool {
        if self.sealed {
            warn!("Ignoring cis annotation on sealed model: {:?}", bond_id);
            return false;
        }
        match self.bonds.get_mut(bond_id) {
            Some(bond) => {
                bond.mark_cis(angle);
                true
            }
            None => false,
        }
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}

impl AtomicStructure for Model {
    fn atom_ids(&self) -> &[AtomId] {
        &self.atom_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Molecule;
    use crate::core::models::traits::{ResidueSet, ResiduicStructure};
    use crate::core::records::AtomRecord;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn record(serial: usize, name: &str, element: &str, x: f64) -> AtomRecord {
        AtomRecord {
            serial,
            name: name.to_string(),
            res_seq: 1,
            res_name: "GLY".to_string(),
            chain_id: 'A',
            het: false,
            x,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            temp_factor: 0.0,
            i_code: None,
            element: element.to_string(),
            charge: 0,
            anisotropy: None,
        }
    }

    /// One chain `A`, one residue, and a straight line of atoms 1.0 apart.
    fn linear_model(count: usize) -> (Model, ResidueId, Vec<AtomId>) {
        let mut model = Model::new(ContactParams::default());
        let chain_id = model.insert_chain(Chain::new('A', ResidueSet::default()));
        let residue_id = model.insert_residue(Residue::new(1, "GLY", chain_id));

        let mut atom_ids = Vec::new();
        for i in 0..count {
            let name = format!("C{}", i);
            let atom = Atom::from_record(
                &record(i + 1, &name, "C", i as f64),
                Molecule::Residue(residue_id),
            )
            .unwrap();
            let atom_id = model.insert_atom(atom);
            model.residue_mut(residue_id).unwrap().add_atom(&name, atom_id);
            atom_ids.push(atom_id);
        }
        let residues = ResidueSet::new(vec![residue_id], &model);
        model.chain_mut(chain_id).unwrap().residues = residues;
        (model, residue_id, atom_ids)
    }

    #[test]
    fn bond_atoms_is_symmetric_and_idempotent() {
        let (mut model, _, atoms) = linear_model(2);
        let first = model.bond_atoms(atoms[0], atoms[1], BondKind::Unclassified);
        let again = model.bond_atoms(atoms[1], atoms[0], BondKind::Peptide);

        assert!(first.is_some());
        assert_eq!(first, again);
        assert_eq!(model.bond_count(), 1);
        assert_eq!(model.bonded_atoms(atoms[0]).collect::<Vec<_>>(), vec![atoms[1]]);
        assert_eq!(model.bonded_atoms(atoms[1]).collect::<Vec<_>>(), vec![atoms[0]]);
        assert!(!model.bond(first.unwrap()).unwrap().peptide);
    }

    #[test]
    fn bond_atoms_rejects_self_bonds() {
        let (mut model, _, atoms) = linear_model(1);
        assert_eq!(model.bond_atoms(atoms[0], atoms[0], BondKind::Unclassified), None);
        assert_eq!(model.bond_count(), 0);
    }

    #[test]
    fn sealed_model_refuses_new_bonds() {
        let (mut model, _, atoms) = linear_model(2);
        model.seal();
        assert!(model.is_sealed());
        assert_eq!(model.bond_atoms(atoms[0], atoms[1], BondKind::Unclassified), None);
        assert_eq!(model.bond_count(), 0);
        assert!(model.atom(atoms[0]).unwrap().bonds().is_empty());
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn late_bond_request_is_logged_as_warning() {
        let (mut model, _, atoms) = linear_model(2);
        model.seal();

        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            model.bond_atoms(atoms[0], atoms[1], BondKind::Unclassified);
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("sealed model"));
    }

    #[test]
    fn nearby_atoms_with_zero_cutoff_is_empty() {
        let (model, _, atoms) = linear_model(3);
        assert!(model.nearby_atoms(atoms[0], 0.0, 0).is_empty());
    }

    #[test]
    fn nearby_atoms_excludes_covalent_shell() {
        let (mut model, _, atoms) = linear_model(5);
        for pair in atoms.windows(2) {
            model.bond_atoms(pair[0], pair[1], BondKind::Unclassified);
        }

        // Without exclusion every atom within 2.5 of the first one is found.
        assert_eq!(model.nearby_atoms(atoms[0], 2.5, 0), vec![atoms[1], atoms[2]]);
        // One bond of exclusion drops the direct neighbour.
        assert_eq!(model.nearby_atoms(atoms[0], 2.5, 1), vec![atoms[2]]);
        // Three bonds of exclusion reach past everything in range.
        assert!(model.nearby_atoms(atoms[0], 3.5, 3).is_empty());
        assert_eq!(model.nearby_atoms(atoms[0], 10.0, 3), vec![atoms[4]]);
    }

    #[test]
    fn serial_lookup_and_atom_queries_use_model_order() {
        let (model, residue_id, atoms) = linear_model(3);
        assert_eq!(model.find_atom_by_serial(2), Some(atoms[1]));
        assert_eq!(model.find_atom_by_serial(99), None);
        assert_eq!(model.atom_by_serial(&model, 3), Some(atoms[2]));
        assert_eq!(model.find_residue('A', 1), Some(residue_id));
        assert_eq!(model.find_residue('B', 1), None);

        let chain_id = model.find_chain_by_id('A').unwrap();
        let chain = model.chain(chain_id).unwrap();
        assert_eq!(chain.residue_ids(), &[residue_id]);
        assert_eq!(chain.atom_ids(), atoms.as_slice());
        assert_eq!(model.selector_string(&model), "id 1 | id 2 | id 3");
    }

    #[test]
    fn mass_and_counts_aggregate_atoms() {
        let (model, _, _) = linear_model(4);
        assert!((model.mass(&model) - 4.0 * 12.0107).abs() < 1e-9);
        assert_eq!(model.atom_counts(&model).get("C"), Some(&4));
    }

    #[test]
    fn atom_counts_skip_hydrogen_and_merge_symbol_case() {
        let (mut model, residue_id, _) = linear_model(2);
        for (serial, name, element) in [(10, "H1", "H"), (11, "FE1", "Fe"), (12, "FE2", "fe")] {
            let atom = Atom::from_record(
                &record(serial, name, element, serial as f64),
                Molecule::Residue(residue_id),
            )
            .unwrap();
            let atom_id = model.insert_atom(atom);
            model.residue_mut(residue_id).unwrap().add_atom(name, atom_id);
        }

        let residue = model.residue(residue_id).unwrap();
        let counts = residue.atom_counts(&model);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("C"), Some(&2));
        assert_eq!(counts.get("FE"), Some(&2));
        assert!(!counts.contains_key("H"));
        assert_eq!(residue.atoms_by_element(&model, "FE").len(), 2);
        assert_eq!(residue.atoms_by_element(&model, "h").len(), 1);
    }
}
