use super::ids::{BondId, HetId, ResidueId};
use crate::core::records::{Anisotropy, AtomRecord};
use crate::core::topology::elements::{atomic_mass, is_hydrogen};
use nalgebra::Point3;
use thiserror::Error;

/// The molecule that owns an atom: either a polymer residue or a het group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Molecule {
    Residue(ResidueId),
    Het(HetId),
}

impl Molecule {
    pub fn residue(self) -> Option<ResidueId> {
        match self {
            Molecule::Residue(id) => Some(id),
            Molecule::Het(_) => None,
        }
    }

    pub fn het(self) -> Option<HetId> {
        match self {
            Molecule::Het(id) => Some(id),
            Molecule::Residue(_) => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown element '{element}' on atom {serial}")]
pub struct UnknownElementError {
    pub serial: usize,
    pub element: String,
}

/// Represents a single atom of a macromolecular model.
///
/// Everything except the incident-bond list is fixed when the atom is created
/// from its record. Bonds are appended by the model while the bonding passes
/// run and are frozen once the model is sealed.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number, unique within a model.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// Element symbol as deposited (e.g., "C", "FE").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub temp_factor: f64,
    pub insertion_code: Option<char>,
    /// Formal charge in elementary charge units.
    pub charge: i8,
    pub anisotropy: Option<Anisotropy>,
    /// Atomic mass in Daltons, derived from the element.
    pub mass: f64,
    molecule: Molecule,
    bonds: Vec<BondId>,
}

impl Atom {
    /// Creates an atom from its record and the molecule it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownElementError`] if the element has no entry in the periodic table;
    /// the mass of such an atom cannot be computed.
    pub fn from_record(record: &AtomRecord, molecule: Molecule) -> Result<Self, UnknownElementError> {
        let mass = atomic_mass(&record.element).ok_or_else(|| UnknownElementError {
            serial: record.serial,
            element: record.element.clone(),
        })?;

        Ok(Self {
            serial: record.serial,
            name: record.name.clone(),
            element: record.element.clone(),
            position: Point3::new(record.x, record.y, record.z),
            occupancy: record.occupancy,
            temp_factor: record.temp_factor,
            insertion_code: record.i_code,
            charge: record.charge,
            anisotropy: record.anisotropy,
            mass,
            molecule,
            bonds: Vec::new(),
        })
    }

    pub fn molecule(&self) -> Molecule {
        self.molecule
    }

    /// Ids of the bonds incident to this atom, in creation order.
    pub fn bonds(&self) -> &[BondId] {
        &self.bonds
    }

    pub(crate) fn push_bond(&mut self, bond_id: BondId) {
        self.bonds.push(bond_id);
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn is_hydrogen(&self) -> bool {
        is_hydrogen(&self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_residue_id(n: u64) -> ResidueId {
        ResidueId::from(KeyData::from_ffi(n))
    }

    fn record(serial: usize, name: &str, element: &str, x: f64) -> AtomRecord {
        AtomRecord {
            serial,
            name: name.to_string(),
            res_seq: 1,
            res_name: "ALA".to_string(),
            chain_id: 'A',
            het: false,
            x,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            temp_factor: 12.5,
            i_code: None,
            element: element.to_string(),
            charge: 0,
            anisotropy: None,
        }
    }

    #[test]
    fn from_record_copies_fields_and_derives_mass() {
        let residue_id = dummy_residue_id(1);
        let atom = Atom::from_record(&record(7, "CA", "C", 1.5), Molecule::Residue(residue_id))
            .unwrap();

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.position, Point3::new(1.5, 0.0, 0.0));
        assert_eq!(atom.temp_factor, 12.5);
        assert_eq!(atom.mass, 12.0107);
        assert_eq!(atom.molecule(), Molecule::Residue(residue_id));
        assert!(atom.bonds().is_empty());
    }

    #[test]
    fn from_record_fails_for_unknown_element() {
        let result = Atom::from_record(
            &record(3, "XX", "QQ", 0.0),
            Molecule::Residue(dummy_residue_id(1)),
        );
        assert_eq!(
            result.unwrap_err(),
            UnknownElementError {
                serial: 3,
                element: "QQ".to_string()
            }
        );
    }

    #[test]
    fn distance_to_is_euclidean() {
        let residue = Molecule::Residue(dummy_residue_id(1));
        let a = Atom::from_record(&record(1, "N", "N", 0.0), residue).unwrap();
        let mut b_record = record(2, "CA", "C", 3.0);
        b_record.y = 4.0;
        let b = Atom::from_record(&b_record, residue).unwrap();
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn molecule_accessors_split_residue_and_het() {
        let residue = Molecule::Residue(dummy_residue_id(4));
        assert_eq!(residue.residue(), Some(dummy_residue_id(4)));
        assert_eq!(residue.het(), None);
    }

    #[test]
    fn hydrogen_detection_uses_element() {
        let residue = Molecule::Residue(dummy_residue_id(1));
        let h = Atom::from_record(&record(1, "HA", "H", 0.0), residue).unwrap();
        let hg = Atom::from_record(&record(2, "HG", "HG", 0.0), residue).unwrap();
        assert!(h.is_hydrogen());
        assert!(!hg.is_hydrogen());
    }
}
