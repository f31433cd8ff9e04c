use super::ids::AtomId;
use std::fmt;

/// How a bond was classified when it was created.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BondKind {
    #[default]
    Unclassified,
    Peptide,
    Disulphide {
        specified_distance: Option<f64>,
    },
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BondKind::Unclassified => "Unclassified",
                BondKind::Peptide => "Peptide",
                BondKind::Disulphide { .. } => "Disulphide",
            }
        )
    }
}

/// A covalent, or similarly strong, bond between exactly two atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalBond {
    atoms: [AtomId; 2],
    pub peptide: bool,
    pub cis: bool,
    /// Omega torsion reported by a cis-peptide annotation.
    pub cis_angle: Option<f64>,
    pub disulphide: bool,
    /// Distance taken from an annotation record, never computed from coordinates.
    pub specified_distance: Option<f64>,
}

impl ChemicalBond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, kind: BondKind) -> Self {
        let (peptide, disulphide, specified_distance) = match kind {
            BondKind::Unclassified => (false, false, None),
            BondKind::Peptide => (true, false, None),
            BondKind::Disulphide { specified_distance } => (false, true, specified_distance),
        };
        Self {
            atoms: [atom1_id, atom2_id],
            peptide,
            cis: false,
            cis_angle: None,
            disulphide,
            specified_distance,
        }
    }

    pub fn atoms(&self) -> [AtomId; 2] {
        self.atoms
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms[0] == atom_id || self.atoms[1] == atom_id
    }

    /// Returns the atom on the other end of the bond, if `atom_id` is one of its ends.
    pub fn partner(&self, atom_id: AtomId) -> Option<AtomId> {
        match self.atoms {
            [a, b] if a == atom_id => Some(b),
            [a, b] if b == atom_id => Some(a),
            _ => None,
        }
    }

    pub fn connects(&self, atom1_id: AtomId, atom2_id: AtomId) -> bool {
        self.partner(atom1_id) == Some(atom2_id)
    }

    pub(crate) fn mark_cis(&mut self, angle: Option<f64>) {
        self.cis = true;
        self.cis_angle = angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_unclassified_bond_has_no_flags() {
        let bond = ChemicalBond::new(dummy_atom_id(1), dummy_atom_id(2), BondKind::Unclassified);
        assert!(!bond.peptide);
        assert!(!bond.cis);
        assert!(!bond.disulphide);
        assert_eq!(bond.cis_angle, None);
        assert_eq!(bond.specified_distance, None);
    }

    #[test]
    fn peptide_and_disulphide_kinds_set_their_flags() {
        let peptide = ChemicalBond::new(dummy_atom_id(1), dummy_atom_id(2), BondKind::Peptide);
        assert!(peptide.peptide);
        assert!(!peptide.disulphide);

        let ss = ChemicalBond::new(
            dummy_atom_id(3),
            dummy_atom_id(4),
            BondKind::Disulphide {
                specified_distance: Some(2.04),
            },
        );
        assert!(ss.disulphide);
        assert!(!ss.peptide);
        assert_eq!(ss.specified_distance, Some(2.04));
    }

    #[test]
    fn partner_and_connects_are_symmetric() {
        let a = dummy_atom_id(10);
        let b = dummy_atom_id(20);
        let unrelated = dummy_atom_id(30);
        let bond = ChemicalBond::new(a, b, BondKind::default());

        assert_eq!(bond.partner(a), Some(b));
        assert_eq!(bond.partner(b), Some(a));
        assert_eq!(bond.partner(unrelated), None);
        assert!(bond.connects(a, b));
        assert!(bond.connects(b, a));
        assert!(!bond.connects(a, unrelated));
        assert!(bond.contains(a) && bond.contains(b) && !bond.contains(unrelated));
    }

    #[test]
    fn mark_cis_sets_flag_and_angle() {
        let mut bond = ChemicalBond::new(dummy_atom_id(1), dummy_atom_id(2), BondKind::Peptide);
        bond.mark_cis(Some(-3.5));
        assert!(bond.cis);
        assert_eq!(bond.cis_angle, Some(-3.5));
    }

    #[test]
    fn bond_kind_display_outputs_expected_strings() {
        assert_eq!(BondKind::Unclassified.to_string(), "Unclassified");
        assert_eq!(BondKind::Peptide.to_string(), "Peptide");
        assert_eq!(
            BondKind::Disulphide {
                specified_distance: None
            }
            .to_string(),
            "Disulphide"
        );
    }
}
