//! Pre-tokenized structure records supplied by a parsing collaborator.
//!
//! These types describe the *shape* of the data the assembly engine consumes; they carry no
//! behaviour beyond deserialization. All of them implement [`serde::Deserialize`], so a
//! collaborator may hand them over in whichever serde format it already speaks.

use serde::Deserialize;

/// Anisotropic displacement terms of a single atom.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Anisotropy {
    pub u11: f64,
    pub u22: f64,
    pub u33: f64,
    pub u12: f64,
    pub u13: f64,
    pub u23: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AtomRecord {
    pub serial: usize,
    pub name: String,
    pub res_seq: isize,
    pub res_name: String,
    pub chain_id: char,
    #[serde(default)]
    pub het: bool,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "default_occupancy")]
    pub occupancy: f64,
    #[serde(default)]
    pub temp_factor: f64,
    #[serde(default)]
    pub i_code: Option<char>,
    pub element: String,
    #[serde(default)]
    pub charge: i8,
    #[serde(default)]
    pub anisotropy: Option<Anisotropy>,
}

fn default_occupancy() -> f64 {
    1.0
}

/// A chain terminator (`TER`) record.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TerRecord {
    pub chain_id: char,
    pub res_seq: isize,
}

/// The coordinate section of one model (one NMR conformer or the sole crystal model).
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ModelRecords {
    #[serde(default)]
    pub atoms: Vec<AtomRecord>,
    #[serde(default)]
    pub ters: Vec<TerRecord>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HelixRecord {
    pub serial: usize,
    pub helix_id: String,
    pub start_residue_chain: char,
    pub start_residue_number: isize,
    pub end_residue_chain: char,
    pub end_residue_number: isize,
    #[serde(default)]
    pub helix_class: Option<u8>,
    #[serde(default)]
    pub comment: String,
}

/// Hydrogen-bond registration of a strand against its predecessor in the sheet.
///
/// Residue numbers are optional; without them the atom is the first one carrying the
/// name anywhere in the respective strand.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RegistrationRecord {
    pub current_atom: String,
    #[serde(default)]
    pub current_residue_number: Option<isize>,
    pub previous_atom: String,
    #[serde(default)]
    pub previous_residue_number: Option<isize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StrandRecord {
    pub strand_id: String,
    pub start_residue_chain: char,
    pub start_residue_number: isize,
    pub end_residue_chain: char,
    pub end_residue_number: isize,
    /// `0` for the first strand, `1` parallel, `-1` antiparallel.
    #[serde(default)]
    pub sense: i8,
    #[serde(default)]
    pub registration: Option<RegistrationRecord>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SheetRecord {
    pub sheet_id: String,
    #[serde(default)]
    pub strands: Vec<StrandRecord>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct SecondaryStructure {
    #[serde(default)]
    pub helices: Vec<HelixRecord>,
    #[serde(default)]
    pub sheets: Vec<SheetRecord>,
}

/// Explicit connectivity of one atom (`CONECT`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConnectRecord {
    pub atom_serial: usize,
    #[serde(default)]
    pub bonded_atoms: Vec<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SsBondRecord {
    pub residue_1_chain: char,
    pub residue_1_number: isize,
    pub residue_2_chain: char,
    pub residue_2_number: isize,
    #[serde(default)]
    pub disulfide_distance: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LinkRecord {
    pub residue_1_atom: usize,
    pub residue_2_atom: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CisPepRecord {
    pub residue_1_chain: char,
    pub residue_1_number: isize,
    pub residue_2_chain: char,
    pub residue_2_number: isize,
    #[serde(default)]
    pub angle_measure: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ConnectivityAnnotation {
    #[serde(default)]
    pub ssbonds: Vec<SsBondRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub cispeps: Vec<CisPepRecord>,
}

/// One row of the heterogen name table (`HETNAM`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HetNameRecord {
    pub code: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RemarkRecord {
    pub number: u16,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteResidueRecord {
    pub chain: char,
    pub residue_number: isize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteRecord {
    pub name: String,
    #[serde(default)]
    pub residues: Vec<SiteResidueRecord>,
}

/// Everything parsed from one structure source.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PdbRecords {
    #[serde(default)]
    pub models: Vec<ModelRecords>,
    #[serde(default)]
    pub sites: Vec<SiteRecord>,
    #[serde(default)]
    pub secondary_structure: SecondaryStructure,
    #[serde(default)]
    pub connections: Vec<ConnectRecord>,
    #[serde(default)]
    pub connectivity_annotation: ConnectivityAnnotation,
    #[serde(default)]
    pub het_names: Vec<HetNameRecord>,
    #[serde(default)]
    pub remarks: Vec<RemarkRecord>,
}

/// The model-independent sections of a [`PdbRecords`], shared by every model assembled from it.
#[derive(Debug, Clone, Copy)]
pub struct SharedRecords<'a> {
    pub sites: &'a [SiteRecord],
    pub secondary_structure: &'a SecondaryStructure,
    pub connections: &'a [ConnectRecord],
    pub connectivity_annotation: &'a ConnectivityAnnotation,
    pub het_names: &'a [HetNameRecord],
    pub remarks: &'a [RemarkRecord],
}

impl PdbRecords {
    pub fn shared(&self) -> SharedRecords<'_> {
        SharedRecords {
            sites: &self.sites,
            secondary_structure: &self.secondary_structure,
            connections: &self.connections,
            connectivity_annotation: &self.connectivity_annotation,
            het_names: &self.het_names,
            remarks: &self.remarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_deserialize_from_toml_with_defaults() {
        let records: PdbRecords = toml::from_str(
            r#"
            [[models]]
            [[models.atoms]]
            serial = 1
            name = "N"
            res_seq = 1
            res_name = "ALA"
            chain_id = "A"
            x = 0.0
            y = 0.0
            z = 0.0
            element = "N"

            [[remarks]]
            number = 800
            content = "SITE"
            "#,
        )
        .unwrap();

        let atom = &records.models[0].atoms[0];
        assert_eq!(atom.chain_id, 'A');
        assert!(!atom.het);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.i_code, None);
        assert!(atom.anisotropy.is_none());
        assert!(records.models[0].ters.is_empty());
        assert_eq!(records.remarks[0].number, 800);
        assert!(records.sites.is_empty());
    }

    #[test]
    fn strand_registration_is_optional() {
        let sheet: SheetRecord = toml::from_str(
            r#"
            sheet_id = "S1"
            [[strands]]
            strand_id = "1"
            start_residue_chain = "A"
            start_residue_number = 1
            end_residue_chain = "A"
            end_residue_number = 4

            [[strands]]
            strand_id = "2"
            start_residue_chain = "A"
            start_residue_number = 10
            end_residue_chain = "A"
            end_residue_number = 13
            sense = -1
            registration = { current_atom = "N", previous_atom = "O", previous_residue_number = 2 }
            "#,
        )
        .unwrap();

        assert_eq!(sheet.strands[0].sense, 0);
        assert!(sheet.strands[0].registration.is_none());
        let registration = sheet.strands[1].registration.as_ref().unwrap();
        assert_eq!(registration.previous_residue_number, Some(2));
        assert_eq!(registration.current_residue_number, None);
    }
}
