use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

type TemplateTable = &'static [(&'static str, &'static [&'static str])];

/// Intra-residue heavy-atom connectivity of the standard amino acids.
///
/// Each entry lists an atom name and the atom names it bonds to. Every bond is
/// listed once; bonding is undirected.
#[rustfmt::skip]
static STANDARD_TEMPLATES: Map<&'static str, TemplateTable> = phf_map! {
    "ALA" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"])],
    "ARG" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD"]), ("CD", &["NE"]), ("NE", &["CZ"]),
               ("CZ", &["NH1", "NH2"])],
    "ASN" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["OD1", "ND2"])],
    "ASP" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["OD1", "OD2"])],
    "CYS" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["SG"])],
    "GLN" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD"]), ("CD", &["OE1", "NE2"])],
    "GLU" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD"]), ("CD", &["OE1", "OE2"])],
    "GLY" => &[("N", &["CA"]), ("CA", &["C"]), ("C", &["O", "OXT"])],
    "HIS" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["ND1", "CD2"]), ("ND1", &["CE1"]),
               ("CD2", &["NE2"]), ("CE1", &["NE2"])],
    "ILE" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG1", "CG2"]), ("CG1", &["CD1"])],
    "LEU" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD1", "CD2"])],
    "LYS" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD"]), ("CD", &["CE"]), ("CE", &["NZ"])],
    "MET" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["SD"]), ("SD", &["CE"])],
    "PHE" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD1", "CD2"]), ("CD1", &["CE1"]),
               ("CD2", &["CE2"]), ("CE1", &["CZ"]), ("CE2", &["CZ"])],
    "PRO" => &[("N", &["CA", "CD"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD"])],
    "SER" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["OG"])],
    "THR" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["OG1", "CG2"])],
    "TRP" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD1", "CD2"]), ("CD1", &["NE1"]),
               ("NE1", &["CE2"]), ("CD2", &["CE2", "CE3"]), ("CE2", &["CZ2"]),
               ("CE3", &["CZ3"]), ("CZ2", &["CH2"]), ("CZ3", &["CH2"])],
    "TYR" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG"]), ("CG", &["CD1", "CD2"]), ("CD1", &["CE1"]),
               ("CD2", &["CE2"]), ("CE1", &["CZ"]), ("CE2", &["CZ"]), ("CZ", &["OH"])],
    "VAL" => &[("N", &["CA"]), ("CA", &["C", "CB"]), ("C", &["O", "OXT"]),
               ("CB", &["CG1", "CG2"])],
};

/// Connectivity template of one residue type: atom name to the names it bonds to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ResidueTemplate {
    bonds: BTreeMap<String, Vec<String>>,
}

impl ResidueTemplate {
    pub fn new(bonds: BTreeMap<String, Vec<String>>) -> Self {
        Self { bonds }
    }

    /// Iterates over every templated `(atom, bonded atom)` name pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bonds.iter().flat_map(|(atom, partners)| {
            partners
                .iter()
                .map(move |partner| (atom.as_str(), partner.as_str()))
        })
    }

    pub fn partners_of(&self, atom_name: &str) -> Option<&[String]> {
        self.bonds.get(atom_name).map(Vec::as_slice)
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.values().map(Vec::len).sum()
    }
}

/// Lookup table of residue templates used by the template bonding pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateRegistry {
    registry: HashMap<String, ResidueTemplate>,
}

impl TemplateRegistry {
    /// Creates a registry holding the twenty standard amino acids.
    pub fn standard() -> Self {
        let registry = STANDARD_TEMPLATES
            .entries()
            .map(|(name, table)| {
                let bonds = table
                    .iter()
                    .map(|(atom, partners)| {
                        (
                            atom.to_string(),
                            partners.iter().map(|p| p.to_string()).collect(),
                        )
                    })
                    .collect();
                (name.to_string(), ResidueTemplate::new(bonds))
            })
            .collect();
        Self { registry }
    }

    /// Loads templates from a TOML file of the form `[NAME]` / `ATOM = ["BONDED", ...]`.
    pub fn load(path: &Path) -> Result<Self, TemplateLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let registry: HashMap<String, ResidueTemplate> =
            toml::from_str(&content).map_err(|e| TemplateLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Ok(Self { registry })
    }

    /// Merges `other` into this registry; templates in `other` replace same-named ones.
    pub fn extend(&mut self, other: TemplateRegistry) {
        self.registry.extend(other.registry);
    }

    pub fn insert(&mut self, residue_name: &str, template: ResidueTemplate) {
        self.registry.insert(residue_name.to_string(), template);
    }

    pub fn get(&self, residue_name: &str) -> Option<&ResidueTemplate> {
        self.registry.get(residue_name)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn standard_registry_covers_twenty_amino_acids() {
        let registry = TemplateRegistry::standard();
        assert_eq!(registry.len(), 20);
        assert!(registry.get("ALA").is_some());
        assert!(registry.get("HEM").is_none());
    }

    #[test]
    fn standard_templates_have_expected_bond_counts() {
        let registry = TemplateRegistry::standard();
        assert_eq!(registry.get("GLY").unwrap().bond_count(), 4);
        assert_eq!(registry.get("ALA").unwrap().bond_count(), 5);
        assert_eq!(registry.get("TRP").unwrap().bond_count(), 16);
    }

    #[test]
    fn proline_ring_closes_on_backbone_nitrogen() {
        let registry = TemplateRegistry::standard();
        let pro = registry.get("PRO").unwrap();
        assert!(pro.pairs().any(|(a, b)| a == "N" && b == "CD"));
        assert_eq!(pro.partners_of("N").unwrap(), &["CA", "CD"]);
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("templates.toml");
        fs::write(
            &path,
            r#"
            [SEP]
            N = ["CA"]
            CA = ["C", "CB"]
            CB = ["OG"]
            OG = ["P"]
            P = ["O1P", "O2P", "O3P"]
            "#,
        )
        .unwrap();

        let registry = TemplateRegistry::load(&path).unwrap();
        let sep = registry.get("SEP").unwrap();
        assert_eq!(sep.bond_count(), 8);
        assert_eq!(sep.partners_of("P").unwrap().len(), 3);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = TemplateRegistry::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(TemplateLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[ALA]\nN = 5").unwrap();
        let result = TemplateRegistry::load(&path);
        assert!(matches!(result, Err(TemplateLoadError::Toml { .. })));
    }

    #[test]
    fn extend_overrides_same_named_templates() {
        let mut registry = TemplateRegistry::standard();
        let mut custom = TemplateRegistry::default();
        let mut bonds = BTreeMap::new();
        bonds.insert("N".to_string(), vec!["CA".to_string()]);
        custom.insert("ALA", ResidueTemplate::new(bonds));

        registry.extend(custom);

        assert_eq!(registry.len(), 20);
        assert_eq!(registry.get("ALA").unwrap().bond_count(), 1);
    }
}
