use crate::core::models::bond::BondKind;
use crate::core::models::ids::{AtomId, BondId, ResidueId};
use crate::core::models::model::Model;
use crate::core::models::traits::{AtomicStructure, ResiduicStructure};
use crate::core::records::{ConnectRecord, ConnectivityAnnotation};
use crate::core::topology::registry::TemplateRegistry;
use tracing::{debug, info, instrument, warn};

const BACKBONE_CARBON: &str = "C";
const BACKBONE_NITROGEN: &str = "N";
const SULPHUR: &str = "S";

/// Runs the four bonding passes in order.
///
/// Passes only ever add bonds. A pair that is already bonded keeps its
/// original bond, so a later pass never re-classifies it.
#[instrument(skip_all, name = "bond_inference")]
pub(crate) fn infer_bonds(
    model: &mut Model,
    connections: &[ConnectRecord],
    annotation: &ConnectivityAnnotation,
    templates: &TemplateRegistry,
) {
    let explicit = bond_explicit_connections(model, connections);
    let templated = bond_residue_templates(model, templates);
    let peptide = bond_peptides(model);
    let annotated = bond_annotated(model, annotation);

    info!(
        "Bond inference created {} bonds ({} explicit, {} templated, {} peptide, {} annotated)",
        model.bond_count(),
        explicit,
        templated,
        peptide,
        annotated
    );
}

fn bond_pairs(model: &mut Model, pairs: &[(AtomId, AtomId)], kind: BondKind) -> usize {
    let before = model.bond_count();
    for &(atom1_id, atom2_id) in pairs {
        model.bond_atoms(atom1_id, atom2_id, kind);
    }
    model.bond_count() - before
}

fn bond_explicit_connections(model: &mut Model, connections: &[ConnectRecord]) -> usize {
    let mut pairs = Vec::new();
    for record in connections {
        let Some(atom_id) = model.find_atom_by_serial(record.atom_serial) else {
            warn!(
                "Connection record references unknown atom serial {}",
                record.atom_serial
            );
            continue;
        };
        for &serial in &record.bonded_atoms {
            match model.find_atom_by_serial(serial) {
                Some(bonded_id) => pairs.push((atom_id, bonded_id)),
                None => warn!(
                    "Connection record for atom {} references unknown atom serial {}",
                    record.atom_serial, serial
                ),
            }
        }
    }
    bond_pairs(model, &pairs, BondKind::Unclassified)
}

fn bond_residue_templates(model: &mut Model, templates: &TemplateRegistry) -> usize {
    let mut pairs = Vec::new();
    for (_, chain) in model.chains_iter() {
        for (_, residue) in chain.residues(model) {
            let Some(template) = templates.get(&residue.name) else {
                continue;
            };
            for (atom_name, partner_name) in template.pairs() {
                match (
                    residue.get_sole_atom_id_by_name(atom_name),
                    residue.get_sole_atom_id_by_name(partner_name),
                ) {
                    (Some(atom_id), Some(partner_id)) => pairs.push((atom_id, partner_id)),
                    _ if residue.get_atom_ids_by_name(atom_name).len() > 1
                        || residue.get_atom_ids_by_name(partner_name).len() > 1 =>
                    {
                        debug!(
                            "Skipping ambiguous template bond {}-{} in {} {}",
                            atom_name, partner_name, residue.name, residue.number
                        );
                    }
                    _ => {}
                }
            }
        }
    }
    bond_pairs(model, &pairs, BondKind::Unclassified)
}

/// Joins the carbonyl carbon of each residue to the amide nitrogen of the next
/// residue in its chain. Positional only: no distance check is made.
fn bond_peptides(model: &mut Model) -> usize {
    let mut pairs = Vec::new();
    for (_, chain) in model.chains_iter() {
        for window in chain.residue_ids().windows(2) {
            let carbon = model
                .residue(window[0])
                .and_then(|r| r.get_sole_atom_id_by_name(BACKBONE_CARBON));
            let nitrogen = model
                .residue(window[1])
                .and_then(|r| r.get_sole_atom_id_by_name(BACKBONE_NITROGEN));
            if let (Some(c), Some(n)) = (carbon, nitrogen) {
                pairs.push((c, n));
            }
        }
    }
    bond_pairs(model, &pairs, BondKind::Peptide)
}

fn bond_annotated(model: &mut Model, annotation: &ConnectivityAnnotation) -> usize {
    let before = model.bond_count();

    for ssbond in &annotation.ssbonds {
        let first = sole_sulphur(model, ssbond.residue_1_chain, ssbond.residue_1_number);
        let second = sole_sulphur(model, ssbond.residue_2_chain, ssbond.residue_2_number);
        match (first, second) {
            (Some(a), Some(b)) => {
                model.bond_atoms(
                    a,
                    b,
                    BondKind::Disulphide {
                        specified_distance: ssbond.disulfide_distance,
                    },
                );
            }
            _ => debug!(
                "Skipping disulphide bond {}{}-{}{}: no single sulphur atom on both residues",
                ssbond.residue_1_chain,
                ssbond.residue_1_number,
                ssbond.residue_2_chain,
                ssbond.residue_2_number
            ),
        }
    }

    for link in &annotation.links {
        match (
            model.find_atom_by_serial(link.residue_1_atom),
            model.find_atom_by_serial(link.residue_2_atom),
        ) {
            (Some(a), Some(b)) => {
                model.bond_atoms(a, b, BondKind::Unclassified);
            }
            _ => warn!(
                "Link record references unknown atom serials {} and {}",
                link.residue_1_atom, link.residue_2_atom
            ),
        }
    }

    for cispep in &annotation.cispeps {
        let first = model.find_residue(cispep.residue_1_chain, cispep.residue_1_number);
        let second = model.find_residue(cispep.residue_2_chain, cispep.residue_2_number);
        let (Some(first), Some(second)) = (first, second) else {
            warn!(
                "Cis-peptide record references unknown residues {}{} and {}{}",
                cispep.residue_1_chain,
                cispep.residue_1_number,
                cispep.residue_2_chain,
                cispep.residue_2_number
            );
            continue;
        };
        match shared_peptide_bonds(model, first, second).as_slice() {
            [bond_id] => {
                model.mark_cis(*bond_id, cispep.angle_measure);
            }
            shared => debug!(
                "Skipping cis-peptide annotation: {} shared peptide bonds",
                shared.len()
            ),
        }
    }

    model.bond_count() - before
}

fn sole_sulphur(model: &Model, chain: char, residue_number: isize) -> Option<AtomId> {
    let residue = model.residue(model.find_residue(chain, residue_number)?)?;
    match residue.atoms_by_element(model, SULPHUR).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn peptide_bonds_of(model: &Model, residue_id: ResidueId) -> Vec<BondId> {
    model
        .residue(residue_id)
        .map(|residue| {
            residue
                .bond_ids(model)
                .into_iter()
                .filter(|&id| model.bond(id).is_some_and(|b| b.peptide))
                .collect()
        })
        .unwrap_or_default()
}

fn shared_peptide_bonds(model: &Model, first: ResidueId, second: ResidueId) -> Vec<BondId> {
    let second_bonds = peptide_bonds_of(model, second);
    peptide_bonds_of(model, first)
        .into_iter()
        .filter(|id| second_bonds.contains(id))
        .collect()
}
