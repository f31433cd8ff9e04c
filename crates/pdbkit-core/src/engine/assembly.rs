use super::annotation;
use super::bonding;
use super::config::AssemblyConfig;
use super::error::AssemblyError;
use crate::core::models::atom::{Atom, Molecule};
use crate::core::models::chain::Chain;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::model::Model;
use crate::core::models::residue::{Het, Residue};
use crate::core::models::secondary::{
    Helix, HelixClass, Registration, Sheet, Strand, StrandRef, StrandSense,
};
use crate::core::models::site::PdbSite;
use crate::core::models::structure::Structure;
use crate::core::models::traits::{ResidueSet, ResiduicStructure};
use crate::core::records::{
    AtomRecord, HelixRecord, HetNameRecord, ModelRecords, PdbRecords, SharedRecords, SheetRecord,
    SiteRecord, StrandRecord,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

impl Structure {
    /// Assembles every model in `records` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::NoModels`] if the records hold no model, or the
    /// first error raised while assembling a model.
    #[instrument(skip_all, name = "structure_assembly")]
    pub fn from_records(records: &PdbRecords, config: &AssemblyConfig) -> Result<Self, AssemblyError> {
        let shared = records.shared();
        let models = records
            .models
            .iter()
            .map(|model_records| Model::from_records(model_records, shared, config))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Assembled structure with {} models", models.len());
        Structure::new(models).ok_or(AssemblyError::NoModels)
    }
}

impl Model {
    /// Builds one model from its coordinate records and the records shared by
    /// every model of the structure.
    ///
    /// Entities are built first (chains, hets, sites, site annotations, helices,
    /// sheets), then bonds are inferred and the bond graph is sealed.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::UnknownElement`] if any atom carries an element
    /// with no known mass.
    #[instrument(skip_all, name = "model_assembly")]
    pub fn from_records(
        records: &ModelRecords,
        shared: SharedRecords<'_>,
        config: &AssemblyConfig,
    ) -> Result<Self, AssemblyError> {
        let mut model = Model::new(config.contacts);

        build_chains(&mut model, records)?;
        build_hets(&mut model, &records.atoms, shared.het_names)?;
        build_sites(&mut model, shared.sites);
        annotation::resolve_site_annotations(&mut model, shared.remarks, config.site_remark_number);
        build_helices(&mut model, &shared.secondary_structure.helices);
        build_sheets(&mut model, &shared.secondary_structure.sheets);
        bonding::infer_bonds(
            &mut model,
            shared.connections,
            shared.connectivity_annotation,
            &config.templates,
        );
        model.seal();

        info!(
            "Assembled model: {} chains, {} hets, {} atoms, {} bonds",
            model.chains.len(),
            model.hets.len(),
            model.atoms.len(),
            model.bond_count()
        );
        Ok(model)
    }
}

/// Groups polymer atom records into chains (by identifier) and residues (by number).
fn build_chains(model: &mut Model, records: &ModelRecords) -> Result<(), AssemblyError> {
    let mut grouped: BTreeMap<char, BTreeMap<isize, Vec<&AtomRecord>>> = BTreeMap::new();
    for record in records.atoms.iter().filter(|a| !a.het) {
        grouped
            .entry(record.chain_id)
            .or_default()
            .entry(record.res_seq)
            .or_default()
            .push(record);
    }

    for (chain_name, residues) in grouped {
        let chain_id = model.insert_chain(Chain::new(chain_name, ResidueSet::default()));

        // A chain terminus is only marked when the chain has a single terminator.
        let mut ters = records.ters.iter().filter(|t| t.chain_id == chain_name);
        let terminus = match (ters.next(), ters.next()) {
            (Some(ter), None) => Some(ter.res_seq),
            _ => None,
        };

        let mut residue_ids = Vec::with_capacity(residues.len());
        for (number, atom_records) in residues {
            let Some(first) = atom_records.first() else {
                continue;
            };
            let mut residue = Residue::new(number, &first.res_name, chain_id);
            residue.terminus = terminus == Some(number);
            let residue_id = model.insert_residue(residue);

            for record in atom_records {
                let atom_id = model.insert_atom(Atom::from_record(record, Molecule::Residue(residue_id))?);
                if let Some(residue) = model.residue_mut(residue_id) {
                    residue.add_atom(&record.name, atom_id);
                }
            }
            residue_ids.push(residue_id);
        }

        let residues = ResidueSet::new(residue_ids, model);
        if let Some(chain) = model.chain_mut(chain_id) {
            chain.residues = residues;
        }
    }
    Ok(())
}

/// Groups het atom records by (chain identifier, residue number).
fn build_hets(
    model: &mut Model,
    atoms: &[AtomRecord],
    het_names: &[HetNameRecord],
) -> Result<(), AssemblyError> {
    let mut grouped: BTreeMap<(char, isize), Vec<&AtomRecord>> = BTreeMap::new();
    for record in atoms.iter().filter(|a| a.het) {
        grouped
            .entry((record.chain_id, record.res_seq))
            .or_default()
            .push(record);
    }

    for ((chain_name, number), atom_records) in grouped {
        let Some(first) = atom_records.first() else {
            continue;
        };
        let mut het = Het::new(number, &first.res_name, chain_name);
        het.full_name = het_names
            .iter()
            .find(|h| h.code == het.name)
            .map(|h| h.full_name.clone());
        het.chain = model.find_chain_by_id(chain_name);
        let het_id = model.insert_het(het);

        for record in atom_records {
            let atom_id = model.insert_atom(Atom::from_record(record, Molecule::Het(het_id))?);
            if let Some(het) = model.het_mut(het_id) {
                het.add_atom(&record.name, atom_id);
            }
        }
    }
    Ok(())
}

fn build_sites(model: &mut Model, sites: &[SiteRecord]) {
    for record in sites {
        let mut residues = Vec::new();
        let mut hets = Vec::new();
        for entry in &record.residues {
            if let Some(residue_id) = model.find_residue(entry.chain, entry.residue_number) {
                residues.push(residue_id);
            }
            if let Some(het_id) = model.find_het(entry.chain, entry.residue_number) {
                hets.push(het_id);
            }
        }
        if residues.is_empty() {
            debug!("Discarding site {} with no resolvable residues", record.name);
            continue;
        }
        let residues = ResidueSet::new(residues, model);
        model.sites.push(PdbSite {
            name: record.name.clone(),
            residues,
            hets,
        });
    }
}

/// Residues of `chain` numbered `start..=end`; numbers with no residue are skipped.
fn residue_range(model: &Model, chain: char, start: isize, end: isize) -> Vec<ResidueId> {
    (start..=end)
        .filter_map(|number| model.find_residue(chain, number))
        .collect()
}

fn build_helices(model: &mut Model, helices: &[HelixRecord]) {
    for record in helices {
        let Some(chain_id) = model.find_chain_by_id(record.start_residue_chain) else {
            warn!(
                "Helix {} references unknown chain {}",
                record.helix_id, record.start_residue_chain
            );
            continue;
        };
        let residues = residue_range(
            model,
            record.start_residue_chain,
            record.start_residue_number,
            record.end_residue_number,
        );
        if residues.is_empty() {
            debug!("Discarding helix {} with no residues", record.helix_id);
            continue;
        }

        let class = match record.helix_class {
            None | Some(0) => HelixClass::default(),
            Some(code) => HelixClass::from_code(code).unwrap_or_else(|| {
                warn!("Helix {} has unknown class code {}", record.helix_id, code);
                HelixClass::default()
            }),
        };
        let helix = Helix {
            serial: record.serial,
            name: record.helix_id.clone(),
            chain_id,
            class,
            comment: record.comment.clone(),
            residues: ResidueSet::new(residues, model),
        };
        if let Some(chain) = model.chain_mut(chain_id) {
            chain.helices.push(helix);
        }
    }
}

/// The first atom named `atom_name` in `residues`, optionally restricted to one residue number.
fn registration_atom(
    model: &Model,
    residues: &ResidueSet,
    atom_name: &str,
    residue_number: Option<isize>,
) -> Option<AtomId> {
    residues
        .residues(model)
        .filter(|(_, r)| residue_number.is_none_or(|n| r.number == n))
        .find_map(|(_, r)| r.get_atom_ids_by_name(atom_name).first().copied())
}

fn build_strand(model: &Model, record: &StrandRecord, previous: Option<&Strand>) -> Option<Strand> {
    let Some(chain_id) = model.find_chain_by_id(record.start_residue_chain) else {
        warn!(
            "Strand {} references unknown chain {}",
            record.strand_id, record.start_residue_chain
        );
        return None;
    };
    let residues = ResidueSet::new(
        residue_range(
            model,
            record.start_residue_chain,
            record.start_residue_number,
            record.end_residue_number,
        ),
        model,
    );
    let sense = StrandSense::try_from(record.sense).unwrap_or_else(|e| {
        warn!("Strand {}: {}", record.strand_id, e);
        StrandSense::default()
    });
    let registration = previous.map(|previous| match &record.registration {
        Some(reg) => Registration {
            current: registration_atom(model, &residues, &reg.current_atom, reg.current_residue_number),
            previous: registration_atom(
                model,
                &previous.residues,
                &reg.previous_atom,
                reg.previous_residue_number,
            ),
        },
        None => Registration {
            current: None,
            previous: None,
        },
    });

    Some(Strand {
        name: record.strand_id.clone(),
        chain_id,
        sense,
        registration,
        residues,
    })
}

fn build_sheets(model: &mut Model, sheets: &[SheetRecord]) {
    for record in sheets {
        let mut built: Vec<Strand> = Vec::with_capacity(record.strands.len());
        for strand_record in &record.strands {
            if let Some(strand) = build_strand(model, strand_record, built.last()) {
                built.push(strand);
            }
        }
        // Empty strands still serve as the predecessor of the next strand above.
        let strands: Vec<Strand> = built.into_iter().filter(|s| !s.is_empty()).collect();

        let residue_ids: Vec<ResidueId> = strands
            .iter()
            .flat_map(|s| s.residue_ids().iter().copied())
            .collect();
        let sheet_index = model.sheets.len();
        for (strand_index, strand) in strands.iter().enumerate() {
            if let Some(chain) = model.chain_mut(strand.chain_id) {
                chain.strands.push(StrandRef {
                    sheet: sheet_index,
                    strand: strand_index,
                });
            }
        }
        let residues = ResidueSet::new(residue_ids, model);
        model.sheets.push(Sheet {
            name: record.sheet_id.clone(),
            strands,
            residues,
        });
    }
}
