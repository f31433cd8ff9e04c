//! Distance queries that ignore an atom's covalent neighbourhood.
//!
//! A contact between two atoms only means something if they are not already
//! bonded to each other (directly or through a short path). Every query here
//! first builds the *covalent shell* of an atom, the atoms reachable within a
//! given number of bonds, and then scans the model for atoms inside the cutoff.

use crate::core::models::ids::AtomId;
use crate::core::models::model::Model;
use serde::Deserialize;
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters of the contact queries, fixed per model at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactParams {
    /// Bond depth excluded around each atom when counting contacts.
    pub exclusion_depth: usize,
    /// Default distance used by het neighbourhood queries, in Angstroms.
    pub nearby_residue_cutoff: f64,
    /// Bond depth excluded around each het atom in neighbourhood queries.
    pub nearby_residue_exclusion_depth: usize,
}

impl Default for ContactParams {
    fn default() -> Self {
        Self {
            exclusion_depth: 3,
            nearby_residue_cutoff: 3.0,
            nearby_residue_exclusion_depth: 1,
        }
    }
}

/// Atoms reachable from `atom_id` through at most `depth` bonds, including itself.
pub fn covalent_shell(model: &Model, atom_id: AtomId, depth: usize) -> HashSet<AtomId> {
    let mut shell = HashSet::from([atom_id]);
    let mut frontier = vec![atom_id];

    for _ in 0..depth {
        let mut next = Vec::new();
        for id in frontier {
            for neighbor in model.bonded_atoms(id) {
                if shell.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    shell
}

/// Atoms of the model within `cutoff` of `atom_id` and outside its covalent
/// shell of the given `depth`, in model order.
///
/// The shell always contains the atom itself, so the result never does.
pub fn nearby_atoms(model: &Model, atom_id: AtomId, cutoff: f64, depth: usize) -> Vec<AtomId> {
    let Some(center) = model.atom(atom_id) else {
        return Vec::new();
    };
    let excluded = covalent_shell(model, atom_id, depth);

    model
        .atoms_in_order()
        .filter(|(id, atom)| !excluded.contains(id) && atom.distance_to(center) <= cutoff)
        .map(|(id, _)| id)
        .collect()
}

/// Sums, over `atoms`, the nearby atoms accepted by `accept`.
pub fn count_contacts<F>(
    model: &Model,
    atoms: &[AtomId],
    cutoff: f64,
    depth: usize,
    accept: F,
) -> usize
where
    F: Fn(AtomId) -> bool + Sync,
{
    let per_atom = |atom_id: &AtomId| {
        nearby_atoms(model, *atom_id, cutoff, depth)
            .into_iter()
            .filter(|&id| accept(id))
            .count()
    };

    #[cfg(feature = "parallel")]
    {
        atoms.par_iter().map(per_atom).sum()
    }
    #[cfg(not(feature = "parallel"))]
    {
        atoms.iter().map(per_atom).sum()
    }
}
