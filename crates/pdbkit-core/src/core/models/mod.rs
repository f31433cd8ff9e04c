//! # Core Models Module
//!
//! Data structures representing one parsed macromolecular structure.
//!
//! ## Overview
//!
//! A [`structure::Structure`] holds one or more [`model::Model`]s. Each model is an
//! arena owning its atoms, bonds, residues, het groups and chains; entities point at
//! each other through the typed ids in [`ids`], and every cross-entity lookup goes
//! through the owning model.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atoms with coordinates, element data and incident bonds
//! - [`bond`] - Undirected bonds with peptide, cis and disulphide annotations
//! - [`residue`] - Polymer residues and non-polymer het groups
//! - [`chain`] - Polymer chains with their residues and secondary structure
//! - [`secondary`] - Helices, strands and sheets
//! - [`site`] - Named sites declared by the structure's site records
//! - [`traits`] - Queries shared by every collection of atoms or residues
//! - [`model`] - The arena tying everything together
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::models::traits::{AtomicStructure, ResiduicStructure};
//!
//! let model = structure.model();
//! let chain_id = model.find_chain_by_id('A').unwrap();
//! let chain = model.chain(chain_id).unwrap();
//! println!("{} residues, {:.1} Da", chain.len(), chain.mass(model));
//! ```

pub mod atom;
pub mod bond;
pub mod chain;
pub mod ids;
pub mod model;
pub mod residue;
pub mod secondary;
pub mod site;
pub mod structure;
pub mod traits;
