//! # Core Module
//!
//! Stateless building blocks of the library: the entity model, the record types it
//! is assembled from, static chemistry tables and distance queries.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Structures, models, chains, residues, hets, atoms and bonds
//! - **Input Records** ([`records`]) - Pre-tokenized records handed over by a parser
//! - **Chemistry Tables** ([`topology`]) - Element masses, residue names and bonding templates
//! - **Spatial Queries** ([`spatial`]) - Neighbour searches that skip covalent neighbours
//! - **Geometry** ([`utils`]) - Small coordinate helpers

pub mod models;
pub mod records;
pub mod spatial;
pub mod topology;
pub mod utils;
