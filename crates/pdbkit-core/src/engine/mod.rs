//! # Engine Module
//!
//! Turns pre-tokenized records into a sealed [`Model`](crate::core::models::model::Model).
//!
//! ## Overview
//!
//! Assembly runs in a fixed order: chains and residues, het groups, the flat atom
//! list, sites, site/ligand annotations from the structure's remarks, helices and
//! sheets, and finally four additive bonding passes (explicit connectivity, residue
//! templates, peptide bonds, annotated special bonds). The bond graph is sealed once
//! the passes finish; the resulting model is read-only and safe to share between
//! threads.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Remark number, contact parameters and bonding templates
//! - **Error Handling** ([`error`]) - Assembly failures
//! - **Assembly** - `Structure::from_records` / `Model::from_records`
//! - **Bonding** - The four bond inference passes
//! - **Annotation** - Resolution of site remarks onto het groups

pub(crate) mod annotation;
mod assembly;
pub(crate) mod bonding;
pub mod config;
pub mod error;
