//! # Topology Module
//!
//! Static chemical knowledge used while assembling a model.
//!
//! ## Key Components
//!
//! - [`elements`] - Atomic masses keyed by element symbol
//! - [`residues`] - Full names and one-letter codes of the standard amino acids
//! - [`registry`] - Intra-residue bonding templates, built in or loaded from TOML
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::topology::registry::TemplateRegistry;
//!
//! let mut registry = TemplateRegistry::standard();
//! registry.extend(TemplateRegistry::load(Path::new("modified_residues.toml"))?);
//! let ala = registry.get("ALA").unwrap();
//! ```

pub mod elements;
pub mod registry;
pub mod residues;
