//! # pdbkit
//!
//! An in-memory object model of macromolecular structures, assembled from
//! pre-tokenized structure records.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction.
//!
//! - **[`core`]: The Foundation.** Entity data structures (`Structure`, `Model`, chains,
//!   residues, hets, atoms and bonds), the input record types, static chemistry tables
//!   and spatial queries. Nothing in `core` knows how a model is put together.
//!
//! - **[`engine`]: The Assembly Logic.** Builds models from records: groups atoms into
//!   entities, resolves annotations, infers the bond graph and seals it.
//!
//! ## Usage
//!
//! ```ignore
//! use pdbkit::core::models::structure::Structure;
//! use pdbkit::core::models::traits::AtomicStructure;
//! use pdbkit::engine::config::AssemblyConfig;
//!
//! let structure = Structure::from_records(&records, &AssemblyConfig::default())?;
//! let model = structure.model();
//! for (_, het) in model.hets_iter() {
//!     println!("{} binds {} residues", het.name, het.nearby_residues(model).len());
//! }
//! ```

pub mod core;
pub mod engine;
