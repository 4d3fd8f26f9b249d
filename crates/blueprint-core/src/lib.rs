//! Formalization-status annotation for Lean blueprint documents
//!
//! This crate is the annotation layer of a blueprint build: it attaches
//! formalization-status metadata to the nodes of a dependency graph
//! (built by the document layer, see `blueprint-depgraph`), propagates
//! derived readiness flags across the graph, classifies node colors,
//! and serializes everything to the build's output artifacts.
//!
//! # Architecture
//!
//! Processing is an explicit ordered [`Pipeline`] of named stages run
//! once per document after parsing:
//!
//! - [`pipeline::PropagateStatusStage`] - derived status flags
//! - [`pipeline::BuildLegendStage`] - color legend
//! - [`pipeline::WriteDeclsStage`] - plain-text declaration list
//! - [`pipeline::SubgraphHtmlStage`] - per-node subgraph pages (opt-in)
//! - [`pipeline::ExportJsonStage`] - `blueprint_data.json`
//!
//! No failure in the output stages aborts the surrounding build;
//! degraded artifacts are logged as warnings.
//!
//! # Example
//!
//! ```ignore
//! use blueprint_core::{Document, build_pipeline};
//!
//! let mut doc = Document::new(out_dir);
//! // ... document layer fills project metadata and graphs ...
//! build_pipeline().run(&mut doc)?;
//! ```

pub mod color;
pub mod command;
pub mod document;
pub mod dot;
pub mod error;
pub mod pipeline;
pub mod serialize;
pub mod status;
pub mod subgraph;

// Re-export commonly used types
pub use color::{ColorScheme, ColorSpec};
pub use command::{DocumentCommand, NodeCommand, apply_document_command, apply_node_command};
pub use document::{DepGraphSection, Document, LegendEntry, ProjectMetadata};
pub use error::{BlueprintError, Result};
pub use pipeline::{Pipeline, Stage, build_pipeline, build_pipeline_with};
pub use serialize::{build_export, serialize_graph, serialize_node, write_export};
pub use status::{DEFAULT_DOCHOME, propagate};
pub use subgraph::{SUBGRAPH_ENV, subgraph_file_name, write_subgraph_pages};
