/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Post-parse annotation pipeline for blueprint documents.
 */

//! The annotation pipeline.
//!
//! Stages run in a fixed, explicit order after the document is parsed
//! and its graphs are built:
//!
//! 1. `propagate-status` - recompute derived flags and declaration URLs
//! 2. `build-legend` - append the color legend entries
//! 3. `write-decls` - write the plain-text declaration list
//! 4. `subgraph-html` - per-node subgraph pages (only when
//!    `LEANBLUEPRINT_SUBGRAPH=1`)
//! 5. `export-json` - write `blueprint_data.json`
//!
//! Later stages may assume earlier ones completed. The output stages
//! convert their own failures into warnings: a missing artifact
//! degrades the build's outputs, it never aborts the host build.

use crate::Result;
use crate::document::Document;
use crate::serialize::{write_export, write_lean_decls};
use crate::status::{DEFAULT_DOCHOME, propagate};
use crate::subgraph::{subgraph_enabled, write_subgraph_pages};

/// One stage of the annotation pipeline.
pub trait Stage: Send + Sync {
    /// Human-readable name for this stage.
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &str;

    /// Run the stage against the document.
    fn run(&self, doc: &mut Document) -> Result<()>;
}

/// Ordered sequence of stages, run in insertion order.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Execute all stages in order.
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn run(&self, doc: &mut Document) -> Result<()> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "Running stage");
            stage.run(doc)?;
        }
        Ok(())
    }

    /// List the names of all stages in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute edge sets, derived status flags, and declaration URLs for
/// every graph.
pub struct PropagateStatusStage;

impl Stage for PropagateStatusStage {
    fn name(&self) -> &str {
        "propagate-status"
    }

    fn run(&self, doc: &mut Document) -> Result<()> {
        let dochome = doc
            .project
            .dochome
            .clone()
            .unwrap_or_else(|| DEFAULT_DOCHOME.to_string());
        if let Some(section) = &mut doc.dep_graph {
            for graph in section.graphs.values_mut() {
                graph.rebuild_edges();
                propagate(graph, &dochome);
            }
        }
        Ok(())
    }
}

/// Append the color legend entries to the graph legend.
///
/// Runs after parsing so `\graphcolor` overrides are reflected.
pub struct BuildLegendStage;

impl Stage for BuildLegendStage {
    fn name(&self) -> &str {
        "build-legend"
    }

    fn run(&self, doc: &mut Document) -> Result<()> {
        if let Some(section) = &mut doc.dep_graph {
            let entries = section.colors.legend_entries();
            section.legend.extend(entries);
        }
        Ok(())
    }
}

/// Write the plain-text declaration list.
pub struct WriteDeclsStage;

impl Stage for WriteDeclsStage {
    fn name(&self) -> &str {
        "write-decls"
    }

    fn run(&self, doc: &mut Document) -> Result<()> {
        if let Err(e) = write_lean_decls(doc) {
            tracing::warn!(error = %e, "Failed to write declaration list");
        }
        Ok(())
    }
}

/// Write per-node subgraph pages.
pub struct SubgraphHtmlStage;

impl Stage for SubgraphHtmlStage {
    fn name(&self) -> &str {
        "subgraph-html"
    }

    fn run(&self, doc: &mut Document) -> Result<()> {
        write_subgraph_pages(doc);
        Ok(())
    }
}

/// Write the JSON export artifact.
pub struct ExportJsonStage;

impl Stage for ExportJsonStage {
    fn name(&self) -> &str {
        "export-json"
    }

    fn run(&self, doc: &mut Document) -> Result<()> {
        match write_export(doc) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Exported blueprint data");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to export blueprint data");
            }
        }
        Ok(())
    }
}

/// Build the standard annotation pipeline.
///
/// The subgraph stage is included only when the environment enables it.
pub fn build_pipeline() -> Pipeline {
    build_pipeline_with(subgraph_enabled())
}

/// Build the standard pipeline with subgraph generation explicitly on
/// or off.
pub fn build_pipeline_with(subgraphs: bool) -> Pipeline {
    let mut pipeline = Pipeline::new();
    pipeline.push(Box::new(PropagateStatusStage));
    pipeline.push(Box::new(BuildLegendStage));
    pipeline.push(Box::new(WriteDeclsStage));
    if subgraphs {
        pipeline.push(Box::new(SubgraphHtmlStage));
    }
    pipeline.push(Box::new(ExportJsonStage));
    pipeline
}
