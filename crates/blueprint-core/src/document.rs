/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document-level state for blueprint annotation.
 */

//! Document-level state.
//!
//! A [`Document`] holds everything the annotation pipeline reads and
//! writes outside the graphs themselves: project URLs, the accumulated
//! list of formal declaration names, the dependency-graph section
//! (color table, legend, one graph per document section), and the
//! directory output artifacts are written to.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use blueprint_depgraph::DepGraph;

use crate::color::ColorScheme;

/// Project-level URLs set by document markup.
#[derive(Debug, Clone, Default)]
pub struct ProjectMetadata {
    /// Blueprint home page (`\home`).
    pub home: Option<String>,
    /// Repository URL, without trailing slash (`\github`).
    pub github: Option<String>,
    /// Formal-documentation site used for declaration links (`\dochome`).
    pub dochome: Option<String>,
}

/// One entry of the rendered color legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub description: String,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// The dependency-graph section of a document.
#[derive(Debug, Clone, Default)]
pub struct DepGraphSection {
    pub colors: ColorScheme,
    pub legend: Vec<LegendEntry>,
    /// Graphs keyed by section name, in document order.
    pub graphs: IndexMap<String, DepGraph>,
}

impl DepGraphSection {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A blueprint document being annotated.
#[derive(Debug, Clone)]
pub struct Document {
    pub project: ProjectMetadata,
    /// All formal declaration names referenced in the document, in
    /// markup order.
    pub lean_decls: Vec<String>,
    /// Present only when the document has dependency graphs.
    pub dep_graph: Option<DepGraphSection>,
    /// Directory the output artifacts are written to.
    pub out_dir: PathBuf,
}

impl Document {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: ProjectMetadata::default(),
            lean_decls: Vec::new(),
            dep_graph: None,
            out_dir: out_dir.into(),
        }
    }

    /// Get the dependency-graph section, creating it with default
    /// colors on first access.
    pub fn dep_graph_mut(&mut self) -> &mut DepGraphSection {
        self.dep_graph.get_or_insert_with(DepGraphSection::new)
    }

    /// Add a graph for a document section.
    pub fn add_graph(&mut self, section: impl Into<String>, graph: DepGraph) {
        self.dep_graph_mut().graphs.insert(section.into(), graph);
    }
}
