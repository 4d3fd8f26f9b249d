/*
 * serialize.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * JSON export of blueprint data.
 */

//! JSON export.
//!
//! Serializes the whole document — project metadata, the accumulated
//! declaration list, and every dependency graph with its color table
//! and legend — into one `blueprint_data.json` artifact.
//!
//! The export must not fail on any legal node: node references collapse
//! to identifiers, unrecognized metadata degrades to its best-effort
//! JSON form, and authored boolean flags appear only when set so the
//! output mirrors what the document actually says.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use blueprint_depgraph::{DepGraph, Node};

use crate::color::ColorSpec;
use crate::document::{Document, LegendEntry};
use crate::error::Result;

/// Name of the JSON export artifact.
pub const EXPORT_FILE_NAME: &str = "blueprint_data.json";

/// Name of the plain-text declaration list artifact.
pub const DECLS_FILE_NAME: &str = "lean_decls";

#[derive(Debug, Serialize)]
pub struct ProjectMetadataData {
    pub project_home: Option<String>,
    pub project_github: Option<String>,
    pub project_dochome: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NodeData {
    pub id: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Identifier tail, emitted only when there is no caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub userdata: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub edges: Vec<(String, String)>,
    pub proof_edges: Vec<(String, String)>,
    pub node_count: usize,
    pub edge_count: usize,
    pub proof_edge_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DepGraphData {
    pub colors: IndexMap<String, ColorSpec>,
    pub legend: Vec<LegendEntry>,
    pub graphs: IndexMap<String, GraphData>,
}

/// Top-level structure of `blueprint_data.json`.
#[derive(Debug, Serialize)]
pub struct ExportData {
    pub project_metadata: ProjectMetadataData,
    pub lean_decls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_graph: Option<DepGraphData>,
}

/// Serialize one node: identity, kind, caption or title, and all
/// metadata as plain JSON.
pub fn serialize_node(node: &Node) -> NodeData {
    let mut userdata: IndexMap<String, serde_json::Value> = IndexMap::new();
    let meta = &node.meta;

    if meta.leanok {
        userdata.insert("leanok".into(), true.into());
    }
    if meta.mathlibok {
        userdata.insert("mathlibok".into(), true.into());
    }
    if meta.notready {
        userdata.insert("notready".into(), true.into());
    }
    if let Some(issue) = &meta.issue {
        userdata.insert("issue".into(), issue.clone().into());
    }
    if !meta.lean_decls.is_empty() {
        userdata.insert("leandecls".into(), meta.lean_decls.clone().into());
    }
    if !meta.uses.is_empty() {
        let uses: Vec<String> = meta.uses.iter().map(|u| u.to_string()).collect();
        userdata.insert("uses".into(), uses.into());
    }
    if let Some(proof) = &meta.proved_by {
        userdata.insert("proved_by".into(), proof.to_string().into());
    }
    if !meta.lean_urls.is_empty() {
        let urls: Vec<serde_json::Value> = meta
            .lean_urls
            .iter()
            .map(|(name, url)| serde_json::json!([name, url]))
            .collect();
        userdata.insert("lean_urls".into(), urls.into());
    }

    userdata.insert("can_state".into(), meta.can_state.into());
    userdata.insert("can_prove".into(), meta.can_prove.into());
    userdata.insert("proved".into(), meta.proved.into());
    userdata.insert("fully_proved".into(), meta.fully_proved.into());

    for (key, value) in &meta.extra {
        userdata.insert(key.clone(), value.to_json());
    }

    NodeData {
        id: node.id.to_string(),
        kind: node.kind.as_str(),
        caption: node.caption.clone(),
        title: match node.caption {
            Some(_) => None,
            None => Some(node.id.tail().to_string()),
        },
        userdata,
    }
}

/// Serialize a graph: all nodes plus edge and proof-edge identifier
/// pairs, with cardinalities.
pub fn serialize_graph(graph: &DepGraph) -> GraphData {
    let nodes: Vec<NodeData> = graph.nodes().map(serialize_node).collect();
    let edges: Vec<(String, String)> = graph
        .edges()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    let proof_edges: Vec<(String, String)> = graph
        .proof_edges()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();

    GraphData {
        node_count: nodes.len(),
        edge_count: edges.len(),
        proof_edge_count: proof_edges.len(),
        nodes,
        edges,
        proof_edges,
    }
}

/// Assemble the full export structure for a document.
///
/// The `dep_graph` key is absent when the document has no
/// dependency-graph section.
pub fn build_export(doc: &Document) -> ExportData {
    let dep_graph = doc.dep_graph.as_ref().map(|section| DepGraphData {
        colors: section
            .colors
            .iter()
            .map(|(tag, spec)| (tag.to_string(), spec.clone()))
            .collect(),
        legend: section.legend.clone(),
        graphs: section
            .graphs
            .iter()
            .map(|(name, graph)| (name.clone(), serialize_graph(graph)))
            .collect(),
    });

    ExportData {
        project_metadata: ProjectMetadataData {
            project_home: doc.project.home.clone(),
            project_github: doc.project.github.clone(),
            project_dochome: doc.project.dochome.clone(),
        },
        lean_decls: doc.lean_decls.clone(),
        dep_graph,
    }
}

/// Write `blueprint_data.json` into the document's output directory.
pub fn write_export(doc: &Document) -> Result<PathBuf> {
    let path = doc.out_dir.join(EXPORT_FILE_NAME);
    let data = build_export(doc);
    let json = serde_json::to_string_pretty(&data)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Write the newline-joined declaration list into the document's output
/// directory.
pub fn write_lean_decls(doc: &Document) -> Result<PathBuf> {
    let path = doc.out_dir.join(DECLS_FILE_NAME);
    fs::write(&path, doc.lean_decls.join("\n"))?;
    Ok(path)
}
