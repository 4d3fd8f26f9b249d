//! Dependency graph data model for Lean blueprint documents
//!
//! This crate contains the graph types the blueprint annotation layer
//! operates on:
//!
//! - [`Node`] - one mathematical statement, definition, or proof, with
//!   typed formalization-status metadata ([`NodeMeta`])
//! - [`DepGraph`] - a named collection of nodes plus "uses" edges and
//!   proof edges, with ancestor and induced-subgraph queries
//!
//! The graph is built while a blueprint document is parsed; the
//! annotation layer (`blueprint-core`) then mutates the derived status
//! fields in a single post-parse pass and serializes the result.

pub mod graph;
pub mod node;

pub use graph::DepGraph;
pub use node::{MetaValue, Node, NodeId, NodeKind, NodeMeta};
