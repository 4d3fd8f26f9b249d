/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Node identity, kinds, and typed formalization-status metadata.
 */

//! Node types for the blueprint dependency graph.
//!
//! Status metadata is a fixed set of typed fields ([`NodeMeta`]) for
//! every key the annotation logic reads, plus an escape-hatch map of
//! [`MetaValue`] for anything else a package attaches to a node. The
//! escape hatch keeps the lenient "serialize whatever is there"
//! contract of the export path without giving up typed access to the
//! fields that drive status propagation.

use indexmap::IndexMap;
use serde::Serialize;

/// Identifier of a node, globally unique within a document.
///
/// Identifiers follow the document's labeling scheme, typically
/// `kind:name` (e.g. `thm:main`, `def:measure`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part of the identifier after the last `:`, used as a display
    /// title when a node has no caption.
    pub fn tail(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The kind of mathematical item a node represents.
///
/// Only [`NodeKind::Definition`] changes annotation behavior (it is
/// exempt from proof coverage and has its own fill-color branch); the
/// other kinds exist for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Definition,
    Theorem,
    Lemma,
    Proposition,
    Corollary,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Definition => "definition",
            NodeKind::Theorem => "theorem",
            NodeKind::Lemma => "lemma",
            NodeKind::Proposition => "proposition",
            NodeKind::Corollary => "corollary",
        }
    }

    pub fn is_definition(&self) -> bool {
        matches!(self, NodeKind::Definition)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A free-form metadata value attached to a node outside the recognized
/// field set.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Reference to another node; serialized as its identifier.
    NodeRef(NodeId),
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// Best-effort conversion to a JSON value.
    ///
    /// Node references collapse to their identifier string. Non-finite
    /// floats have no JSON representation and fall back to their string
    /// form rather than failing the export.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MetaValue::Str(s) => serde_json::Value::String(s.clone()),
            MetaValue::Int(n) => serde_json::Value::from(*n),
            MetaValue::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(x.to_string())),
            MetaValue::Bool(b) => serde_json::Value::Bool(*b),
            MetaValue::NodeRef(id) => serde_json::Value::String(id.to_string()),
            MetaValue::List(items) => {
                serde_json::Value::Array(items.iter().map(MetaValue::to_json).collect())
            }
        }
    }
}

/// Formalization-status metadata of a node.
///
/// The first group of fields is authored directly by document markup;
/// the `can_state` / `can_prove` / `proved` / `fully_proved` group is
/// derived by status propagation and recomputed from scratch on every
/// processing pass. Derived fields must never be treated as durable
/// state.
#[derive(Debug, Clone, Default)]
pub struct NodeMeta {
    /// A formal statement of this item exists.
    pub leanok: bool,
    /// Accepted into the canonical library. Implies `leanok`.
    pub mathlibok: bool,
    /// Blocked from formalization; the blueprint needs more work.
    pub notready: bool,
    /// External issue-tracker reference (number, without leading `#`).
    pub issue: Option<String>,
    /// Formal declaration names attached to this node, in markup order.
    pub lean_decls: Vec<String>,
    /// Direct prerequisites (the "uses" relation).
    pub uses: Vec<NodeId>,
    /// The node holding this statement's proof, if any.
    pub proved_by: Option<NodeId>,
    /// `(declaration, documentation url)` pairs, built during propagation.
    pub lean_urls: Vec<(String, String)>,

    // Derived status flags; see blueprint-core's status propagator.
    pub can_state: bool,
    pub can_prove: bool,
    pub proved: bool,
    pub fully_proved: bool,

    /// Anything else a package attached to this node.
    pub extra: IndexMap<String, MetaValue>,
}

/// One node of a blueprint dependency graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Human-readable caption, when the document provides one.
    pub caption: Option<String>,
    pub meta: NodeMeta,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            caption: None,
            meta: NodeMeta::default(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Display title: the caption when present, otherwise the identifier
    /// tail.
    pub fn title(&self) -> &str {
        match &self.caption {
            Some(caption) => caption.as_str(),
            None => self.id.tail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_tail() {
        assert_eq!(NodeId::new("thm:main").tail(), "main");
        assert_eq!(NodeId::new("plain").tail(), "plain");
        assert_eq!(NodeId::new("a:b:c").tail(), "c");
    }

    #[test]
    fn test_title_falls_back_to_id_tail() {
        let node = Node::new("lem:aux", NodeKind::Lemma);
        assert_eq!(node.title(), "aux");

        let node = Node::new("lem:aux", NodeKind::Lemma).with_caption("Auxiliary lemma");
        assert_eq!(node.title(), "Auxiliary lemma");
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(NodeKind::Definition.as_str(), "definition");
        assert!(NodeKind::Definition.is_definition());
        assert!(!NodeKind::Theorem.is_definition());
    }

    #[test]
    fn test_meta_value_to_json() {
        assert_eq!(
            MetaValue::Str("x".into()).to_json(),
            serde_json::json!("x")
        );
        assert_eq!(MetaValue::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(MetaValue::Bool(true).to_json(), serde_json::json!(true));
        assert_eq!(
            MetaValue::NodeRef(NodeId::new("thm:a")).to_json(),
            serde_json::json!("thm:a")
        );
        assert_eq!(
            MetaValue::List(vec![MetaValue::Int(1), MetaValue::Str("s".into())]).to_json(),
            serde_json::json!([1, "s"])
        );
    }

    #[test]
    fn test_meta_value_nan_degrades_to_string() {
        let value = MetaValue::Float(f64::NAN).to_json();
        assert!(value.is_string());
    }
}
