/*
 * command.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markup-command semantics for blueprint documents.
 */

//! Markup-command semantics.
//!
//! The markup engine parses commands out of the document; this module
//! is what they *do*. Document-level commands set project URLs and
//! color overrides; node-level commands attach status flags,
//! declaration lists, prerequisites, and issue references to the
//! enclosing statement.
//!
//! Normalization happens here, once, so every downstream consumer sees
//! clean values: repository URLs lose a trailing `/`, issue numbers
//! lose a leading `#`, declaration names are trimmed, and `\mathlibok`
//! implies `\leanok`.

use blueprint_depgraph::{Node, NodeId};

use crate::document::Document;

/// A command that applies to the document as a whole.
#[derive(Debug, Clone)]
pub enum DocumentCommand {
    /// `\home{url}`
    Home(String),
    /// `\github{url}`
    Github(String),
    /// `\dochome{url}`
    DocHome(String),
    /// `\graphcolor{tag}{color}{description}`
    GraphColor {
        tag: String,
        color: String,
        description: String,
    },
}

/// A command that applies to the enclosing statement node.
#[derive(Debug, Clone)]
pub enum NodeCommand {
    /// `\leanok`
    LeanOk,
    /// `\mathlibok`
    MathlibOk,
    /// `\notready`
    NotReady,
    /// `\lean{decl, ...}`
    Lean(Vec<String>),
    /// `\discussion{issue}`
    Discussion(String),
    /// `\uses{label, ...}`
    Uses(Vec<NodeId>),
    /// `\proves` back-reference from a proof environment
    ProvedBy(NodeId),
}

/// Apply a document-level command.
pub fn apply_document_command(doc: &mut Document, command: DocumentCommand) {
    match command {
        DocumentCommand::Home(url) => {
            doc.project.home = Some(url);
        }
        DocumentCommand::Github(url) => {
            doc.project.github = Some(url.trim_end_matches('/').to_string());
        }
        DocumentCommand::DocHome(url) => {
            doc.project.dochome = Some(url);
        }
        DocumentCommand::GraphColor {
            tag,
            color,
            description,
        } => {
            doc.dep_graph_mut().colors.set(tag, color, description);
        }
    }
}

/// Apply a node-level command to `node`.
///
/// The document is also updated where a command has a document-wide
/// effect (`\lean` accumulates the global declaration list).
pub fn apply_node_command(doc: &mut Document, node: &mut Node, command: NodeCommand) {
    match command {
        NodeCommand::LeanOk => {
            node.meta.leanok = true;
        }
        NodeCommand::MathlibOk => {
            node.meta.leanok = true;
            node.meta.mathlibok = true;
        }
        NodeCommand::NotReady => {
            node.meta.notready = true;
        }
        NodeCommand::Lean(decls) => {
            let decls: Vec<String> = decls.iter().map(|d| d.trim().to_string()).collect();
            doc.lean_decls.extend(decls.iter().cloned());
            node.meta.lean_decls = decls;
        }
        NodeCommand::Discussion(issue) => {
            node.meta.issue = Some(issue.trim_start_matches('#').trim().to_string());
        }
        NodeCommand::Uses(ids) => {
            node.meta.uses.extend(ids);
        }
        NodeCommand::ProvedBy(proof) => {
            node.meta.proved_by = Some(proof);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_depgraph::NodeKind;

    fn make_doc() -> Document {
        Document::new("/tmp/out")
    }

    #[test]
    fn test_github_strips_trailing_slash() {
        let mut doc = make_doc();
        apply_document_command(
            &mut doc,
            DocumentCommand::Github("https://github.com/org/proj/".into()),
        );
        assert_eq!(
            doc.project.github.as_deref(),
            Some("https://github.com/org/proj")
        );
    }

    #[test]
    fn test_mathlibok_implies_leanok() {
        let mut doc = make_doc();
        let mut node = Node::new("thm:a", NodeKind::Theorem);
        apply_node_command(&mut doc, &mut node, NodeCommand::MathlibOk);
        assert!(node.meta.mathlibok);
        assert!(node.meta.leanok);
    }

    #[test]
    fn test_lean_trims_and_accumulates_globally() {
        let mut doc = make_doc();
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        let mut b = Node::new("thm:b", NodeKind::Theorem);
        apply_node_command(
            &mut doc,
            &mut a,
            NodeCommand::Lean(vec![" Foo.bar ".into(), "Foo.baz".into()]),
        );
        apply_node_command(&mut doc, &mut b, NodeCommand::Lean(vec!["Qux.quux".into()]));

        assert_eq!(a.meta.lean_decls, vec!["Foo.bar", "Foo.baz"]);
        assert_eq!(doc.lean_decls, vec!["Foo.bar", "Foo.baz", "Qux.quux"]);
    }

    #[test]
    fn test_discussion_strips_hash() {
        let mut doc = make_doc();
        let mut node = Node::new("thm:a", NodeKind::Theorem);
        apply_node_command(&mut doc, &mut node, NodeCommand::Discussion("#42 ".into()));
        assert_eq!(node.meta.issue.as_deref(), Some("42"));
    }

    #[test]
    fn test_graphcolor_overrides_table() {
        let mut doc = make_doc();
        apply_document_command(
            &mut doc,
            DocumentCommand::GraphColor {
                tag: "stated".into(),
                color: "teal".into(),
                description: "Teal".into(),
            },
        );
        let section = doc.dep_graph.as_ref().unwrap();
        assert_eq!(section.colors.get("stated").unwrap().color, "teal");
    }

    #[test]
    fn test_uses_and_proved_by() {
        let mut doc = make_doc();
        let mut node = Node::new("thm:a", NodeKind::Theorem);
        apply_node_command(
            &mut doc,
            &mut node,
            NodeCommand::Uses(vec![NodeId::new("lem:b")]),
        );
        apply_node_command(
            &mut doc,
            &mut node,
            NodeCommand::ProvedBy(NodeId::new("proof:a")),
        );
        assert_eq!(node.meta.uses, vec![NodeId::new("lem:b")]);
        assert_eq!(node.meta.proved_by, Some(NodeId::new("proof:a")));
    }
}
