//! Syntax tree contract
//!
//! The validator never parses ABC itself. It walks whatever tree the host's
//! grammar produced, looking only at node names and char offsets. Hosts can
//! hand over either a flat pre-order list or a nested tree; both are walked
//! depth first.

use serde::{Deserialize, Serialize};

use crate::text::TextSpan;

/// Node names the validator reacts to; everything else is skipped
pub mod node_names {
    /// Directive name after `%%` (`MIDI`, `pagewidth`, ...)
    pub const DIRECTIVE_KEYWORD: &str = "DirectiveKeyword";
    /// Key letter of an information field (`T`, `M`, ...)
    pub const INFO_KEY: &str = "InfoKey";
    /// Key letter of a `K:` field
    pub const KEY_INFO_KEY: &str = "KeyInfoKey";
    /// Key letter of a `V:` field
    pub const VOICE_INFO_KEY: &str = "VoiceInfoKey";
    /// Attribute name on a `%%MIDI` line
    pub const MIDI_ATTRIBUTE: &str = "MidiAttribute";
    /// Attribute value on a `%%MIDI` line
    pub const MIDI_VALUE: &str = "MidiValue";
    /// `name=value` on a `K:` field
    pub const KEY_ATTRIBUTE: &str = "KeyAttribute";
    /// `name=value` on a `V:` field
    pub const VOICE_ATTRIBUTE: &str = "VoiceAttribute";
}

/// One node: a name and a half-open char range
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub name: String,
    pub from: usize,
    pub to: usize,
}

impl SyntaxNode {
    pub fn new(name: impl Into<String>, span: TextSpan) -> Self {
        Self {
            name: name.into(),
            from: span.from,
            to: span.to,
        }
    }

    pub fn span(&self) -> TextSpan {
        TextSpan::new(self.from, self.to)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Anything that can be walked depth first
pub trait SyntaxTree {
    fn nodes(&self) -> Box<dyn Iterator<Item = &SyntaxNode> + '_>;
}

/// Pre-order node list
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FlatTree {
    nodes: Vec<SyntaxNode>,
}

impl FlatTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, span: TextSpan) {
        self.nodes.push(SyntaxNode::new(name, span));
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Vec<SyntaxNode>> for FlatTree {
    fn from(nodes: Vec<SyntaxNode>) -> Self {
        Self { nodes }
    }
}

impl SyntaxTree for FlatTree {
    fn nodes(&self) -> Box<dyn Iterator<Item = &SyntaxNode> + '_> {
        Box::new(self.nodes.iter())
    }
}

/// A node with children, as grammar hosts usually produce
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    #[serde(flatten)]
    pub node: SyntaxNode,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl SyntaxTree for TreeNode {
    fn nodes(&self) -> Box<dyn Iterator<Item = &SyntaxNode> + '_> {
        Box::new(PreOrder { stack: vec![self] })
    }
}

struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(current.children.iter().rev());
        Some(&current.node)
    }
}

/// Tree shapes accepted from JS: a node array or a nested root
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum HostTree {
    Flat(FlatTree),
    Nested(TreeNode),
}

impl SyntaxTree for HostTree {
    fn nodes(&self) -> Box<dyn Iterator<Item = &SyntaxNode> + '_> {
        match self {
            HostTree::Flat(tree) => tree.nodes(),
            HostTree::Nested(tree) => tree.nodes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, from: usize, to: usize) -> TreeNode {
        TreeNode {
            node: SyntaxNode::new(name, TextSpan::new(from, to)),
            children: Vec::new(),
        }
    }

    #[test]
    fn test_nested_tree_walks_pre_order() {
        let mut line = leaf("Line", 0, 10);
        line.children = vec![leaf("A", 0, 2), leaf("B", 3, 5)];
        line.children[0].children = vec![leaf("A1", 0, 1)];
        let root = TreeNode {
            node: SyntaxNode::new("Document", TextSpan::new(0, 20)),
            children: vec![line, leaf("C", 11, 20)],
        };

        let names: Vec<&str> = root.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Document", "Line", "A", "A1", "B", "C"]);
    }

    #[test]
    fn test_host_tree_shapes() {
        let flat: HostTree =
            serde_json::from_str(r#"[{"name":"InfoKey","from":0,"to":1}]"#).unwrap();
        assert!(matches!(flat, HostTree::Flat(_)));
        assert_eq!(flat.nodes().count(), 1);

        let nested: HostTree = serde_json::from_str(
            r#"{"name":"Doc","from":0,"to":5,"children":[{"name":"InfoKey","from":0,"to":1}]}"#,
        )
        .unwrap();
        assert!(matches!(nested, HostTree::Nested(_)));
        assert_eq!(nested.nodes().count(), 2);
    }
}
