//! Parsing module for the ABC authoring assistant
//!
//! The full ABC grammar lives with the host editor. This module holds the
//! tree contract the validator consumes and a small line scanner that
//! produces such a tree when no host parser is available.

pub mod scanner;
pub mod tree;

// Re-export commonly used types
pub use scanner::scan_document;
pub use tree::{node_names, FlatTree, HostTree, SyntaxNode, SyntaxTree, TreeNode};
