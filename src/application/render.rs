//! Human-readable rendering of trees and symbols.

use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::{HuffmanTree, NodeKind};

/// Printable form of a symbol; whitespace is shown with the same escapes
/// accepted on input.
pub fn escape_symbol(symbol: &str) -> String {
    match symbol {
        " " => "\\s".to_string(),
        "\t" => "\\t".to_string(),
        "\n" => "\\n".to_string(),
        other => other.to_string(),
    }
}

/// Convert a Huffman tree into a `termtree` for display.
///
/// Leaves render as `symbol (weight)`, internal nodes as `(weight)`.
pub fn to_display_tree<S: Display>(tree: &HuffmanTree<S>) -> Tree<String> {
    match tree.root() {
        Some(root) => build_tree(tree, root),
        None => Tree::new("Empty tree".to_string()),
    }
}

fn build_tree<S: Display>(tree: &HuffmanTree<S>, idx: Index) -> Tree<String> {
    let Some(node) = tree.get_node(idx) else {
        return Tree::new("?".to_string());
    };
    match &node.kind {
        NodeKind::Leaf(symbol) => Tree::new(format!(
            "{} ({})",
            escape_symbol(&symbol.to_string()),
            node.weight
        )),
        NodeKind::Internal { left, right } => Tree::new(format!("({})", node.weight))
            .with_leaves([build_tree(tree, *left), build_tree(tree, *right)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Symbol, TreeBuilder};

    #[test]
    fn given_tree_when_rendering_then_lists_leaves_left_to_right() {
        let symbols: Vec<Symbol<char>> = vec![Symbol::new('a', 1), Symbol::new(' ', 2)];
        let tree = TreeBuilder::new().build(&symbols).unwrap();
        let rendered = to_display_tree(&tree).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "(3)");
        assert!(lines[1].ends_with("a (1)"), "{rendered}");
        assert!(lines[2].ends_with("\\s (2)"), "{rendered}");
    }

    #[test]
    fn given_empty_tree_when_rendering_then_placeholder() {
        let tree: HuffmanTree<char> = HuffmanTree::new();
        assert_eq!(to_display_tree(&tree).to_string().trim(), "Empty tree");
    }
}
