use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Payload of a tree node: a symbol leaf or the merge of two subtrees.
///
/// A node with exactly one child cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<S> {
    Leaf(S),
    Internal { left: Index, right: Index },
}

/// Tree node in the arena-based Huffman tree.
#[derive(Debug, Clone)]
pub struct TreeNode<S> {
    /// Leaf frequency, or the sum of both children's weights
    pub weight: u64,
    pub kind: NodeKind<S>,
}

impl<S> TreeNode<S> {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn symbol(&self) -> Option<&S> {
        match &self.kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(Index, Index)> {
        match self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }
}

/// Arena-based Huffman tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// The tree owns every node; children are referenced by arena index.
#[derive(Debug)]
pub struct HuffmanTree<S> {
    arena: Arena<TreeNode<S>>,
    root: Option<Index>,
}

impl<S> Default for HuffmanTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HuffmanTree<S> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            arena: Arena::with_capacity(nodes),
            root: None,
        }
    }

    pub fn insert_leaf(&mut self, symbol: S, weight: u64) -> Index {
        self.arena.insert(TreeNode {
            weight,
            kind: NodeKind::Leaf(symbol),
        })
    }

    /// Inserts an internal node whose weight is the sum of its children.
    pub fn insert_internal(&mut self, left: Index, right: Index) -> DomainResult<Index> {
        let left_weight = self.weight_of(left)?;
        let right_weight = self.weight_of(right)?;
        let weight = left_weight
            .checked_add(right_weight)
            .ok_or(DomainError::WeightOverflow)?;
        Ok(self.arena.insert(TreeNode {
            weight,
            kind: NodeKind::Internal { left, right },
        }))
    }

    pub fn set_root(&mut self, root: Index) -> DomainResult<()> {
        if !self.arena.contains(root) {
            return Err(DomainError::UnknownNode);
        }
        self.root = Some(root);
        Ok(())
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<S>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode<S>> {
        self.root.and_then(|idx| self.arena.get(idx))
    }

    /// Total weight of the tree, 0 for an empty tree.
    pub fn weight(&self) -> u64 {
        self.root_node().map_or(0, |node| node.weight)
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|(_, node)| node.is_leaf()).count()
    }

    fn weight_of(&self, idx: Index) -> DomainResult<u64> {
        self.arena
            .get(idx)
            .map(|node| node.weight)
            .ok_or(DomainError::UnknownNode)
    }

    pub fn iter(&self) -> TreeIterator<'_, S> {
        TreeIterator::new(self)
    }

    /// Symbols in left-to-right leaf order.
    pub fn leaves(&self) -> impl Iterator<Item = &S> + '_ {
        self.iter().filter_map(|(_, node)| node.symbol())
    }

    /// Height in edges: 0 for a lone leaf, and for an empty tree.
    ///
    /// Iterative: chain shaped trees reach depth n - 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 0usize));
        }
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some((left, right)) = self.get_node(idx).and_then(TreeNode::children) {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
        }
        max_depth
    }

    /// Checks the strict binary shape reachable from the root:
    /// every child index resolves, every internal weight is the sum of its
    /// children, and every arena node is reachable.
    pub fn verify(&self) -> DomainResult<()> {
        let mut reachable = 0;
        for (_, node) in self.iter() {
            reachable += 1;
            if let Some((left, right)) = node.children() {
                let sum = self
                    .weight_of(left)?
                    .checked_add(self.weight_of(right)?)
                    .ok_or(DomainError::WeightOverflow)?;
                if sum != node.weight {
                    return Err(DomainError::InvalidInput(format!(
                        "internal weight {} differs from children sum {}",
                        node.weight, sum
                    )));
                }
            }
        }
        if reachable != self.arena.len() {
            return Err(DomainError::UnknownNode);
        }
        Ok(())
    }
}

/// Pre-order, left-first traversal over `(index, node)` pairs.
pub struct TreeIterator<'a, S> {
    tree: &'a HuffmanTree<S>,
    stack: Vec<Index>,
}

impl<'a, S> TreeIterator<'a, S> {
    fn new(tree: &'a HuffmanTree<S>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, S> Iterator for TreeIterator<'a, S> {
    type Item = (Index, &'a TreeNode<S>);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        if let Some((left, right)) = node.children() {
            // right first so the left subtree is popped next
            self.stack.push(right);
            self.stack.push(left);
        }
        Some((current_idx, node))
    }
}
