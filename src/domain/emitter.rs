//! Code emitter: walks a finished tree and reports one code per leaf.

use tracing::{debug, instrument};

use crate::domain::arena::{HuffmanTree, NodeKind};
use crate::domain::entities::{Code, CodeEntry, CodeTable};
use crate::domain::error::{DomainError, DomainResult};

/// Derives `(symbol, code)` pairs from root-to-leaf paths.
#[derive(Debug, Clone, Default)]
pub struct CodeEmitter {
    max_code_length: Option<usize>,
}

impl CodeEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject trees producing codes longer than `max` bits.
    pub fn with_max_code_length(mut self, max: Option<usize>) -> Self {
        self.max_code_length = max;
        self
    }

    /// Fail with `TreeTooDeep` if the longest code of `tree` exceeds the limit.
    ///
    /// A root leaf still gets a one-bit code.
    pub fn check_tree<S>(&self, tree: &HuffmanTree<S>) -> DomainResult<()> {
        if tree.is_empty() {
            return Ok(());
        }
        self.check_length(tree.depth().max(1))
    }

    /// Visit every leaf left to right, passing its symbol, weight and code.
    ///
    /// A tree whose root is a leaf reports that symbol with code `0`.
    pub fn for_each_code<S, F>(&self, tree: &HuffmanTree<S>, mut visit: F) -> DomainResult<()>
    where
        F: FnMut(&S, u64, &Code),
    {
        let Some(root) = tree.root() else {
            return Ok(());
        };

        let root_node = tree.get_node(root).ok_or(DomainError::UnknownNode)?;
        if let NodeKind::Leaf(symbol) = &root_node.kind {
            self.check_length(1)?;
            visit(symbol, root_node.weight, &Code::from_bits(vec![false]));
            return Ok(());
        }

        // (node, edge bit leading into it, depth of its parent)
        let mut stack = vec![(root, None, 0usize)];
        let mut path = Vec::new();

        while let Some((idx, edge, parent_depth)) = stack.pop() {
            path.truncate(parent_depth);
            if let Some(bit) = edge {
                path.push(bit);
                self.check_length(path.len())?;
            }

            let node = tree.get_node(idx).ok_or(DomainError::UnknownNode)?;
            match &node.kind {
                NodeKind::Leaf(symbol) => {
                    visit(symbol, node.weight, &Code::from_bits(path.clone()));
                }
                NodeKind::Internal { left, right } => {
                    let depth = path.len();
                    stack.push((*right, Some(true), depth));
                    stack.push((*left, Some(false), depth));
                }
            }
        }
        Ok(())
    }

    /// Collect the code table of `tree` in left-to-right leaf order.
    #[instrument(level = "debug", skip_all)]
    pub fn emit<S: Clone>(&self, tree: &HuffmanTree<S>) -> DomainResult<CodeTable<S>> {
        let mut table = CodeTable::new();
        self.for_each_code(tree, |symbol, weight, code| {
            table.push(CodeEntry {
                symbol: symbol.clone(),
                weight,
                code: code.clone(),
            });
        })?;
        debug!(codes = table.len(), max_length = table.max_length(), "codes emitted");
        Ok(table)
    }

    fn check_length(&self, depth: usize) -> DomainResult<()> {
        match self.max_code_length {
            Some(max) if depth > max => Err(DomainError::TreeTooDeep { depth, max }),
            _ => Ok(()),
        }
    }
}
