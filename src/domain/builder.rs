//! Tree builder: merges the two lightest pending nodes until one root remains.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::arena::HuffmanTree;
use crate::domain::entities::{SingleSymbolPolicy, Symbol};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::selector::PrioritySelector;

/// Constructs Huffman trees from frequency-sorted alphabets.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    single_symbol: SingleSymbolPolicy,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_single_symbol_policy(mut self, policy: SingleSymbolPolicy) -> Self {
        self.single_symbol = policy;
        self
    }

    /// Build the tree for `symbols`, which must be sorted by non-decreasing
    /// frequency and contain each symbol value once.
    #[instrument(level = "debug", skip_all, fields(symbols = symbols.len()))]
    pub fn build<S>(&self, symbols: &[Symbol<S>]) -> DomainResult<HuffmanTree<S>>
    where
        S: Clone + Eq + Hash + Debug,
    {
        self.validate(symbols)?;

        let mut tree = HuffmanTree::with_capacity(2 * symbols.len() - 1);

        if let [only] = symbols {
            let leaf = tree.insert_leaf(only.value.clone(), only.frequency);
            tree.set_root(leaf)?;
            debug!(symbol = ?only.value, "single symbol tree");
            return Ok(tree);
        }

        let mut selector = PrioritySelector::with_capacity(symbols.len());
        for symbol in symbols {
            let leaf = tree.insert_leaf(symbol.value.clone(), symbol.frequency);
            selector.push_leaf(leaf, symbol.frequency)?;
        }

        while !selector.is_settled() {
            let left = selector.extract_min()?;
            let right = selector.extract_min()?;
            let merged = tree.insert_internal(left.item, right.item)?;
            let weight = tree.get_node(merged).ok_or(DomainError::UnknownNode)?.weight;
            trace!(left = left.weight, right = right.weight, weight, "merge");
            selector.push_merged(merged, weight)?;
        }

        let root = selector.extract_min()?;
        tree.set_root(root.item)?;
        debug!(nodes = tree.node_count(), weight = tree.weight(), "tree built");
        Ok(tree)
    }

    fn validate<S>(&self, symbols: &[Symbol<S>]) -> DomainResult<()>
    where
        S: Eq + Hash + Debug,
    {
        if symbols.is_empty() {
            return Err(DomainError::InvalidInput("alphabet is empty".into()));
        }

        if symbols.len() == 1 && self.single_symbol == SingleSymbolPolicy::Reject {
            return Err(DomainError::InvalidInput(
                "alphabet has a single symbol".into(),
            ));
        }

        if let Some((pos, (prev, next))) = symbols
            .iter()
            .tuple_windows()
            .find_position(|(prev, next)| prev.frequency > next.frequency)
        {
            return Err(DomainError::InvalidInput(format!(
                "frequencies not sorted ascending at position {}: {:?}={} before {:?}={}",
                pos + 1,
                prev.value,
                prev.frequency,
                next.value,
                next.frequency
            )));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        if let Some(dup) = symbols.iter().find(|s| !seen.insert(&s.value)) {
            return Err(DomainError::InvalidInput(format!(
                "duplicate symbol {:?}",
                dup.value
            )));
        }

        symbols
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.frequency))
            .ok_or(DomainError::WeightOverflow)?;

        Ok(())
    }
}
