//! Huffman code service
//!
//! Applies settings to the domain builder and emitter.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, info, instrument};

use crate::application::input::{is_sorted_by_frequency, sort_by_frequency};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{CodeEmitter, CodeTable, HuffmanTree, Symbol, TreeBuilder};

/// Figures describing a built code.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSummary {
    pub symbols: usize,
    pub nodes: usize,
    /// Longest code length in bits
    pub depth: usize,
    pub total_weight: u64,
    /// Sum of `frequency * code length`
    pub weighted_length: u128,
    /// Bits per symbol occurrence
    pub average_length: f64,
}

/// Service for building trees and code tables from alphabets.
pub struct HuffmanService {
    settings: Settings,
}

impl HuffmanService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn builder(&self) -> TreeBuilder {
        TreeBuilder::new().with_single_symbol_policy(self.settings.single_symbol)
    }

    fn emitter(&self) -> CodeEmitter {
        CodeEmitter::new().with_max_code_length(self.settings.max_code_length)
    }

    /// Sort the alphabet first when `sort_input` is enabled and it is not
    /// already in order; otherwise pass it through for validation.
    fn prepare<S: Send>(&self, symbols: Vec<Symbol<S>>) -> Vec<Symbol<S>> {
        if self.settings.sort_input && !is_sorted_by_frequency(&symbols) {
            debug!("sorting {} symbols by frequency", symbols.len());
            sort_by_frequency(symbols)
        } else {
            symbols
        }
    }

    /// Build the tree, enforcing `max_code_length` on its depth.
    #[instrument(level = "debug", skip_all)]
    pub fn build_tree<S>(&self, symbols: Vec<Symbol<S>>) -> ApplicationResult<HuffmanTree<S>>
    where
        S: Clone + Eq + Hash + Debug + Send,
    {
        let symbols = self.prepare(symbols);
        let tree = self.builder().build(&symbols)?;
        self.emitter().check_tree(&tree)?;
        Ok(tree)
    }

    /// Build the tree and emit its codes in leaf order.
    #[instrument(level = "debug", skip_all)]
    pub fn codes<S>(&self, symbols: Vec<Symbol<S>>) -> ApplicationResult<CodeTable<S>>
    where
        S: Clone + Eq + Hash + Debug + Send,
    {
        let tree = self.build_tree(symbols)?;
        let table = self.emitter().emit(&tree)?;
        info!("generated {} codes", table.len());
        Ok(table)
    }

    pub fn summary<S>(&self, symbols: Vec<Symbol<S>>) -> ApplicationResult<CodeSummary>
    where
        S: Clone + Eq + Hash + Debug + Send,
    {
        let tree = self.build_tree(symbols)?;
        let table = self.emitter().emit(&tree)?;
        Ok(CodeSummary {
            symbols: table.len(),
            nodes: tree.node_count(),
            depth: table.max_length(),
            total_weight: tree.weight(),
            weighted_length: table.weighted_length(),
            average_length: table.average_length(),
        })
    }
}
