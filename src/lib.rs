//! Huffman code construction.
//!
//! Layers:
//! - `domain`: two-queue tree builder, arena tree and code emitter (pure)
//! - `application`: alphabet preparation, settings-aware service, rendering
//! - `config`: layered settings
//! - `cli`: argument parsing and command dispatch
//!
//! ```
//! use huffgen::domain::{CodeEmitter, Symbol, TreeBuilder};
//!
//! let symbols: Vec<Symbol<char>> = vec![('a', 1).into(), ('b', 2).into(), ('c', 4).into()];
//! let tree = TreeBuilder::new().build(&symbols)?;
//! let codes = CodeEmitter::new().emit(&tree)?;
//! assert_eq!(codes.get(&'c').map(ToString::to_string), Some("1".to_string()));
//! # Ok::<(), huffgen::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
