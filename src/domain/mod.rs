//! Domain layer: Huffman tree construction and code emission
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod emitter;
pub mod entities;
pub mod error;
pub mod selector;

pub use arena::{HuffmanTree, NodeKind, TreeNode};
pub use builder::TreeBuilder;
pub use emitter::CodeEmitter;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use selector::{Pending, PrioritySelector};
