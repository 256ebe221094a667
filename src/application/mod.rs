//! Application layer: input preparation, services and rendering
//!
//! This layer turns raw alphabets into domain calls, applying settings.

pub mod error;
pub mod input;
pub mod render;
pub mod service;

pub use error::{ApplicationError, ApplicationResult};
pub use service::{CodeSummary, HuffmanService};
