//! Foundation types for the Hime analysis core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DocumentId`] - Stable identifiers for analyzed documents
//! - [`TextRange`], [`TextSize`] - Byte positions in source text
//! - [`LineCol`], [`LineIndex`], [`Range`] - Line/column conversion
//!
//! This module has NO dependencies on other hime modules.

mod document_id;
mod span;

pub use document_id::DocumentId;
pub use span::{LineCol, LineIndex, Range, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
