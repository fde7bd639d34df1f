//! Structural failures of an analysis pass.
//!
//! These mean the syntax tree does not honor the contract of
//! [`crate::syntax`]; they are never raised for mistakes in a grammar, which
//! become [`Diagnostic`](super::Diagnostic)s instead.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::base::DocumentId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("span {range:?} of {document} lies outside the {len:?}-byte document text")]
    SpanOutOfBounds {
        document: DocumentId,
        range: TextRange,
        len: TextSize,
    },
    #[error("expected a quoted literal at {range:?} of {document}, found `{literal}`")]
    MalformedLiteral {
        document: DocumentId,
        literal: SmolStr,
        range: TextRange,
    },
}
