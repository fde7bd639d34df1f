//! IDE features: high-level APIs for language-server handlers.
//!
//! Each function answers one editor request from the symbol registry. None
//! of them use protocol types; handlers convert at the boundary.
//!
//! ## Usage
//!
//! ```ignore
//! use hime::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let doc = host.set_document("file:///expr.gram", text, parser.parse(text).as_ref())?;
//!
//! let diagnostics = host.diagnostics(doc);
//! let outline = host.document_symbols(doc);
//! ```

mod analysis;
mod goto;
mod hover;
mod lens;
mod references;
mod rename;
mod symbols;

pub use analysis::AnalysisHost;
pub use goto::{Location, goto_definition};
pub use hover::{HoverResult, hover, hover_text};
pub use lens::{COMPILE_COMMAND, CodeLens, code_lenses};
pub use references::{DocumentHighlight, HighlightKind, document_highlights, find_references};
pub use rename::{RenameError, TextEdit, is_legal_name, rename};
pub use symbols::{SymbolInfo, document_symbols, workspace_symbols};
