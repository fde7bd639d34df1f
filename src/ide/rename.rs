//! Rename: rewrite every occurrence of a symbol within one document.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{DocumentId, LineCol, LineIndex, Range};
use crate::hir::SymbolRegistry;

/// A replacement of the text at `range`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    #[error("'{0}' is not a legal symbol name")]
    IllegalName(SmolStr),
    #[error("symbol '{0}' has no known kind and cannot be renamed")]
    UnknownSymbol(SmolStr),
    #[error("no symbol at {position} in {document}")]
    NotInDocument {
        document: DocumentId,
        position: LineCol,
    },
}

/// Whether `name` matches `[_a-zA-Z][_a-zA-Z0-9]*`.
pub fn is_legal_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Edits renaming the symbol at `pos` to `new_name`.
///
/// One edit is produced per definition and reference range of the symbol in
/// `document`. Quoted occurrences (virtual symbols, option values) keep
/// their quote characters.
pub fn rename(
    registry: &SymbolRegistry,
    document: DocumentId,
    text: &str,
    pos: LineCol,
    new_name: &str,
) -> Result<Vec<TextEdit>, RenameError> {
    let hit = registry
        .symbol_at(document, pos)
        .ok_or(RenameError::NotInDocument { document, position: pos })?;
    let symbol = registry
        .symbol(hit.symbol)
        .ok_or(RenameError::NotInDocument { document, position: pos })?;
    if symbol.kind().is_none() {
        return Err(RenameError::UnknownSymbol(SmolStr::new(symbol.qualified_name())));
    }
    if !is_legal_name(new_name) {
        return Err(RenameError::IllegalName(SmolStr::new(new_name)));
    }

    let lines = LineIndex::new(text);
    let edits = symbol
        .definitions_in(document)
        .chain(symbol.references_in(document))
        .map(|range| TextEdit {
            range,
            new_text: match quote_at(&lines, text, range) {
                Some(quote) => format!("{quote}{new_name}{quote}"),
                None => new_name.to_owned(),
            },
        })
        .collect();
    Ok(edits)
}

/// The quote character opening the text at `range`, if any.
fn quote_at(lines: &LineIndex, text: &str, range: Range) -> Option<char> {
    let offset = usize::from(lines.offset(range.start)?);
    text.get(offset..)?
        .chars()
        .next()
        .filter(|&c| matches!(c, '"' | '\''))
}
