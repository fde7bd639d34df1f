//! Shared helpers: build syntax trees by pointing at text in a source string.
#![allow(dead_code)]

use hime::base::{LineIndex, Range, TextRange, TextSize};
use hime::syntax::{GrammarNode, Token};

/// A grammar source and the tokens found in it.
pub struct Source<'a> {
    pub text: &'a str,
    lines: LineIndex,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: LineIndex::new(text),
        }
    }

    /// Token for the `nth` (0-based) occurrence of `needle`.
    pub fn tok(&self, needle: &str, nth: usize) -> Token {
        let start = self
            .text
            .match_indices(needle)
            .nth(nth)
            .map(|(offset, _)| offset)
            .unwrap_or_else(|| panic!("no occurrence #{} of {:?}", nth, needle));
        let range = TextRange::at(TextSize::from(start as u32), TextSize::of(needle));
        Token::new(needle, range)
    }

    /// Token for `needle` inside the first occurrence of `anchor`.
    pub fn tok_at(&self, anchor: &str, needle: &str) -> Token {
        let base = self
            .text
            .find(anchor)
            .unwrap_or_else(|| panic!("no occurrence of {:?}", anchor));
        let inner = anchor
            .find(needle)
            .unwrap_or_else(|| panic!("{:?} not in {:?}", needle, anchor));
        let range = TextRange::at(TextSize::from((base + inner) as u32), TextSize::of(needle));
        Token::new(needle, range)
    }

    /// Line/column range of a token.
    pub fn range_of(&self, token: &Token) -> Range {
        self.lines.range(token.range).unwrap()
    }

    /// Line/column range of the `nth` occurrence of `needle`.
    pub fn range(&self, needle: &str, nth: usize) -> Range {
        self.lines.range(self.tok(needle, nth).range).unwrap()
    }
}

/// A grammar with nothing but a name.
pub fn grammar(name: Token) -> GrammarNode {
    GrammarNode {
        name,
        parents: Vec::new(),
        options: Vec::new(),
        terminals: None,
        rules: Vec::new(),
    }
}
