//! Typed grammar syntax tree.
//!
//! Every node category the analyzer distinguishes is its own variant, so the
//! walk in [`crate::hir`] is an exhaustive `match` rather than a dispatch on
//! node ids. Spans are byte ranges into the document text.

use smol_str::SmolStr;
use text_size::TextRange;

/// A name, identifier or literal as written in source, with its span.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub text: SmolStr,
    pub range: TextRange,
}

impl Token {
    pub fn new(text: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A parsed grammar document: one node per grammar it declares.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Root {
    pub grammars: Vec<GrammarNode>,
}

/// `grammar Name : Parent1, Parent2 { options {..} terminals {..} rules {..} }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarNode {
    pub name: Token,
    pub parents: Vec<Token>,
    pub options: Vec<OptionNode>,
    /// `None` when the grammar has no `terminals` section at all.
    pub terminals: Option<Vec<TerminalEntry>>,
    pub rules: Vec<RuleDef>,
}

/// `Name = "value";` inside an `options` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionNode {
    pub name: Token,
    /// The raw quoted literal, quotes and escapes included.
    pub value: Token,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEntry {
    Context(ContextBlock),
    Terminal(TerminalDef),
}

/// `context Name { ...terminals... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextBlock {
    pub name: Token,
    pub entries: Vec<TerminalEntry>,
}

/// `Name -> definition;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalDef {
    pub name: Token,
    pub definition: LexExpr,
}

/// Lexical (regex-like) expression of a terminal definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexExpr {
    /// A bare name referring to another terminal.
    Reference(Token),
    /// A text literal, character class, unicode block or category, code point
    /// or the `.` wildcard; none of these name other symbols.
    Atom(Token),
    Sequence(Vec<LexExpr>),
    Union(Vec<LexExpr>),
    /// `left - right`
    Difference(Box<LexExpr>, Box<LexExpr>),
    Repeat(Box<LexExpr>, Quantifier),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `{min,max}`; an unbounded upper limit is `None`.
    Bounded { min: u32, max: Option<u32> },
}

/// A rule of the `rules` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleDef {
    Plain(PlainRule),
    Template(TemplateRule),
}

/// `Name -> body;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlainRule {
    pub name: Token,
    pub body: RuleExpr,
}

/// `Name<P1, P2> -> body;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateRule {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: RuleExpr,
}

impl RuleDef {
    pub fn name(&self) -> &Token {
        match self {
            RuleDef::Plain(rule) => &rule.name,
            RuleDef::Template(rule) => &rule.name,
        }
    }

    /// Template parameters; empty for plain rules.
    pub fn params(&self) -> &[Token] {
        match self {
            RuleDef::Plain(_) => &[],
            RuleDef::Template(rule) => &rule.params,
        }
    }

    pub fn body(&self) -> &RuleExpr {
        match self {
            RuleDef::Plain(rule) => &rule.body,
            RuleDef::Template(rule) => &rule.body,
        }
    }
}

/// Tree actions applicable to a rule element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeAction {
    /// `^` promote
    Promote,
    /// `!` drop
    Drop,
}

/// Body of a syntactic rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleExpr {
    /// `#Context { body }`: `body` is matched with the named lexical context active.
    ContextSwitch { context: Token, body: Box<RuleExpr> },
    /// `@Action`
    Action(Token),
    /// `"virtual"`; the token is the raw quoted literal.
    Virtual(Token),
    /// A bare name: parameter, terminal, variable or imported symbol.
    Name(Token),
    /// An inline text literal such as `'+'`.
    Literal(Token),
    /// `Template<arg, ...>`: the callee is resolved like a bare name.
    Call { callee: Token, args: Vec<RuleExpr> },
    /// Empty sequence stands for epsilon.
    Sequence(Vec<RuleExpr>),
    Alternation(Vec<RuleExpr>),
    Repeat(Box<RuleExpr>, Quantifier),
    Tree(Box<RuleExpr>, TreeAction),
}
