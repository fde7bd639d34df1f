//! Name resolution: the analysis pass over a grammar document.
//!
//! The walk visits each grammar of a document in turn:
//!
//! 1. the grammar itself and its parents (imports, kept in declaration order);
//! 2. the `terminals` section, when there is one, context blocks included;
//! 3. the `rules` section, in two phases: every variable is declared first so
//!    rule bodies may refer to variables defined further down;
//! 4. the `options` section, which is checked against the names collected by
//!    the previous steps.
//!
//! Every definition and reference is written to the shared
//! [`SymbolRegistry`] and to the returned [`DocumentAnalysis`]. Unresolvable
//! names become diagnostics; the walk never stops on them.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::analysis::DocumentAnalysis;
use super::config::AnalyzerConfig;
use super::context::{AnalysisContext, qualify};
use super::error::AnalysisError;
use super::ids::SymbolId;
use super::registry::SymbolRegistry;
use super::symbols::SymbolKind;
use crate::base::DocumentId;
use crate::syntax::{
    GrammarNode, LexExpr, OptionNode, ParseError, Root, RuleDef, RuleExpr, TerminalEntry,
    TerminalDef, Token, unescape, unquote,
};

/// Option naming the start variable.
pub const OPTION_AXIOM: &str = "Axiom";
/// Option naming the terminal skipped between tokens.
pub const OPTION_SEPARATOR: &str = "Separator";

// ============================================================================
// ANALYZER
// ============================================================================

/// Semantic analyzer for Hime grammar documents.
#[derive(Clone, Debug, Default)]
pub struct GrammarAnalyzer {
    config: AnalyzerConfig,
}

impl GrammarAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one document.
    ///
    /// Whatever `document` contributed to the registry before is dropped
    /// first, so analyzing the same text twice leaves the registry unchanged.
    /// The registry is locked for the whole pass.
    ///
    /// On a structural error the partial contributions of the pass are
    /// retracted as well and the error is returned.
    pub fn analyze(
        &self,
        registry: &SymbolRegistry,
        document: DocumentId,
        input: &str,
        root: &Root,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        tracing::debug!(
            "analyzing {}: {} grammar(s), {} bytes",
            document,
            root.grammars.len(),
            input.len()
        );

        let mut session = registry.session();
        let dropped = session.forget_document(document);
        if dropped > 0 {
            tracing::trace!("[RESOLVE] dropped {} symbol(s) from the previous pass", dropped);
        }

        let mut ctx = AnalysisContext::new(session, document, input, self.config.source.clone());
        for grammar in &root.grammars {
            if let Err(err) = inspect_grammar(&mut ctx, grammar) {
                tracing::warn!("analysis of {} aborted: {}", document, err);
                ctx.abort();
                return Err(err);
            }
        }

        let analysis = ctx.finish();
        tracing::debug!(
            "analyzed {}: {} definition(s), {} reference(s), {} diagnostic(s)",
            document,
            analysis.definitions.len(),
            analysis.references.len(),
            analysis.diagnostics.len()
        );
        Ok(analysis)
    }

    /// Analyze the outcome of the upstream parser.
    ///
    /// A parse failure yields an empty analysis and drops whatever the
    /// document contributed before; nothing of a missing tree is walked.
    pub fn analyze_parsed(
        &self,
        registry: &SymbolRegistry,
        document: DocumentId,
        input: &str,
        parsed: Result<&Root, &ParseError>,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        match parsed {
            Ok(root) => self.analyze(registry, document, input, root),
            Err(err) => {
                tracing::warn!("no analysis for {}: {}", document, err);
                registry.forget_document(document);
                Ok(DocumentAnalysis::empty(document))
            }
        }
    }
}

// ============================================================================
// GRAMMARS
// ============================================================================

fn inspect_grammar(ctx: &mut AnalysisContext<'_>, grammar: &GrammarNode) -> Result<(), AnalysisError> {
    ctx.begin_grammar();

    let name = grammar.name.as_str();
    let grammar_id = ctx.define(name, SymbolKind::Grammar, None, grammar.name.range)?;

    for parent in &grammar.parents {
        let parent_id = ctx.declare_if_unset(parent.as_str(), SymbolKind::Grammar, None);
        ctx.reference(parent_id, parent.range)?;
        ctx.add_import(parent.text.clone());
    }

    let scope = GrammarScope { name, id: grammar_id };
    if let Some(entries) = &grammar.terminals {
        inspect_terminals(ctx, &scope, entries)?;
    }
    inspect_rules(ctx, &scope, &grammar.rules)?;
    inspect_options(ctx, &scope, &grammar.options)
}

/// The grammar being walked.
struct GrammarScope<'g> {
    name: &'g str,
    id: SymbolId,
}

impl GrammarScope<'_> {
    fn qualify(&self, name: &str) -> String {
        qualify(self.name, name)
    }
}

// ============================================================================
// TERMINALS
// ============================================================================

fn inspect_terminals(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    entries: &[TerminalEntry],
) -> Result<(), AnalysisError> {
    for entry in entries {
        match entry {
            TerminalEntry::Context(block) => {
                ctx.define(
                    &grammar.qualify(block.name.as_str()),
                    SymbolKind::Context,
                    Some(grammar.id),
                    block.name.range,
                )?;
                ctx.add_context(block.name.text.clone());
                inspect_terminals(ctx, grammar, &block.entries)?;
            }
            TerminalEntry::Terminal(terminal) => inspect_terminal(ctx, grammar, terminal)?,
        }
    }
    Ok(())
}

fn inspect_terminal(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    terminal: &TerminalDef,
) -> Result<(), AnalysisError> {
    ctx.define(
        &grammar.qualify(terminal.name.as_str()),
        SymbolKind::Terminal,
        Some(grammar.id),
        terminal.name.range,
    )?;
    ctx.add_terminal(terminal.name.text.clone());
    inspect_terminal_definition(ctx, grammar, &terminal.name, &terminal.definition)
}

fn inspect_terminal_definition(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    terminal: &Token,
    expr: &LexExpr,
) -> Result<(), AnalysisError> {
    match expr {
        LexExpr::Reference(name) => inspect_terminal_reference(ctx, grammar, terminal, name),
        LexExpr::Atom(_) => Ok(()),
        LexExpr::Sequence(items) | LexExpr::Union(items) => items
            .iter()
            .try_for_each(|item| inspect_terminal_definition(ctx, grammar, terminal, item)),
        LexExpr::Difference(left, right) => {
            inspect_terminal_definition(ctx, grammar, terminal, left)?;
            inspect_terminal_definition(ctx, grammar, terminal, right)
        }
        LexExpr::Repeat(inner, _) => inspect_terminal_definition(ctx, grammar, terminal, inner),
    }
}

fn inspect_terminal_reference(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    terminal: &Token,
    name: &Token,
) -> Result<(), AnalysisError> {
    let range = ctx.range(name.range)?;

    // Reported once, never resolved
    if name.text == terminal.text {
        tracing::trace!("[RESOLVE] terminal '{}' refers to itself", terminal.as_str());
        ctx.diagnostics().self_referential_terminal(range, terminal.as_str());
        return Ok(());
    }

    if ctx.has_terminal(name.as_str()) {
        tracing::trace!("[RESOLVE] '{}' -> local terminal of '{}'", name.as_str(), grammar.name);
        let id = ctx.resolve(&grammar.qualify(name.as_str()));
        return ctx.reference(id, name.range);
    }

    if let Some(id) = ctx.find_imported(name.as_str(), |kind| kind == SymbolKind::Terminal) {
        tracing::trace!("[RESOLVE] '{}' -> imported terminal {:?}", name.as_str(), id);
        return ctx.reference(id, name.range);
    }

    tracing::trace!("[RESOLVE] terminal '{}' not found", name.as_str());
    ctx.diagnostics().missing_terminal(range, name.as_str());
    Ok(())
}

// ============================================================================
// RULES
// ============================================================================

/// The rule whose body is being walked.
struct RuleScope<'r> {
    /// `Grammar.Variable`
    variable: String,
    parameters: FxHashSet<&'r str>,
}

fn inspect_rules(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    rules: &[RuleDef],
) -> Result<(), AnalysisError> {
    // Declare every variable before walking any body
    let mut variables = Vec::with_capacity(rules.len());
    for rule in rules {
        let name = rule.name();
        let id = ctx.define(
            &grammar.qualify(name.as_str()),
            SymbolKind::Variable,
            Some(grammar.id),
            name.range,
        )?;
        ctx.add_variable(name.text.clone());
        variables.push(id);
    }

    for (rule, variable) in rules.iter().zip(variables) {
        let mut scope = RuleScope {
            variable: grammar.qualify(rule.name().as_str()),
            parameters: FxHashSet::default(),
        };
        for param in rule.params() {
            ctx.define(
                &qualify(&scope.variable, param.as_str()),
                SymbolKind::Param,
                Some(variable),
                param.range,
            )?;
            scope.parameters.insert(param.as_str());
        }
        inspect_rule_body(ctx, grammar, &scope, rule.body())?;
    }
    Ok(())
}

fn inspect_rule_body(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    rule: &RuleScope<'_>,
    expr: &RuleExpr,
) -> Result<(), AnalysisError> {
    match expr {
        RuleExpr::ContextSwitch { context, body } => {
            if ctx.has_context(context.as_str()) {
                let id = ctx.resolve(&grammar.qualify(context.as_str()));
                ctx.reference(id, context.range)?;
            } else {
                let range = ctx.range(context.range)?;
                ctx.diagnostics().missing_context(range, context.as_str());
            }
            inspect_rule_body(ctx, grammar, rule, body)
        }
        RuleExpr::Action(action) => {
            let id = ctx.declare_if_unset(
                &grammar.qualify(action.as_str()),
                SymbolKind::Action,
                Some(grammar.id),
            );
            ctx.reference(id, action.range)
        }
        RuleExpr::Virtual(literal) => {
            let name = literal_value(ctx, literal)?;
            let id =
                ctx.declare_if_unset(&grammar.qualify(&name), SymbolKind::Virtual, Some(grammar.id));
            ctx.reference(id, literal.range)
        }
        RuleExpr::Name(name) => inspect_name(ctx, grammar, rule, name),
        RuleExpr::Literal(_) => Ok(()),
        RuleExpr::Call { callee, args } => {
            inspect_name(ctx, grammar, rule, callee)?;
            args.iter()
                .try_for_each(|arg| inspect_rule_body(ctx, grammar, rule, arg))
        }
        RuleExpr::Sequence(items) | RuleExpr::Alternation(items) => items
            .iter()
            .try_for_each(|item| inspect_rule_body(ctx, grammar, rule, item)),
        RuleExpr::Repeat(inner, _) | RuleExpr::Tree(inner, _) => {
            inspect_rule_body(ctx, grammar, rule, inner)
        }
    }
}

/// What a bare name in a rule body stands for.
#[derive(Debug)]
enum NameResolution {
    Parameter(String),
    LocalTerminal(String),
    LocalVariable(String),
    Imported(SymbolId),
    Missing,
}

fn resolve_name(
    ctx: &AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    rule: &RuleScope<'_>,
    name: &str,
) -> NameResolution {
    if rule.parameters.contains(name) {
        return NameResolution::Parameter(qualify(&rule.variable, name));
    }
    if ctx.has_terminal(name) {
        return NameResolution::LocalTerminal(grammar.qualify(name));
    }
    if ctx.has_variable(name) {
        return NameResolution::LocalVariable(grammar.qualify(name));
    }
    match ctx.find_imported(name, |_| true) {
        Some(id) => NameResolution::Imported(id),
        None => NameResolution::Missing,
    }
}

fn inspect_name(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    rule: &RuleScope<'_>,
    name: &Token,
) -> Result<(), AnalysisError> {
    let resolution = resolve_name(ctx, grammar, rule, name.as_str());
    tracing::trace!("[RESOLVE] '{}' in {} -> {:?}", name.as_str(), rule.variable, resolution);

    let id = match resolution {
        NameResolution::Parameter(qualified)
        | NameResolution::LocalTerminal(qualified)
        | NameResolution::LocalVariable(qualified) => ctx.resolve(&qualified),
        NameResolution::Imported(id) => id,
        NameResolution::Missing => {
            let range = ctx.range(name.range)?;
            ctx.diagnostics().missing_symbol(range, name.as_str());
            return Ok(());
        }
    };
    ctx.reference(id, name.range)
}

// ============================================================================
// OPTIONS
// ============================================================================

fn inspect_options(
    ctx: &mut AnalysisContext<'_>,
    grammar: &GrammarScope<'_>,
    options: &[OptionNode],
) -> Result<(), AnalysisError> {
    for option in options {
        match option.name.as_str() {
            OPTION_AXIOM => {
                let value = literal_value(ctx, &option.value)?;
                if ctx.has_variable(&value) {
                    let id = ctx.resolve(&grammar.qualify(&value));
                    ctx.reference(id, option.value.range)?;
                } else {
                    let range = ctx.range(option.value.range)?;
                    ctx.diagnostics().invalid_axiom(range, &value);
                }
            }
            OPTION_SEPARATOR => {
                let value = literal_value(ctx, &option.value)?;
                if ctx.has_terminal(&value) {
                    let id = ctx.resolve(&grammar.qualify(&value));
                    ctx.reference(id, option.value.range)?;
                } else {
                    let range = ctx.range(option.value.range)?;
                    ctx.diagnostics().invalid_separator(range, &value);
                }
            }
            other => tracing::trace!("[RESOLVE] option '{}' ignored", other),
        }
    }
    Ok(())
}

/// The content of a quoted literal token, escapes resolved.
fn literal_value(ctx: &AnalysisContext<'_>, literal: &Token) -> Result<SmolStr, AnalysisError> {
    unquote(literal.as_str())
        .map(|content| SmolStr::from(unescape(content)))
        .ok_or_else(|| AnalysisError::MalformedLiteral {
            document: ctx.document(),
            literal: literal.text.clone(),
            range: literal.range,
        })
}
