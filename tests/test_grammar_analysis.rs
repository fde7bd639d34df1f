//! Analysis of single grammar documents: definitions, references and the
//! diagnostics hime.1 to hime.6.

mod common;

use common::{Source, grammar};
use hime::hir::{
    DiagnosticCode, DocumentAnalysis, GrammarAnalyzer, Severity, SymbolKind, SymbolRegistry,
};
use hime::syntax::{
    ContextBlock, LexExpr, OptionNode, PlainRule, Quantifier, Root, RuleDef, RuleExpr,
    TerminalDef, TerminalEntry, TreeAction,
};
use hime::DocumentId;
use rstest::rstest;

const DOC: DocumentId = DocumentId::new(0);

fn analyze(registry: &SymbolRegistry, src: &Source<'_>, root: Root) -> DocumentAnalysis {
    GrammarAnalyzer::default()
        .analyze(registry, DOC, src.text, &root)
        .expect("well-formed tree")
}

fn codes(analysis: &DocumentAnalysis) -> Vec<DiagnosticCode> {
    analysis.diagnostics.iter().map(|d| d.code).collect()
}

fn terminal(name: hime::syntax::Token, definition: LexExpr) -> TerminalEntry {
    TerminalEntry::Terminal(TerminalDef { name, definition })
}

fn rule(name: hime::syntax::Token, body: RuleExpr) -> RuleDef {
    RuleDef::Plain(PlainRule { name, body })
}

// ============================================================================
// END TO END
// ============================================================================

#[test]
fn test_end_to_end_example() {
    let src = Source::new(
        r#"grammar G { options { Axiom="S"; } terminals { A -> "a"; } rules { S -> A; } }"#,
    );
    let mut g = grammar(src.tok("G", 0));
    g.options.push(OptionNode {
        name: src.tok("Axiom", 0),
        value: src.tok(r#""S""#, 0),
    });
    g.terminals = Some(vec![terminal(src.tok("A", 1), LexExpr::Atom(src.tok(r#""a""#, 0)))]);
    g.rules.push(rule(src.tok("S", 1), RuleExpr::Name(src.tok("A", 2))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert!(analysis.diagnostics.is_empty());

    let g = registry.symbol_by_name("G").unwrap();
    let a = registry.symbol_by_name("G.A").unwrap();
    let s = registry.symbol_by_name("G.S").unwrap();
    assert_eq!(g.kind(), Some(SymbolKind::Grammar));
    assert_eq!(a.kind(), Some(SymbolKind::Terminal));
    assert_eq!(s.kind(), Some(SymbolKind::Variable));
    assert_eq!(a.parent(), Some(g.id()));
    assert_eq!(s.parent(), Some(g.id()));

    assert_eq!(g.definitions_in(DOC).collect::<Vec<_>>(), vec![src.range("G", 0)]);
    assert_eq!(a.definitions_in(DOC).collect::<Vec<_>>(), vec![src.range("A", 1)]);
    assert_eq!(s.definitions_in(DOC).collect::<Vec<_>>(), vec![src.range("S", 1)]);

    // Axiom value and rule body
    assert_eq!(s.references_in(DOC).collect::<Vec<_>>(), vec![src.range(r#""S""#, 0)]);
    assert_eq!(a.references_in(DOC).collect::<Vec<_>>(), vec![src.range("A", 2)]);
    assert_eq!(analysis.definitions.len(), 3);
    assert_eq!(analysis.references.len(), 2);
}

#[test]
fn test_resolve_is_stable_across_passes() {
    let src = Source::new("grammar G { terminals { A -> 'a'; } }");
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![terminal(src.tok("A", 0), LexExpr::Atom(src.tok("'a'", 0)))]);
    let root = Root { grammars: vec![g] };

    let registry = SymbolRegistry::new();
    let first = analyze(&registry, &src, root.clone());
    let second = analyze(&registry, &src, root);

    assert_eq!(first, second);
    assert_eq!(registry.resolve("G.A"), registry.resolve("G.A"));
    assert_eq!(registry.lookup("G.A"), Some(first.definitions[1].symbol));
}

// ============================================================================
// TERMINALS
// ============================================================================

#[test]
fn test_self_reference_deep_in_definition() {
    let src = Source::new("grammar G { terminals { ID -> ([a-z] | ID)* ; } }");
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![terminal(
        src.tok("ID", 0),
        LexExpr::Repeat(
            Box::new(LexExpr::Union(vec![
                LexExpr::Atom(src.tok("[a-z]", 0)),
                LexExpr::Reference(src.tok("ID", 1)),
            ])),
            Quantifier::ZeroOrMore,
        ),
    )]);

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::SelfReferentialTerminal]);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.range, src.range("ID", 1));
    assert_eq!(diag.message.as_ref(), "Terminal 'ID' is self-referential in its definition.");
    assert!(analysis.references.is_empty());
}

#[test]
fn test_self_reference_does_not_hide_siblings() {
    let src = Source::new("grammar G { terminals { L -> [a-z]; ID -> L (L | ID)*; } }");
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![
        terminal(src.tok("L", 0), LexExpr::Atom(src.tok("[a-z]", 0))),
        terminal(
            src.tok("ID", 0),
            LexExpr::Sequence(vec![
                LexExpr::Reference(src.tok("L", 1)),
                LexExpr::Repeat(
                    Box::new(LexExpr::Union(vec![
                        LexExpr::Reference(src.tok("L", 2)),
                        LexExpr::Reference(src.tok("ID", 1)),
                    ])),
                    Quantifier::ZeroOrMore,
                ),
            ]),
        ),
    ]);

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::SelfReferentialTerminal]);
    let l = registry.lookup("G.L").unwrap();
    assert_eq!(analysis.references_of(l).count(), 2);
}

#[test]
fn test_terminal_references_are_single_pass() {
    let src = Source::new("grammar G { terminals { FIRST -> SECOND; SECOND -> 'b'; } }");
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![
        terminal(src.tok("FIRST", 0), LexExpr::Reference(src.tok("SECOND", 0))),
        terminal(src.tok("SECOND", 1), LexExpr::Atom(src.tok("'b'", 0))),
    ]);

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::MissingTerminal]);
    assert_eq!(analysis.diagnostics[0].range, src.range("SECOND", 0));
    assert_eq!(
        analysis.diagnostics[0].message.as_ref(),
        "Missing definition for referenced terminal 'SECOND'."
    );
}

#[test]
fn test_context_blocks() {
    let src = Source::new(
        "grammar G { terminals { context Comments { LINE -> '//'; } } rules { S -> #Comments { LINE } #Strings { 'x' }; } }",
    );
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![TerminalEntry::Context(ContextBlock {
        name: src.tok("Comments", 0),
        entries: vec![terminal(src.tok("LINE", 0), LexExpr::Atom(src.tok("'//'", 0)))],
    })]);
    g.rules.push(rule(
        src.tok("S", 0),
        RuleExpr::Sequence(vec![
            RuleExpr::ContextSwitch {
                context: src.tok("Comments", 1),
                body: Box::new(RuleExpr::Name(src.tok("LINE", 1))),
            },
            RuleExpr::ContextSwitch {
                context: src.tok("Strings", 0),
                body: Box::new(RuleExpr::Literal(src.tok("'x'", 0))),
            },
        ]),
    ));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::MissingContext]);
    assert_eq!(analysis.diagnostics[0].range, src.range("Strings", 0));

    let comments = registry.symbol_by_name("G.Comments").unwrap();
    assert_eq!(comments.kind(), Some(SymbolKind::Context));
    assert_eq!(comments.references_in(DOC).count(), 1);
    // Terminals of a context live directly under the grammar
    let line = registry.symbol_by_name("G.LINE").unwrap();
    assert_eq!(line.kind(), Some(SymbolKind::Terminal));
    assert_eq!(line.references_in(DOC).count(), 1);
    assert_eq!(registry.lookup("G.Comments.LINE"), None);
}

// ============================================================================
// RULES
// ============================================================================

#[test]
fn test_forward_reference_between_variables() {
    let src = Source::new("grammar G { rules { first -> second; second -> 'x'; } }");
    let mut g = grammar(src.tok("G", 0));
    g.rules.push(rule(src.tok("first", 0), RuleExpr::Name(src.tok("second", 0))));
    g.rules.push(rule(src.tok("second", 1), RuleExpr::Literal(src.tok("'x'", 0))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert!(analysis.diagnostics.is_empty());
    let second = registry.lookup("G.second").unwrap();
    assert_eq!(
        analysis.references_of(second).collect::<Vec<_>>(),
        vec![src.range("second", 0)]
    );
}

#[test]
fn test_missing_symbol() {
    let src = Source::new("grammar G { rules { S -> 'a' ^undefined_thing; } }");
    let mut g = grammar(src.tok("G", 0));
    g.rules.push(rule(
        src.tok("S", 0),
        RuleExpr::Sequence(vec![
            RuleExpr::Literal(src.tok("'a'", 0)),
            RuleExpr::Tree(
                Box::new(RuleExpr::Name(src.tok("undefined_thing", 0))),
                TreeAction::Promote,
            ),
        ]),
    ));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::MissingSymbol]);
    let diag = &analysis.diagnostics[0];
    assert_eq!(diag.severity, Severity::Warning);
    assert_eq!(diag.range, src.range("undefined_thing", 0));
    assert_eq!(diag.source.as_ref(), "hime");
    assert!(diag.message.contains("'undefined_thing'"));
    assert_eq!(registry.lookup("G.undefined_thing"), None);
}

#[test]
fn test_terminal_and_variable_share_a_name() {
    let src = Source::new("grammar G { terminals { X -> 'x'; } rules { X -> 'y'; S -> X; } }");
    let mut g = grammar(src.tok("G", 0));
    g.terminals = Some(vec![terminal(src.tok("X", 0), LexExpr::Atom(src.tok("'x'", 0)))]);
    g.rules.push(rule(src.tok("X", 1), RuleExpr::Literal(src.tok("'y'", 0))));
    g.rules.push(rule(src.tok("S", 0), RuleExpr::Name(src.tok("X", 2))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert!(analysis.diagnostics.is_empty());
    let x = registry.symbol_by_name("G.X").unwrap();
    // Both declarations share one symbol; the terminal declared it first
    assert_eq!(x.definitions_in(DOC).count(), 2);
    assert_eq!(x.kind(), Some(SymbolKind::Terminal));
    assert_eq!(x.references_in(DOC).collect::<Vec<_>>(), vec![src.range("X", 2)]);
}

#[test]
fn test_actions_and_virtual_symbols() {
    let src = Source::new(r#"grammar G { rules { S -> 'a' @OnA 'ex\'pr' @OnA; } }"#);
    let mut g = grammar(src.tok("G", 0));
    g.rules.push(rule(
        src.tok("S", 0),
        RuleExpr::Sequence(vec![
            RuleExpr::Literal(src.tok("'a'", 0)),
            RuleExpr::Action(src.tok("OnA", 0)),
            RuleExpr::Virtual(src.tok(r"'ex\'pr'", 0)),
            RuleExpr::Action(src.tok("OnA", 1)),
        ]),
    ));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });
    let grammar_id = registry.lookup("G");

    assert!(analysis.diagnostics.is_empty());
    let action = registry.symbol_by_name("G.OnA").unwrap();
    assert_eq!(action.kind(), Some(SymbolKind::Action));
    assert_eq!(action.parent(), grammar_id);
    assert_eq!(action.references_in(DOC).count(), 2);
    assert!(!action.is_defined());

    let virtual_symbol = registry.symbol_by_name("G.ex'pr").unwrap();
    assert_eq!(virtual_symbol.kind(), Some(SymbolKind::Virtual));
    assert_eq!(
        virtual_symbol.references_in(DOC).collect::<Vec<_>>(),
        vec![src.range(r"'ex\'pr'", 0)]
    );
}

#[test]
fn test_names_do_not_leak_between_grammars() {
    let src = Source::new("grammar A { terminals { T -> 't'; } }\ngrammar B { rules { S -> T; } }");
    let mut a = grammar(src.tok("A", 0));
    a.terminals = Some(vec![terminal(src.tok("T", 0), LexExpr::Atom(src.tok("'t'", 0)))]);
    let mut b = grammar(src.tok("B", 0));
    b.rules.push(rule(src.tok("S", 0), RuleExpr::Name(src.tok("T", 1))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![a, b] });

    assert_eq!(codes(&analysis), vec![DiagnosticCode::MissingSymbol]);
    assert_eq!(analysis.diagnostics[0].range.start.line, 1);
}

// ============================================================================
// OPTIONS
// ============================================================================

#[rstest]
#[case("Axiom", "Main", None)]
#[case("Axiom", "Missing", Some(DiagnosticCode::InvalidAxiom))]
#[case("Axiom", "WS", Some(DiagnosticCode::InvalidAxiom))]
#[case("Separator", "WS", None)]
#[case("Separator", "Main", Some(DiagnosticCode::InvalidSeparator))]
#[case("Separator", "Missing", Some(DiagnosticCode::InvalidSeparator))]
#[case("OutputPath", "Missing", None)]
fn test_option_validation(
    #[case] option: &str,
    #[case] value: &str,
    #[case] expected: Option<DiagnosticCode>,
) {
    let text = format!(
        "grammar G {{ options {{ {} = \"{}\"; }} terminals {{ WS -> ' '; }} rules {{ Main -> WS; }} }}",
        option, value
    );
    let src = Source::new(&text);
    let quoted = format!("\"{}\"", value);
    let value_token = src.tok(&quoted, 0);

    let mut g = grammar(src.tok("G", 0));
    g.options.push(OptionNode {
        name: src.tok(option, 0),
        value: value_token.clone(),
    });
    g.terminals = Some(vec![terminal(
        src.tok_at("WS -> ", "WS"),
        LexExpr::Atom(src.tok("' '", 0)),
    )]);
    g.rules.push(rule(src.tok_at("Main -> WS", "Main"), RuleExpr::Name(src.tok_at("-> WS;", "WS"))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });
    let value_range = src.range_of(&value_token);
    let value_refs: Vec<_> = analysis
        .references
        .iter()
        .filter(|loc| loc.range == value_range)
        .collect();

    match expected {
        Some(code) => {
            assert_eq!(codes(&analysis), vec![code]);
            assert_eq!(analysis.diagnostics[0].severity, Severity::Warning);
            assert_eq!(analysis.diagnostics[0].range, value_range);
            assert!(analysis.diagnostics[0].message.contains(&format!("'{}'", value)));
            assert!(value_refs.is_empty());
        }
        None if option == "OutputPath" => {
            assert!(analysis.diagnostics.is_empty());
            assert!(value_refs.is_empty());
        }
        None => {
            assert!(analysis.diagnostics.is_empty());
            assert_eq!(value_refs.len(), 1);
            let expected_kind = if option == "Axiom" {
                SymbolKind::Variable
            } else {
                SymbolKind::Terminal
            };
            assert_eq!(registry.kind(value_refs[0].symbol), Some(expected_kind));
        }
    }
}

#[test]
fn test_escaped_option_value() {
    let src = Source::new(r#"grammar G { options { Axiom = "\u0053"; } rules { S -> 's'; } }"#);
    let mut g = grammar(src.tok("G", 0));
    g.options.push(OptionNode {
        name: src.tok("Axiom", 0),
        value: src.tok(r#""\u0053""#, 0),
    });
    g.rules.push(rule(src.tok("S", 0), RuleExpr::Literal(src.tok("'s'", 0))));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert!(analysis.diagnostics.is_empty());
    let s = registry.lookup("G.S").unwrap();
    assert_eq!(analysis.references_of(s).count(), 1);
}

#[test]
fn test_diagnostics_follow_walk_order() {
    let src = Source::new(
        r#"grammar G { options { Axiom = "Nope"; } terminals { T -> T; } rules { S -> #Ctx { missing }; } }"#,
    );
    let mut g = grammar(src.tok("G", 0));
    g.options.push(OptionNode {
        name: src.tok("Axiom", 0),
        value: src.tok(r#""Nope""#, 0),
    });
    g.terminals = Some(vec![terminal(src.tok("T", 0), LexExpr::Reference(src.tok("T", 1)))]);
    g.rules.push(rule(
        src.tok("S", 0),
        RuleExpr::ContextSwitch {
            context: src.tok("Ctx", 0),
            body: Box::new(RuleExpr::Name(src.tok("missing", 0))),
        },
    ));

    let registry = SymbolRegistry::new();
    let analysis = analyze(&registry, &src, Root { grammars: vec![g] });

    assert_eq!(
        codes(&analysis),
        vec![
            DiagnosticCode::SelfReferentialTerminal,
            DiagnosticCode::MissingContext,
            DiagnosticCode::MissingSymbol,
            DiagnosticCode::InvalidAxiom,
        ]
    );
    assert_eq!(analysis.errors().count(), 1);
    assert_eq!(analysis.warnings().count(), 3);
}
