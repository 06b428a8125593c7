use crate::{
    cfg::{Grammar, Symbol, Terminal},
    ll1::Analysis,
    machine::{Diagnostic, Machine},
};

/// Shorthand for a literal terminal symbol
fn t(c: char) -> Symbol {
    Symbol::Terminal(Terminal::Literal(c))
}

/// Shorthand for the epsilon symbol
fn eps() -> Symbol {
    Symbol::Terminal(Terminal::Epsilon)
}

/// Shorthand for a non-terminal symbol
fn nt(name: &str) -> Symbol {
    Symbol::Nonterminal(name.to_string())
}

/// Analyze a grammar given as (left, right) pairs
fn analysis(rules: Vec<(&str, Vec<Symbol>)>) -> Analysis {
    let mut grammar = Grammar::new();
    for (left, right) in rules {
        grammar.push(left.to_string(), right);
    }
    Analysis::new(grammar).unwrap()
}

/// The classic expression grammar over i, +, *, and parentheses
fn expression_analysis() -> Analysis {
    analysis(vec![
        ("E", vec![nt("T"), nt("E'")]),
        ("E'", vec![t('+'), nt("T"), nt("E'")]),
        ("E'", vec![eps()]),
        ("T", vec![nt("F"), nt("T'")]),
        ("T'", vec![t('*'), nt("F"), nt("T'")]),
        ("T'", vec![eps()]),
        ("F", vec![t('('), nt("E"), t(')')]),
        ("F", vec![t('i')]),
    ])
}

#[test]
fn accepts_expression_inputs() {
    let _ = env_logger::try_init();

    let analysis = expression_analysis();
    let machine = Machine::new(&analysis);

    for input in ["i+i*i", "i+(i+i)*i", "(i*i)+i", "i*i*i*i", "i*i*(i*i)+i"] {
        let verdict = machine.parse(input);
        assert!(verdict.accepted, "should accept {:?}", input);
        assert!(verdict.diagnostics.is_empty());
    }
}

#[test]
fn rejects_malformed_expression_with_recovery() {
    let analysis = expression_analysis();
    let verdict = Machine::new(&analysis).parse(")i*+i");

    assert!(!verdict.accepted);
    // the leading ) hits the synch cell of E, the dangling + abandons F
    assert_eq!(
        verdict.diagnostics,
        vec![
            Diagnostic::Synch {
                got: Terminal::Literal(')'),
                position: 1,
            },
            Diagnostic::Synch {
                got: Terminal::Literal('+'),
                position: 4,
            },
        ]
    );
    assert_eq!(
        verdict.diagnostics[0].to_string(),
        "cannot parse ')' at position 1, trying new rule"
    );
}

#[test]
fn accepts_optional_pair_inputs() {
    // S -> A B ; A -> a | epsilon ; B -> b | epsilon
    let analysis = analysis(vec![
        ("S", vec![nt("A"), nt("B")]),
        ("A", vec![t('a')]),
        ("A", vec![eps()]),
        ("B", vec![t('b')]),
        ("B", vec![eps()]),
    ]);
    let machine = Machine::new(&analysis);

    for input in ["", "a", "b", "ab"] {
        assert!(machine.parse(input).accepted, "should accept {:?}", input);
    }
    assert!(!machine.parse("ba").accepted);
}

#[test]
fn accepts_swapped_pair_inputs() {
    // S -> A a B b | B b A a ; A -> epsilon ; B -> epsilon
    let analysis = analysis(vec![
        ("S", vec![nt("A"), t('a'), nt("B"), t('b')]),
        ("S", vec![nt("B"), t('b'), nt("A"), t('a')]),
        ("A", vec![eps()]),
        ("B", vec![eps()]),
    ]);
    let machine = Machine::new(&analysis);

    assert!(machine.parse("ab").accepted);
    assert!(machine.parse("ba").accepted);
    assert!(!machine.parse("").accepted);
    assert!(!machine.parse("aa").accepted);
}

#[test]
fn accepts_nullable_chain_inputs() {
    // S -> A a ; A -> B D ; B -> b | epsilon ; D -> d | epsilon
    let analysis = analysis(vec![
        ("S", vec![nt("A"), t('a')]),
        ("A", vec![nt("B"), nt("D")]),
        ("B", vec![t('b')]),
        ("B", vec![eps()]),
        ("D", vec![t('d')]),
        ("D", vec![eps()]),
    ]);
    let machine = Machine::new(&analysis);

    for input in ["ba", "a", "da", "bda"] {
        assert!(machine.parse(input).accepted, "should accept {:?}", input);
    }
    assert!(!machine.parse("ad").accepted);
}

#[test]
fn mismatch_reports_expected_terminal() {
    let analysis = analysis(vec![("S", vec![t('a'), t('b')])]);
    let verdict = Machine::new(&analysis).parse("aa");

    assert!(!verdict.accepted);
    assert_eq!(
        verdict.diagnostics[0],
        Diagnostic::Mismatch {
            expected: Terminal::Literal('b'),
            got: Terminal::Literal('a'),
            position: 2,
        }
    );
    assert_eq!(
        verdict.diagnostics[0].to_string(),
        "Expected 'b' but got 'a' at position 2"
    );
}

#[test]
fn unknown_lookahead_skips_the_input_symbol() {
    let analysis = analysis(vec![("S", vec![t('a'), t('b')])]);
    let verdict = Machine::new(&analysis).parse("zab");

    // z is skipped before parsing resumes, so only the skip is reported
    assert!(!verdict.accepted);
    assert_eq!(
        verdict.diagnostics,
        vec![Diagnostic::UnknownLookahead {
            got: Terminal::Literal('z'),
            position: 1,
        }]
    );
    assert_eq!(
        verdict.diagnostics[0].to_string(),
        "cannot parse 'z' at position 1, skipping"
    );
}

#[test]
fn machine_is_reusable_across_inputs() {
    let analysis = expression_analysis();
    let machine = Machine::new(&analysis);

    assert!(!machine.parse(")bad(").accepted);
    assert!(machine.parse("i").accepted);
}
