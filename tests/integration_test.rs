// Integration tests for the three analysis phases

use declcheck::parser::ast::VariableDeclaration;
use declcheck::pipeline::{analyze, Phase, PhaseOutcome};
use declcheck::{check, lex, parse, AstNode, Level, SemanticFinding, TokenKind};
use pretty_assertions::assert_eq;

fn error_messages(findings: &[SemanticFinding]) -> Vec<&str> {
    findings
        .iter()
        .filter(|f| f.level == Level::Error)
        .map(|f| f.message.as_str())
        .collect()
}

#[test]
fn test_whitespace_and_comments_lex_to_nothing() {
    let source = "\n   // heading\n\t/* a\n   block */  \r\n// tail";
    let tokens = lex(source).expect("lexing failed");
    assert!(tokens.is_empty());
}

#[test]
fn test_token_positions_match_source() {
    let source = r#"
        // every kind of token
        int count = 42;
        double ratio = -0.5d; /* inline */ float f = 1.5f;
        char c = '\t', d = 'x';
        String s = "semi;colon";
        boolean ok = false;
    "#;

    let tokens = lex(source).expect("lexing failed");
    assert!(!tokens.is_empty());
    for token in &tokens {
        assert!(token.start < token.end && token.end <= source.len());
        assert_eq!(&source[token.start..token.end], token.lexeme);
    }

    let string = tokens
        .iter()
        .find(|t| t.kind == TokenKind::String)
        .expect("string token");
    assert_eq!(string.lexeme, "\"semi;colon\"");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Boolean));
    assert!(tokens.iter().any(|t| t.lexeme == "," && t.kind == TokenKind::Punctuation));
}

#[test]
fn test_multi_character_char_literal_fails() {
    for source in ["char c = 'ab';", "char c = 'abc';", "char c = '\\nn';"] {
        let err = lex(source).expect_err(source);
        assert!(err.message.contains("only one character"), "{}", err);
        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 10);
    }
}

#[test]
fn test_lexical_error_on_later_line() {
    let err = lex("int a = 1;\n\nint b = 2 * 3;").expect_err("lexing should fail");
    assert_eq!((err.line(), err.column()), (3, 11));
    assert_eq!(
        err.to_string(),
        "Lexical error at line 3, column 11: invalid character '*'"
    );
}

#[test]
fn test_parse_simple_declaration() {
    let program = parse("int x = 5;").expect("parsing failed");
    assert_eq!(
        program,
        AstNode::Program {
            children: vec![AstNode::VariableDeclaration(VariableDeclaration::new(
                "int", "x", "5"
            ))]
        }
    );
}

#[test]
fn test_check_simple_declaration() {
    let program = parse("int x = 5;").expect("parsing failed");
    let findings = check(&program);

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].level, Level::Info);
    assert!(findings[0].message.contains("'x'"));
    assert!(findings[0].message.contains("int"));
}

#[test]
fn test_double_literal_into_int() {
    let program = parse("int x = 3.14;").expect("parsing failed");
    let findings = check(&program);
    assert_eq!(error_messages(&findings).len(), 1);
}

#[test]
fn test_duplicate_reported_once_for_second_occurrence() {
    let program = parse("int x = 1;\nchar y = 'y';\nint x = 2;").expect("parsing failed");
    let findings = check(&program);

    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0].level, Level::Info);
    assert_eq!(findings[1].level, Level::Info);
    assert_eq!(
        findings[2],
        SemanticFinding::error("variable 'x' is already declared")
    );
}

#[test]
fn test_widening_examples() {
    let float_from_int = check(&parse("float f = 10;").unwrap());
    assert!(error_messages(&float_from_int).is_empty());

    let byte_from_short = check(&parse("byte b = 300;").unwrap());
    assert_eq!(
        error_messages(&byte_from_short),
        vec!["type mismatch: cannot assign short value 300 to variable 'b' of type byte"]
    );
}

#[test]
fn test_check_is_repeatable() {
    let program = parse(
        "int a = 1; int a = 2; short s = 'c'; long big = 9999999999; String t = \"ok\";",
    )
    .unwrap();
    let first = check(&program);
    let second = check(&program);
    assert_eq!(first, second);
    assert_eq!(error_messages(&first).len(), 2);
}

#[test]
fn test_phases_are_independent() {
    // The parser accepts what the lexer rejects, and vice versa.
    let source = "int x = 4 + 1;";
    assert!(lex(source).is_err());
    assert!(parse(source).is_ok());

    let source = "int 1x = 5;";
    assert!(lex(source).is_ok());
    assert!(parse(source).is_err());
}

#[test]
fn test_driver_gates_phases() {
    let analysis = analyze("int x = 4 + 1;");
    assert!(matches!(
        analysis.outcome(Phase::Lexical),
        PhaseOutcome::Error(_)
    ));
    assert_eq!(analysis.outcome(Phase::Syntax), &PhaseOutcome::Skipped);
    assert!(analysis.ast.is_none());

    let analysis = analyze("int x = 5; double y = x;");
    assert!(analysis.is_clean());
}

#[test]
fn test_phases_run_concurrently() {
    let sources = ["int a = 1;", "byte b = 300;", "char c = 'c';", "float f = 2;"];
    let handles: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = source.to_string();
            std::thread::spawn(move || {
                let tokens = lex(&source).unwrap();
                let findings = check(&parse(&source).unwrap());
                (tokens.len(), error_messages(&findings).len())
            })
        })
        .collect();

    let results: Vec<(usize, usize)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![(5, 0), (5, 1), (5, 0), (5, 0)]);
}
