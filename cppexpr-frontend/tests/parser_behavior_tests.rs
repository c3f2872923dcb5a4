//! Tests for failures, limits, printing and tree consumers

use cppexpr_common::CompilerError;
use cppexpr_frontend::{
    to_json, Expression, Frontend, Lexer, NodeCounter, Parser, ParserConfig, ParsingContext,
};
use pretty_assertions::assert_eq;

fn parse(input: &str) -> Result<Expression, CompilerError> {
    Frontend::parse_expression(input, "test.cpp")
}

fn error_message(input: &str) -> String {
    match parse(input) {
        Ok(expr) => panic!("`{input}` unexpectedly parsed as {}", expr.to_sexpr()),
        Err(err) => err.to_string(),
    }
}

#[test]
fn test_empty_input() {
    for input in ["", "   ", "// nothing here"] {
        let message = error_message(input);
        assert!(message.contains("expected an expression, found end of input"), "{message}");
    }
}

#[test]
fn test_trailing_input_span_runs_to_the_end() {
    match parse("a b c").unwrap_err() {
        CompilerError::ParseError { span, input, message } => {
            assert!(message.contains("unexpected `b`"), "{message}");
            assert_eq!(span.start.offset, 2);
            assert_eq!(span.end.offset, 5);
            assert_eq!(input.start.offset, 0);
            assert_eq!(input.end.offset, 5);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_named_cast_failures_are_hard() {
    let message = error_message("static_cast<int>(x");
    assert!(message.contains("expected `)` in `static_cast`"), "{message}");

    let message = error_message("dynamic_cast(x)");
    assert!(message.contains("expected `<` in `dynamic_cast`"), "{message}");
}

#[test]
fn test_missing_pieces_name_what_was_expected() {
    let message = error_message("a ? b");
    assert!(message.contains("expected `:` in conditional expression"), "{message}");

    let message = error_message("f(a,)");
    assert!(message.contains("expected argument, found `)`"), "{message}");

    let message = error_message("x * ");
    assert!(message.contains("right operand of `*`"), "{message}");
}

#[test]
fn test_error_location_is_reported() {
    match parse("a +\n  ]").unwrap_err() {
        CompilerError::ParseError { span, .. } => {
            assert_eq!(span.start.filename, "test.cpp");
            assert_eq!(span.start.line, 2);
            assert_eq!(span.start.column, 3);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_context_is_balanced_after_every_parse() {
    for input in ["a = b", "f<int>(x) > 1", "a +", "static_cast<int>(", "(T)x"] {
        let mut lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer.tokenize().unwrap())
            .with_context(ParsingContext::in_template_arguments());
        let _ = parser.parse();
        assert_eq!(parser.context().depth(), 1, "{input}");
        assert!(parser.context().parsing_template_arguments(), "{input}");
    }
}

#[test]
fn test_depth_limit() {
    let config = ParserConfig {
        max_depth: 8,
        ..ParserConfig::default()
    };
    let shallow = Frontend::parse_expression_with("(x)", "test.cpp", config.clone(), ParsingContext::new());
    assert!(shallow.is_ok());

    let deep = format!("{}x{}", "(".repeat(10), ")".repeat(10));
    let err = Frontend::parse_expression_with(&deep, "test.cpp", config, ParsingContext::new()).unwrap_err();
    assert!(err.to_string().contains("nesting exceeds the limit of 8"), "{err}");
}

fn nested_parens(levels: usize) -> String {
    format!("{}x{}", "(".repeat(levels), ")".repeat(levels))
}

#[test]
fn test_default_limit_fits_on_the_stack() {
    let expr = parse(&nested_parens(120)).unwrap();
    assert!(expr.to_sexpr().starts_with("(paren (paren"));

    let message = error_message(&nested_parens(400));
    assert!(message.contains("nesting exceeds the limit of 256"), "{message}");
}

#[test]
fn test_type_nesting_counts_toward_the_limit() {
    let config = ParserConfig {
        max_depth: 8,
        ..ParserConfig::default()
    };
    let inputs = [
        format!("sizeof({}int{})", "a<".repeat(50), ">".repeat(50)),
        format!("sizeof(int{}{})", "(*".repeat(50), ")".repeat(51)),
        format!("new int{}", "*".repeat(50)),
        format!("f({}{})", "{".repeat(50), "}".repeat(50)),
    ];
    for input in inputs {
        let err = Frontend::parse_expression_with(&input, "test.cpp", config.clone(), ParsingContext::new())
            .unwrap_err();
        assert!(err.to_string().contains("nesting exceeds the limit of 8"), "{input}: {err}");
    }
}

#[test]
fn test_deep_declarator_fails_cleanly_at_the_default_limit() {
    let input = format!("sizeof(int{}{})", "(*".repeat(10_000), ")".repeat(10_001));
    let message = error_message(&input);
    assert!(message.contains("nesting exceeds the limit of 256"), "{message}");
}

#[test]
fn test_printed_source_parses_to_the_same_tree() {
    let inputs = [
        "a + b * (c - d)",
        "x = y += 3",
        "f(a, b)[i]->m.n",
        "static_cast<int>(x) + sizeof(int) + sizeof x",
        "new (buf) T[n]{1, 2}",
        "::delete[] p",
        "a ? b : c ? d : e",
        "- -x + -(-y)",
        "(int)x",
        "p->*m = std::move(v)",
        "throw std::runtime_error(\"bad\")",
        "typeid(T) == typeid(*p)",
        "a < b && c > d",
        "o.~T()",
        "int(x) + Point{1, 2}.x",
    ];
    for input in inputs {
        let first = parse(input).unwrap();
        let printed = first.to_string();
        let second = parse(&printed).unwrap_or_else(|err| panic!("`{printed}` from `{input}`: {err}"));
        assert_eq!(first.to_sexpr(), second.to_sexpr(), "{input} printed as {printed}");
    }
}

#[test]
fn test_node_counter() {
    let counts = NodeCounter::count(&parse("a + f(b)").unwrap());
    assert_eq!(counts.expressions, 5);
    assert_eq!(counts.names, 3);
    assert_eq!(counts.type_ids, 0);

    let counts = NodeCounter::count(&parse("(int)x").unwrap());
    assert_eq!(counts.expressions, 2);
    assert_eq!(counts.type_ids, 1);
    assert_eq!(counts.names, 1);
}

#[test]
fn test_json_output() {
    let expr = parse("a + 1").unwrap();
    let json = to_json(&expr).unwrap();
    assert!(json.contains("\"Binary\""), "{json}");
    assert!(json.contains("\"op\": \"Add\""), "{json}");

    let restored: Expression = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, expr);
}
