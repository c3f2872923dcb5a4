//! Tests for the shape of parsed expression trees

use cppexpr_frontend::{Frontend, ParserConfig, ParsingContext};
use pretty_assertions::{assert_eq, assert_ne};

fn sexpr(input: &str) -> String {
    match Frontend::parse_expression(input, "test.cpp") {
        Ok(expr) => expr.to_sexpr(),
        Err(err) => panic!("failed to parse `{input}`: {err}"),
    }
}

fn sexpr_in_template_arguments(input: &str) -> Result<String, String> {
    Frontend::parse_expression_with(
        input,
        "test.cpp",
        ParserConfig::default(),
        ParsingContext::in_template_arguments(),
    )
    .map(|expr| expr.to_sexpr())
    .map_err(|err| err.to_string())
}

#[test]
fn test_precedence_across_tiers() {
    assert_eq!(sexpr("a + b * c - d"), "(- (+ a (* b c)) d)");
    assert_eq!(sexpr("a || b && c"), "(|| a (&& b c))");
    assert_eq!(sexpr("a & b == c"), "(& a (== b c))");
    assert_eq!(sexpr("a | b ^ c & d"), "(| a (^ b (& c d)))");
    assert_eq!(sexpr("a << b < c"), "(< (<< a b) c)");
    assert_eq!(sexpr("a .* b * c"), "(* (.* a b) c)");
}

#[test]
fn test_every_binary_tier_is_left_associative() {
    assert_eq!(sexpr("a - b - c"), "(- (- a b) c)");
    assert_eq!(sexpr("a / b % c"), "(% (/ a b) c)");
    assert_eq!(sexpr("a << b >> c"), "(>> (<< a b) c)");
    assert_eq!(sexpr("a < b < c"), "(< (< a b) c)");
    assert_eq!(sexpr("a == b != c"), "(!= (== a b) c)");
    assert_eq!(sexpr("a && b && c"), "(&& (&& a b) c)");
    assert_eq!(sexpr("a, b, c"), "(comma (comma a b) c)");
}

#[test]
fn test_shift_assign_is_never_split() {
    assert_eq!(sexpr("a << b <= c"), "(<= (<< a b) c)");
    assert_eq!(sexpr("a <<= b"), "(<<= a b)");
    assert_eq!(sexpr("a >> b >= c"), "(>= (>> a b) c)");
    assert!(Frontend::parse_expression("a < <= b", "test.cpp").is_err());
}

#[test]
fn test_parentheses_are_kept() {
    let grouped = sexpr("(a + b) * c");
    assert_eq!(grouped, "(* (paren (+ a b)) c)");
    assert_ne!(grouped, sexpr("a + b * c"));
}

#[test]
fn test_conditional_nesting() {
    assert_eq!(sexpr("a ? b : c ? d : e"), "(? a b (? c d e))");
    assert_eq!(sexpr("a ? b ? c : d : e"), "(? a (? b c d) e)");
    assert_eq!(sexpr("a || b ? c : d"), "(? (|| a b) c d)");
    assert_eq!(sexpr("a ? b, c : d"), "(? a (comma b c) d)");
}

#[test]
fn test_assignment_and_equality() {
    assert_eq!(sexpr("a = b"), "(= a b)");
    assert_eq!(sexpr("a == b"), "(== a b)");
    assert_eq!(sexpr("a = b == c"), "(= a (== b c))");
    assert_eq!(sexpr("*p++ = 0"), "(= (* (post++ p)) 0)");
}

#[test]
fn test_new_expression_forms() {
    assert_eq!(sexpr("new int"), "(new <int>)");
    assert_eq!(sexpr("new T(1)"), "(new <T> (args 1))");
    assert_eq!(sexpr("new (p) T"), "(new (placement p) <T>)");
    assert_eq!(sexpr("::new T{}"), "(::new <T> (braced))");
    assert_eq!(sexpr("new (int)(5)"), "(new <(int)> (args 5))");
    assert_eq!(sexpr("new int[n]"), "(new <int[n]>)");
    assert_eq!(sexpr("new (buf) T[n]{1, 2}"), "(new (placement buf) <T[n]> (braced 1 2))");
}

#[test]
fn test_delete_expression_forms() {
    assert_eq!(sexpr("delete p"), "(delete p)");
    assert_eq!(sexpr("delete[] p"), "(delete[] p)");
    assert_eq!(sexpr("::delete p->next"), "(::delete (-> p next))");
}

#[test]
fn test_sizeof_prefers_a_type() {
    assert_eq!(sexpr("sizeof(int)"), "(sizeof <int>)");
    assert_eq!(sexpr("sizeof x"), "(sizeof x)");
    assert_eq!(sexpr("sizeof(x)"), "(sizeof <x>)");
    assert_eq!(sexpr("sizeof -x"), "(sizeof (- x))");
    assert_eq!(sexpr("sizeof(char) * n"), "(* (sizeof <char>) n)");
}

#[test]
fn test_casts() {
    assert_eq!(sexpr("(int)x + 1"), "(+ (cast <int> x) 1)");
    assert_eq!(sexpr("(T)x"), "(cast <T> x)");
    assert_eq!(sexpr("(a) + b"), "(+ (paren a) b)");
    assert_eq!(sexpr("static_cast<long>(a + b)"), "(static_cast <long> (+ a b))");
    assert_eq!(sexpr("const_cast<char*>(s)[0]"), "([] (const_cast <char*> s) 0)");
}

#[test]
fn test_template_ids_in_expressions() {
    assert_eq!(sexpr("std::max<int>(a, b)"), "(call std::max<int> a b)");
    assert_eq!(sexpr("a < b && c > d"), "(&& (< a b) (> c d))");
    assert_eq!(sexpr("x = v<vector<int>>"), "(= x v<vector<int>>)");
}

#[test]
fn test_template_argument_context_leaves_angle_brackets() {
    assert_eq!(sexpr_in_template_arguments("a<T>(b)").unwrap(), "(call a<T> b)");
    assert_eq!(sexpr_in_template_arguments("a < b").unwrap(), "(< a b)");
    assert_eq!(sexpr_in_template_arguments("(a > b)").unwrap(), "(paren (> a b))");

    let err = sexpr_in_template_arguments("a > b").unwrap_err();
    assert!(err.contains("unexpected `>` after the end of the expression"), "{err}");
    assert!(sexpr_in_template_arguments("a >> b").is_err());
}
