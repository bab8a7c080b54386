#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use stlc_ir::{BinaryOp, Declaration, ExprKind, Span};
use stlc_lexer::TokenKind;

/// Render a tree as an s-expression, ignoring spans.
fn sexp(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Apply { func, arg } => format!("(app {} {})", sexp(func), sexp(arg)),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => format!(
            "(if {} {} {})",
            sexp(cond),
            sexp(then_branch),
            sexp(else_branch)
        ),
        ExprKind::Lambda { param, body } => format!("(fn {param} {})", sexp(body)),
        ExprKind::Let { decls, body } => format!("(let {} {})", decls_sexp(decls), sexp(body)),
        ExprKind::LetRec { decls, body } => {
            format!("(letrec {} {})", decls_sexp(decls), sexp(body))
        }
        ExprKind::Bool(value) => value.to_string(),
        ExprKind::Int(value) => value.to_string(),
        ExprKind::Tuple(elements) => {
            let parts: Vec<String> = elements.iter().map(sexp).collect();
            format!("(tuple {})", parts.join(" "))
        }
        ExprKind::Binary { op, left, right } => {
            format!("({op} {} {})", sexp(left), sexp(right))
        }
        ExprKind::Var(name) => name.to_string(),
    }
}

fn decls_sexp(decls: &[Declaration]) -> String {
    let parts: Vec<String> = decls
        .iter()
        .map(|d| format!("[{} {}]", d.name, sexp(&d.expr)))
        .collect();
    parts.join(" ")
}

fn parse_sexp(source: &str) -> String {
    sexp(&parse(source).unwrap())
}

#[test]
fn application_is_left_associative() {
    assert_eq!(
        parse_sexp("(\\a -> \\b -> a + b) 10 20"),
        "(app (app (fn a (fn b (+ a b))) 10) 20)"
    );
}

#[test]
fn operator_precedence() {
    assert_eq!(parse_sexp("1 + 2 * 3 - 4"), "(- (+ 1 (* 2 3)) 4)");
    assert_eq!(parse_sexp("n == 0 + 1"), "(== n (+ 0 1))");
    assert_eq!(parse_sexp("9 / 2"), "(/ 9 2)");
}

#[test]
fn multi_parameter_lambda_desugars() {
    assert_eq!(parse_sexp("\\f g x -> f (g x)"), "(fn f (fn g (fn x (app f (app g x)))))");
}

#[test]
fn let_declarations_with_parameters() {
    assert_eq!(
        parse_sexp("let add a b = a + b ; incr = add 1 in incr 10"),
        "(let [add (fn a (fn b (+ a b)))] [incr (app add 1)] (app incr 10))"
    );
}

#[test]
fn let_rec_mutual_recursion() {
    let source = "let rec isOdd n = if (n == 0) False else isEven (n - 1); \
                  isEven n = if (n == 0) True else isOdd (n - 1) in isOdd 5";
    assert_eq!(
        parse_sexp(source),
        "(letrec \
         [isOdd (fn n (if (== n 0) false (app isEven (- n 1))))] \
         [isEven (fn n (if (== n 0) true (app isOdd (- n 1))))] \
         (app isOdd 5))"
    );
}

#[test]
fn tuple_literal_and_grouping() {
    assert_eq!(parse_sexp("(1, True, x)"), "(tuple 1 true x)");
    assert_eq!(parse_sexp("((1))"), "1");
}

#[test]
fn spans_cover_full_extent() {
    let source = "\\x -> x + 1";
    let expr = parse(source).unwrap();
    assert_eq!(expr.span, Span::new(0, 11));
    let ExprKind::Lambda { body, .. } = &expr.kind else {
        panic!("expected lambda, got {expr:?}");
    };
    assert_eq!(body.span, Span::new(6, 11));

    let grouped = parse("(42)").unwrap();
    assert_eq!(grouped.span, Span::new(0, 4));
}

#[test]
fn declaration_lambda_span_starts_at_first_parameter() {
    let expr = parse("let f a b = a in f").unwrap();
    let ExprKind::Let { decls, .. } = &expr.kind else {
        panic!("expected let, got {expr:?}");
    };
    assert_eq!(decls[0].expr.span, Span::new(6, 13));
}

#[test]
fn comments_are_ignored() {
    assert_eq!(parse_sexp("// answer\n40 + 2 // done"), "(+ 40 2)");
}

#[test]
fn missing_in_reports_expected_set() {
    let err = parse("let x = 1 x").unwrap_err();
    // `x` is consumed as an application argument, so the parser stops at EOF.
    assert_eq!(
        err,
        SyntaxError::UnexpectedToken {
            expected: vec![TokenKind::Semicolon, TokenKind::In],
            found: TokenKind::Eof,
            span: Span::new(11, 11),
        }
    );
    assert_eq!(err.to_string(), "expected ';' or in, found <end-of-stream>");
}

#[test]
fn missing_else_branch() {
    let err = parse("if (True) 1").unwrap_err();
    assert_eq!(err.to_string(), "expected else, found <end-of-stream>");
    assert_eq!(err.to_diagnostic().code, stlc_diagnostic::ErrorCode::E1001);
}

#[test]
fn integer_out_of_range() {
    let err = parse("2147483648").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::InvalidInteger {
            text: "2147483648".to_string(),
            span: Span::new(0, 10),
        }
    );
    assert_eq!(parse_sexp("2147483647"), "2147483647");
}

#[test]
fn unrecognised_character() {
    let err = parse("1 $ 2").unwrap_err();
    assert_eq!(err.to_diagnostic().render_line(Some("1 $ 2")), "error[E1002]: unrecognised character \"$\" at 1:3");
}

#[test]
fn trailing_operator_is_rejected() {
    let err = parse("1 +").unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::UnexpectedToken {
            found: TokenKind::Eof,
            ..
        }
    ));
}

#[test]
fn binary_op_constructor_matches_parse() {
    let expr = parse("a * b").unwrap();
    assert!(matches!(
        expr.kind,
        ExprKind::Binary {
            op: BinaryOp::Times,
            ..
        }
    ));
}
