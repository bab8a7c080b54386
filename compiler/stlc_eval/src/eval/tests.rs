#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use stlc_diagnostic::ErrorCode;

fn parse(source: &str) -> Expr {
    stlc_parse::parse(source).unwrap()
}

fn render(source: &str) -> String {
    evaluate(&parse(source)).unwrap().to_string()
}

#[test]
fn literals_and_arithmetic() {
    assert_eq!(render("(\\a -> \\b -> a + b) 10 20"), "30");
    assert_eq!(render("9 / 2"), "4");
    assert_eq!(render("(0 - 9) / 2"), "-4");
    assert_eq!(render("2147483647 + 1"), "-2147483648");
    assert_eq!(render("2 * 3 == 6"), "true");
}

#[test]
fn conditionals() {
    assert_eq!(render("if (False) 1 else 2"), "2");
    assert_eq!(render("if (1 == 1) True else False"), "true");
}

#[test]
fn recursion() {
    assert_eq!(
        render("let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 5"),
        "120"
    );
    let parity = "let rec isOdd n = if (n==0) False else isEven (n-1); \
                  isEven n = if (n==0) True else isOdd (n-1) in ";
    assert_eq!(render(&format!("{parity}isOdd 7")), "true");
    assert_eq!(render(&format!("{parity}isEven 7")), "false");
}

#[test]
fn sequential_let_sees_earlier_declarations() {
    assert_eq!(render("let a = 1; b = a + 1 in a + b"), "3");
    assert_eq!(render("let x = 1 in let x = x + 10 in x"), "11");
}

#[test]
fn closures_capture_their_scope() {
    assert_eq!(
        render("let x = 1 in let f = \\y -> x + y in let x = 100 in f 2"),
        "3"
    );
}

#[test]
fn tuples() {
    assert_eq!(render("(1, (True, 2 + 3))"), "(1, (true, 5))");
}

#[test]
fn function_value() {
    assert_eq!(render("\\n -> n"), "<function \\n>");
}

#[test]
fn unbound_variable() {
    let source = "1 + y";
    let err = evaluate(&parse(source)).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnboundVariable {
            name: "y".into(),
            span: Span::new(4, 5),
        }
    );
    assert_eq!(
        err.to_diagnostic().render_line(Some(source)),
        "error[E4001]: unbound variable y at 1:5"
    );
}

#[test]
fn recursive_value_read_too_early() {
    let err = evaluate(&parse("let rec x = x in x")).unwrap_err();
    assert_eq!(
        err,
        EvalError::Uninitialised {
            name: "x".into(),
            span: Span::new(12, 13),
        }
    );
}

#[test]
fn division_by_zero() {
    let source = "1 / 0";
    let err = evaluate(&parse(source)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E4002);
    assert_eq!(
        err.to_diagnostic().render_line(Some(source)),
        "error[E4002]: division by zero at 1:1-5"
    );
}

#[test]
fn ill_typed_programs_fail_cleanly() {
    assert_eq!(
        evaluate(&parse("1 2")).unwrap_err(),
        EvalError::WrongKind {
            expected: "function",
            found: "Int",
            span: Span::new(0, 1),
        }
    );
    assert_eq!(
        evaluate(&parse("if (1) 2 else 3")).unwrap_err(),
        EvalError::WrongKind {
            expected: "Bool",
            found: "Int",
            span: Span::new(4, 5),
        }
    );
}

#[test]
fn deep_recursion_does_not_overflow() {
    assert_eq!(
        render("let rec sum n = if (n == 0) 0 else n + (sum (n - 1)) in sum 20000"),
        "200010000"
    );
}

#[test]
fn recursive_function_escapes_its_let() {
    assert_eq!(
        render("(let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact) 5"),
        "120"
    );
    assert_eq!(
        render("let f = (let rec down n = if (n == 0) 7 else down (n - 1) in down) in f 3"),
        "7"
    );
}
