use crate::common::type_of;
use pretty_assertions::assert_eq;
use stlc_diagnostic::ErrorCode;

#[test]
fn identity_and_composition() {
    assert_eq!(type_of("\\x -> x"), "a -> a");
    assert_eq!(type_of("\\f -> \\g -> \\x -> f (g x)"), "(a -> b) -> (c -> a) -> c -> b");
}

#[test]
fn let_generalises() {
    assert_eq!(
        type_of("let id x = x in (id 1, id True)"),
        "(Int * Bool)"
    );
}

#[test]
fn lambda_bound_names_stay_monomorphic() {
    let err = stlcc::check("(\\id -> (id 1, id True)) (\\x -> x)").unwrap_err();
    assert_eq!(err.to_diagnostic().code, ErrorCode::E2001);
}

#[test]
fn mutual_recursion() {
    assert_eq!(
        type_of(
            "let rec isOdd n = if (n==0) False else isEven (n-1); \
             isEven n = if (n==0) True else isOdd (n-1) in isOdd"
        ),
        "Int -> Bool"
    );
}

#[test]
fn recursive_functions() {
    assert_eq!(
        type_of("let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact"),
        "Int -> Int"
    );
}

#[test]
fn tuples() {
    assert_eq!(type_of("\\a -> \\b -> (b, a)"), "a -> b -> (b * a)");
}

#[test]
fn unknown_names_are_reported_with_location() {
    let source = "let x = 1 in y";
    let err = stlcc::check(source).unwrap_err();
    assert_eq!(
        err.render_line(Some(source)),
        "error[E2003]: unknown name y at 1:14"
    );
}
