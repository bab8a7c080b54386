use super::*;
use pretty_assertions::assert_eq;

#[test]
fn constructors_box_children() {
    let span = Span::new(0, 5);
    let expr = Expr::binary(
        BinaryOp::Plus,
        Expr::int(1, Span::new(0, 1)),
        Expr::var("x", Span::new(4, 5)),
        span,
    );

    match &expr.kind {
        ExprKind::Binary { op, left, right } => {
            assert_eq!(*op, BinaryOp::Plus);
            assert_eq!(left.kind, ExprKind::Int(1));
            assert_eq!(right.kind, ExprKind::Var(Name::new("x")));
        }
        other => panic!("expected binary node, got {other:?}"),
    }
    assert_eq!(expr.span, span);
}

#[test]
fn declarations_keep_order() {
    let decls = vec![
        Declaration::new("a", Expr::int(1, Span::DUMMY)),
        Declaration::new("b", Expr::int(2, Span::DUMMY)),
    ];
    let expr = Expr::let_rec(decls, Expr::var("a", Span::DUMMY), Span::DUMMY);

    let ExprKind::LetRec { decls, .. } = &expr.kind else {
        panic!("expected let rec");
    };
    let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn operator_symbols() {
    let symbols: Vec<String> = [
        BinaryOp::Equals,
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Times,
        BinaryOp::Divide,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(symbols, vec!["==", "+", "-", "*", "/"]);
}
