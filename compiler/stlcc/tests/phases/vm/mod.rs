use crate::common::run_both;
use pretty_assertions::assert_eq;

#[test]
fn curried_addition() {
    assert_eq!(run_both("(\\a -> \\b -> a + b) 10 20"), "30: Int");
}

#[test]
fn factorial() {
    assert_eq!(
        run_both("let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 5"),
        "120: Int"
    );
}

#[test]
fn truncating_division() {
    assert_eq!(run_both("9 / 2"), "4: Int");
}

#[test]
fn conditional() {
    assert_eq!(run_both("if (False) 1 else 2"), "2: Int");
}

#[test]
fn mutual_recursion() {
    assert_eq!(
        run_both(
            "let rec isOdd n = if (n==0) False else isEven (n-1); \
             isEven n = if (n==0) True else isOdd (n-1) in isOdd 11"
        ),
        "true: Bool"
    );
}

#[test]
fn higher_order_functions() {
    assert_eq!(
        run_both(
            "let twice f x = f (f x); inc n = n + 1 in \
             (twice inc 5, twice (twice inc) 0, twice (\\b -> if (b) False else True) True)"
        ),
        "(7, 4, true): (Int * Int * Bool)"
    );
}

#[test]
fn closures_capture_enclosing_activations() {
    assert_eq!(
        run_both(
            "let adder a = \\b -> \\c -> a + b + c in \
             let add3 = adder 1 2 in (add3 10, add3 20)"
        ),
        "(13, 23): (Int * Int)"
    );
}

#[test]
fn shadowing() {
    assert_eq!(
        run_both("let x = 1 in let f y = x + y in let x = 100 in f x"),
        "101: Int"
    );
}

#[test]
fn nested_lets_in_operands() {
    assert_eq!(
        run_both("(let a = 2 in a * a) + (let b = 3; c = b + 1 in b * c)"),
        "16: Int"
    );
}

#[test]
fn recursion_inside_a_lambda() {
    assert_eq!(
        run_both(
            "let sumTo = \\limit -> let rec go i = if (i == limit) i else i + (go (i + 1)) in go 0 \
             in sumTo 100"
        ),
        "5050: Int"
    );
}

#[test]
fn functions_render_as_types() {
    assert_eq!(run_both("let k a b = a in k"), "function: a -> b -> a");
}

#[test]
fn wrapping_arithmetic() {
    assert_eq!(run_both("2147483647 * 2"), "-2: Int");
}
