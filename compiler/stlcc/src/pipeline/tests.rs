#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use stlc_diagnostic::ErrorCode;

fn run_with(source: &str, engine: Engine) -> String {
    let options = RunOptions {
        trace: false,
        engine,
    };
    run(source, &options, &mut Vec::new()).unwrap().to_string()
}

#[test]
fn check_prints_normalized_types() {
    assert_eq!(check("\\x -> x").unwrap().ty.to_string(), "a -> a");
    assert_eq!(
        check("let compose f g x = f (g x) in compose").unwrap().ty.to_string(),
        "(a -> b) -> (c -> a) -> c -> b"
    );
    assert_eq!(
        check("\\p -> (p, 1)").unwrap().ty.to_string(),
        "a -> (a * Int)"
    );
}

#[test]
fn outcome_rendering() {
    assert_eq!(run_with("(\\a -> \\b -> a + b) 10 20", Engine::Vm), "30: Int");
    assert_eq!(run_with("1 == 2", Engine::Vm), "false: Bool");
    assert_eq!(run_with("(1, True)", Engine::Vm), "(1, true): (Int * Bool)");
    assert_eq!(run_with("\\x -> x", Engine::Vm), "function: a -> a");
    assert_eq!(run_with("\\x -> x", Engine::Eval), "function: a -> a");
}

#[test]
fn engines_agree() {
    for source in [
        "let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 5",
        "9 / 2",
        "if (False) 1 else 2",
        "let pair = (1, (2, True)) in pair",
    ] {
        assert_eq!(
            run_with(source, Engine::Vm),
            run_with(source, Engine::Eval),
            "{source}"
        );
    }
}

#[test]
fn trace_is_written_when_enabled() {
    let options = RunOptions {
        trace: true,
        engine: Engine::Vm,
    };
    let mut out = Vec::new();
    let outcome = run("1 + 2", &options, &mut out).unwrap();
    assert_eq!(outcome.value, "3");
    let trace = String::from_utf8(out).unwrap();
    assert_eq!(trace.lines().count(), 5);
    assert_eq!(trace.lines().next(), Some("0: ENTER 0: [] <-, -, -, ->"));
}

#[test]
fn trace_is_silent_by_default() {
    let mut out = Vec::new();
    run("1 + 2", &RunOptions::default(), &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn ill_typed_programs_never_reach_an_engine() {
    let source = "1 + True";
    let err = run(source, &RunOptions::default(), &mut Vec::new()).unwrap_err();
    assert!(matches!(err, DriverError::Type(_)));
    assert_eq!(
        err.render_line(Some(source)),
        "error[E2001]: unable to unify Bool with Int at 1:5-8"
    );
    assert!(matches!(compile(source), Err(DriverError::Type(_))));
}

#[test]
fn syntax_errors() {
    let err = check("let x = 1").unwrap_err();
    assert_eq!(err.to_diagnostic().code, ErrorCode::E1001);
    assert_eq!(
        err.to_string(),
        "expected ';' or in, found <end-of-stream>"
    );
}

#[test]
fn runtime_errors() {
    for engine in [Engine::Vm, Engine::Eval] {
        let options = RunOptions {
            trace: false,
            engine,
        };
        let err = run("10 / (5 - 5)", &options, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_diagnostic().code, ErrorCode::E4002, "{engine:?}");
    }
}

#[test]
fn exec_runs_compiled_code() {
    let code = compile("let double x = x * 2 in double 21").unwrap();
    assert_eq!(exec(&code, None).unwrap(), stlc_vm::Value::Int(42));

    let mut out = Vec::new();
    exec(&code, Some(&mut out)).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("0: ENTER 1: []"));
}
