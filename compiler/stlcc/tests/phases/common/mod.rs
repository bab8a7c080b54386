//! Shared helpers for phase tests.

use stlcc::{run, Engine, Outcome, RunOptions};

/// Principal type of `source`, normalized.
pub fn type_of(source: &str) -> String {
    stlcc::check(source).unwrap().ty.to_string()
}

pub fn run_on(source: &str, engine: Engine) -> Outcome {
    let options = RunOptions {
        trace: false,
        engine,
    };
    run(source, &options, &mut Vec::new()).unwrap()
}

/// Run on both engines, assert they agree, and return the rendered outcome.
pub fn run_both(source: &str) -> String {
    let vm = run_on(source, Engine::Vm);
    let eval = run_on(source, Engine::Eval);
    assert_eq!(vm.ty, eval.ty, "{source}");
    if !vm.is_function() {
        assert_eq!(vm.value, eval.value, "engines disagree on {source}");
    }
    vm.to_string()
}
