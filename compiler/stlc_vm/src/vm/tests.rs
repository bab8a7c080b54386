#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use stlc_bytecode::{assemble, compile};
use stlc_diagnostic::ErrorCode;

fn run(source: &str) -> Result<Value, VmError> {
    let expr = stlc_parse::parse(source).unwrap();
    execute(&compile(&expr).unwrap(), 0)
}

fn run_asm(listing: &str) -> Result<Value, VmError> {
    execute(&assemble(listing).unwrap(), 0)
}

fn trace(source: &str) -> String {
    let expr = stlc_parse::parse(source).unwrap();
    let mut out = Vec::new();
    execute_with_trace(&compile(&expr).unwrap(), 0, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn curried_addition() {
    assert_eq!(run("(\\a -> \\b -> a + b) 10 20"), Ok(Value::Int(30)));
}

#[test]
fn recursive_factorial() {
    assert_eq!(
        run("let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 5"),
        Ok(Value::Int(120))
    );
    assert_eq!(
        run("let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 10"),
        Ok(Value::Int(3_628_800))
    );
}

#[test]
fn truncating_division() {
    assert_eq!(run("9 / 2"), Ok(Value::Int(4)));
    assert_eq!(run("(0 - 9) / 2"), Ok(Value::Int(-4)));
}

#[test]
fn conditional() {
    assert_eq!(run("if (False) 1 else 2"), Ok(Value::Int(2)));
    assert_eq!(run("if (3 == 3) 1 else 2"), Ok(Value::Int(1)));
}

#[test]
fn mutual_recursion() {
    let source = "let rec isOdd n = if (n==0) False else isEven (n-1); \
                  isEven n = if (n==0) True else isOdd (n-1) in ";
    assert_eq!(run(&format!("{source}isOdd 7")), Ok(Value::Bool(true)));
    assert_eq!(run(&format!("{source}isEven 7")), Ok(Value::Bool(false)));
}

#[test]
fn closure_sees_enclosing_bindings() {
    assert_eq!(
        run("let x = 1 in let f = \\y -> x + y in f 2"),
        Ok(Value::Int(3))
    );
    assert_eq!(
        run("let compose f g x = f (g x) in compose (\\n -> n * 2) (\\n -> n + 1) 4"),
        Ok(Value::Int(10))
    );
}

#[test]
fn tuples() {
    let value = run("let p = (1, 2 + 3, True) in p").unwrap();
    assert_eq!(value.to_string(), "(1, 5, true)");
}

#[test]
fn function_result() {
    match run("\\x -> x").unwrap() {
        Value::Closure(closure) => assert_eq!(closure.entry, 11),
        other => panic!("expected a closure, got {other}"),
    }
}

#[test]
fn arithmetic_wraps() {
    assert_eq!(run("2147483647 + 1"), Ok(Value::Int(i32::MIN)));
}

#[test]
fn division_by_zero() {
    let err = run("1 / 0").unwrap_err();
    assert_eq!(err, VmError::DivisionByZero { ip: 15 });
    assert_eq!(err.code(), ErrorCode::E4002);
    assert_eq!(
        err.to_diagnostic().render_line(None),
        "error[E4002]: division by zero at 15"
    );
}

#[test]
fn double_enter() {
    assert_eq!(
        run_asm("ENTER 0\nENTER 0\nRET"),
        Err(VmError::DoubleEnter { ip: 5 })
    );
}

#[test]
fn stack_underflow() {
    assert_eq!(
        run_asm("ENTER 0\nADD\nRET"),
        Err(VmError::StackUnderflow {
            ip: 5,
            opcode: Opcode::Add,
        })
    );
    assert_eq!(
        run_asm("ENTER 0\nPUSH_INT 1\nPUSH_TUPLE 2\nRET"),
        Err(VmError::StackUnderflow {
            ip: 10,
            opcode: Opcode::PushTuple,
        })
    );
}

#[test]
fn unknown_opcode() {
    let mut code = assemble("ENTER 0").unwrap();
    code.push(200);
    assert_eq!(
        execute(&code, 0),
        Err(VmError::UnknownOpcode { ip: 5, byte: 200 })
    );
}

#[test]
fn truncated_operand() {
    let mut code = assemble("ENTER 0").unwrap();
    code.extend([Opcode::PushInt.byte(), 1, 0]);
    assert_eq!(
        execute(&code, 0),
        Err(VmError::TruncatedOperand {
            ip: 5,
            opcode: Opcode::PushInt,
        })
    );
}

#[test]
fn running_off_the_end() {
    assert_eq!(
        run_asm("ENTER 0\nPUSH_INT 1"),
        Err(VmError::IpOutOfRange { ip: 10, len: 10 })
    );
}

#[test]
fn store_without_enter() {
    assert_eq!(
        run_asm("PUSH_INT 1\nSTORE_VAR 0\nRET"),
        Err(VmError::NoSlots {
            ip: 5,
            opcode: Opcode::StoreVar,
        })
    );
}

#[test]
fn slot_errors() {
    assert_eq!(
        run_asm("ENTER 1\nPUSH_VAR 0 0\nRET"),
        Err(VmError::UnsetSlot { ip: 5, slot: 0 })
    );
    assert_eq!(
        run_asm("ENTER 1\nPUSH_INT 1\nSTORE_VAR 3\nRET"),
        Err(VmError::SlotOutOfRange {
            ip: 10,
            opcode: Opcode::StoreVar,
            slot: 3,
            size: 1,
        })
    );
    assert_eq!(
        run_asm("ENTER 1\nPUSH_VAR 1 0\nRET"),
        Err(VmError::ScopeUnderflow { ip: 5, depth: 1 })
    );
}

#[test]
fn wrong_operand_kind() {
    assert_eq!(
        run_asm("ENTER 0\nPUSH_TRUE\nPUSH_INT 1\nADD\nRET"),
        Err(VmError::WrongKind {
            ip: 11,
            opcode: Opcode::Add,
            expected: "Int",
            found: "Bool",
        })
    );
    assert_eq!(
        run_asm("ENTER 0\nPUSH_INT 1\nPUSH_INT 2\nSWAP_CALL\nRET"),
        Err(VmError::WrongKind {
            ip: 15,
            opcode: Opcode::SwapCall,
            expected: "closure",
            found: "Int",
        })
    );
}

#[test]
fn hand_written_loop() {
    // Counts slot 0 down from 3 and returns the number of iterations.
    let listing = "\
ENTER 2
PUSH_INT 3
STORE_VAR 0
PUSH_INT 0
STORE_VAR 1
:loop
PUSH_VAR 0 0
PUSH_INT 0
EQ
JMP_TRUE done
PUSH_VAR 0 0
PUSH_INT 1
SUB
STORE_VAR 0
PUSH_VAR 0 1
PUSH_INT 1
ADD
STORE_VAR 1
JMP loop
:done
PUSH_VAR 0 1
RET
";
    assert_eq!(run_asm(listing), Ok(Value::Int(3)));
}

#[test]
fn trace_top_level() {
    assert_eq!(
        trace("1 + 2"),
        "\
0: ENTER 0: [] <-, -, -, ->
5: PUSH_INT 1: [] <-, -, -, []>
10: PUSH_INT 2: [1] <-, -, -, []>
15: ADD: [1, 2] <-, -, -, []>
16: RET: [3] <-, -, -, []>
"
    );
}

#[test]
fn trace_call() {
    assert_eq!(
        trace("(\\x -> x) 5"),
        "\
0: ENTER 0: [] <-, -, -, ->
5: PUSH_CLOSURE 17: [] <-, -, -, []>
10: PUSH_INT 5: [<closure@17>] <-, -, -, []>
15: SWAP_CALL: [<closure@17>, 5] <-, -, -, []>
17: ENTER 1: [5] <<-, -, -, []>, <closure@17>, 16, ->
22: STORE_VAR 0: [5] <<-, -, -, []>, <closure@17>, 16, [-]>
27: PUSH_VAR 0 0: [] <<-, -, -, []>, <closure@17>, 16, [5]>
36: RET: [5] <<-, -, -, []>, <closure@17>, 16, [5]>
16: RET: [5] <-, -, -, []>
"
    );
}

#[test]
fn returned_frames_are_released() {
    let source = "let rec fib n = if (n == 0) 0 else if (n == 1) 1 \
                  else (fib (n - 1)) + (fib (n - 2)) in fib 22";
    let code = compile(&stlc_parse::parse(source).unwrap()).unwrap();
    let mut vm = Vm::new(&code, 0);
    assert_eq!(vm.run(None), Ok(Value::Int(17711)));
    // The root plus one frame per pending call.
    assert!(vm.peak <= 24, "{} activations alive at once", vm.peak);
    drop(vm);
}

#[test]
fn captured_frames_outlive_their_call() {
    assert_eq!(
        run("let add = \\a -> \\b -> a + b in let inc = add 1 in (inc 2) + (inc 40)"),
        Ok(Value::Int(44))
    );
}
