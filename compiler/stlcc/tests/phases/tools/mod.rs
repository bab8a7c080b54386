use pretty_assertions::assert_eq;
use stlc_bytecode::{assemble, listing};
use stlc_vm::Value;
use stlcc::{compile, exec, read_program, write_program};

const FACT: &str = "let rec fact n = if (n==0) 1 else n*(fact(n-1)) in fact 5";

#[test]
fn compile_write_read_exec() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fact.bin");
    write_program(&path, &compile(FACT).unwrap()).unwrap();
    let code = read_program(&path).unwrap();
    assert_eq!(exec(&code, None).unwrap(), Value::Int(120));
}

#[test]
fn listing_reassembles_to_the_same_bytes() {
    let code = compile(FACT).unwrap();
    let text = listing(&code).unwrap();
    let reassembled: String = text
        .lines()
        .map(|line| line.split_once(": ").unwrap().1)
        .map(|instruction| format!("{instruction}\n"))
        .collect();
    assert_eq!(assemble(&reassembled).unwrap(), code);
}

#[test]
fn hand_written_program() {
    let source = "\
# (\\x -> x * x) 7
ENTER 0
PUSH_CLOSURE square
PUSH_INT 7
SWAP_CALL
RET

:square
ENTER 1
STORE_VAR 0
PUSH_VAR 0 0
PUSH_VAR 0 0
MUL
RET
";
    let code = assemble(source).unwrap();
    assert_eq!(exec(&code, None).unwrap(), Value::Int(49));
    assert_eq!(
        listing(&code).unwrap(),
        "\
0: ENTER 0
5: PUSH_CLOSURE 17
10: PUSH_INT 7
15: SWAP_CALL
16: RET
17: ENTER 1
22: STORE_VAR 0
27: PUSH_VAR 0 0
36: PUSH_VAR 0 0
45: MUL
46: RET
"
    );
}

#[test]
fn trace_of_a_bytecode_file() {
    let code = assemble("ENTER 0\nPUSH_INT 4\nPUSH_INT 5\nEQ\nRET\n").unwrap();
    let mut out = Vec::new();
    assert_eq!(exec(&code, Some(&mut out)).unwrap(), Value::Bool(false));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\
0: ENTER 0: [] <-, -, -, ->
5: PUSH_INT 4: [] <-, -, -, []>
10: PUSH_INT 5: [4] <-, -, -, []>
15: EQ: [4, 5] <-, -, -, []>
16: RET: [false] <-, -, -, []>
"
    );
}
