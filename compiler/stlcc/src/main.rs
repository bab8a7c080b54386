//! `stlc` command line.

use std::path::Path;
use std::process::ExitCode;

use stlcc::commands::{
    assemble_file, check_file, compile_file, disassemble_file, exec_file, run_file, start_repl,
};
use stlcc::{init_tracing, Engine, RunOptions};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::SUCCESS;
    };
    let flags: Vec<&str> = args[2..]
        .iter()
        .map(String::as_str)
        .filter(|arg| arg.starts_with("--"))
        .collect();
    let paths: Vec<&Path> = args[2..]
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(Path::new)
        .collect();

    match command.as_str() {
        "run" => {
            let [path] = paths[..] else {
                return usage_error("stlc run <file> [--trace] [--eval]");
            };
            run_file(path, &run_options(&flags))
        }
        "check" => {
            let [path] = paths[..] else {
                return usage_error("stlc check <file>");
            };
            check_file(path)
        }
        "compile" => {
            let [input, output] = paths[..] else {
                return usage_error("stlc compile <file> <out.bin>");
            };
            compile_file(input, output)
        }
        "exec" => {
            let [path] = paths[..] else {
                return usage_error("stlc exec <file.bin> [--trace]");
            };
            exec_file(path, flags.contains(&"--trace"))
        }
        "asm" => {
            let [input, output] = paths[..] else {
                return usage_error("stlc asm <in.asm> <out.bin>");
            };
            assemble_file(input, output)
        }
        "dis" => {
            let [path] = paths[..] else {
                return usage_error("stlc dis <file.bin>");
            };
            disassemble_file(path)
        }
        "repl" => start_repl(&run_options(&flags)),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("stlc {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run_options(flags: &[&str]) -> RunOptions {
    RunOptions {
        trace: flags.contains(&"--trace"),
        engine: if flags.contains(&"--eval") {
            Engine::Eval
        } else {
            Engine::Vm
        },
    }
}

fn usage_error(usage: &str) -> ExitCode {
    eprintln!("Usage: {usage}");
    ExitCode::FAILURE
}

fn print_usage() {
    println!("stlc: type inference, bytecode compiler and virtual machine");
    println!();
    println!("Usage: stlc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>              Type-check and run a program");
    println!("  check <file>            Print a program's principal type");
    println!("  compile <file> <out>    Type-check and write bytecode");
    println!("  exec <file.bin>         Execute a bytecode file");
    println!("  asm <in.asm> <out.bin>  Assemble a text listing");
    println!("  dis <file.bin>          Print a bytecode listing");
    println!("  repl                    Read entries ending in ';;' (.quit leaves)");
    println!("  help                    Show this help message");
    println!("  version                 Show version information");
    println!();
    println!("Options:");
    println!("  --trace    Print each instruction before it executes (run, exec, repl)");
    println!("  --eval     Run with the tree-walking evaluator (run, repl)");
    println!();
    println!("Logging:");
    println!("  STLC_LOG (or RUST_LOG) takes tracing filter directives, e.g.");
    println!("  STLC_LOG=stlc_types=debug stlc check prog.stlc");
}
