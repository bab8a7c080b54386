//! Command handlers for the `stlc` binary.
//!
//! Each handler prints its result on stdout, or a one-line diagnostic on
//! stderr, and returns the process exit code.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::{
    check, compile, exec, read_program, read_source, repl, run, write_program, DriverError,
    RunOptions,
};

/// `stlc run <file> [--trace] [--eval]`
pub fn run_file(path: &Path, options: &RunOptions) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => return report(&err, None),
    };
    let stdout = io::stdout();
    match run(&source, options, &mut stdout.lock()) {
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, Some(&source)),
    }
}

/// `stlc check <file>`
pub fn check_file(path: &Path) -> ExitCode {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => return report(&err, None),
    };
    match check(&source) {
        Ok(checked) => {
            println!("{}", checked.ty);
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, Some(&source)),
    }
}

/// `stlc compile <file> <out>`
pub fn compile_file(input: &Path, output: &Path) -> ExitCode {
    let source = match read_source(input) {
        Ok(source) => source,
        Err(err) => return report(&err, None),
    };
    let result = compile(&source).and_then(|code| write_program(output, &code));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, Some(&source)),
    }
}

/// `stlc exec <file.bin> [--trace]`
pub fn exec_file(path: &Path, trace: bool) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let result = read_program(path).and_then(|code| {
        let out: Option<&mut dyn Write> = if trace { Some(&mut stdout) } else { None };
        exec(&code, out)
    });
    match result {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, None),
    }
}

/// `stlc asm <in.asm> <out.bin>`
pub fn assemble_file(input: &Path, output: &Path) -> ExitCode {
    let result = read_source(input).and_then(|text| {
        let code = stlc_bytecode::assemble(&text)?;
        write_program(output, &code)
    });
    finish(result)
}

/// `stlc dis <file.bin>`
pub fn disassemble_file(path: &Path) -> ExitCode {
    let result = read_program(path).and_then(|code| {
        print!("{}", stlc_bytecode::listing(&code)?);
        Ok(())
    });
    finish(result)
}

/// `stlc repl [--trace] [--eval]`
pub fn start_repl(options: &RunOptions) -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match repl(&mut stdin.lock(), &mut stdout.lock(), options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(source) => report(
            &DriverError::Io {
                action: "use",
                path: "the terminal".into(),
                source,
            },
            None,
        ),
    }
}

fn finish(result: Result<(), DriverError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, None),
    }
}

fn report(err: &DriverError, source: Option<&str>) -> ExitCode {
    eprintln!("{}", err.render_line(source));
    ExitCode::FAILURE
}
