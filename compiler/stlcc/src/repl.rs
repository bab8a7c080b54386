//! Interactive loop.
//!
//! An entry may span several lines and ends with `;;`. The prompt is `> `
//! for a new entry and `. ` while one is being continued. `.quit` leaves.

use std::io::{self, BufRead, Write};

use crate::{run, RunOptions};

const QUIT: &str = ".quit";

/// Read entries from `input` until `.quit` or end of input, writing each
/// result or error line to `output`.
pub fn repl(
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    options: &RunOptions,
) -> io::Result<()> {
    let mut entry = String::new();
    let mut line = String::new();

    loop {
        output.write_all(if entry.is_empty() { b"> " } else { b". " })?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if entry.is_empty() && line.trim() == QUIT {
            return writeln!(output, "bye");
        }

        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(line.trim_end());
        let Some(complete) = entry.strip_suffix(";;") else {
            continue;
        };

        let source = complete.to_string();
        entry.clear();
        if source.trim() == QUIT {
            return writeln!(output, "bye");
        }

        match run(&source, options, output) {
            Ok(outcome) => writeln!(output, "{outcome}")?,
            Err(err) => writeln!(output, "{}", err.render_line(Some(&source)))?,
        }
    }
}
