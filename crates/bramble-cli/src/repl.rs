// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! REPL front end: read a line, `interpret` it, loop until EOF.
//!
//! `Heap` and the globals `Table` are created once and threaded through
//! every line, so a variable defined on one line is visible on the next —
//! the only state a REPL session carries across lines. Neither
//! `bramble-vm` nor `bramble-compiler` keep a hidden global of their own;
//! the REPL is what stitches them into a session.

use bramble_core::{Heap, Table};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::exit;

const PROMPT: &str = "> ";

pub fn run() -> u8 {
    let mut heap = Heap::new();
    let mut globals = Table::new();

    let Ok(mut editor) = DefaultEditor::new() else {
        eprintln!("Could not start the line editor.");
        return exit::IO_ERROR;
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                let result = bramble_vm::interpret(&line, &mut heap, &mut globals);
                exit::report(&result);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                return exit::IO_ERROR;
            }
        }
    }

    exit::OK
}
