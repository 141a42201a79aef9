// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! File mode: read a whole script, compile it, run it once.

use std::path::Path;

use bramble_core::{Heap, Table};

use crate::exit;

pub fn run(path: &Path) -> u8 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Could not read file \"{}\": {err}", path.display());
            return exit::IO_ERROR;
        }
    };

    let mut heap = Heap::new();
    let mut globals = Table::new();
    let result = bramble_vm::interpret(&source, &mut heap, &mut globals);
    exit::report(&result)
}
