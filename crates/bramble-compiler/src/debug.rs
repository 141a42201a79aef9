// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Diagnostic disassembler. Mirrors the teacher's `compiler::disassemble`
//! free function: plain text, not wired into any formatting trait, and
//! only ever consulted when the CLI's `--trace` flag is set.

#[cfg(test)]
mod debug_test;

use std::fmt::Write;

use crate::chunk::Chunk;
use crate::op;

/// Disassemble every instruction in `chunk`, prefixed with `name`.
#[must_use]
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = format!("== {name} ==\n");
    let mut offset = 0;
    while offset < chunk.len() {
        let (line, next) = disassemble_instruction(chunk, offset);
        out.push_str(&line);
        out.push('\n');
        offset = next;
    }
    out
}

/// Disassemble the single instruction at `offset`, returning its text and
/// the offset of the next instruction.
#[must_use]
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut out = format!("{offset:04} ");

    if offset > 0 && chunk.line(offset) == chunk.line(offset - 1) {
        out.push_str("   | ");
    } else {
        let _ = write!(out, "{:4} ", chunk.line(offset));
    }

    let instruction = chunk.code()[offset];
    let next = if op::has_constant_operand(instruction) {
        constant_instruction(&mut out, chunk, instruction, offset)
    } else {
        out.push_str(op::name(instruction));
        offset + 1
    };

    (out, next)
}

fn constant_instruction(out: &mut String, chunk: &Chunk, instruction: u8, offset: usize) -> usize {
    let index = chunk.code()[offset + 1];
    let value = chunk.constant(index);
    let _ = write!(out, "{:<16} {index:4} '{value:?}'", op::name(instruction));
    offset + 2
}
