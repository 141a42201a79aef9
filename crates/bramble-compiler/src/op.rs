// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! One-byte opcode constants. `SET_GLOBAL` is restored here even though
//! it is missing from the distilled opcode table: the compiler's
//! `variable` rule and the VM's globals semantics both require it, and
//! the full clox `OpCode` enum confirms it belongs.

pub const CONSTANT: u8 = 0;
pub const NIL: u8 = 1;
pub const TRUE: u8 = 2;
pub const FALSE: u8 = 3;
pub const POP: u8 = 4;
pub const GET_GLOBAL: u8 = 5;
pub const DEFINE_GLOBAL: u8 = 6;
pub const SET_GLOBAL: u8 = 7;
pub const EQUAL: u8 = 8;
pub const GREATER: u8 = 9;
pub const LESS: u8 = 10;
pub const ADD: u8 = 11;
pub const SUBTRACT: u8 = 12;
pub const MULTIPLY: u8 = 13;
pub const DIVIDE: u8 = 14;
pub const NOT: u8 = 15;
pub const NEGATE: u8 = 16;
pub const PRINT: u8 = 17;
pub const RETURN: u8 = 18;

/// Human-readable name for an opcode byte, used by the disassembler.
#[must_use]
pub const fn name(op: u8) -> &'static str {
    match op {
        CONSTANT => "OP_CONSTANT",
        NIL => "OP_NIL",
        TRUE => "OP_TRUE",
        FALSE => "OP_FALSE",
        POP => "OP_POP",
        GET_GLOBAL => "OP_GET_GLOBAL",
        DEFINE_GLOBAL => "OP_DEFINE_GLOBAL",
        SET_GLOBAL => "OP_SET_GLOBAL",
        EQUAL => "OP_EQUAL",
        GREATER => "OP_GREATER",
        LESS => "OP_LESS",
        ADD => "OP_ADD",
        SUBTRACT => "OP_SUBTRACT",
        MULTIPLY => "OP_MULTIPLY",
        DIVIDE => "OP_DIVIDE",
        NOT => "OP_NOT",
        NEGATE => "OP_NEGATE",
        PRINT => "OP_PRINT",
        RETURN => "OP_RETURN",
        _ => "OP_UNKNOWN",
    }
}

/// Whether this opcode carries a one-byte constant-pool operand.
#[must_use]
pub const fn has_constant_operand(op: u8) -> bool {
    matches!(op, CONSTANT | GET_GLOBAL | DEFINE_GLOBAL | SET_GLOBAL)
}
