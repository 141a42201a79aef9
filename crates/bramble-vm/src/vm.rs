// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! The dispatch loop. `interpret` owns nothing across calls — no global
//! VM instance — so tests (and the REPL, across lines) stay hermetic by
//! threading `Heap` and the globals `Table` through explicitly.

#[cfg(test)]
mod vm_test;

use bramble_compiler::{Chunk, compile, op};
use bramble_core::{Heap, Table, Value};

use crate::error::RuntimeError;
use crate::format::format_value;
use crate::stack::Stack;

/// Outcome of one `interpret` call, carrying the underlying diagnostics so
/// a caller can render them.
pub enum InterpretResult {
    Ok,
    CompileError(Vec<bramble_compiler::CompileError>),
    RuntimeError(RuntimeError),
}

/// Compile `source` and, if it compiles cleanly, execute it.
///
/// `heap` and `globals` are threaded in rather than owned by a singleton —
/// the REPL reuses the same pair across lines; a one-shot file run
/// constructs fresh ones.
pub fn interpret(source: &str, heap: &mut Heap, globals: &mut Table) -> InterpretResult {
    let chunk = match compile(source, heap) {
        Ok(chunk) => chunk,
        Err(errors) => return InterpretResult::CompileError(errors),
    };

    match run(&chunk, heap, globals) {
        Ok(()) => InterpretResult::Ok,
        Err(err) => InterpretResult::RuntimeError(err),
    }
}

fn run(chunk: &Chunk, heap: &mut Heap, globals: &mut Table) -> Result<(), RuntimeError> {
    let mut stack = Stack::new();
    let mut ip: usize = 0;
    let code = chunk.code();

    loop {
        if tracing::enabled!(tracing::Level::TRACE) {
            let (text, _) = bramble_compiler::disassemble_instruction(chunk, ip);
            tracing::trace!("{}", text.trim_end());
        }

        let line = chunk.line(ip);
        let instruction = code[ip];
        ip += 1;

        macro_rules! read_byte {
            () => {{
                let b = code[ip];
                ip += 1;
                b
            }};
        }

        macro_rules! read_constant {
            () => {{
                let index = read_byte!();
                chunk.constant(index)
            }};
        }

        macro_rules! binary_numeric_op {
            ($op:tt) => {{
                let b = stack.peek(0);
                let a = stack.peek(1);
                match (a.as_number(), b.as_number()) {
                    (Some(a), Some(b)) => {
                        stack.pop();
                        stack.pop();
                        #[allow(clippy::arithmetic_side_effects)]
                        stack.push(Value::Number(a $op b));
                    }
                    _ => return Err(RuntimeError::OperandsMustBeNumbers { line }),
                }
            }};
        }

        macro_rules! binary_comparison_op {
            ($op:tt) => {{
                let b = stack.peek(0);
                let a = stack.peek(1);
                match (a.as_number(), b.as_number()) {
                    (Some(a), Some(b)) => {
                        stack.pop();
                        stack.pop();
                        stack.push(Value::Bool(a $op b));
                    }
                    _ => return Err(RuntimeError::OperandsMustBeNumbers { line }),
                }
            }};
        }

        match instruction {
            op::CONSTANT => {
                let value = read_constant!();
                if !stack.push(value) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::NIL => {
                if !stack.push(Value::Nil) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::TRUE => {
                if !stack.push(Value::Bool(true)) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::FALSE => {
                if !stack.push(Value::Bool(false)) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::POP => {
                stack.pop();
            }
            op::GET_GLOBAL => {
                let name = read_constant!();
                let handle = name.as_obj().expect("identifier constant is always Obj");
                let hash = heap.get(handle).hash;
                match globals.get(handle, hash) {
                    Some(value) => {
                        if !stack.push(value) {
                            return Err(RuntimeError::StackOverflow { line });
                        }
                    }
                    None => {
                        return Err(RuntimeError::UndefinedVariable {
                            name: heap.get(handle).as_str().to_string(),
                            line,
                        });
                    }
                }
            }
            op::DEFINE_GLOBAL => {
                let name = read_constant!();
                let handle = name.as_obj().expect("identifier constant is always Obj");
                let hash = heap.get(handle).hash;
                let value = stack.pop();
                globals.set(handle, hash, value);
            }
            op::SET_GLOBAL => {
                let name = read_constant!();
                let handle = name.as_obj().expect("identifier constant is always Obj");
                let hash = heap.get(handle).hash;
                let value = stack.peek(0);
                if globals.set(handle, hash, value) {
                    globals.delete(handle, hash);
                    return Err(RuntimeError::UndefinedVariable {
                        name: heap.get(handle).as_str().to_string(),
                        line,
                    });
                }
            }
            op::EQUAL => {
                let b = stack.pop();
                let a = stack.pop();
                if !stack.push(Value::Bool(a == b)) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::GREATER => binary_comparison_op!(>),
            op::LESS => binary_comparison_op!(<),
            op::ADD => {
                let b = stack.peek(0);
                let a = stack.peek(1);
                match (a, b) {
                    (Value::Number(_), Value::Number(_)) => binary_numeric_op!(+),
                    (Value::Obj(ah), Value::Obj(bh)) => {
                        // The only heap object kind is a string, so any two
                        // `Obj` operands are both strings.
                        stack.pop();
                        stack.pop();
                        let result = heap.concat(ah, bh);
                        if !stack.push(Value::Obj(result)) {
                            return Err(RuntimeError::StackOverflow { line });
                        }
                    }
                    _ => {
                        return Err(RuntimeError::OperandsMustBeTwoNumbersOrStrings { line });
                    }
                }
            }
            op::SUBTRACT => binary_numeric_op!(-),
            op::MULTIPLY => binary_numeric_op!(*),
            op::DIVIDE => binary_numeric_op!(/),
            op::NOT => {
                let value = stack.pop();
                if !stack.push(Value::Bool(!value.is_truthy())) {
                    return Err(RuntimeError::StackOverflow { line });
                }
            }
            op::NEGATE => {
                let value = stack.peek(0);
                match value.as_number() {
                    Some(n) => {
                        stack.pop();
                        if !stack.push(Value::Number(-n)) {
                            return Err(RuntimeError::StackOverflow { line });
                        }
                    }
                    None => return Err(RuntimeError::OperandsMustBeNumbers { line }),
                }
            }
            op::PRINT => {
                let value = stack.pop();
                println!("{}", format_value(value, heap));
            }
            op::RETURN => {
                return Ok(());
            }
            _ => unreachable!("compiler never emits an unknown opcode"),
        }
    }
}
