// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! The canonical value formatter `PRINT` and the REPL's value echo both
//! use: `nil`/`true`/`false` literally, numbers as their shortest
//! round-trip decimal, strings as their raw bytes with no quoting.

#[cfg(test)]
mod format_test;

use bramble_core::{Heap, Value};

#[must_use]
pub fn format_value(value: Value, heap: &Heap) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => format_number(n),
        Value::Obj(handle) => heap.get(handle).as_str().to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    // Rust's `{}` formatting for f64 already produces the shortest
    // string that round-trips back to the same value.
    format!("{n}")
}
