// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

use super::format_value;
use bramble_core::{Heap, Value};

#[test]
fn formats_nil_and_booleans() {
    let heap = Heap::new();
    assert_eq!(format_value(Value::Nil, &heap), "nil");
    assert_eq!(format_value(Value::Bool(true), &heap), "true");
    assert_eq!(format_value(Value::Bool(false), &heap), "false");
}

#[test]
fn formats_integral_numbers_without_a_trailing_point() {
    let heap = Heap::new();
    assert_eq!(format_value(Value::Number(3.0), &heap), "3");
}

#[test]
fn formats_fractional_numbers() {
    let heap = Heap::new();
    assert_eq!(format_value(Value::Number(1.5), &heap), "1.5");
}

#[test]
fn formats_strings_without_quotes() {
    let mut heap = Heap::new();
    let handle = heap.intern(b"string");
    assert_eq!(format_value(Value::Obj(handle), &heap), "string");
}
