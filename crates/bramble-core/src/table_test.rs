// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

use super::Table;
use crate::{ObjHandle, Value};

fn h(n: u32) -> ObjHandle {
    ObjHandle::new(n)
}

#[test]
fn get_after_set_returns_the_value() {
    let mut t = Table::new();
    let is_new = t.set(h(1), 100, Value::Number(42.0));
    assert!(is_new);
    assert_eq!(t.get(h(1), 100), Some(Value::Number(42.0)));
}

#[test]
fn get_of_missing_key_is_none() {
    let t = Table::new();
    assert_eq!(t.get(h(1), 100), None);
}

#[test]
fn set_again_overwrites_without_counting_as_new() {
    let mut t = Table::new();
    assert!(t.set(h(1), 1, Value::Bool(false)));
    assert!(!t.set(h(1), 1, Value::Bool(true)));
    assert_eq!(t.get(h(1), 1), Some(Value::Bool(true)));
    assert_eq!(t.count(), 1);
}

#[test]
fn get_after_delete_is_a_miss() {
    let mut t = Table::new();
    t.set(h(1), 1, Value::Nil);
    assert!(t.delete(h(1), 1));
    assert_eq!(t.get(h(1), 1), None);
}

#[test]
fn delete_of_missing_key_returns_false() {
    let mut t = Table::new();
    assert!(!t.delete(h(1), 1));
}

#[test]
fn count_never_exceeds_three_quarters_of_capacity() {
    let mut t = Table::new();
    for i in 0..200u32 {
        t.set(h(i), i, Value::Number(f64::from(i)));
        #[expect(clippy::cast_precision_loss, reason = "test bound, small values")]
        let bound = t.capacity() as f64 * 0.75;
        #[expect(clippy::cast_precision_loss, reason = "test bound, small values")]
        let count = t.count() as f64;
        assert!(count <= bound);
    }
}

#[test]
fn entries_survive_growth() {
    let mut t = Table::new();
    for i in 0..50u32 {
        t.set(h(i), i, Value::Number(f64::from(i)));
    }
    for i in 0..50u32 {
        assert_eq!(t.get(h(i), i), Some(Value::Number(f64::from(i))));
    }
}

#[test]
fn set_never_loses_entries_across_set_delete_and_grow() {
    let mut t = Table::new();
    let mut expected = std::collections::HashMap::new();

    for i in 0..64u32 {
        t.set(h(i), i, Value::Number(f64::from(i)));
        expected.insert(i, Value::Number(f64::from(i)));
    }
    for i in (0..64u32).step_by(3) {
        t.delete(h(i), i);
        expected.remove(&i);
    }
    for i in 64..128u32 {
        t.set(h(i), i, Value::Number(f64::from(i)));
        expected.insert(i, Value::Number(f64::from(i)));
    }

    for (k, v) in &expected {
        assert_eq!(t.get(h(*k), *k), Some(*v));
    }
}

#[test]
fn add_all_copies_every_live_entry() {
    let mut src = Table::new();
    src.set(h(1), 1, Value::Bool(true));
    src.set(h(2), 2, Value::Bool(false));
    src.delete(h(2), 2);

    let mut dst = Table::new();
    src.add_all(&mut dst);

    assert_eq!(dst.get(h(1), 1), Some(Value::Bool(true)));
    assert_eq!(dst.get(h(2), 2), None);
}
