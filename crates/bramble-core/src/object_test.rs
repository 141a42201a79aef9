// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

use super::{ObjHandle, ObjString};

#[test]
fn handle_round_trips_its_index() {
    let h = ObjHandle::new(7);
    assert_eq!(h.index(), 7);
}

#[test]
fn strings_with_equal_bytes_are_equal() {
    let a = ObjString::new(b"hello".to_vec().into_boxed_slice(), 42, None);
    let b = ObjString::new(b"hello".to_vec().into_boxed_slice(), 42, None);
    assert_eq!(a, b);
}

#[test]
fn strings_with_different_bytes_are_not_equal() {
    let a = ObjString::new(b"hello".to_vec().into_boxed_slice(), 1, None);
    let b = ObjString::new(b"world".to_vec().into_boxed_slice(), 2, None);
    assert_ne!(a, b);
}

#[test]
fn as_str_recovers_the_original_text() {
    let s = ObjString::new(b"bramble".to_vec().into_boxed_slice(), 0, None);
    assert_eq!(s.as_str(), "bramble");
}

#[test]
fn prev_link_threads_allocation_order() {
    let first = ObjHandle::new(0);
    let s = ObjString::new(b"x".to_vec().into_boxed_slice(), 0, Some(first));
    assert_eq!(s.header.prev, Some(first));
}
