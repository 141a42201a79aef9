// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Hand-rolled open-addressing hash table, used both as the heap's string
//! intern set and, independently, as a chunk-run's global-variable
//! environment. Not backed by `std::collections::HashMap`: the probing and
//! tombstone discipline implemented here is itself the thing this module
//! exists to provide.
//!
//! Keys are compared by [`ObjHandle`] identity, not string content — valid
//! because every key handed to a `Table` is expected to already be
//! interned, so identity and content agree. `Heap::intern` performs the
//! separate content-based probe needed to establish that identity in the
//! first place.

#[cfg(test)]
mod table_test;

use crate::{ObjHandle, Value};

const MAX_LOAD_FACTOR: f64 = 0.75;
const INITIAL_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: Option<ObjHandle>,
    hash: u32,
    value: Value,
}

impl Entry {
    const fn empty() -> Self {
        Self {
            key: None,
            hash: 0,
            value: Value::Nil,
        }
    }

    const fn is_tombstone(&self) -> bool {
        self.key.is_none() && matches!(self.value, Value::Bool(true))
    }
}

/// An open-addressing hash table mapping interned string handles to
/// values.
pub struct Table {
    entries: Vec<Entry>,
    count: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            count: 0,
        }
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Probe `entries` for `key`/`hash`, returning the index of the
    /// matching slot, the first tombstone seen, or the first empty slot —
    /// in that priority order, matching the source's `findEntry`.
    fn find_entry(entries: &[Entry], key: ObjHandle, hash: u32) -> usize {
        let capacity = entries.len();
        let mut index = hash as usize % capacity;
        let mut tombstone: Option<usize> = None;

        loop {
            let entry = &entries[index];
            if entry.key.is_none() {
                if entry.is_tombstone() {
                    if tombstone.is_none() {
                        tombstone = Some(index);
                    }
                } else {
                    return tombstone.unwrap_or(index);
                }
            } else if entry.key == Some(key) {
                return index;
            }
            index = (index + 1) % capacity;
        }
    }

    fn ensure_capacity(&mut self) {
        if self.entries.is_empty() {
            self.grow(INITIAL_CAPACITY);
            return;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "table sizes stay far below f64's exact-integer range"
        )]
        if (self.count + 1) as f64 > self.entries.len() as f64 * MAX_LOAD_FACTOR {
            self.grow(self.entries.len() * 2);
        }
    }

    fn grow(&mut self, new_capacity: usize) {
        let mut new_entries = vec![Entry::empty(); new_capacity];
        let mut new_count = 0;

        for entry in &self.entries {
            let Some(key) = entry.key else { continue };
            let index = Self::find_entry(&new_entries, key, entry.hash);
            new_entries[index] = *entry;
            new_count += 1;
        }

        self.entries = new_entries;
        self.count = new_count;
    }

    /// Insert or overwrite `key` → `value`. Returns whether `key` was not
    /// already present (tombstones do not count as present, but reusing a
    /// tombstone slot does not increment `count` a second time for the
    /// slot itself — `count` only tracks live-or-tombstone occupancy, as
    /// in the source).
    pub fn set(&mut self, key: ObjHandle, hash: u32, value: Value) -> bool {
        self.ensure_capacity();

        let index = Self::find_entry(&self.entries, key, hash);
        let is_new = self.entries[index].key.is_none() && !self.entries[index].is_tombstone();

        if is_new {
            self.count += 1;
        }

        self.entries[index] = Entry {
            key: Some(key),
            hash,
            value,
        };
        is_new
    }

    #[must_use]
    pub fn get(&self, key: ObjHandle, hash: u32) -> Option<Value> {
        if self.entries.is_empty() {
            return None;
        }
        let index = Self::find_entry(&self.entries, key, hash);
        self.entries[index].key.and(Some(self.entries[index].value))
    }

    /// Overwrite the slot with a tombstone. Returns whether the key was
    /// present.
    pub fn delete(&mut self, key: ObjHandle, hash: u32) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        let index = Self::find_entry(&self.entries, key, hash);
        if self.entries[index].key.is_none() {
            return false;
        }
        self.entries[index] = Entry {
            key: None,
            hash: 0,
            value: Value::Bool(true),
        };
        true
    }

    /// Specialized lookup for the intern set: walks the same probe
    /// sequence as `find_entry`, but compares `(hash, bytes)` instead of
    /// handle identity — `resolve` maps a candidate entry's key back to
    /// its byte content. Stops at the first non-tombstone empty slot,
    /// same as `find_entry`. This is the one place `Table` compares by
    /// content rather than by handle; matches the source's
    /// `tableFindString`, kept separate from ordinary `get`/`set`.
    #[must_use]
    pub fn find_string<'a>(
        &self,
        hash: u32,
        bytes: &[u8],
        resolve: impl Fn(ObjHandle) -> &'a [u8],
    ) -> Option<ObjHandle> {
        if self.entries.is_empty() {
            return None;
        }
        let capacity = self.entries.len();
        let mut index = hash as usize % capacity;

        loop {
            let entry = &self.entries[index];
            match entry.key {
                None if !entry.is_tombstone() => return None,
                Some(key) if entry.hash == hash && resolve(key) == bytes => return Some(key),
                _ => {}
            }
            index = (index + 1) % capacity;
        }
    }

    /// Copy every live entry from `self` into `into`.
    pub fn add_all(&self, into: &mut Self) {
        for entry in &self.entries {
            if let Some(key) = entry.key {
                into.set(key, entry.hash, entry.value);
            }
        }
    }
}
