// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! The string arena and intern set. Both the compiler (string literals,
//! identifier names) and the VM (string concatenation at runtime) share a
//! single `Heap` for the lifetime of one `interpret` call, so that
//! interning actually holds across compile time and run time the way the
//! source's single global VM instance did — without resurrecting a global.

#[cfg(test)]
mod heap_test;

use crate::table::Table;
use crate::{ObjHandle, ObjString, Value, fnv1a};

/// Owns every heap-allocated string for one interpreter run, plus the
/// intern set that deduplicates them.
///
/// Per spec's design notes, this replaces the source's intrusive
/// allocation chain with a `Vec`-backed arena indexed by
/// [`ObjHandle`]; `prev` links inside each `ObjString` header still
/// record allocation order for diagnostics.
pub struct Heap {
    strings: Vec<ObjString>,
    intern: Table,
    head: Option<ObjHandle>,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strings: Vec::new(),
            intern: Table::new(),
            head: None,
        }
    }

    /// Ensure there is exactly one live `ObjString` for `bytes`, returning
    /// its handle. Probes `self.intern` via `Table::find_string`, the
    /// specialized `(hash, byte-equality)` lookup, rather than `Table`'s
    /// ordinary identity-based `get`, since at this point we don't yet
    /// have a handle to compare identity against — that's exactly what
    /// we're trying to establish.
    pub fn intern(&mut self, bytes: &[u8]) -> ObjHandle {
        let hash = fnv1a(bytes);

        if let Some(existing) = self.find_interned(bytes, hash) {
            return existing;
        }

        let handle = ObjHandle::new(
            u32::try_from(self.strings.len()).expect("string arena exceeds u32 range"),
        );
        let obj = ObjString::new(bytes.to_vec().into_boxed_slice(), hash, self.head);
        self.strings.push(obj);
        self.head = Some(handle);
        self.intern.set(handle, hash, Value::Nil);
        handle
    }

    fn find_interned(&self, bytes: &[u8], hash: u32) -> Option<ObjHandle> {
        self.intern
            .find_string(hash, bytes, |handle| self.get(handle).bytes.as_ref())
    }

    /// Concatenate two strings and intern the result, per `ADD`'s string
    /// case.
    pub fn concat(&mut self, a: ObjHandle, b: ObjHandle) -> ObjHandle {
        let mut bytes = Vec::with_capacity(self.get(a).bytes.len() + self.get(b).bytes.len());
        bytes.extend_from_slice(&self.get(a).bytes);
        bytes.extend_from_slice(&self.get(b).bytes);
        self.intern(&bytes)
    }

    #[must_use]
    pub fn get(&self, handle: ObjHandle) -> &ObjString {
        &self.strings[handle.index()]
    }

    /// Number of live string allocations, including ones no longer
    /// reachable from any `Value` — there is no garbage collection short
    /// of process exit, so this only ever grows across a run.
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.strings.len()
    }

    /// Walk the allocation chain from the most recent allocation back to
    /// the first. Exists to keep the chain-walk described by the source
    /// observable, even though the arena's `Drop` is what actually
    /// reclaims memory.
    #[must_use]
    pub fn allocation_chain(&self) -> Vec<ObjHandle> {
        let mut out = Vec::new();
        let mut cur = self.head;
        while let Some(h) = cur {
            out.push(h);
            cur = self.get(h).header.prev;
        }
        out
    }
}
