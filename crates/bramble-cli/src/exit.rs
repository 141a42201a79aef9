// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Process exit codes, assigned only here per the driver surface's
//! contract — neither `bramble-compiler` nor `bramble-vm` know about
//! process exit status.

pub const OK: u8 = 0;
pub const COMPILE_ERROR: u8 = 65;
pub const RUNTIME_ERROR: u8 = 70;
pub const USAGE: u8 = 64;
pub const IO_ERROR: u8 = 74;

use bramble_vm::InterpretResult;

/// Map one `interpret` outcome to its exit code, reporting diagnostics to
/// stderr along the way.
#[must_use]
pub fn report(result: &InterpretResult) -> u8 {
    match result {
        InterpretResult::Ok => OK,
        InterpretResult::CompileError(errors) => {
            bramble_diagnostics::report_compile_errors(errors);
            COMPILE_ERROR
        }
        InterpretResult::RuntimeError(err) => {
            bramble_diagnostics::report_runtime_error(err);
            RUNTIME_ERROR
        }
    }
}
