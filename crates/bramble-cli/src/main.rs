// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Bramble driver: REPL and file-mode front ends over
//! `bramble_compiler`/`bramble_vm`.
//!
//! Invocation: `bramble` starts the REPL; `bramble <path>` runs a file.
//! Exit codes follow the sysexits-style convention the spec assigns: `0`
//! success, `65` compile error, `70` runtime error, `64` CLI misuse, `74`
//! I/O failure.

mod exit;
mod file_mode;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "bramble")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A single-pass bytecode interpreter", long_about = None)]
struct Cli {
    /// Script to run. Omit to start the REPL.
    path: Option<PathBuf>,

    /// Log each dispatched instruction's disassembly to the diagnostic stream.
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--help`/`--version` are clap errors too, but they're not
            // misuse: render them and exit cleanly rather than as usage
            // errors.
            let _ = err.print();
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    exit::OK
                }
                _ => exit::USAGE,
            };
            return ExitCode::from(code);
        }
    };
    init_tracing(cli.trace);

    let code = match cli.path {
        Some(path) => file_mode::run(&path),
        None => repl::run(),
    };
    ExitCode::from(code)
}

fn init_tracing(trace: bool) {
    let default_directive = if trace { "trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
