// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

//! Wire-format rendering for `bramble-compiler`'s `CompileError` and
//! `bramble-vm`'s `RuntimeError`.
//!
//! `bramble-compiler`/`bramble-vm` keep error enums free of message text —
//! message rendering lives here instead, mirroring how the teacher
//! workspace's `repl` module keeps `print_*_error` functions separate from
//! the error types themselves. Message text for `RuntimeError` is derived
//! with `thiserror`, enriched from the wider example pack (the teacher
//! workspace itself has no `thiserror` dependency).

use bramble_compiler::{CompileError, ErrorSite};
use bramble_vm::RuntimeError;
use thiserror::Error;

/// Display text for a `RuntimeError`, independent of the `[line N] in
/// script` trailer that always follows it on stderr.
#[derive(Debug, Error)]
enum RuntimeErrorText {
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeTwoNumbersOrStrings,
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(String),
    #[error("Stack overflow.")]
    StackOverflow,
}

impl From<&RuntimeError> for RuntimeErrorText {
    fn from(err: &RuntimeError) -> Self {
        match err {
            RuntimeError::OperandsMustBeNumbers { .. } => Self::OperandsMustBeNumbers,
            RuntimeError::OperandsMustBeTwoNumbersOrStrings { .. } => {
                Self::OperandsMustBeTwoNumbersOrStrings
            }
            RuntimeError::UndefinedVariable { name, .. } => Self::UndefinedVariable(name.clone()),
            RuntimeError::StackOverflow { .. } => Self::StackOverflow,
        }
    }
}

/// Render one compile diagnostic as `[line N] Error[ at '<lex>'| at end]: <msg>`.
///
/// The `ERROR` lexical-token case carries no ` at X` clause at all — its
/// lexeme already *is* the message.
#[must_use]
pub fn render_compile_error(err: &CompileError) -> String {
    match &err.site {
        ErrorSite::Token(lexeme) => {
            format!("[line {}] Error at '{}': {}", err.line, lexeme, err.message)
        }
        ErrorSite::End => format!("[line {}] Error at end: {}", err.line, err.message),
        ErrorSite::LexError => format!("[line {}] Error: {}", err.line, err.message),
    }
}

/// Write every compile diagnostic in `errors` to stderr, one per line.
pub fn report_compile_errors(errors: &[CompileError]) {
    for err in errors {
        eprintln!("{}", render_compile_error(err));
    }
}

/// Render a runtime failure as the two lines the spec mandates: the
/// message, then `[line N] in script`.
#[must_use]
pub fn render_runtime_error(err: &RuntimeError) -> String {
    let text = RuntimeErrorText::from(err);
    format!("{text}\n[line {}] in script", err.line())
}

/// Write a runtime failure's two-line diagnostic to stderr.
pub fn report_runtime_error(err: &RuntimeError) {
    eprintln!("{}", render_runtime_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_at_token() {
        let err = CompileError {
            line: 1,
            site: ErrorSite::Token("print".to_string()),
            message: "Expect ';' after expression.".to_string(),
        };
        assert_eq!(
            render_compile_error(&err),
            "[line 1] Error at 'print': Expect ';' after expression."
        );
    }

    #[test]
    fn compile_error_at_end() {
        let err = CompileError {
            line: 3,
            site: ErrorSite::End,
            message: "Expect expression.".to_string(),
        };
        assert_eq!(
            render_compile_error(&err),
            "[line 3] Error at end: Expect expression."
        );
    }

    #[test]
    fn compile_error_lex_error_has_no_at_clause() {
        let err = CompileError {
            line: 2,
            site: ErrorSite::LexError,
            message: "Unterminated string.".to_string(),
        };
        assert_eq!(
            render_compile_error(&err),
            "[line 2] Error: Unterminated string."
        );
    }

    #[test]
    fn runtime_error_undefined_variable() {
        let err = RuntimeError::UndefinedVariable {
            name: "x".to_string(),
            line: 1,
        };
        assert_eq!(
            render_runtime_error(&err),
            "Undefined variable 'x'.\n[line 1] in script"
        );
    }

    #[test]
    fn runtime_error_operand_type_mismatch() {
        let err = RuntimeError::OperandsMustBeTwoNumbersOrStrings { line: 4 };
        assert_eq!(
            render_runtime_error(&err),
            "Operands must be two numbers or two strings.\n[line 4] in script"
        );
    }
}
