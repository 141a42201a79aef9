// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2025 Tobias Sarnowski <tobias@sarnowski.cloud>

use super::compile;
use crate::error::ErrorSite;
use crate::op;
use bramble_core::Heap;

fn compile_ok(source: &str) -> crate::chunk::Chunk {
    let mut heap = Heap::new();
    compile(source, &mut heap).expect("expected successful compile")
}

#[test]
fn compiles_print_of_an_arithmetic_expression() {
    let chunk = compile_ok("print 1 + 2;");
    assert!(chunk.code().contains(&op::ADD));
    assert!(chunk.code().contains(&op::PRINT));
    assert_eq!(chunk.code().last(), Some(&op::RETURN));
}

#[test]
fn compiles_a_var_declaration_and_assignment() {
    let chunk = compile_ok("var a = 1; a = a + 10; print a;");
    assert!(chunk.code().contains(&op::DEFINE_GLOBAL));
    assert!(chunk.code().contains(&op::SET_GLOBAL));
    assert!(chunk.code().contains(&op::GET_GLOBAL));
}

#[test]
fn greater_equal_desugars_to_less_then_not() {
    let chunk = compile_ok("print 1 >= 2;");
    let code = chunk.code();
    let less_pos = code.iter().position(|&b| b == op::LESS).unwrap();
    assert_eq!(code[less_pos + 1], op::NOT);
}

#[test]
fn less_equal_desugars_to_greater_then_not() {
    let chunk = compile_ok("print 1 <= 2;");
    let code = chunk.code();
    let greater_pos = code.iter().position(|&b| b == op::GREATER).unwrap();
    assert_eq!(code[greater_pos + 1], op::NOT);
}

#[test]
fn not_equal_desugars_to_equal_then_not() {
    let chunk = compile_ok("print 1 != 2;");
    let code = chunk.code();
    let equal_pos = code.iter().position(|&b| b == op::EQUAL).unwrap();
    assert_eq!(code[equal_pos + 1], op::NOT);
}

#[test]
fn missing_semicolon_reports_error_at_the_next_token() {
    let mut heap = Heap::new();
    let errors = compile("var a = 1 print a;", &mut heap).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 1);
    assert_eq!(errors[0].site, ErrorSite::Token("print".to_string()));
    assert!(errors[0].message.contains("Expect ';' after"));
}

#[test]
fn unterminated_expression_reports_error_at_end() {
    let mut heap = Heap::new();
    let errors = compile("print 1 +", &mut heap).unwrap_err();
    assert!(!errors.is_empty());
    assert_eq!(errors[0].site, ErrorSite::End);
}

#[test]
fn panic_mode_suppresses_cascading_errors_until_synchronize() {
    let mut heap = Heap::new();
    // Two independent missing-semicolon mistakes in two statements: we
    // expect exactly two reported errors, not a cascade of follow-on noise
    // from the first failure.
    let errors = compile("print 1 print 2;", &mut heap).unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn invalid_assignment_target_is_an_error() {
    let mut heap = Heap::new();
    let errors = compile("1 = 2;", &mut heap).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| e.message.contains("Invalid assignment target"))
    );
}

#[test]
fn string_literal_strips_surrounding_quotes_before_interning() {
    let mut heap = Heap::new();
    let chunk = compile("print \"hi\";", &mut heap).unwrap();
    let constant = chunk.constants()[0];
    let handle = constant.as_obj().unwrap();
    assert_eq!(heap.get(handle).as_str(), "hi");
}
