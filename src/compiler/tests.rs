use crate::compiler::compile;
use crate::error::ErrorKind;
use crate::lexer::tokenize;
use crate::preprocessor::preprocess;

fn compile_source(source: &str) -> Result<String, crate::error::ScsError> {
    let preprocessed = preprocess(source, "t.scs");
    let lexed = tokenize(&preprocessed).expect("lex should succeed");
    compile(&lexed.tokens).map(|r| r.assembly)
}

#[test]
fn arithmetic_with_precedence() {
    let asm = compile_source("int x; x = 2 + 3 * 4;").unwrap();
    assert_eq!(
        asm,
        "mov.reg.i32 r0 0\n\
         push.i32 r0\n\
         mov.reg.i32 r0 2\n\
         push.i32 r0\n\
         mov.reg.i32 r0 3\n\
         push.i32 r0\n\
         mov.reg.i32 r0 4\n\
         pop.i32 r1\n\
         mul.i32 r0 r1\n\
         pop.i32 r1\n\
         add.i32 r0 r1\n\
         mov.mem.reg.i32 [sp+0] r0\n"
    );
}

#[test]
fn declaration_with_initializer_evaluates_before_push() {
    let asm = compile_source("int x = 5;").unwrap();
    assert_eq!(asm, "mov.reg.i32 r0 5\npush.i32 r0\n");
}

#[test]
fn chained_assignment_stores_right_to_left() {
    let asm = compile_source("int a; int b; int c; a = b = c = 7;").unwrap();
    let tail = "mov.reg.i32 r0 7\n\
                mov.mem.reg.i32 [sp+8] r0\n\
                mov.mem.reg.i32 [sp+4] r0\n\
                mov.mem.reg.i32 [sp+0] r0\n";
    assert!(asm.ends_with(tail), "assembly was:\n{asm}");
}

#[test]
fn bare_identifier_statement_reads_not_writes() {
    // Regression: a naive lvalue-first parse would treat `x` as a store
    // target and leave the rest of the condition unparsed.
    let asm = compile_source("int x; while (x < 5) { x = x + 1; }").unwrap();
    assert!(asm.contains("cmpless.i32 r1 r0"));
}

#[test]
fn if_without_else_has_single_label() {
    let asm = compile_source("int x; if (x == 1) { x = 2; }").unwrap();
    assert_eq!(asm.matches("L0:").count(), 1);
    assert!(!asm.contains("L1:"));
}

#[test]
fn if_with_else_has_two_labels() {
    let asm = compile_source("int x; if (x == 1) { x = 2; } else { x = 3; }").unwrap();
    assert!(asm.contains("L0:"));
    assert!(asm.contains("L1:"));
}

#[test]
fn do_while_emits_redundant_jnz() {
    let asm = compile_source("int x; do { x = x - 1; } while (x != 0);").unwrap();
    assert!(asm.contains("jz L1"));
    assert!(asm.contains("jnz L0"));
}

#[test]
fn undeclared_identifier_is_fatal() {
    let err = compile_source("x = 1;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndeclaredIdentifier);
}

#[test]
fn duplicate_declaration_is_fatal() {
    let err = compile_source("int x; int x;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
}

#[test]
fn for_loop_is_rejected() {
    let err = compile_source("for (int i; i; i) { }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotYetImplemented);
}
