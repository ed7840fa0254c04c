use crate::assembler::assemble;
use crate::error::ErrorKind;

fn words_of(binary: &[u8]) -> Vec<i32> {
    binary
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

#[test]
fn encodes_simple_sequence() {
    let result = assemble("mov.reg.i32 r0 5\npush.i32 r0\n").unwrap();
    assert_eq!(words_of(&result.binary), vec![6, 0, 5, 4, 0]);
}

#[test]
fn forward_jump_resolves_to_label_offset() {
    let result = assemble("jmp L0\nL0:\n").unwrap();
    assert_eq!(words_of(&result.binary), vec![17, 8]);
}

#[test]
fn backward_jump_resolves_to_label_offset() {
    let result = assemble("L0:\nmov.reg.i32 r0 1\njmp L0\n").unwrap();
    // mov.reg.i32 occupies 3 words (12 bytes) starting at offset 0, so L0 is 0.
    assert_eq!(words_of(&result.binary), vec![6, 0, 1, 17, 0]);
}

#[test]
fn stack_offset_correction_tracks_pending_pushes() {
    let result = assemble("push.i32 r0\nmov.reg.mem.i32 r1 [sp+0]\n").unwrap();
    let words = words_of(&result.binary);
    // push.i32 r0
    assert_eq!(&words[0..2], &[4, 0]);
    // mov.reg.mem.i32 r1 [sp-4]  (corrected by the pending push)
    assert_eq!(&words[2..6], &[10, 1, 3, -4]);
}

#[test]
fn undefined_label_is_fatal() {
    let err = assemble("jmp L9\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedLabel);
}

#[test]
fn duplicate_label_is_fatal() {
    let err = assemble("L0:\nL0:\n").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateLabel);
}
