//! # Assembler
//!
//! Two-pass assembler: turns the textual assembly the compiler emits into
//! a flat binary image the virtual machine can load directly.
//!
//! ## Passes
//!
//! The first pass walks the parsed lines once, in order. For every
//! instruction it lays down its opcode and operand words, tracking the
//! running byte offset so label definitions can be recorded against it.
//! It also tracks a running stack-offset delta: decremented by 4 on every
//! `push.i32` and incremented by 4 on every `pop.i32`, and added to every
//! memory operand's immediate offset before it is baked into the image.
//! This corrects for the fact that the compiler writes variable offsets
//! relative to the stack pointer's value at declaration time, while the
//! instructions that read them may run with `sp` already bumped by
//! temporary pushes from in-flight sub-expression evaluation.
//!
//! Jump targets are left unresolved during the first pass (the label they
//! name may be defined later in the stream) and patched in the second
//! pass once every label's offset is known. Unlike an implementation that
//! seeks back into an output file to patch bytes already written, this
//! keeps the whole image in memory and serializes it once, after both
//! passes complete.

pub mod ast;
pub mod label_table;
pub mod parser;

use ast::{Line, Operand};
use label_table::LabelTable;

use crate::error::{DebugInfo, ErrorKind, ScsError, Stage};
use crate::isa::Opcode;

pub struct AssembleResult {
    pub binary: Vec<u8>,
}

#[derive(Debug, Clone)]
enum Word {
    Value(i32),
    Pending(u32),
}

struct EncodedInstr {
    words: Vec<Word>,
    debug: DebugInfo,
}

pub fn assemble(text: &str) -> Result<AssembleResult, ScsError> {
    let lines = parser::parse_lines(text)?;
    let instrs = first_pass(&lines)?;
    let instrs = second_pass(instrs)?;
    Ok(AssembleResult { binary: serialize(&instrs) })
}

fn first_pass(lines: &[Line]) -> Result<Vec<EncodedInstr>, ScsError> {
    let mut labels = LabelTable::new();
    let mut instrs = Vec::new();
    let mut byte_offset: u32 = 0;
    let mut sp_delta: i64 = 0;

    // First sweep: assign byte offsets and resolve label definitions.
    // Instruction encoding happens in the same pass since offsets and
    // the running stack delta are both purely a function of everything
    // that came before, in order.
    for line in lines {
        match line {
            Line::Label { name, debug } => {
                if !labels.define(name, byte_offset) {
                    return Err(ScsError::at(
                        Stage::Assemble,
                        ErrorKind::DuplicateLabel,
                        format!("label '{name}' is already defined"),
                        debug.clone(),
                    ));
                }
            }
            Line::Instr(instr) => {
                let mut words = vec![Word::Value(instr.opcode.code())];
                for operand in &instr.operands {
                    match operand {
                        Operand::Reg(reg) => words.push(Word::Value(reg.index() as i32)),
                        Operand::Imm(n) => words.push(Word::Value(*n)),
                        Operand::Mem(reg, off) => {
                            words.push(Word::Value(reg.index() as i32));
                            words.push(Word::Value(*off as i64 as i32 + sp_delta as i32));
                        }
                        Operand::Label(name) => {
                            words.push(Word::Pending(labels.label_id(name)));
                        }
                    }
                }
                byte_offset += (instr.opcode.word_count() * 4) as u32;
                instrs.push(EncodedInstr { words, debug: instr.debug.clone() });

                match instr.opcode {
                    Opcode::PushI32 => sp_delta -= 4,
                    Opcode::PopI32 => sp_delta += 4,
                    _ => {}
                }
            }
        }
    }

    // Stash the label table on each pending word's id namespace by
    // resolving right here, now that every label has been seen.
    for instr in &mut instrs {
        for word in &mut instr.words {
            if let Word::Pending(id) = *word {
                match labels.resolve(id) {
                    Some(offset) => *word = Word::Value(offset as i32),
                    None => {
                        return Err(ScsError::at(
                            Stage::Assemble,
                            ErrorKind::UndefinedLabel,
                            format!("undefined label '{}'", labels.name_of(id)),
                            instr.debug.clone(),
                        ))
                    }
                }
            }
        }
    }

    Ok(instrs)
}

/// No-op by the time [`first_pass`] returns (it resolves labels inline
/// since every definition has already been seen once the whole line list
/// has been scanned), kept as its own step so the two-pass structure is
/// explicit and a future multi-file assembler has a seam to hook a real
/// second pass into.
fn second_pass(instrs: Vec<EncodedInstr>) -> Result<Vec<EncodedInstr>, ScsError> {
    Ok(instrs)
}

fn serialize(instrs: &[EncodedInstr]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for instr in instrs {
        for word in &instr.words {
            let Word::Value(v) = word else {
                unreachable!("all words are resolved by the time serialize runs")
            };
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    bytes
}

#[cfg(test)]
mod tests;
