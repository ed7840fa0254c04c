//! Line-level representation of parsed assembly text.

use crate::error::DebugInfo;
use crate::isa::{Opcode, Register};

#[derive(Debug, Clone)]
pub enum Operand {
    Reg(Register),
    Imm(i32),
    /// `[reg+off]` / `[reg-off]`, offset not yet corrected for the running
    /// stack-offset delta (see [`crate::assembler::first_pass`]).
    Mem(Register, i32),
    /// A label name used as a jump target, resolved in the second pass.
    Label(String),
}

#[derive(Debug, Clone)]
pub struct Instr {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub debug: DebugInfo,
}

#[derive(Debug, Clone)]
pub enum Line {
    Label { name: String, debug: DebugInfo },
    Instr(Instr),
}
