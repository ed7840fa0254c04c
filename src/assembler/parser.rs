//! Tokenizes and parses the textual assembly the compiler emits into
//! [`Line`]s. Assembly text has no nested structure, so this is a
//! line-at-a-time scan rather than a character-level lexer: each line is
//! either a bare `label:` definition or a mnemonic followed by
//! whitespace-separated operands.

use crate::assembler::ast::{Instr, Line, Operand};
use crate::error::{DebugInfo, ErrorKind, ScsError, Stage};
use crate::isa::{Opcode, Register};

pub fn parse_lines(text: &str) -> Result<Vec<Line>, ScsError> {
    let mut lines = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let debug = DebugInfo::new("<assembly>", idx + 1);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(name) = trimmed.strip_suffix(':') {
            lines.push(Line::Label { name: name.to_string(), debug });
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let mnemonic = words.next().expect("non-empty line has at least one word");
        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| {
            ScsError::at(
                Stage::Assemble,
                ErrorKind::UnknownMnemonic,
                format!("unknown mnemonic '{mnemonic}'"),
                debug.clone(),
            )
        })?;
        let rest: Vec<&str> = words.collect();
        let operands = parse_operands(opcode, &rest, &debug)?;
        lines.push(Line::Instr(Instr { opcode, operands, debug }));
    }

    Ok(lines)
}

fn wrong_count(debug: &DebugInfo, mnemonic: &str, expected: usize, got: usize) -> ScsError {
    ScsError::at(
        Stage::Assemble,
        ErrorKind::WrongOperandCount,
        format!("'{mnemonic}' expects {expected} operand(s), got {got}"),
        debug.clone(),
    )
}

fn parse_operands(opcode: Opcode, words: &[&str], debug: &DebugInfo) -> Result<Vec<Operand>, ScsError> {
    use Opcode::*;

    match opcode {
        AddI32 | SubI32 | MulI32 | DivI32 | MovRegReg | CmpLeqI32 | CmpGeqI32 | CmpLessI32
        | CmpGreaterI32 | CmpEqI32 | CmpNeqI32 => match words {
            [a, b] => Ok(vec![
                Operand::Reg(parse_reg(a, debug)?),
                Operand::Reg(parse_reg(b, debug)?),
            ]),
            _ => Err(wrong_count(debug, "<binary-reg-op>", 2, words.len())),
        },
        PushI32 | PopI32 | NegI32 => match words {
            [a] => Ok(vec![Operand::Reg(parse_reg(a, debug)?)]),
            _ => Err(wrong_count(debug, "<unary-reg-op>", 1, words.len())),
        },
        MovRegI32 => match words {
            [a, b] => Ok(vec![
                Operand::Reg(parse_reg(a, debug)?),
                Operand::Imm(parse_imm(b, debug)?),
            ]),
            _ => Err(wrong_count(debug, "mov.reg.i32", 2, words.len())),
        },
        MovMemRegI32 => match words {
            [addr, src] => {
                let (reg, off) = parse_mem(addr, debug)?;
                Ok(vec![Operand::Mem(reg, off), Operand::Reg(parse_reg(src, debug)?)])
            }
            _ => Err(wrong_count(debug, "mov.mem.reg.i32", 2, words.len())),
        },
        MovRegMemI32 => match words {
            [dst, addr] => {
                let (reg, off) = parse_mem(addr, debug)?;
                Ok(vec![Operand::Reg(parse_reg(dst, debug)?), Operand::Mem(reg, off)])
            }
            _ => Err(wrong_count(debug, "mov.reg.mem.i32", 2, words.len())),
        },
        Jmp | Jz | Jnz => match words {
            [label] => Ok(vec![Operand::Label((*label).to_string())]),
            _ => Err(wrong_count(debug, "<jump>", 1, words.len())),
        },
    }
}

fn parse_reg(word: &str, debug: &DebugInfo) -> Result<Register, ScsError> {
    Register::from_name(word).ok_or_else(|| {
        ScsError::at(
            Stage::Assemble,
            ErrorKind::UnknownRegister,
            format!("unknown register '{word}'"),
            debug.clone(),
        )
    })
}

fn parse_imm(word: &str, debug: &DebugInfo) -> Result<i32, ScsError> {
    word.parse::<i32>().map_err(|_| {
        ScsError::at(
            Stage::Assemble,
            ErrorKind::InvalidOperand,
            format!("'{word}' is not a valid immediate value"),
            debug.clone(),
        )
    })
}

/// Parse `[reg+off]` or `[reg-off]`.
fn parse_mem(word: &str, debug: &DebugInfo) -> Result<(Register, i32), ScsError> {
    let invalid = || {
        ScsError::at(
            Stage::Assemble,
            ErrorKind::InvalidOperand,
            format!("'{word}' is not a valid memory operand"),
            debug.clone(),
        )
    };

    let inner = word
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;

    let (reg_part, offset) = if let Some(idx) = inner.find('+') {
        let offset: i32 = inner[idx + 1..].parse().map_err(|_| invalid())?;
        (&inner[..idx], offset)
    } else if let Some(idx) = inner.find('-') {
        let offset: i32 = inner[idx + 1..].parse().map_err(|_| invalid())?;
        (&inner[..idx], -offset)
    } else {
        return Err(invalid());
    };

    let reg = parse_reg(reg_part, debug)?;
    Ok((reg, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_definition() {
        let lines = parse_lines("L0:\n").unwrap();
        assert!(matches!(&lines[0], Line::Label { name, .. } if name == "L0"));
    }

    #[test]
    fn parses_binary_register_op() {
        let lines = parse_lines("add.i32 r0 r1\n").unwrap();
        match &lines[0] {
            Line::Instr(instr) => {
                assert_eq!(instr.opcode, Opcode::AddI32);
                assert_eq!(instr.operands.len(), 2);
            }
            _ => panic!("expected instruction"),
        }
    }

    #[test]
    fn parses_mem_operand() {
        let lines = parse_lines("mov.mem.reg.i32 [sp+4] r0\n").unwrap();
        match &lines[0] {
            Line::Instr(instr) => match &instr.operands[0] {
                Operand::Mem(reg, off) => {
                    assert_eq!(*reg, Register::Sp);
                    assert_eq!(*off, 4);
                }
                _ => panic!("expected mem operand"),
            },
            _ => panic!("expected instruction"),
        }
    }

    #[test]
    fn unknown_mnemonic_errors() {
        let err = parse_lines("frobnicate r0\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownMnemonic);
    }

    #[test]
    fn unknown_register_errors() {
        let err = parse_lines("push.i32 r9\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownRegister);
    }
}
