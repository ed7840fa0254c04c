//! The instruction set shared by the assembler (encoder) and the virtual
//! machine (decoder): register names and opcodes, plus how many 32-bit
//! operand words follow each opcode in the binary image.
//!
//! Discriminants are pinned to fixed values since they are the actual
//! encoding written to (and read back from) the binary image.

/// One of the VM's four registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    Ip = 2,
    Sp = 3,
}

impl Register {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "r0" => Some(Register::R0),
            "r1" => Some(Register::R1),
            "ip" => Some(Register::Ip),
            "sp" => Some(Register::Sp),
            _ => None,
        }
    }

    pub fn from_index(idx: i32) -> Option<Self> {
        match idx {
            0 => Some(Register::R0),
            1 => Some(Register::R1),
            2 => Some(Register::Ip),
            3 => Some(Register::Sp),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Register::R0 => "r0",
            Register::R1 => "r1",
            Register::Ip => "ip",
            Register::Sp => "sp",
        };
        f.write_str(name)
    }
}

/// Every opcode the assembler can emit and the VM can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    AddI32 = 0,
    SubI32 = 1,
    MulI32 = 2,
    DivI32 = 3,
    PushI32 = 4,
    PopI32 = 5,
    MovRegI32 = 6,
    MovRegReg = 7,
    NegI32 = 8,
    MovMemRegI32 = 9,
    MovRegMemI32 = 10,
    CmpLeqI32 = 11,
    CmpGeqI32 = 12,
    CmpLessI32 = 13,
    CmpGreaterI32 = 14,
    CmpEqI32 = 15,
    CmpNeqI32 = 16,
    Jmp = 17,
    Jz = 18,
    Jnz = 19,
}

impl Opcode {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        use Opcode::*;
        Some(match mnemonic {
            "add.i32" => AddI32,
            "sub.i32" => SubI32,
            "mul.i32" => MulI32,
            "div.i32" => DivI32,
            "push.i32" => PushI32,
            "pop.i32" => PopI32,
            "mov.reg.i32" => MovRegI32,
            "mov.reg.reg" => MovRegReg,
            "neg.i32" => NegI32,
            "mov.mem.reg.i32" => MovMemRegI32,
            "mov.reg.mem.i32" => MovRegMemI32,
            "cmpleq.i32" => CmpLeqI32,
            "cmpgeq.i32" => CmpGeqI32,
            "cmpless.i32" => CmpLessI32,
            "cmpgreater.i32" => CmpGreaterI32,
            "cmpeq.i32" => CmpEqI32,
            "cmpneq.i32" => CmpNeqI32,
            "jmp" => Jmp,
            "jz" => Jz,
            "jnz" => Jnz,
            _ => return None,
        })
    }

    pub fn from_code(code: i32) -> Option<Self> {
        use Opcode::*;
        Some(match code {
            0 => AddI32,
            1 => SubI32,
            2 => MulI32,
            3 => DivI32,
            4 => PushI32,
            5 => PopI32,
            6 => MovRegI32,
            7 => MovRegReg,
            8 => NegI32,
            9 => MovMemRegI32,
            10 => MovRegMemI32,
            11 => CmpLeqI32,
            12 => CmpGeqI32,
            13 => CmpLessI32,
            14 => CmpGreaterI32,
            15 => CmpEqI32,
            16 => CmpNeqI32,
            17 => Jmp,
            18 => Jz,
            19 => Jnz,
            _ => return None,
        })
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Number of 32-bit operand words that follow the opcode word.
    pub fn operand_words(self) -> usize {
        use Opcode::*;
        match self {
            PushI32 | PopI32 | NegI32 => 1,
            Jmp | Jz | Jnz => 1,
            MovRegI32 | MovRegReg | AddI32 | SubI32 | MulI32 | DivI32 | CmpLeqI32
            | CmpGeqI32 | CmpLessI32 | CmpGreaterI32 | CmpEqI32 | CmpNeqI32 => 2,
            MovMemRegI32 | MovRegMemI32 => 3,
        }
    }

    /// Total words this instruction occupies in the image, including the
    /// opcode word itself.
    pub fn word_count(self) -> usize {
        1 + self.operand_words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_and_code_round_trip() {
        for mnemonic in [
            "add.i32", "sub.i32", "mul.i32", "div.i32", "push.i32", "pop.i32",
            "mov.reg.i32", "mov.reg.reg", "neg.i32", "mov.mem.reg.i32",
            "mov.reg.mem.i32", "cmpleq.i32", "cmpgeq.i32", "cmpless.i32",
            "cmpgreater.i32", "cmpeq.i32", "cmpneq.i32", "jmp", "jz", "jnz",
        ] {
            let op = Opcode::from_mnemonic(mnemonic).unwrap();
            assert_eq!(Opcode::from_code(op.code()), Some(op));
        }
    }

    #[test]
    fn unknown_mnemonic_is_none() {
        assert_eq!(Opcode::from_mnemonic("frobnicate.i32"), None);
    }

    #[test]
    fn register_from_name_round_trips() {
        for (name, reg) in [
            ("r0", Register::R0),
            ("r1", Register::R1),
            ("ip", Register::Ip),
            ("sp", Register::Sp),
        ] {
            assert_eq!(Register::from_name(name), Some(reg));
            assert_eq!(reg.to_string(), name);
        }
    }
}
