use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Operand shape and field layout shared by a group of mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingClass {
    /// opcode(3) funct(2) rd(2) rs(2)
    R,
    /// opcode(3) rd(2) imm(4)
    I,
    /// opcode(3) reg(2) base(2) offset(2)
    Mem,
    /// opcode(3) reg(2) offset(4)
    Branch,
    /// opcode(3) funct(2) rd(2) rs(2), rs defaults to rd
    Shift,
    /// opcode(3) index(6)
    Jump,
}

impl EncodingClass {
    /// Accepted operand count.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            EncodingClass::R => 2..=2,
            EncodingClass::I => 2..=2,
            // `reg, off(base)` or `reg, base, off`
            EncodingClass::Mem => 2..=3,
            EncodingClass::Branch => 2..=2,
            EncodingClass::Shift => 1..=2,
            EncodingClass::Jump => 1..=1,
        }
    }

    /// Width of the immediate/offset/index field, if the class has one.
    pub fn imm_bits(self) -> Option<u32> {
        match self {
            EncodingClass::I | EncodingClass::Branch => Some(4),
            EncodingClass::Mem => Some(2),
            EncodingClass::Jump => Some(6),
            EncodingClass::R | EncodingClass::Shift => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EncodingClass::R => "R-type",
            EncodingClass::I => "I-type",
            EncodingClass::Mem => "memory",
            EncodingClass::Branch => "branch",
            EncodingClass::Shift => "shift",
            EncodingClass::Jump => "jump",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub class: EncodingClass,
    pub opcode: u16,
    pub funct: Option<u16>,
}

pub const OPCODE_BITS: u32 = 3;
pub const FUNCT_BITS: u32 = 2;
pub const REG_BITS: u32 = 2;

pub const TABLE: &[InstrDesc] = &[
    InstrDesc { mnemonic: "ADD", class: EncodingClass::R, opcode: 0b000, funct: Some(0b00) },
    InstrDesc { mnemonic: "SUB", class: EncodingClass::R, opcode: 0b000, funct: Some(0b01) },
    InstrDesc { mnemonic: "XOR", class: EncodingClass::R, opcode: 0b000, funct: Some(0b10) },
    InstrDesc { mnemonic: "AND", class: EncodingClass::R, opcode: 0b000, funct: Some(0b11) },
    InstrDesc { mnemonic: "LI", class: EncodingClass::I, opcode: 0b001, funct: None },
    InstrDesc { mnemonic: "LW", class: EncodingClass::Mem, opcode: 0b010, funct: None },
    InstrDesc { mnemonic: "SW", class: EncodingClass::Mem, opcode: 0b011, funct: None },
    InstrDesc { mnemonic: "BNEZ", class: EncodingClass::Branch, opcode: 0b100, funct: None },
    InstrDesc { mnemonic: "SLL", class: EncodingClass::Shift, opcode: 0b101, funct: Some(0b01) },
    InstrDesc { mnemonic: "SRL", class: EncodingClass::Shift, opcode: 0b101, funct: Some(0b10) },
    InstrDesc { mnemonic: "J", class: EncodingClass::Jump, opcode: 0b110, funct: None },
    InstrDesc { mnemonic: "JAL", class: EncodingClass::Jump, opcode: 0b111, funct: None },
    // alias of J
    InstrDesc { mnemonic: "JUMP", class: EncodingClass::Jump, opcode: 0b110, funct: None },
];

/// Case-insensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Reverse lookup by opcode and (for R/shift) funct. `J` wins over `JUMP`.
pub fn by_opcode(opcode: u16, funct: Option<u16>) -> Option<&'static InstrDesc> {
    TABLE
        .iter()
        .find(|d| d.opcode == opcode && (d.funct.is_none() || d.funct == funct))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funct_codes_are_unique_per_opcode() {
        for a in TABLE {
            for b in TABLE {
                if a.mnemonic == b.mnemonic || a.opcode != b.opcode {
                    continue;
                }
                // only J/JUMP share an encoding
                if a.funct.is_none() {
                    assert_eq!(a.class, EncodingClass::Jump);
                    continue;
                }
                assert_ne!(a.funct, b.funct, "{} vs {}", a.mnemonic, b.mnemonic);
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("bnez").map(|d| d.class), Some(EncodingClass::Branch));
        assert_eq!(by_opcode(0b110, None).map(|d| d.mnemonic), Some("J"));
        assert!(lookup("NOP").is_none());
    }
}
