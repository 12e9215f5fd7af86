pub mod assembler;
pub mod decoder;
pub mod diag;
pub mod disasm;
pub mod emit;
pub mod encoder;
pub mod instructions;
pub mod normalize;
pub mod resolver;

pub use assembler::{assemble, AsmConfig, Assembly, OffsetOverflow};
pub use diag::{AsmError, Diagnostic, Severity};
pub use emit::Artifacts;
pub use encoder::EncodedInstruction;
pub use resolver::LabelTable;
use serde::{Deserialize, Serialize};

/// Width of every encoded instruction, in bits.
pub const INSTR_BITS: u32 = 9;
/// Width of a PC as stored in the jump-table memory image.
pub const PC_BITS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::R0, Register::R1, Register::R2, Register::R3];

    /// Case-insensitive lookup of `R0`..`R3`.
    pub fn parse(s: &str) -> Option<Register> {
        match s.to_ascii_uppercase().as_str() {
            "R0" => Some(Register::R0),
            "R1" => Some(Register::R1),
            "R2" => Some(Register::R2),
            "R3" => Some(Register::R3),
            _ => None,
        }
    }

    pub fn from_code(code: u16) -> Register {
        Register::ALL[(code & 0b11) as usize]
    }

    pub fn code(self) -> u16 {
        self as u16
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", *self as u8)
    }
}

/// Render the low `bits` bits of `val` as a zero-padded binary string.
/// Negative values wrap as two's complement within the field.
pub fn to_bin(val: i64, bits: u32) -> String {
    let mask = (1i64 << bits) - 1;
    format!("{:0width$b}", val & mask, width = bits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_bin_wraps_negatives() {
        assert_eq!(to_bin(-1, 4), "1111");
        assert_eq!(to_bin(-8, 4), "1000");
        assert_eq!(to_bin(5, 4), "0101");
        assert_eq!(to_bin(-20, 4), "1100");
        assert_eq!(to_bin(4, 2), "00");
        assert_eq!(to_bin(7, 12), "000000000111");
    }

    #[test]
    fn registers_are_case_insensitive() {
        assert_eq!(Register::parse("r2"), Some(Register::R2));
        assert_eq!(Register::parse("R3"), Some(Register::R3));
        assert_eq!(Register::parse("R4"), None);
        assert_eq!(Register::from_code(0b01), Register::R1);
    }
}
