use serde::{Deserialize, Serialize};

use crate::instructions::{self, EncodingClass};
use crate::{Register, INSTR_BITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Xor,
    And,
    Li,
    Lw,
    Sw,
    Bnez,
    Sll,
    Srl,
    J,
    Jal,
}

impl Op {
    fn from_mnemonic(mn: &str) -> Option<Op> {
        Some(match mn {
            "ADD" => Op::Add,
            "SUB" => Op::Sub,
            "XOR" => Op::Xor,
            "AND" => Op::And,
            "LI" => Op::Li,
            "LW" => Op::Lw,
            "SW" => Op::Sw,
            "BNEZ" => Op::Bnez,
            "SLL" => Op::Sll,
            "SRL" => Op::Srl,
            "J" | "JUMP" => Op::J,
            "JAL" => Op::Jal,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub class: EncodingClass,
    pub rd: Register,
    pub rs: Register,
    /// Sign-extended for I-type and branch, raw otherwise.
    pub imm: i32,
}

pub trait Decoder {
    fn decode(&self, word: u16) -> Option<Decoded>;
}

pub struct NineBitDecoder;

impl NineBitDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NineBitDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_ext(v: u16, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v as i32) << s) >> s
}

impl Decoder for NineBitDecoder {
    fn decode(&self, word: u16) -> Option<Decoded> {
        if word >> INSTR_BITS != 0 {
            return None;
        }
        let opcode = (word >> 6) & 0b111;
        let funct = (word >> 4) & 0b11;
        let desc = instructions::by_opcode(opcode, Some(funct))?;
        let op = Op::from_mnemonic(desc.mnemonic)?;
        let r = |shift: u16| Register::from_code(word >> shift);
        let (rd, rs, imm) = match desc.class {
            // opcode funct rd rs
            EncodingClass::R | EncodingClass::Shift => (r(2), r(0), 0),
            // opcode rd imm4
            EncodingClass::I | EncodingClass::Branch => (r(4), Register::R0, sign_ext(word & 0xF, 4)),
            // opcode reg base off2
            EncodingClass::Mem => (r(4), r(2), (word & 0b11) as i32),
            // opcode index6
            EncodingClass::Jump => (Register::R0, Register::R0, (word & 0x3F) as i32),
        };
        Some(Decoded { op, class: desc.class, rd, rs, imm })
    }
}

/// Parse a 9-character binary string.
pub fn parse_bits(s: &str) -> Option<u16> {
    if s.len() != INSTR_BITS as usize || !s.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u16::from_str_radix(s, 2).ok()
}
