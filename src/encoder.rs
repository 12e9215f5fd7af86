use bitvec::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::assembler::{AsmConfig, OffsetOverflow};
use crate::diag::{Diagnostic, OperandError, Severity};
use crate::instructions::{self, EncodingClass, InstrDesc, FUNCT_BITS, OPCODE_BITS, REG_BITS};
use crate::normalize::NormalizedLine;
use crate::resolver::LabelTable;
use crate::{Register, INSTR_BITS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedInstruction {
    pub pc: u32,
    pub word: u16,
    /// `word` as a 9-character binary string, MSB first.
    pub bits: String,
    pub mnemonic: &'static str,
    pub source: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Encoded {
    pub instructions: Vec<EncodedInstruction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// MSB-first field packer.
struct Fields(BitVec<u16, Msb0>);

impl Fields {
    fn new(opcode: u16) -> Self {
        Fields(BitVec::with_capacity(INSTR_BITS as usize)).push(opcode as i64, OPCODE_BITS)
    }

    /// Append the low `width` bits of `value` (two's complement for negatives).
    fn push(mut self, value: i64, width: u32) -> Self {
        for i in (0..width).rev() {
            self.0.push((value >> i) & 1 == 1);
        }
        self
    }

    fn reg(self, r: Register) -> Self {
        self.push(r.code() as i64, REG_BITS)
    }

    fn word(&self) -> u16 {
        self.0.iter().by_vals().fold(0, |acc, b| (acc << 1) | b as u16)
    }

    fn bits(&self) -> String {
        self.0.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
    }
}

/// Parse a signed integer literal: optional sign, then decimal, `0x` or `0b` digits.
pub fn parse_int(tok: &str) -> Result<i64, OperandError> {
    let bad = || OperandError::BadLiteral(tok.to_string());
    let t = tok.trim();
    let (neg, digits) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, digits)
    };
    // from_str_radix takes its own sign; only the one before the prefix is allowed
    if body.starts_with(['+', '-']) {
        return Err(bad());
    }
    let magnitude = i64::from_str_radix(body, radix);
    let v = magnitude.map_err(|_| bad())?;
    Ok(if neg { -v } else { v })
}

fn reg(tok: &str) -> Result<Register, OperandError> {
    Register::parse(tok).ok_or_else(|| OperandError::BadRegister(tok.to_string()))
}

/// Split `off(base)` into its literal offset and base register.
fn parse_mem_operand(tok: &str) -> Result<(i64, Register), OperandError> {
    let bad = || OperandError::BadMemOperand(tok.to_string());
    let (off, rest) = tok.split_once('(').ok_or_else(bad)?;
    if off.is_empty() || rest.contains('(') {
        return Err(bad());
    }
    let base = rest.trim_matches(')');
    Ok((parse_int(off)?, reg(base)?))
}

fn check_arity(desc: &InstrDesc, got: usize) -> Result<(), OperandError> {
    let arity = desc.class.arity();
    let mnemonic = desc.mnemonic.to_string();
    if got > *arity.end() {
        return Err(OperandError::TooMany { mnemonic, expected: *arity.end(), got });
    }
    if got < *arity.start() {
        return Err(OperandError::Missing { mnemonic, expected: *arity.start(), got });
    }
    Ok(())
}

/// Outcome of encoding one line: the packed fields plus any soft findings.
struct LineOutput {
    fields: Fields,
    notes: Vec<(Severity, String)>,
}

fn encode_operands(
    desc: &InstrDesc,
    ops: &[String],
    pc: u32,
    labels: &LabelTable,
    cfg: &AsmConfig,
) -> Result<LineOutput, OperandError> {
    check_arity(desc, ops.len())?;
    let width = desc.class.imm_bits().unwrap_or(0);
    let mut notes = Vec::new();
    let fields = match desc.class {
        EncodingClass::R | EncodingClass::Shift => {
            let rd = reg(&ops[0])?;
            let rs = match ops.get(1) {
                Some(t) => reg(t)?,
                None => rd,
            };
            Fields::new(desc.opcode)
                .push(desc.funct.unwrap_or(0) as i64, FUNCT_BITS)
                .reg(rd)
                .reg(rs)
        }
        EncodingClass::I => {
            let rd = reg(&ops[0])?;
            let imm = parse_int(&ops[1])?;
            Fields::new(desc.opcode).reg(rd).push(imm, width)
        }
        EncodingClass::Mem => {
            let rt = reg(&ops[0])?;
            let (offset, base) = if ops[1].contains('(') {
                if ops.len() > 2 {
                    return Err(OperandError::TooMany {
                        mnemonic: desc.mnemonic.to_string(),
                        expected: 2,
                        got: ops.len(),
                    });
                }
                parse_mem_operand(&ops[1])?
            } else {
                let base = reg(&ops[1])?;
                let off = ops.get(2).ok_or_else(|| OperandError::Missing {
                    mnemonic: desc.mnemonic.to_string(),
                    expected: 3,
                    got: ops.len(),
                })?;
                (parse_int(off)?, base)
            };
            if !(0..=3).contains(&offset) {
                let sev = match cfg.offset_overflow {
                    OffsetOverflow::Wrap => Severity::Warning,
                    OffsetOverflow::Reject => Severity::Error,
                };
                notes.push((sev, format!("Offset {offset} too large for 2 bits (Max 3)")));
            }
            Fields::new(desc.opcode).reg(rt).reg(base).push(offset, width)
        }
        EncodingClass::Branch => {
            let rs = reg(&ops[0])?;
            let target = &ops[1];
            let offset = match labels.pc(target) {
                Some(dest) => dest as i64 - pc as i64,
                None => parse_int(target)?,
            };
            Fields::new(desc.opcode).reg(rs).push(offset, width)
        }
        EncodingClass::Jump => {
            let target = &ops[0];
            let index = match labels.jump_index(target) {
                Some(i) => i as i64,
                None => parse_int(target)?,
            };
            Fields::new(desc.opcode).push(index, width)
        }
    };
    Ok(LineOutput { fields, notes })
}

/// Second pass: encode every resolved line, collecting diagnostics instead of stopping.
pub fn encode(lines: &[NormalizedLine], labels: &LabelTable, cfg: &AsmConfig) -> Encoded {
    let mut out = Encoded::default();
    for line in lines {
        let pc = line.pc.unwrap_or(0);
        let mut report = |severity: Severity, mnemonic: Option<&str>, message: String| {
            let severity = if cfg.warnings_as_errors { Severity::Error } else { severity };
            out.diagnostics.push(Diagnostic {
                severity,
                pc: line.pc,
                line: line.line,
                mnemonic: mnemonic.map(str::to_string),
                source: line.source.clone(),
                message,
            });
        };
        let Some(op) = line.mnemonic() else { continue };
        let Some(desc) = instructions::lookup(op) else {
            let upper = op.to_ascii_uppercase();
            report(cfg.unknown_mnemonic, Some(&upper), format!("Unknown Opcode {upper}"));
            continue;
        };
        match encode_operands(desc, line.operands(), pc, labels, cfg) {
            Ok(LineOutput { fields, notes }) => {
                let mut rejected = false;
                for (sev, msg) in notes {
                    rejected |= sev == Severity::Error;
                    report(sev, Some(desc.mnemonic), msg);
                }
                if rejected {
                    continue;
                }
                let bits = fields.bits();
                trace!(pc, %bits, mnemonic = desc.mnemonic, "encoded");
                out.instructions.push(EncodedInstruction {
                    pc,
                    word: fields.word(),
                    bits,
                    mnemonic: desc.mnemonic,
                    source: line.source.clone(),
                    line: line.line,
                });
            }
            Err(e) => report(Severity::Error, Some(desc.mnemonic), e.to_string()),
        }
    }
    debug!(
        encoded = out.instructions.len(),
        diagnostics = out.diagnostics.len(),
        "pass 2 complete"
    );
    out
}
