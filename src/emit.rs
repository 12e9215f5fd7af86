use std::fmt::Write as _;

use serde::Serialize;

use crate::encoder::EncodedInstruction;
use crate::resolver::LabelTable;
use crate::{to_bin, PC_BITS};

pub const LUT_INIT_HEADER: &str = "// Paste into fetch_unit.sv if you want hard-coded LUT";

/// The four text artifacts of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub machine_code: String,
    pub debug_listing: String,
    pub lut_mem: String,
    pub lut_init: String,
}

impl Artifacts {
    pub fn new(instructions: &[EncodedInstruction], labels: &LabelTable) -> Self {
        Self {
            machine_code: machine_code(instructions),
            debug_listing: debug_listing(instructions),
            lut_mem: lut_mem(labels),
            lut_init: lut_init(labels),
        }
    }
}

/// One 9-bit string per line, program order.
pub fn machine_code(instructions: &[EncodedInstruction]) -> String {
    instructions
        .iter()
        .map(|i| i.bits.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// ROM-content style trace correlating PC, bits and source.
pub fn debug_listing(instructions: &[EncodedInstruction]) -> String {
    instructions
        .iter()
        .map(|i| format!("12'd{}: instruction = 9'b{}; // {}", i.pc, i.bits, i.source))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `$readmemb` image: one 12-bit PC per jump-table slot.
pub fn lut_mem(labels: &LabelTable) -> String {
    let mut out = String::new();
    let Some(max) = labels.max_jump_index() else { return out };
    for idx in 0..=max {
        // table is dense, so the placeholder never appears in practice
        let pc = labels.label_at(idx).map_or(0, |l| l.pc);
        out.push_str(&to_bin(pc as i64, PC_BITS));
        out.push('\n');
    }
    out
}

/// `initial begin ... end` block assigning each slot of `branch_lut`.
pub fn lut_init(labels: &LabelTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{LUT_INIT_HEADER}");
    let _ = writeln!(out, "initial begin");
    for l in labels.iter() {
        if let Some(idx) = l.jump_index {
            let _ = writeln!(out, "    branch_lut[{idx}] = {}; // {}", l.pc, l.name);
        }
    }
    let _ = writeln!(out, "end");
    out
}
