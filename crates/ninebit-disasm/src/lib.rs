pub mod model;

// Re-export commonly used types/functions for the CLI
pub use model::{load_machine_code, Image, Slot};

use serde::Serialize;

use ninebit_asm::decoder::{Decoder, NineBitDecoder};
use ninebit_asm::disasm::fmt_decoded;
use ninebit_asm::to_bin;
use ninebit_asm::INSTR_BITS;

#[derive(Debug, Clone, Serialize)]
pub struct InsnOut {
    pub pc: u32,
    pub bits: String,
    /// `None` for words no instruction encodes to.
    pub class: Option<&'static str>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub insns: Vec<InsnOut>,
    pub invalid: Vec<BadLine>,
}

/// Decode every word in program order. Invalid lines are reported and take no PC.
pub fn disassemble(img: &Image) -> Report {
    let dec = NineBitDecoder::new();
    let mut insns = Vec::new();
    let mut invalid = Vec::new();
    for slot in &img.slots {
        match slot {
            Slot::Word(w) => {
                let pc = insns.len() as u32;
                let bits = to_bin(*w as i64, INSTR_BITS);
                let out = match dec.decode(*w) {
                    Some(d) => InsnOut { pc, bits, class: Some(d.class.name()), text: fmt_decoded(&d) },
                    None => InsnOut { pc, bits, class: None, text: format!(".word 9'b{}", to_bin(*w as i64, INSTR_BITS)) },
                };
                insns.push(out);
            }
            Slot::Invalid { line, text } => invalid.push(BadLine { line: *line, text: text.clone() }),
        }
    }
    Report { insns, invalid }
}

/// Plain-text listing, one `pc: bits  text` line per word.
pub fn render_listing(report: &Report) -> String {
    use std::fmt::Write as _;
    let mut buf = String::new();
    for i in &report.insns {
        let _ = writeln!(buf, "{:>4}: {}  {}", i.pc, i.bits, i.text);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_round_trips_assembled_program() {
        let src = "top:\nLI R1, -1\nSW R1, 2(R2)\nBNEZ R1, top\nJ top\nSLL R3\n";
        let asm = ninebit_asm::assemble(src, &Default::default()).unwrap();
        let img = Image::parse(&asm.artifacts().machine_code);
        let report = disassemble(&img);
        let texts: Vec<_> = report.insns.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["LI R1, -1", "SW R1, 2(R2)", "BNEZ R1, -2", "J 0", "SLL R3"]
        );
        assert!(report.invalid.is_empty());
        assert_eq!(report.insns[1].class, Some("memory"));
    }

    #[test]
    fn invalid_lines_take_no_pc() {
        let img = Image::parse("000000110\nxyz\n110000001\n");
        let report = disassemble(&img);
        assert_eq!(img.invalid_count(), report.invalid.len());
        assert_eq!(report.invalid[0].line, 2);
        assert_eq!(report.insns.iter().map(|i| i.pc).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn unassigned_words_render_as_data() {
        let report = disassemble(&Image::parse("101000000\n"));
        assert_eq!(report.insns[0].class, None);
        assert_eq!(render_listing(&report), "   0: 101000000  .word 9'b101000000\n");
    }
}
