use crate::decoder::{Decoded, Op};

pub fn fmt_decoded(d: &Decoded) -> String {
    match d.op {
        Op::Add => rr("ADD", d),
        Op::Sub => rr("SUB", d),
        Op::Xor => rr("XOR", d),
        Op::And => rr("AND", d),
        Op::Sll => shift("SLL", d),
        Op::Srl => shift("SRL", d),
        Op::Li => format!("LI {}, {}", d.rd, d.imm),
        Op::Lw => format!("LW {}, {}({})", d.rd, d.imm, d.rs),
        Op::Sw => format!("SW {}, {}({})", d.rd, d.imm, d.rs),
        Op::Bnez => format!("BNEZ {}, {}", d.rd, d.imm),
        Op::J => format!("J {}", d.imm),
        Op::Jal => format!("JAL {}", d.imm),
    }
}

fn rr(mn: &str, d: &Decoded) -> String {
    format!("{} {}, {}", mn, d.rd, d.rs)
}

fn shift(mn: &str, d: &Decoded) -> String {
    if d.rd == d.rs { format!("{} {}", mn, d.rd) } else { rr(mn, d) }
}
