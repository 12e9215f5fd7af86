use ninebit_asm::{assemble, AsmConfig, AsmError};

fn bits(src: &str) -> Vec<String> {
    assemble(src, &AsmConfig::default())
        .unwrap()
        .instructions
        .into_iter()
        .map(|i| i.bits)
        .collect()
}

fn pad(n: usize) -> String {
    "ADD R0, R0\n".repeat(n)
}

#[test]
fn forward_branch_offset() {
    let src = format!("BNEZ R0, fwd\n{}fwd:\nSUB R0, R1\n", pad(2));
    assert_eq!(bits(&src)[0], "100000011"); // +3
}

#[test]
fn backward_branch_offset_is_twos_complement() {
    // target at PC 0, branch at PC 8 -> -8
    let src = format!("back:\n{}BNEZ R1, back\n", pad(8));
    assert_eq!(bits(&src)[8], "100011000");
}

#[test]
fn branch_offset_wraps_outside_four_bits() {
    // -9 keeps its low four bits
    let src = format!("back:\n{}BNEZ R1, back\n", pad(9));
    assert_eq!(bits(&src)[9], "100010111");
}

#[test]
fn branch_to_self_is_zero() {
    assert_eq!(bits("here:\nBNEZ R3, here\n"), vec!["100110000"]);
}

#[test]
fn literal_branch_targets() {
    assert_eq!(bits("BNEZ R2, -3\nBNEZ R2, 7\n"), vec!["100101101", "100100111"]);
}

#[test]
fn jump_uses_table_index_not_pc() {
    let src = format!("a:\n{}b:\nJ b\nJAL a\nJUMP b\n", pad(5));
    let b = bits(&src);
    assert_eq!(&b[5..], &["110000001", "111000000", "110000001"]);
}

#[test]
fn jump_to_unknown_identifier_parses_literal_index() {
    assert_eq!(
        bits("J 5\nJUMP 63\nJAL 64\n"),
        vec!["110000101", "110111111", "111000000"]
    );
}

#[test]
fn unresolvable_targets_are_errors() {
    let err = assemble("BNEZ R0, nowhere\nJ elsewhere\n", &AsmConfig::default()).unwrap_err();
    let AsmError::Failed { diagnostics } = err;
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].message.contains("\"nowhere\""));
    assert_eq!(diagnostics[1].pc, Some(1));
}
