use ninebit_asm::{assemble, AsmConfig};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
// countdown demo
start:
    LI R1, 3
    LI R2, -1
loop:
    ADD R1, R2      // R1 += -1
    BNEZ R1, loop
    SW R1, 1(R0)
    LW R3 R0 1
    SLL R3, R1
    SRL R2
    JAL done
done:
    J start
";

#[test]
fn full_program_artifacts() {
    let asm = assemble(PROGRAM, &AsmConfig::default()).unwrap();
    assert!(asm.diagnostics.is_empty());
    let art = asm.artifacts();

    assert_eq!(
        art.machine_code,
        [
            "001010011", // LI R1, 3
            "001101111", // LI R2, -1
            "000000110", // ADD R1, R2
            "100011111", // BNEZ R1, -1
            "011010001", // SW R1, 1(R0)
            "010110001", // LW R3, 1(R0)
            "101011101", // SLL R3, R1
            "101101010", // SRL R2, R2
            "111000010", // JAL #2
            "110000000", // J #0
        ]
        .join("\n")
    );

    let debug: Vec<&str> = art.debug_listing.lines().collect();
    assert_eq!(debug.len(), 10);
    assert_eq!(debug[0], "12'd0: instruction = 9'b001010011; // LI R1, 3");
    assert_eq!(
        debug[2],
        "12'd2: instruction = 9'b000000110; // ADD R1, R2      // R1 += -1"
    );
    assert_eq!(debug[9], "12'd9: instruction = 9'b110000000; // J start");

    assert_eq!(art.lut_mem, "000000000000\n000000000010\n000000001001\n");
    assert_eq!(
        art.lut_init,
        "// Paste into fetch_unit.sv if you want hard-coded LUT\n\
         initial begin\n    \
         branch_lut[0] = 0; // start\n    \
         branch_lut[1] = 2; // loop\n    \
         branch_lut[2] = 9; // done\n\
         end\n"
    );
}

#[test]
fn mnemonics_and_registers_ignore_case() {
    let asm = assemble("add r1, r2\nbnez r3, 0", &AsmConfig::default()).unwrap();
    let bits: Vec<_> = asm.instructions.iter().map(|i| i.bits.as_str()).collect();
    assert_eq!(bits, vec!["000000110", "100110000"]);
}

#[test]
fn empty_source_produces_empty_artifacts() {
    let art = assemble("\n  // nothing here\n", &AsmConfig::default())
        .unwrap()
        .artifacts();
    assert_eq!(art.machine_code, "");
    assert_eq!(art.debug_listing, "");
    assert_eq!(art.lut_mem, "");
    assert_eq!(
        art.lut_init,
        "// Paste into fetch_unit.sv if you want hard-coded LUT\ninitial begin\nend\n"
    );
}
