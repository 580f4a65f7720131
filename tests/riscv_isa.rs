use std::path::PathBuf;

use hex_literal::hex;

use rvmeta::generate::generate_fragments;
use rvmeta::isa::standard::{Extension, Standard};
use rvmeta::loader::IsaLoader;

fn spec_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("defs/riscv")
}

#[test]
fn assembles_the_riscv_sample_model() {
    let mut loader = IsaLoader::new(spec_root());
    let model = loader.load_model().expect("load riscv defs");

    // c.nop fully covers bits 0-6 but its test selects no assigned page; that
    // is the only row expected to surface a diagnostic.
    assert_eq!(loader.diagnostics().len(), 1, "{:?}", loader.diagnostics());
    assert_eq!(loader.diagnostics()[0].code, "operations.unknown-major");

    assert_eq!(model.major_opcodes.len(), 21, "reservations and custom rows dropped");
    assert_eq!(model.codecs.len(), 10);
    assert_eq!(model.operands.len(), 13);
    assert_eq!(model.operations.len(), 17);
    assert_eq!(model.expansions.len(), 2);

    let op_imm = model.major_opcode(0b001_0011).expect("OP-IMM page");
    assert_eq!(op_imm.name, "OP-IMM");
    assert_eq!(op_imm.num & 0b11, 0b11);

    assert_eq!(
        model.extension_names[&Extension::I],
        "Base Integer Instruction Set"
    );
    assert_eq!(model.expansions["c.addi"], "addi");
}

#[test]
fn cross_references_partition_the_coding_space() {
    let model = IsaLoader::new(spec_root()).load_model().expect("load riscv defs");

    let op_page: Vec<_> = model
        .operations_for_major(0b011_0011)
        .map(|op| op.name.as_str())
        .collect();
    assert_eq!(op_page, ["add", "div", "mul", "sub"], "OP page, name order");

    let scanned: Vec<_> = model
        .unpartitioned_operations()
        .map(|op| op.name.as_str())
        .collect();
    assert_eq!(scanned, ["c.addi", "c.nop"], "compressed rows fall back to linear scan");

    let addi = model
        .operations
        .iter()
        .find(|op| op.name == "addi")
        .expect("addi present");
    assert_eq!(addi.major_opcode, Some(0b001_0011));
    assert_eq!(addi.codec, "i");
    assert!(addi.standards.has(Standard::parse("rv32i")));
    assert!(addi.standards.has(Standard::parse("rv32i").base()), "base inserted");
    assert!(addi.standards.has(Standard::parse("rv64i")));
    assert!(!addi.standards.has(Standard::parse("rv32m")));

    let rv32 = Standard::parse("rv32i").base();
    assert_eq!(model.operations_in(rv32).count(), 17, "every sample row is RV32");
}

#[test]
fn decodes_scrambled_immediates_from_real_words() {
    let model = IsaLoader::new(spec_root()).load_model().expect("load riscv defs");

    // jal x1, 0x800: imm[11] is the only set immediate bit, stored at
    // inst[20].
    let jal = u32::from_le_bytes(hex!("EF 00 10 00"));
    let jimm20 = &model.operand("jimm20").expect("jimm20").decoding;
    assert_eq!(jimm20.extract(jal), 0x800);
    assert_eq!(jimm20.width, 21);

    let jal_op = model.operations.iter().find(|op| op.name == "jal").expect("jal");
    assert!(jal_op.matches(jal));
    assert_eq!(jal_op.major_opcode, Some(0b110_1111));

    // beq with offset 0b0101010101010 spread across the B-type fields.
    let beq = (0b010101u32 << 25) | (0b0101 << 8) | (1 << 7) | (0b000 << 12) | 0b110_0011;
    let sbimm12 = &model.operand("sbimm12").expect("sbimm12").decoding;
    assert_eq!(sbimm12.extract(beq), 0b0101010101010);

    let beq_op = model.operations.iter().find(|op| op.name == "beq").expect("beq");
    assert!(beq_op.matches(beq));
    assert!(!beq_op.matches(beq | (1 << 12)), "funct3 mismatch selects bne instead");
}

#[test]
fn model_assembly_is_deterministic() {
    let first = IsaLoader::new(spec_root()).load_model().expect("first load");
    let second = IsaLoader::new(spec_root()).load_model().expect("second load");
    assert_eq!(first, second);
}

#[test]
fn emits_rust_fragments_from_the_model() {
    let model = IsaLoader::new(spec_root()).load_model().expect("load riscv defs");
    let dir = tempfile::tempdir().expect("tempdir");

    generate_fragments(dir.path(), &model).expect("fragments render");

    let opcode = std::fs::read_to_string(dir.path().join("opcode.rs")).expect("opcode.rs");
    assert!(opcode.contains("OpImm = 0b0010011,"), "{opcode}");

    let raw = std::fs::read_to_string(dir.path().join("raw_instruction.rs")).expect("raw_instruction.rs");
    assert!(raw.contains("pub fn jimm20(&self) -> i32 {"), "{raw}");
    assert!(raw.contains("pub fn aq(&self) -> bool {"), "{raw}");

    let instruction = std::fs::read_to_string(dir.path().join("instruction.rs")).expect("instruction.rs");
    assert!(instruction.contains("pub enum OperationRv32 {"), "{instruction}");
    assert!(instruction.contains("/// Jump and Link (RV32I)"), "{instruction}");
}
