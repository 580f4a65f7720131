//! Renders Rust source fragments from a finished model: a major-opcode enum,
//! a raw-word accessor impl, and per-size operation enums with a decode
//! skeleton partitioned by major opcode.
//!
//! The renderers are pure string builders; only [`generate_fragments`] touches
//! the filesystem.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::isa::bitfield::Shift;
use crate::isa::error::IsaError;
use crate::isa::model::{IsaModel, Operand, OperandKind, Operation};
use crate::isa::standard::{Extension, Size, Standard};
use crate::loader::idents::{snake_ident, title_ident};

pub fn generate_fragments(dir: &Path, model: &IsaModel) -> Result<(), IsaError> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("opcode.rs"), render_opcode_enum(model))?;
    fs::write(dir.join("raw_instruction.rs"), render_raw_instruction(model))?;
    fs::write(dir.join("instruction.rs"), render_instruction_enums(model))?;
    Ok(())
}

/// The generated Rust type a decoded operand value carries.
fn operand_type(operand: &Operand) -> &'static str {
    match operand.kind {
        OperandKind::IntReg | OperandKind::CompressedReg => "IntRegister",
        OperandKind::FloatReg => "FloatRegister",
        OperandKind::Offset | OperandKind::SignedImm => "i32",
        OperandKind::General | OperandKind::UnsignedImm => {
            if operand.enc_width() == 1 {
                "bool"
            } else {
                "u32"
            }
        }
    }
}

/// Generated struct-field name for an operand: its local name, flattened.
fn operand_field(operand: &Operand) -> String {
    snake_ident(&operand.local_name).replace('_', "")
}

fn render_opcode_enum(model: &IsaModel) -> String {
    let mut out = String::new();
    out.push_str("/// Enumeration of top-level opcodes for full-length operations.\n");
    out.push_str("#[repr(u8)]\n");
    out.push_str("pub enum Opcode {\n");

    let mut majors: Vec<_> = model.major_opcodes.values().collect();
    majors.sort_by_key(|major| title_ident(&major.name));
    for major in majors {
        out.push_str(&format!("    {} = 0b{:07b},\n", title_ident(&major.name), major.num));
    }
    out.push_str("}\n");
    out
}

fn render_raw_instruction(model: &IsaModel) -> String {
    let mut out = String::new();
    out.push_str(
        "/// Represents a raw instruction word that is yet to be decoded.\n\
         ///\n\
         /// It can represent both standard-length and compressed instructions, the\n\
         /// latter of which are supported by ignoring the higher-order parcel.\n\
         pub struct RawInstruction(u32);\n\
         \n\
         impl RawInstruction {\n",
    );

    // One accessor per operand. It is the caller's responsibility to only
    // invoke the accessors appropriate for a given instruction's codec; the
    // others return garbage, not errors.
    for operand in model.operands.values() {
        let result_type = operand_type(operand);
        out.push_str(&format!(
            "\n    pub fn {}(&self) -> {} {{\n",
            snake_ident(&operand.name),
            result_type
        ));
        if result_type == "bool" && operand.decoding.steps.len() == 1 {
            out.push_str(&format!(
                "        (self.0 & 0b{:032b}) != 0\n",
                operand.decoding.steps[0].mask
            ));
        } else {
            out.push_str("        let mut raw: u32 = 0;\n");
            for step in &operand.decoding.steps {
                match step.shift {
                    Shift::Right(0) => {
                        out.push_str(&format!("        raw |= self.0 & 0b{:032b};\n", step.mask));
                    }
                    Shift::Right(amount) => {
                        out.push_str(&format!(
                            "        raw |= (self.0 & 0b{:032b}) >> {};\n",
                            step.mask, amount
                        ));
                    }
                    Shift::Left(amount) => {
                        out.push_str(&format!(
                            "        raw |= (self.0 & 0b{:032b}) << {};\n",
                            step.mask, amount
                        ));
                    }
                }
            }
            match result_type {
                "u32" => out.push_str("        raw\n"),
                "bool" => out.push_str("        raw != 0\n"),
                "i32" => out.push_str(&format!(
                    "        sign_extend(raw, {})\n",
                    operand.enc_width()
                )),
                "IntRegister" => out.push_str("        IntRegister::num(raw as usize)\n"),
                "FloatRegister" => out.push_str("        FloatRegister::num(raw as usize)\n"),
                _ => unreachable!("operand_type covers every kind"),
            }
        }
        out.push_str("    }\n");
    }

    out.push_str("}\n");
    out
}

fn variant_fields(model: &IsaModel, operation: &Operation) -> Vec<(String, &'static str)> {
    model
        .operation_operands(operation)
        .flatten()
        .map(|operand| (operand_field(operand), operand_type(operand)))
        .collect()
}

fn render_instruction_enums(model: &IsaModel) -> String {
    let mut out = String::new();
    for size in [Size::Rv32, Size::Rv64] {
        render_operation_enum(&mut out, model, size);
        render_decode_impl(&mut out, model, size);
    }
    out
}

fn render_operation_enum(out: &mut String, model: &IsaModel, size: Size) {
    let bits = size.bits();
    out.push_str(&format!(
        "\n/// Enumeration of all operations from the RV{bits} ISA.\npub enum OperationRv{bits} {{\n"
    ));

    let mut seen = BTreeSet::new();
    for ext in Extension::ALL {
        let standard = Standard::new(size, Some(ext));
        let members: Vec<_> = model
            .operations_in(standard)
            .filter(|op| seen.insert(op.name.clone()))
            .collect();
        if members.is_empty() {
            continue;
        }
        let ext_name = model
            .extension_names
            .get(&ext)
            .map(String::as_str)
            .unwrap_or("");
        out.push_str(&format!("\n    // RV{bits}{}: {ext_name}\n\n", ext.letter()));
        for op in members {
            out.push_str(&format!("    /// {} (RV{bits}{})\n", op.full_name, ext.letter()));
            let fields = variant_fields(model, op);
            if fields.is_empty() {
                out.push_str(&format!("    {},\n", title_ident(&op.name)));
                continue;
            }
            out.push_str(&format!("    {} {{\n", title_ident(&op.name)));
            for (field, field_type) in fields {
                out.push_str(&format!("        {field}: {field_type},\n"));
            }
            out.push_str("    },\n");
        }
    }

    out.push_str("\n    /// Fallback for words that match no known encoding.\n    Invalid,\n}\n\n");
}

fn render_decode_impl(out: &mut String, model: &IsaModel, size: Size) {
    let bits = size.bits();
    let base = Standard::new(size, None);

    out.push_str(&format!(
        "impl OperationRv{bits} {{\n    pub fn decode_raw(raw: RawInstruction) -> Self {{\n        match raw.opcode() {{\n"
    ));

    let mut arms: Vec<Option<u8>> = model.major_opcodes.keys().map(|num| Some(*num)).collect();
    arms.push(None);

    for major in arms {
        match major {
            Some(num) => out.push_str(&format!("            0b{num:07b} => {{\n")),
            None => out.push_str("            _ => {\n"),
        }
        let members: Vec<_> = model
            .operations
            .iter()
            .filter(|op| op.major_opcode == major && op.standards.has(base))
            .collect();
        for op in &members {
            let compressed = op.pattern.mask & 0xFFFF_0000 == 0;
            let matcher = if major.is_none() && compressed {
                format!("raw.matches(0b{:016b}, 0b{:016b})", op.pattern.mask, op.pattern.test)
            } else {
                format!("raw.matches(0b{:032b}, 0b{:032b})", op.pattern.mask, op.pattern.test)
            };
            out.push_str(&format!("                if {matcher} {{\n"));
            let fields = variant_fields(model, op);
            if fields.is_empty() {
                out.push_str(&format!("                    return Self::{};\n", title_ident(&op.name)));
            } else {
                out.push_str(&format!("                    return Self::{} {{\n", title_ident(&op.name)));
                let accessors: Vec<_> = model.operation_operands(op).flatten().collect();
                for operand in accessors {
                    out.push_str(&format!(
                        "                        {}: raw.{}(),\n",
                        operand_field(operand),
                        snake_ident(&operand.name)
                    ));
                }
                out.push_str("                    };\n");
            }
            out.push_str("                }\n");
        }
        out.push_str("                Self::Invalid\n            }\n");
    }

    out.push_str("        }\n    }\n}\n");
}
