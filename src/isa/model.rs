//! The assembled ISA model: the read-only output of a load.
//!
//! Every entity is constructed once during assembly and never mutated
//! afterwards. All maps are ordered and the operation list is sorted by name,
//! so identical inputs reproduce the model byte for byte; downstream code
//! generation depends on that stability.

use std::collections::BTreeMap;

use crate::isa::bitfield::Decoding;
use crate::isa::pattern::MatchPattern;
use crate::isa::standard::{Extension, Standard, StandardSet};

/// Width of the fixed low-order field that partitions standard-length
/// instructions.
pub const MAJOR_OPCODE_MASK: u32 = 0b111_1111;

/// The low two bits every standard-length major opcode carries, marking "this
/// is a standard-length-or-longer instruction" as opposed to a 16-bit
/// compressed one.
pub const MAJOR_OPCODE_LOW_BITS: u8 = 0b11;

/// A 7-bit major opcode: the fixed low-order field shared by all
/// standard-length instructions in one coding-space "page".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorOpcode {
    pub name: String,
    /// Always has bits 0-1 set.
    pub num: u8,
}

/// A named encoding shape: the ordered operand list a family of instructions
/// shares. Operand order is the order operands are written in assembly syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    pub name: String,
    pub operands: Vec<String>,
}

/// Semantic role of an operand, from the operand table's type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    General,
    IntReg,
    FloatReg,
    CompressedReg,
    Offset,
    SignedImm,
    UnsignedImm,
}

impl OperandKind {
    pub fn parse(raw: &str) -> Option<OperandKind> {
        match raw {
            "arg" => Some(OperandKind::General),
            "ireg" => Some(OperandKind::IntReg),
            "freg" => Some(OperandKind::FloatReg),
            "creg" => Some(OperandKind::CompressedReg),
            "offset" => Some(OperandKind::Offset),
            "simm" => Some(OperandKind::SignedImm),
            "uimm" => Some(OperandKind::UnsignedImm),
            _ => None,
        }
    }

    /// Signed roles are sign-extended from the reconstructed width.
    pub fn is_signed(self) -> bool {
        matches!(self, OperandKind::Offset | OperandKind::SignedImm)
    }
}

/// A decodable operand: its reconstruction recipe plus the metadata consumers
/// need to give the value a type and a name in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub name: String,
    pub kind: OperandKind,
    /// Target-facing short name used inside a single instruction, from the
    /// operand table's local-name column.
    pub local_name: String,
    pub decoding: Decoding,
}

impl Operand {
    /// Bit width of the fully reconstructed value. Together with
    /// [`OperandKind`] this decides whether the decoded representation is a
    /// boolean flag, a register index, or a (possibly sign-extended) integer.
    pub fn enc_width(&self) -> u32 {
        self.decoding.width
    }
}

/// One operation: its identifying pattern, encoding shape, and the standards
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub pseudocode: String,
    pub pattern: MatchPattern,
    /// Set iff the pattern's mask fully covers bits 0-6, in which case it is
    /// the number of the major opcode the test bits select. Operations without
    /// one (compressed and extended-length encodings) are dispatched by linear
    /// scan instead.
    pub major_opcode: Option<u8>,
    /// Name of the codec this operation encodes with.
    pub codec: String,
    /// Every standard this operation applies to, bases included.
    pub standards: StandardSet,
}

impl Operation {
    pub fn matches(&self, word: u32) -> bool {
        self.pattern.matches(word)
    }
}

/// The fully assembled, immutable ISA model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsaModel {
    pub extension_names: BTreeMap<Extension, String>,
    pub major_opcodes: BTreeMap<u8, MajorOpcode>,
    pub codecs: BTreeMap<String, Codec>,
    pub operands: BTreeMap<String, Operand>,
    /// Compressed-instruction mnemonic to the full-length mnemonic it expands
    /// to.
    pub expansions: BTreeMap<String, String>,
    /// Sorted by name.
    pub operations: Vec<Operation>,
}

impl IsaModel {
    pub fn major_opcode(&self, num: u8) -> Option<&MajorOpcode> {
        self.major_opcodes.get(&num)
    }

    pub fn codec(&self, name: &str) -> Option<&Codec> {
        self.codecs.get(name)
    }

    pub fn operand(&self, name: &str) -> Option<&Operand> {
        self.operands.get(name)
    }

    /// Operands of an operation, in assembly order, resolved through its
    /// codec. Unknown operand names resolve to `None` entries.
    pub fn operation_operands<'model>(
        &'model self,
        operation: &Operation,
    ) -> impl Iterator<Item = Option<&'model Operand>> + 'model {
        self.codecs
            .get(&operation.codec)
            .map(|codec| codec.operands.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|name| self.operands.get(name))
    }

    /// The partition of operations a decoder should search for a word whose
    /// low seven bits select `num`.
    pub fn operations_for_major(&self, num: u8) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(move |op| op.major_opcode == Some(num))
    }

    /// Operations with no major opcode, which a decoder must scan linearly.
    pub fn unpartitioned_operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.major_opcode.is_none())
    }

    pub fn operations_in(&self, standard: Standard) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(move |op| op.standards.has(standard))
    }
}
