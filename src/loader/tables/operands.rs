//! Parser for the operand table.

use std::collections::BTreeMap;

use crate::isa::bitfield::Decoding;
use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink};
use crate::isa::model::{Operand, OperandKind};
use crate::loader::scan::strip_comment;

/// Parses the operand table: name, encoding descriptor, semantic type, and
/// the target-facing local name. An operand whose descriptor yields no decode
/// steps is skipped with an error-level diagnostic; it cannot be treated as a
/// zero-bit operand.
pub fn parse_operands(src: &str, sink: &mut DiagnosticSink) -> BTreeMap<String, Operand> {
    let mut operands = BTreeMap::new();
    for (index, line) in src.lines().enumerate() {
        let line_no = Some(index + 1);
        let fields: Vec<&str> = strip_comment(line).split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let name = fields[0];

        let Some(kind) = OperandKind::parse(fields[2]) else {
            sink.error(
                DiagnosticPhase::Operands,
                "operands.unknown-kind",
                line_no,
                format!("operand '{name}' has unknown type '{}'", fields[2]),
            );
            continue;
        };
        let Some(decoding) = Decoding::parse(fields[1], line_no, sink) else {
            sink.error(
                DiagnosticPhase::Operands,
                "operands.empty-decoding",
                line_no,
                format!("operand '{name}' encoding '{}' yields no decode steps", fields[1]),
            );
            continue;
        };

        operands.insert(
            name.to_string(),
            Operand {
                name: name.to_string(),
                kind,
                local_name: fields[3].to_string(),
                decoding,
            },
        );
    }
    operands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::bitfield::Shift;

    #[test]
    fn parses_register_and_immediate_operands() {
        let src = "\
# name    encoding                     type    local
rd        11:7                         ireg    rd
sbimm12   31:25[12|10:5],11:7[4:1|11]  offset  imm
aq        26                           arg     aq
";
        let mut sink = DiagnosticSink::new();
        let operands = parse_operands(src, &mut sink);
        assert!(sink.is_empty(), "{:?}", sink.entries());

        let rd = &operands["rd"];
        assert_eq!(rd.kind, OperandKind::IntReg);
        assert_eq!(rd.local_name, "rd");
        assert_eq!(rd.enc_width(), 5);
        assert_eq!(rd.decoding.steps[0].shift, Shift::Right(7));

        let imm = &operands["sbimm12"];
        assert_eq!(imm.kind, OperandKind::Offset);
        assert_eq!(imm.enc_width(), 13);
        assert_eq!(imm.decoding.steps.len(), 4);

        let aq = &operands["aq"];
        assert_eq!(aq.enc_width(), 1, "single flag bit collapses to width one");
    }

    #[test]
    fn empty_decodings_are_an_error_not_a_zero_bit_operand() {
        let src = "broken junk simm imm\n";
        let mut sink = DiagnosticSink::new();
        let operands = parse_operands(src, &mut sink);
        assert!(operands.is_empty());
        assert!(
            sink.entries().iter().any(|diag| diag.code == "operands.empty-decoding"),
            "{:?}",
            sink.entries()
        );
    }

    #[test]
    fn unknown_kinds_are_reported() {
        let src = "rd 11:7 register rd\n";
        let mut sink = DiagnosticSink::new();
        let operands = parse_operands(src, &mut sink);
        assert!(operands.is_empty());
        assert_eq!(sink.entries()[0].code, "operands.unknown-kind");
    }
}
