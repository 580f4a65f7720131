//! Parser for the operation table, which cross-references every previously
//! built stage.

use std::collections::BTreeMap;

use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink};
use crate::isa::model::{Codec, MAJOR_OPCODE_MASK, MajorOpcode, Operation};
use crate::isa::pattern::MatchPattern;
use crate::isa::standard::{Standard, StandardSet};
use crate::loader::scan::strip_comment;
use crate::loader::tables::strings::OperationNotes;

/// Parses the operation table.
///
/// Each row is the operation name, then a mixture of field-name annotations
/// and match-spec tokens up to the codec name, then standards identifiers.
/// The annotations are redundant with the codec's own operand ordering and are
/// discarded; a row that never names a codec is dropped as malformed.
///
/// When a row's accumulated mask fully covers bits 0-6, its test value selects
/// the major opcode the operation is attached to: the cross-reference that
/// lets a decoder partition its search space instead of scanning linearly.
pub fn parse_operations(
    src: &str,
    majors: &BTreeMap<u8, MajorOpcode>,
    codecs: &BTreeMap<String, Codec>,
    notes: &OperationNotes,
    sink: &mut DiagnosticSink,
) -> Vec<Operation> {
    let mut operations = Vec::new();
    for (index, line) in src.lines().enumerate() {
        let line_no = Some(index + 1);
        let fields: Vec<&str> = strip_comment(line).split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let name = fields[0];

        let mut pattern = MatchPattern::ZERO;
        let mut codec = None;
        let mut rest = &fields[1..];
        while let Some((&token, remaining)) = rest.split_first() {
            rest = remaining;
            if codecs.contains_key(token) {
                codec = Some(token.to_string());
                break;
            }
            if !token.starts_with(|ch: char| ch.is_ascii_digit()) {
                // A field-name annotation; the codec already orders operands.
                continue;
            }
            let contribution = MatchPattern::parse(token);
            if contribution.is_zero() {
                sink.warn(
                    DiagnosticPhase::Operations,
                    "operations.dropped-spec",
                    line_no,
                    format!("dropped match spec '{token}' for operation '{name}'"),
                );
                continue;
            }
            pattern |= contribution;
        }

        let Some(codec) = codec else {
            sink.warn(
                DiagnosticPhase::Operations,
                "operations.no-codec",
                line_no,
                format!("operation '{name}' names no known codec; row dropped"),
            );
            continue;
        };

        let major_opcode = if pattern.mask & MAJOR_OPCODE_MASK == MAJOR_OPCODE_MASK {
            let num = (pattern.test & MAJOR_OPCODE_MASK) as u8;
            if majors.contains_key(&num) {
                Some(num)
            } else {
                sink.warn(
                    DiagnosticPhase::Operations,
                    "operations.unknown-major",
                    line_no,
                    format!("operation '{name}' selects unassigned major opcode {num:#09b}"),
                );
                None
            }
        } else {
            None
        };

        let mut standards = StandardSet::default();
        for token in rest {
            let standard = Standard::parse(token);
            if !standard.is_valid() {
                sink.warn(
                    DiagnosticPhase::Operations,
                    "operations.unknown-standard",
                    line_no,
                    format!("operation '{name}' has unrecognized standard '{token}'"),
                );
                continue;
            }
            standards.add(standard);
            standards.add(standard.base());
        }

        operations.push(Operation {
            name: name.to_string(),
            full_name: notes.full_names.get(name).cloned().unwrap_or_default(),
            description: notes.descriptions.get(name).cloned().unwrap_or_default(),
            pseudocode: notes.pseudocode.get(name).cloned().unwrap_or_default(),
            pattern,
            major_opcode,
            codec,
            standards,
        });
    }

    operations.sort_by(|a, b| a.name.cmp(&b.name));
    operations
}
