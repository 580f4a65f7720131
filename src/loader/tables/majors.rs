//! Parser for the major-opcode table.

use std::collections::BTreeMap;

use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink};
use crate::isa::model::{MAJOR_OPCODE_LOW_BITS, MajorOpcode};
use crate::isa::pattern::MatchPattern;
use crate::loader::scan::strip_comment;

/// The table marks coding-space reservations with lowercase or mixed-case
/// placeholder names; only currently assigned opcodes are written entirely in
/// uppercase. That is a formatting convention, not a structural one, so it
/// lives here at the parser boundary where a future spec-format change can
/// swap it out.
pub fn is_assigned_opcode_name(name: &str) -> bool {
    !name.chars().any(|ch| ch.is_lowercase())
}

/// Parses the major-opcode table: each row is a sequence of match-spec tokens
/// followed by the opcode's name. Token test values OR-accumulate into the
/// 7-bit opcode number, whose bits 0-1 are always forced on.
pub fn parse_major_opcodes(src: &str, sink: &mut DiagnosticSink) -> BTreeMap<u8, MajorOpcode> {
    let mut majors = BTreeMap::new();
    for (index, line) in src.lines().enumerate() {
        let line_no = Some(index + 1);
        let fields: Vec<&str> = strip_comment(line).split_whitespace().collect();
        let Some((name, specs)) = fields.split_last() else {
            continue;
        };
        if specs.is_empty() {
            continue;
        }
        if !is_assigned_opcode_name(name) {
            continue;
        }

        let mut num = MAJOR_OPCODE_LOW_BITS;
        for spec in specs {
            let pattern = MatchPattern::parse(spec);
            if pattern.is_zero() {
                sink.warn(
                    DiagnosticPhase::MajorOpcodes,
                    "majors.dropped-spec",
                    line_no,
                    format!("dropped match spec '{spec}' for opcode '{name}'"),
                );
                continue;
            }
            num |= pattern.test as u8;
        }

        majors.insert(num, MajorOpcode { name: (*name).to_string(), num });
    }
    majors
}
