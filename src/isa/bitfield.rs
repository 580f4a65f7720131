//! Decode-step synthesis for operand encodings.
//!
//! An operand's encoding descriptor names where its bits live inside the raw
//! instruction word. Several immediate encodings deliberately scramble bit
//! order in hardware for wiring convenience (branch and jump offsets most
//! prominently), so a descriptor compiles to a sequence of mask/shift steps
//! whose shifted results, bitwise-ORed together, exactly invert that
//! scrambling. Step destination ranges are disjoint, so the steps commute;
//! they are emitted in descending source-bit order for readability.

use smallvec::SmallVec;

use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink};

/// Returns a mask covering bits `[bottom, top]` inclusive. Computed in 64 bits
/// so `top == 31` cannot overflow; a reversed range yields the empty mask.
pub fn range_mask(top: u32, bottom: u32) -> u32 {
    if top < bottom || top > 31 {
        return 0;
    }
    ((1u64 << (top + 1)) - (1u64 << bottom)) as u32
}

/// Bit relocation direction and distance, always non-negative.
///
/// The textual spec format encodes this as one signed quantity (negative
/// meaning left); that convention exists only at the parsing boundary, via
/// [`Shift::from_signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Left(u32),
    Right(u32),
}

impl Shift {
    pub fn from_signed(amount: i32) -> Shift {
        if amount < 0 {
            Shift::Left(amount.unsigned_abs())
        } else {
            Shift::Right(amount as u32)
        }
    }

    pub fn to_signed(self) -> i32 {
        match self {
            Shift::Left(amount) => -(amount as i32),
            Shift::Right(amount) => amount as i32,
        }
    }

    pub fn apply(self, bits: u32) -> u32 {
        match self {
            Shift::Left(amount) => bits << amount,
            Shift::Right(amount) => bits >> amount,
        }
    }
}

/// One extract-and-relocate operation: select the masked bits of the raw word,
/// then shift them into their position in the reconstructed operand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeStep {
    pub mask: u32,
    pub shift: Shift,
}

impl DecodeStep {
    pub fn apply(self, word: u32) -> u32 {
        self.shift.apply(word & self.mask)
    }

    /// Highest destination bit this step fills.
    pub fn dest_top(self) -> u32 {
        debug_assert!(self.mask != 0);
        let source_top = 31 - self.mask.leading_zeros();
        match self.shift {
            Shift::Left(amount) => source_top + amount,
            Shift::Right(amount) => source_top - amount,
        }
    }
}

/// An operand's full decoding: ordered steps plus the bit width of the
/// reconstructed value (used downstream for sign extension and for collapsing
/// one-bit flags to booleans).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    pub steps: SmallVec<[DecodeStep; 4]>,
    pub width: u32,
}

impl Decoding {
    /// Reconstructs the operand value from a raw instruction word.
    pub fn extract(&self, word: u32) -> u32 {
        self.steps.iter().fold(0, |value, step| value | step.apply(word))
    }

    /// Parses a comma-separated list of sub-field descriptors.
    ///
    /// Two grammars are supported per sub-field:
    ///
    /// * Contiguous `"top:bottom"` (bare `"n"` meaning the single bit `n`):
    ///   one step that right-justifies the range at bit 0.
    /// * Split `"srcTop:ignored[d1top:d1bot|d2top:d2bot|...]"`: a contiguous
    ///   source run starting at `srcTop` and counting downward, redistributed
    ///   into the listed destination chunks left to right. Each chunk consumes
    ///   the next `destTop - destBottom + 1` source bits and relocates them so
    ///   the slice lands at `[destBottom, destTop]`; this is an overall left shift
    ///   when the destination sits higher than the source.
    ///
    /// Malformed sub-fields contribute nothing and are reported to `sink`. A
    /// descriptor yielding zero steps is a caller error: `None` is returned
    /// rather than pretending a zero-bit operand exists.
    pub fn parse(raw: &str, line: Option<usize>, sink: &mut DiagnosticSink) -> Option<Decoding> {
        let mut steps: SmallVec<[DecodeStep; 4]> = SmallVec::new();
        for part in raw.split(',') {
            match part.find('[') {
                None => parse_contiguous(part, line, &mut steps, sink),
                Some(bracket) => parse_split(part, bracket, line, &mut steps, sink),
            }
        }
        if steps.is_empty() {
            return None;
        }
        let width = steps.iter().map(|step| step.dest_top()).max().unwrap_or(0) + 1;
        Some(Decoding { steps, width })
    }
}

fn dropped(sink: &mut DiagnosticSink, line: Option<usize>, token: &str, why: &str) {
    sink.warn(
        DiagnosticPhase::Operands,
        "operands.dropped-subfield",
        line,
        format!("dropped sub-field '{token}': {why}"),
    );
}

/// Parses a `top:bottom` pair, where a bare `n` stands for `n:n`.
fn parse_bit_range(token: &str) -> Option<(u32, u32)> {
    let (top, bottom) = match token.split_once(':') {
        Some((top, bottom)) => (top, bottom),
        None => (token, token),
    };
    let top = top.parse::<u32>().ok()?;
    let bottom = bottom.parse::<u32>().ok()?;
    if top < bottom || top > 31 {
        return None;
    }
    Some((top, bottom))
}

fn parse_contiguous(
    part: &str,
    line: Option<usize>,
    steps: &mut SmallVec<[DecodeStep; 4]>,
    sink: &mut DiagnosticSink,
) {
    let Some((top, bottom)) = parse_bit_range(part) else {
        dropped(sink, line, part, "not a top:bottom bit range");
        return;
    };
    steps.push(DecodeStep {
        mask: range_mask(top, bottom),
        shift: Shift::Right(bottom),
    });
}

fn parse_split(
    part: &str,
    bracket: usize,
    line: Option<usize>,
    steps: &mut SmallVec<[DecodeStep; 4]>,
    sink: &mut DiagnosticSink,
) {
    let Some(dests) = part[bracket + 1..].strip_suffix(']') else {
        dropped(sink, line, part, "unterminated destination list");
        return;
    };
    let source = &part[..bracket];
    let source_top = match source.split_once(':') {
        Some((top, _)) => top,
        None => source,
    };
    let Some(mut source_top) = source_top.parse::<u32>().ok().filter(|top| *top <= 31) else {
        dropped(sink, line, part, "source position is not a bit index");
        return;
    };
    let mut exhausted = false;
    for chunk in dests.split('|') {
        let Some((dest_top, dest_bottom)) = parse_bit_range(chunk) else {
            dropped(sink, line, chunk, "not a destination bit range");
            continue;
        };
        let width = dest_top - dest_bottom;
        if exhausted || source_top < width {
            dropped(sink, line, chunk, "source run has too few bits left");
            continue;
        }
        let source_bottom = source_top - width;
        steps.push(DecodeStep {
            mask: range_mask(source_top, source_bottom),
            shift: Shift::from_signed(source_bottom as i32 - dest_bottom as i32),
        });
        // The next chunk picks up immediately below the slice just consumed.
        match source_bottom.checked_sub(1) {
            Some(next) => source_top = next,
            None => exhausted = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(raw: &str) -> Decoding {
        let mut sink = DiagnosticSink::new();
        let decoding = Decoding::parse(raw, None, &mut sink).expect("descriptor parses");
        assert!(sink.is_empty(), "unexpected drops: {:?}", sink.entries());
        decoding
    }

    #[test]
    fn contiguous_field_right_justifies() {
        let decoding = parse_ok("11:7");
        assert_eq!(decoding.steps.len(), 1);
        assert_eq!(decoding.steps[0].mask, 0b1111_1000_0000);
        assert_eq!(decoding.steps[0].shift, Shift::Right(7));
        assert_eq!(decoding.width, 5);
        assert_eq!(decoding.extract(0x0000_0A80), 0b10101);
    }

    #[test]
    fn contiguous_round_trip() {
        let decoding = parse_ok("7:3");
        for word in [0u32, 0xFFFF_FFFF, 0xDEAD_BEEF, 0x0000_00F8] {
            let value = decoding.extract(word);
            assert_eq!(value << 3, word & range_mask(7, 3), "reinserting reproduces bits 3..7");
        }
    }

    #[test]
    fn bare_number_is_a_single_bit() {
        let decoding = parse_ok("26");
        assert_eq!(decoding.width, 1);
        assert_eq!(decoding.extract(1 << 26), 1);
        assert_eq!(decoding.extract(!(1 << 26)), 0);
    }

    #[test]
    fn branch_immediate_scramble_inverts_exactly() {
        // B-type: inst[31] = imm[12], inst[30:25] = imm[10:5],
        //         inst[11:8] = imm[4:1], inst[7] = imm[11].
        let decoding = parse_ok("31:25[12|10:5],11:7[4:1|11]");
        assert_eq!(decoding.width, 13);
        assert_eq!(
            decoding.steps.as_slice(),
            &[
                DecodeStep { mask: 1 << 31, shift: Shift::Right(19) },
                DecodeStep { mask: range_mask(30, 25), shift: Shift::Right(20) },
                DecodeStep { mask: range_mask(11, 8), shift: Shift::Right(7) },
                DecodeStep { mask: 1 << 7, shift: Shift::Left(4) },
            ]
        );

        // imm = 0b0101010101010: imm[12]=0, imm[11]=1, imm[10:5]=0b010101,
        // imm[4:1]=0b0101, imm[0] is implied zero.
        let word = (0b010101 << 25) | (0b0101 << 8) | (1 << 7);
        assert_eq!(decoding.extract(word), 0b0101010101010);

        // All source bits set reconstructs every immediate bit except bit 0.
        assert_eq!(decoding.extract(0xFFFF_FFFF), 0b1111111111110);
    }

    #[test]
    fn jump_immediate_scramble_inverts_exactly() {
        // J-type: inst[31] = imm[20], inst[30:21] = imm[10:1],
        //         inst[20] = imm[11], inst[19:12] = imm[19:12].
        let decoding = parse_ok("31:12[20|10:1|11|19:12]");
        assert_eq!(decoding.width, 21);

        let imm = 0b0_1010_0110_0101_0110_1010u32;
        let word = ((imm >> 20) & 1) << 31
            | ((imm >> 1) & 0x3FF) << 21
            | ((imm >> 11) & 1) << 20
            | ((imm >> 12) & 0xFF) << 12;
        assert_eq!(decoding.extract(word), imm);
    }

    #[test]
    fn store_immediate_splits_without_scrambling() {
        // S-type: inst[31:25] = imm[11:5], inst[11:7] = imm[4:0].
        let decoding = parse_ok("31:25[11:5],11:7[4:0]");
        assert_eq!(decoding.width, 12);
        let word = (0b1000001 << 25) | (0b10001 << 7);
        assert_eq!(decoding.extract(word), 0b1000_0011_0001);
    }

    #[test]
    fn split_consumption_tracks_chunk_widths() {
        let decoding = parse_ok("12:12[5],6:2[4:0]");
        assert_eq!(decoding.width, 6);
        let consumed: u32 = decoding.steps.iter().map(|step| step.mask.count_ones()).sum();
        assert_eq!(consumed, 6, "source bits consumed equal destination widths");
        assert_eq!(decoding.extract((1 << 12) | (0b01011 << 2)), 0b101011);
    }

    #[test]
    fn overconsuming_chunks_are_dropped_with_a_diagnostic() {
        let mut sink = DiagnosticSink::new();
        let decoding = Decoding::parse("3:0[2:0|4:0]", None, &mut sink).expect("first chunk is fine");
        assert_eq!(decoding.steps.len(), 1, "second chunk outruns the source bits");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn malformed_subfields_are_dropped_with_diagnostics() {
        let mut sink = DiagnosticSink::new();
        let decoding = Decoding::parse("31:20,nonsense,5:9", None, &mut sink).expect("one field ok");
        assert_eq!(decoding.steps.len(), 1);
        assert_eq!(decoding.width, 12);
        assert_eq!(sink.len(), 2, "each dropped sub-field is observable");
    }

    #[test]
    fn empty_descriptor_is_not_a_zero_bit_operand() {
        let mut sink = DiagnosticSink::new();
        assert!(Decoding::parse("", None, &mut sink).is_none());
        assert!(Decoding::parse("junk[", None, &mut sink).is_none());
    }
}
