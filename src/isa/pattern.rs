//! Compiles `end..start=value` matching notation into (test, mask) pairs.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Parses an unsigned value with radix detection: `0x`/`0o`/`0b` prefixes
/// select the base, anything else is decimal.
fn parse_prefixed_u32(raw: &str) -> Option<u32> {
    let lower = raw.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };
    u32::from_str_radix(digits, radix).ok()
}

/// A (test, mask) pair identifying an instruction among all instructions of
/// its class: a word matches when `word & mask == test`.
///
/// A spec line's full pattern is the bitwise OR of every token's contribution,
/// so a malformed token must contribute the zero pattern rather than an error;
/// otherwise it would corrupt the other tokens on its line. The same routine
/// serves major-opcode extraction (8-bit width) and full operation matching
/// (32-bit width); callers truncate as needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MatchPattern {
    pub test: u32,
    pub mask: u32,
}

impl MatchPattern {
    pub const ZERO: MatchPattern = MatchPattern { test: 0, mask: 0 };

    /// Parses one `"<end>..<start>=<value>"` token. The value accepts
    /// `0x`/`0o`/`0b` prefixes; end and start are decimal. The mask covers
    /// bits `[start, end]` inclusive and the test is `value << start`.
    /// Any malformed token yields [`MatchPattern::ZERO`].
    pub fn parse(token: &str) -> MatchPattern {
        let Some((range, value)) = token.split_once('=') else {
            return MatchPattern::ZERO;
        };
        let Some(value) = parse_prefixed_u32(value) else {
            return MatchPattern::ZERO;
        };
        let Some((end, start)) = range.split_once("..") else {
            return MatchPattern::ZERO;
        };
        let (Ok(end), Ok(start)) = (end.parse::<u32>(), start.parse::<u32>()) else {
            return MatchPattern::ZERO;
        };
        if end < start || end > 31 {
            return MatchPattern::ZERO;
        }
        MatchPattern {
            // The value is assumed to fit within the identified bits, so the
            // end offset plays no part in the test.
            test: value << start,
            mask: (((1u64 << (end + 1)) - (1u64 << start)) as u32),
        }
    }

    pub fn is_zero(self) -> bool {
        self == MatchPattern::ZERO
    }

    pub fn matches(self, word: u32) -> bool {
        word & self.mask == self.test
    }
}

impl BitOr for MatchPattern {
    type Output = MatchPattern;

    fn bitor(self, rhs: MatchPattern) -> MatchPattern {
        MatchPattern {
            test: self.test | rhs.test,
            mask: self.mask | rhs.mask,
        }
    }
}

impl BitOrAssign for MatchPattern {
    fn bitor_assign(&mut self, rhs: MatchPattern) {
        *self = *self | rhs;
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:032b}/0b{:032b}", self.test, self.mask)
    }
}
