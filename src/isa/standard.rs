//! Architecture standards: a packed (size, extension) pair plus the flag set
//! operations carry to record which standards they belong to.

use std::fmt;

use bitflags::bitflags;

/// Instruction-width family of an architecture standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Size {
    Rv32,
    Rv64,
    Rv128,
}

impl Size {
    pub fn bits(self) -> u32 {
        match self {
            Size::Rv32 => 32,
            Size::Rv64 => 64,
            Size::Rv128 => 128,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Size> {
        match bits {
            32 => Some(Size::Rv32),
            64 => Some(Size::Rv64),
            128 => Some(Size::Rv128),
            _ => None,
        }
    }
}

/// Single-letter standard extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extension {
    I, // base integer
    M, // multiply and divide
    A, // atomic
    S, // supervisor
    F, // single-precision floating point
    D, // double-precision floating point
    Q, // quad-precision floating point
    C, // compressed
}

impl Extension {
    pub const ALL: [Extension; 8] = [
        Extension::I,
        Extension::M,
        Extension::A,
        Extension::S,
        Extension::F,
        Extension::D,
        Extension::Q,
        Extension::C,
    ];

    pub fn letter(self) -> char {
        match self {
            Extension::I => 'I',
            Extension::M => 'M',
            Extension::A => 'A',
            Extension::S => 'S',
            Extension::F => 'F',
            Extension::D => 'D',
            Extension::Q => 'Q',
            Extension::C => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Extension> {
        match letter.to_ascii_uppercase() {
            'I' => Some(Extension::I),
            'M' => Some(Extension::M),
            'A' => Some(Extension::A),
            'S' => Some(Extension::S),
            'F' => Some(Extension::F),
            'D' => Some(Extension::D),
            'Q' => Some(Extension::Q),
            'C' => Some(Extension::C),
            _ => None,
        }
    }

    fn index(self) -> u32 {
        match self {
            Extension::I => 0,
            Extension::M => 1,
            Extension::A => 2,
            Extension::S => 3,
            Extension::F => 4,
            Extension::D => 5,
            Extension::Q => 6,
            Extension::C => 7,
        }
    }
}

/// A packed (size, extension) pair. The low byte holds the size's bit count,
/// the high byte the extension letter; zero is the invalid standard.
///
/// A standard and its [`base`](Standard::base) are distinct values. Both can be
/// stored in an operation's standard set simultaneously, the base meaning
/// "applies to this size regardless of which extension letter is cited".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Standard(u16);

impl Standard {
    /// The invalid standard. It never matches a real instruction.
    pub const INVALID: Standard = Standard(0);

    pub fn new(size: Size, extension: Option<Extension>) -> Standard {
        let ext = extension.map(|ext| ext.letter() as u16).unwrap_or(0);
        Standard(size.bits() as u16 | ext << 8)
    }

    pub fn size(self) -> Option<Size> {
        Size::from_bits((self.0 & 0xff) as u32)
    }

    pub fn extension(self) -> Option<Extension> {
        let letter = (self.0 >> 8) as u8;
        if letter == 0 {
            None
        } else {
            Extension::from_letter(letter as char)
        }
    }

    /// Projects onto the size only, discarding the extension.
    pub fn base(self) -> Standard {
        Standard(self.0 & 0xff)
    }

    pub fn is_valid(self) -> bool {
        self.size().is_some()
    }

    /// Parses a `rv32i`-style identifier. The `rv` prefix is required, the
    /// middle segment must read 32, 64, or 128, and the trailing letter is
    /// case-folded to the extension. Any other shape yields
    /// [`Standard::INVALID`].
    pub fn parse(raw: &str) -> Standard {
        let Some(rest) = raw.strip_prefix("rv") else {
            return Standard::INVALID;
        };
        if rest.is_empty() || !rest.is_ascii() {
            return Standard::INVALID;
        }
        let (bits, letter) = rest.split_at(rest.len() - 1);
        let Some(size) = bits.parse::<u32>().ok().and_then(Size::from_bits) else {
            return Standard::INVALID;
        };
        let Some(ext) = letter.chars().next().and_then(Extension::from_letter) else {
            return Standard::INVALID;
        };
        Standard::new(size, Some(ext))
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.size(), self.extension()) {
            (Some(size), Some(ext)) => write!(f, "RV{}{}", size.bits(), ext.letter()),
            (Some(size), None) => write!(f, "RV{}", size.bits()),
            _ => f.write_str("RV?"),
        }
    }
}

bitflags! {
    /// The set of standards an operation applies to, one flag per
    /// (size, extension-or-none) combination. Flag-bit order is fixed, so
    /// iteration and rendering are deterministic.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StandardSet: u32 {
        const RV32 = 1 << 0;
        const RV32I = 1 << 1;
        const RV32M = 1 << 2;
        const RV32A = 1 << 3;
        const RV32S = 1 << 4;
        const RV32F = 1 << 5;
        const RV32D = 1 << 6;
        const RV32Q = 1 << 7;
        const RV32C = 1 << 8;
        const RV64 = 1 << 9;
        const RV64I = 1 << 10;
        const RV64M = 1 << 11;
        const RV64A = 1 << 12;
        const RV64S = 1 << 13;
        const RV64F = 1 << 14;
        const RV64D = 1 << 15;
        const RV64Q = 1 << 16;
        const RV64C = 1 << 17;
        const RV128 = 1 << 18;
        const RV128I = 1 << 19;
        const RV128M = 1 << 20;
        const RV128A = 1 << 21;
        const RV128S = 1 << 22;
        const RV128F = 1 << 23;
        const RV128D = 1 << 24;
        const RV128Q = 1 << 25;
        const RV128C = 1 << 26;
    }
}

impl StandardSet {
    fn flag_for(standard: Standard) -> Option<StandardSet> {
        let size = standard.size()?;
        let block = match size {
            Size::Rv32 => 0,
            Size::Rv64 => 9,
            Size::Rv128 => 18,
        };
        let offset = match standard.extension() {
            None => 0,
            Some(ext) => 1 + ext.index(),
        };
        StandardSet::from_bits(1 << (block + offset))
    }

    /// Adds a standard to the set. The invalid standard maps to no flag and
    /// is ignored.
    pub fn add(&mut self, standard: Standard) {
        if let Some(flag) = Self::flag_for(standard) {
            *self |= flag;
        }
    }

    pub fn has(self, standard: Standard) -> bool {
        match Self::flag_for(standard) {
            Some(flag) => self.contains(flag),
            None => false,
        }
    }
}
