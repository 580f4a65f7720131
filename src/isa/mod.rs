//! The ISA model and its bit-field algebra.
//!
//! This module owns everything downstream of parsing: the matching-pattern
//! compiler, the operand decode-step synthesizer, the standard/extension
//! algebra, and the assembled read-only [`IsaModel`](model::IsaModel).

pub mod bitfield;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod pattern;
pub mod standard;

pub use bitfield::{DecodeStep, Decoding, Shift};
pub use diagnostic::{DiagnosticSink, SpecDiagnostic};
pub use error::IsaError;
pub use model::{Codec, IsaModel, MajorOpcode, Operand, OperandKind, Operation};
pub use pattern::MatchPattern;
pub use standard::{Extension, Size, Standard, StandardSet};
