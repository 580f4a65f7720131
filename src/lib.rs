//! Compiles declarative, line-oriented instruction-set encoding specs into a
//! structured model from which instruction decoders can be generated.
//!
//! The pipeline is a staged batch computation: [`loader`] parses the spec
//! resources in dependency order, [`isa`] holds the bit-field algebra and the
//! assembled read-only model, and [`generate`] renders source fragments from
//! it. Nothing is mutated after assembly; identical inputs reproduce the
//! model exactly.

pub mod generate;
pub mod isa;
pub mod loader;
