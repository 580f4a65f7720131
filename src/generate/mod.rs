//! Source-fragment emission from a finished ISA model.

pub mod rust;

pub use rust::generate_fragments;
