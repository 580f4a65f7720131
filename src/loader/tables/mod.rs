//! One parser per spec table, mirroring the resource files on disk.

pub mod codecs;
pub mod majors;
pub mod operands;
pub mod operations;
pub mod strings;

pub use codecs::parse_codecs;
pub use majors::{is_assigned_opcode_name, parse_major_opcodes};
pub use operands::parse_operands;
pub use operations::parse_operations;
pub use strings::{OperationNotes, parse_expansions, parse_extension_names, parse_string_table};
