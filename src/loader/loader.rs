//! Loading pipeline that reads the spec resources in dependency order and
//! assembles the ISA model.

use std::fs;
use std::path::PathBuf;

use crate::isa::diagnostic::{DiagnosticSink, SpecDiagnostic};
use crate::isa::error::IsaError;
use crate::isa::model::IsaModel;
use crate::loader::tables::{
    OperationNotes, parse_codecs, parse_expansions, parse_extension_names, parse_major_opcodes,
    parse_operands, parse_operations, parse_string_table,
};

const EXTENSIONS: &str = "extensions";
const OPCODE_MAJORS: &str = "opcode-majors";
const CODECS: &str = "codecs";
const OPERANDS: &str = "operands";
const OPCODE_FULLNAMES: &str = "opcode-fullnames";
const OPCODE_DESCRIPTIONS: &str = "opcode-descriptions";
const OPCODE_PSEUDOCODE: &str = "opcode-pseudocode";
const OPCODES: &str = "opcodes";
const COMPRESSION: &str = "compression";

/// Reads the spec resource files under one directory and assembles them into
/// an [`IsaModel`].
///
/// Individual malformed rows and tokens are skipped permissively and surface
/// through [`diagnostics`](IsaLoader::diagnostics); failure to read any
/// required resource is fatal and aborts the whole load; a partially built
/// model is never returned.
pub struct IsaLoader {
    root: PathBuf,
    diagnostics: DiagnosticSink,
}

impl IsaLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            diagnostics: DiagnosticSink::new(),
        }
    }

    /// Loads every resource and assembles the model. Stages run in dependency
    /// order: operations are parsed last, against the completed major-opcode
    /// and codec tables.
    pub fn load_model(&mut self) -> Result<IsaModel, IsaError> {
        let extension_names = parse_extension_names(&self.read_resource(EXTENSIONS)?);
        let major_opcodes =
            parse_major_opcodes(&self.read_resource(OPCODE_MAJORS)?, &mut self.diagnostics);
        let codecs = parse_codecs(&self.read_resource(CODECS)?);
        let operands = parse_operands(&self.read_resource(OPERANDS)?, &mut self.diagnostics);

        let notes = OperationNotes {
            full_names: parse_string_table(&self.read_resource(OPCODE_FULLNAMES)?),
            descriptions: parse_string_table(&self.read_resource(OPCODE_DESCRIPTIONS)?),
            pseudocode: parse_string_table(&self.read_resource(OPCODE_PSEUDOCODE)?),
        };

        let operations = parse_operations(
            &self.read_resource(OPCODES)?,
            &major_opcodes,
            &codecs,
            &notes,
            &mut self.diagnostics,
        );
        let expansions = parse_expansions(&self.read_resource(COMPRESSION)?);

        Ok(IsaModel {
            extension_names,
            major_opcodes,
            codecs,
            operands,
            expansions,
            operations,
        })
    }

    /// Everything the permissive parsers dropped during the last load.
    pub fn diagnostics(&self) -> &[SpecDiagnostic] {
        self.diagnostics.entries()
    }

    fn read_resource(&self, name: &'static str) -> Result<String, IsaError> {
        fs::read_to_string(self.root.join(name))
            .map_err(|source| IsaError::Resource { name, source })
    }
}
