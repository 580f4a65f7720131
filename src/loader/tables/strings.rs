//! Parsers for the free-form quoted-string tables: operation names,
//! descriptions, pseudocode, extension names, and the compressed-expansion
//! pairs.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::isa::standard::Extension;
use crate::loader::scan::{quoted, strip_comment};

/// Per-mnemonic prose attached to operations during assembly. These are
/// transient lookups consulted once per operation row, so they use the hashed
/// map; ordering comes from the operation list itself.
#[derive(Debug, Default)]
pub struct OperationNotes {
    pub full_names: AHashMap<String, String>,
    pub descriptions: AHashMap<String, String>,
    pub pseudocode: AHashMap<String, String>,
}

/// Parses a `mnemonic "text"` table. Lines without a quoted run are skipped.
pub fn parse_string_table(src: &str) -> AHashMap<String, String> {
    let mut table = AHashMap::new();
    for line in src.lines() {
        let Some((mnemonic, text)) = quoted(strip_comment(line)) else {
            continue;
        };
        table.insert(mnemonic.to_string(), text.trim().to_string());
    }
    table
}

/// Parses the extension-name table. Only rows for the 32-bit variants are
/// used, so each extension letter gets one shared name; the larger variants
/// repeat the same text with "in addition to RV32..." appended. The `RV32x `
/// prefix and the boilerplate "Standard Extension for " lead-in are trimmed to
/// keep the names compact.
pub fn parse_extension_names(src: &str) -> BTreeMap<Extension, String> {
    const STD_EXT_FOR: &str = "Standard Extension for ";

    let mut names = BTreeMap::new();
    for line in src.lines() {
        let line = strip_comment(line);
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            continue;
        }
        if fields[1] != "32" {
            continue;
        }
        let Some(ext) = fields[2].chars().next().and_then(Extension::from_letter) else {
            continue;
        };
        let Some((_, quoted_name)) = quoted(line) else {
            continue;
        };
        // "RV32I Base Integer Instruction Set" carries its own identifier
        // redundantly; drop the "RV32x " prefix along with the lead-in.
        let Some(name) = quoted_name.get(6..) else {
            continue;
        };
        let name = name.strip_prefix(STD_EXT_FOR).unwrap_or(name);
        names.insert(ext, name.trim().to_string());
    }
    names
}

/// Parses the compressed-instruction expansion table: pairs of the compressed
/// mnemonic and the full-length mnemonic it expands to.
pub fn parse_expansions(src: &str) -> BTreeMap<String, String> {
    let mut expansions = BTreeMap::new();
    for line in src.lines() {
        let fields: Vec<&str> = strip_comment(line).split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        expansions.insert(fields[0].to_string(), fields[1].to_string());
    }
    expansions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_table_takes_the_first_quoted_run() {
        let src = "\
# mnemonic  text
addi        \"Add Immediate\"
lui         \"Load Upper Immediate\" # trailing comment is inside no quote
bare-line-without-quotes
";
        let table = parse_string_table(src);
        assert_eq!(table["addi"], "Add Immediate");
        assert_eq!(table["lui"], "Load Upper Immediate");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn extension_names_use_the_32_bit_rows_only() {
        let src = "\
rv32i  32  i  2.1  \"RV32I Standard Extension for Base Integer Instruction Set\"
rv64i  64  i  2.1  \"RV64I Standard Extension for Base Integer Instruction Set (in addition to RV32I)\"
rv32m  32  m  2.0  \"RV32M Standard Extension for Integer Multiplication and Division\"
";
        let names = parse_extension_names(src);
        assert_eq!(names[&Extension::I], "Base Integer Instruction Set");
        assert_eq!(names[&Extension::M], "Integer Multiplication and Division");
        assert_eq!(names.len(), 2, "64-bit variant does not add a second entry");
    }

    #[test]
    fn expansion_pairs_map_compressed_to_full() {
        let src = "c.addi addi\nc.lw lw # with comment\nshort\n";
        let expansions = parse_expansions(src);
        assert_eq!(expansions["c.addi"], "addi");
        assert_eq!(expansions["c.lw"], "lw");
        assert_eq!(expansions.len(), 2);
    }
}
