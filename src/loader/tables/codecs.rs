//! Parser for the codec table.

use std::collections::BTreeMap;

use crate::isa::model::Codec;
use crate::loader::scan::strip_comment;

/// Parses the codec table: name, a syntax column the model does not need, then
/// the ordered operand names. Operand order defines assembly-syntax order.
pub fn parse_codecs(src: &str) -> BTreeMap<String, Codec> {
    let mut codecs = BTreeMap::new();
    for line in src.lines() {
        let fields: Vec<&str> = strip_comment(line).split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        let name = fields[0].to_string();
        let operands = fields[2..].iter().map(|field| field.to_string()).collect();
        codecs.insert(name.clone(), Codec { name, operands });
    }
    codecs
}
