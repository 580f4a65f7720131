//! Identifier casing for target-language naming.
//!
//! Spec names use mnemonic punctuation (`c.addi`, `OP-IMM`, `fmadd.s`) that no
//! target language accepts verbatim. These two routines produce the snake_case
//! and TitleCase forms generated code uses; a leading digit is guarded with an
//! underscore so the result is always a legal identifier.

/// Lowercases letters, keeps digits, and turns everything else into `_`.
pub fn snake_ident(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    for (index, ch) in input.chars().enumerate() {
        if ch.is_ascii_digit() {
            if index == 0 {
                out.push('_');
            }
            out.push(ch);
        } else if ch.is_alphabetic() {
            out.extend(ch.to_lowercase());
        } else {
            out.push('_');
        }
    }
    out
}

/// Uppercases the first letter of each run of letters and drops the
/// separators between runs.
pub fn title_ident(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    let mut next_upper = true;
    for (index, ch) in input.chars().enumerate() {
        if ch.is_ascii_digit() {
            if index == 0 {
                out.push('_');
            }
            out.push(ch);
            next_upper = true;
        } else if ch.is_alphabetic() {
            if next_upper {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            next_upper = false;
        } else {
            next_upper = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_replaces_punctuation() {
        assert_eq!(snake_ident("c.addi"), "c_addi");
        assert_eq!(snake_ident("OP-IMM"), "op_imm");
        assert_eq!(snake_ident("fmadd.s"), "fmadd_s");
        assert_eq!(snake_ident("addi"), "addi");
    }

    #[test]
    fn snake_guards_leading_digits() {
        assert_eq!(snake_ident("4byte"), "_4byte");
        assert_eq!(snake_ident("x4"), "x4");
    }

    #[test]
    fn title_cases_word_boundaries() {
        assert_eq!(title_ident("c.addi"), "CAddi");
        assert_eq!(title_ident("OP-IMM"), "OpImm");
        assert_eq!(title_ident("fcvt.w.s"), "FcvtWS");
        assert_eq!(title_ident("lui"), "Lui");
    }

    #[test]
    fn title_guards_leading_digits() {
        assert_eq!(title_ident("4byte"), "_4Byte");
    }
}
