//! Structured records for spec rows and tokens that parsing dropped.
//!
//! Hand-maintained spec files legitimately contain comment-only, reserved, and
//! placeholder rows, so the parsers never abort on them. Anything that *looked*
//! like data but failed to parse is recorded here instead of vanishing, which
//! lets a maintainer distinguish a decorative row from a typo.

use std::fmt;

/// Which spec table a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticPhase {
    Extensions,
    MajorOpcodes,
    Codecs,
    Operands,
    Operations,
    Strings,
    Expansions,
}

/// Severity of a spec diagnostic. Nothing in the permissive parsing path is
/// fatal; errors mark rows that were skipped in a way the spec author almost
/// certainly did not intend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A single dropped-token or skipped-row record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDiagnostic {
    pub phase: DiagnosticPhase,
    pub level: DiagnosticLevel,
    pub code: &'static str,
    pub message: String,
    /// 1-indexed line within the table resource, when known.
    pub line: Option<usize>,
}

impl SpecDiagnostic {
    pub fn format_human(&self) -> String {
        let location = self
            .line
            .map(|line| format!("line {line}"))
            .unwrap_or_else(|| "<unknown line>".to_string());
        format!(
            "{level:?} {code}: {message} @ {phase:?} {location}",
            level = self.level,
            code = self.code,
            message = self.message,
            phase = self.phase,
        )
    }
}

impl fmt::Display for SpecDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_human())
    }
}

/// Accumulates diagnostics across all parsing stages of one load.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: Vec<SpecDiagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(
        &mut self,
        phase: DiagnosticPhase,
        code: &'static str,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.entries.push(SpecDiagnostic {
            phase,
            level: DiagnosticLevel::Warning,
            code,
            message: message.into(),
            line,
        });
    }

    pub fn error(
        &mut self,
        phase: DiagnosticPhase,
        code: &'static str,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.entries.push(SpecDiagnostic {
            phase,
            level: DiagnosticLevel::Error,
            code,
            message: message.into(),
            line,
        });
    }

    pub fn entries(&self) -> &[SpecDiagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
