use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("WARNING"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// Problem with a single operand or operand list.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    #[error("too many arguments for {mnemonic}: expected {expected}, got {got}")]
    TooMany { mnemonic: String, expected: usize, got: usize },
    #[error("missing operand for {mnemonic}: expected {expected}, got {got}")]
    Missing { mnemonic: String, expected: usize, got: usize },
    #[error("unknown register {0:?} (expected R0..R3)")]
    BadRegister(String),
    #[error("expected an integer, found {0:?}")]
    BadLiteral(String),
    #[error("malformed memory operand {0:?} (expected offset(base))")]
    BadMemOperand(String),
}

/// Per-line finding from the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub pc: Option<u32>,
    pub line: usize,
    pub mnemonic: Option<String>,
    pub source: String,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(pc) = self.pc {
            write!(f, " [PC {pc}]")?;
        }
        write!(f, " line {}: {}", self.line, self.message)?;
        if self.is_error() {
            match &self.mnemonic {
                Some(mn) => write!(f, " (in {mn}: '{}')", self.source)?,
                None => write!(f, " ('{}')", self.source)?,
            }
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("assembly failed with {} error(s)", count_errors(.diagnostics))]
    Failed { diagnostics: Vec<Diagnostic> },
}

impl AsmError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            AsmError::Failed { diagnostics } => diagnostics,
        }
    }
}

fn count_errors(diags: &[Diagnostic]) -> usize {
    diags.iter().filter(|d| d.is_error()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_mnemonic_and_source() {
        let d = Diagnostic {
            severity: Severity::Error,
            pc: Some(3),
            line: 7,
            mnemonic: Some("ADD".into()),
            source: "ADD R1, R2, R3".into(),
            message: "too many arguments".into(),
        };
        assert_eq!(
            d.to_string(),
            "ERROR [PC 3] line 7: too many arguments (in ADD: 'ADD R1, R2, R3')"
        );
    }
}
