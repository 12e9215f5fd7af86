use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diag::{AsmError, Diagnostic, Severity};
use crate::emit::Artifacts;
use crate::encoder::{self, EncodedInstruction};
use crate::normalize::{normalize, source_lines};
use crate::resolver::{self, LabelTable};

/// What to do with a memory offset that does not fit its 2-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetOverflow {
    /// Warn and keep the low two bits.
    #[default]
    Wrap,
    /// Treat as an error.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub offset_overflow: OffsetOverflow,
    /// Severity of an unrecognized mnemonic. The line is skipped either way.
    pub unknown_mnemonic: Severity,
    pub warnings_as_errors: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            offset_overflow: OffsetOverflow::Wrap,
            unknown_mnemonic: Severity::Warning,
            warnings_as_errors: false,
        }
    }
}

/// Result of a successful run. Diagnostics here are warnings only.
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    pub labels: LabelTable,
    pub instructions: Vec<EncodedInstruction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn artifacts(&self) -> Artifacts {
        Artifacts::new(&self.instructions, &self.labels)
    }
}

/// Run both passes over `source`.
///
/// Every line is encoded and every diagnostic collected before deciding the
/// outcome: any error-level diagnostic fails the whole run, so callers never
/// see partial output.
pub fn assemble(source: &str, cfg: &AsmConfig) -> Result<Assembly, AsmError> {
    let resolved = resolver::resolve(source_lines(source).filter_map(|l| normalize(&l)));
    let encoded = encoder::encode(&resolved.lines, &resolved.labels, cfg);

    if encoded.diagnostics.iter().any(Diagnostic::is_error) {
        debug!(diagnostics = encoded.diagnostics.len(), "assembly failed");
        return Err(AsmError::Failed { diagnostics: encoded.diagnostics });
    }
    Ok(Assembly {
        labels: resolved.labels,
        instructions: encoded.instructions,
        diagnostics: encoded.diagnostics,
    })
}
