use std::fmt;

use crate::isa::diagnostic::{DiagnosticPhase, SourcePosition, TableDiagnostic};

/// A (mask, match) slot claimed by more than one instruction, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConflict {
    pub mask: u32,
    pub match_value: u32,
    pub instructions: Vec<String>,
}

impl fmt::Display for MatchConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mask 0x{:08x} match 0x{:08x} is claimed by {}",
            self.mask,
            self.match_value,
            self.instructions.join(", ")
        )
    }
}

/// Represents any failure that can occur while loading, validating, grouping, or emitting a
/// decode table.
#[derive(Debug)]
pub enum TableError {
    Io(std::io::Error),
    Parse {
        message: String,
        position: Option<SourcePosition>,
    },
    /// Instructions share a mask and match value and cannot be told apart.
    Ambiguity { conflicts: Vec<MatchConflict> },
    /// Distinct instruction names escaped to the same identifier in the emission target.
    IdentifierCollision {
        identifier: String,
        names: Vec<String>,
    },
    Diagnostics {
        phase: DiagnosticPhase,
        diagnostics: Vec<TableDiagnostic>,
    },
}

impl TableError {
    pub fn parse(message: impl Into<String>) -> Self {
        TableError::Parse {
            message: message.into(),
            position: None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::Io(err)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        let position = (err.line() > 0).then(|| SourcePosition::new(err.line(), err.column()));
        TableError::Parse {
            message: err.to_string(),
            position,
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(err) => write!(f, "I/O error: {err}"),
            TableError::Parse { message, .. } => write!(f, "parse error: {message}"),
            TableError::Ambiguity { conflicts } => {
                writeln!(f, "ambiguous decode table, {} conflict(s):", conflicts.len())?;
                for conflict in conflicts {
                    writeln!(f, "  - {conflict}")?;
                }
                Ok(())
            }
            TableError::IdentifierCollision { identifier, names } => write!(
                f,
                "identifier '{identifier}' is produced by multiple instructions: {}",
                names.join(", ")
            ),
            TableError::Diagnostics { phase, diagnostics } => {
                writeln!(f, "{phase:?} produced {} issue(s):", diagnostics.len())?;
                for diag in diagnostics {
                    writeln!(f, "  - {}", diag.format_human())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(err) => Some(err),
            _ => None,
        }
    }
}
