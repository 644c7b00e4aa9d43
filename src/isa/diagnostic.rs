/// Stage of the table pipeline that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticPhase {
    Loader,
    Validation,
    Classification,
    Grouping,
    Emission,
}

/// Severity of a table diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A precise source position (1-indexed line/column) inside the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Structured diagnostic suitable for tooling integration.
#[derive(Debug, Clone)]
pub struct TableDiagnostic {
    pub phase: DiagnosticPhase,
    pub level: DiagnosticLevel,
    pub code: &'static str,
    pub message: String,
    /// Instruction the diagnostic is about, when it concerns a single entry.
    pub instruction: Option<String>,
    pub position: Option<SourcePosition>,
}

impl TableDiagnostic {
    pub fn new(
        phase: DiagnosticPhase,
        level: DiagnosticLevel,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            level,
            code,
            message: message.into(),
            instruction: None,
            position: None,
        }
    }

    pub fn error(phase: DiagnosticPhase, code: &'static str, message: impl Into<String>) -> Self {
        Self::new(phase, DiagnosticLevel::Error, code, message)
    }

    pub fn warning(phase: DiagnosticPhase, code: &'static str, message: impl Into<String>) -> Self {
        Self::new(phase, DiagnosticLevel::Warning, code, message)
    }

    pub fn for_instruction(mut self, name: impl Into<String>) -> Self {
        self.instruction = Some(name.into());
        self
    }

    pub fn at(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    /// Sends the diagnostic to the logging layer. Errors travel on in the returned
    /// [`TableError`](super::error::TableError), so they are only traced at debug level.
    pub(crate) fn log(&self) {
        match self.level {
            DiagnosticLevel::Error => tracing::debug!(
                phase = ?self.phase,
                code = self.code,
                instruction = self.instruction.as_deref(),
                "{}",
                self.message
            ),
            DiagnosticLevel::Warning => tracing::warn!(
                phase = ?self.phase,
                code = self.code,
                instruction = self.instruction.as_deref(),
                "{}",
                self.message
            ),
        }
    }

    pub fn format_human(&self) -> String {
        let location = self
            .position
            .map(|pos| format!("<input>:{}:{}", pos.line, pos.column))
            .or_else(|| self.instruction.as_ref().map(|name| format!("instruction '{name}'")))
            .unwrap_or_else(|| "<unknown>".to_string());
        format!(
            "{level:?} {code}: {message} @ {location}",
            level = self.level,
            code = self.code,
            message = self.message,
            location = location
        )
    }
}

/// Ordered sink that stages append to while the pipeline runs.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    entries: Vec<TableDiagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: TableDiagnostic) {
        diagnostic.log();
        self.entries.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(TableDiagnostic::is_error)
    }

    /// Removes and returns the error-level diagnostics, leaving warnings in place.
    pub fn take_errors(&mut self) -> Vec<TableDiagnostic> {
        let (errors, warnings) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(TableDiagnostic::is_error);
        self.entries = warnings;
        errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableDiagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<TableDiagnostic> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_format_prefers_source_position() {
        let diag = TableDiagnostic::error(DiagnosticPhase::Loader, "loader.syntax", "bad token")
            .for_instruction("add")
            .at(SourcePosition::new(3, 7));
        assert_eq!(
            diag.format_human(),
            "Error loader.syntax: bad token @ <input>:3:7"
        );
    }

    #[test]
    fn take_errors_keeps_warnings() {
        let mut sink = DiagnosticSink::new();
        sink.push(TableDiagnostic::warning(
            DiagnosticPhase::Classification,
            "classify.unknown-layout",
            "no layout",
        ));
        sink.push(TableDiagnostic::error(
            DiagnosticPhase::Validation,
            "validation.stray-match-bits",
            "stray",
        ));
        assert!(sink.has_errors());
        let errors = sink.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "validation.stray-match-bits");
        assert!(!sink.has_errors());
        assert_eq!(sink.len(), 1);
    }
}
