//! Maps operand-field sets onto the canonical encoding layouts.

use std::fmt;

use crate::config::UnknownLayoutPolicy;
use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink, TableDiagnostic};
use crate::isa::spec::{FieldSet, InstructionSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layout {
    R,
    I,
    S,
    B,
    U,
    J,
    Unknown,
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::R => "R",
            Layout::I => "I",
            Layout::S => "S",
            Layout::B => "B",
            Layout::U => "U",
            Layout::J => "J",
            Layout::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Layout::Unknown
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const LAYOUT_TABLE: &[(FieldSet, Layout)] = &[
    (FieldSet::RD.union(FieldSet::IMM20), Layout::U),
    (FieldSet::RD.union(FieldSet::JIMM20), Layout::J),
    (
        FieldSet::BIMM12HI
            .union(FieldSet::RS1)
            .union(FieldSet::RS2)
            .union(FieldSet::BIMM12LO),
        Layout::B,
    ),
    (
        FieldSet::IMM12HI
            .union(FieldSet::RS1)
            .union(FieldSet::RS2)
            .union(FieldSet::IMM12LO),
        Layout::S,
    ),
    (FieldSet::IMM.union(FieldSet::RS1).union(FieldSet::RS2), Layout::S),
    (FieldSet::RD.union(FieldSet::RS1).union(FieldSet::RS2), Layout::R),
    (FieldSet::RD.union(FieldSet::RS1).union(FieldSet::IMM12), Layout::I),
    (FieldSet::RD.union(FieldSet::RS1).union(FieldSet::IMM), Layout::I),
];

/// Looks a field set up in the static layout table. Pure: equal sets always agree.
pub fn layout_for(fields: FieldSet) -> Layout {
    if !fields.is_canonical() {
        return Layout::Unknown;
    }
    LAYOUT_TABLE
        .iter()
        .find(|(key, _)| *key == fields)
        .map(|(_, layout)| *layout)
        .unwrap_or(Layout::Unknown)
}

pub struct LayoutClassifier {
    unknown_policy: UnknownLayoutPolicy,
}

impl LayoutClassifier {
    pub fn new(unknown_policy: UnknownLayoutPolicy) -> Self {
        Self { unknown_policy }
    }

    /// Classifies `spec`, recording a diagnostic when its field set has no canonical layout.
    pub fn classify(&self, spec: &InstructionSpec, sink: &mut DiagnosticSink) -> Layout {
        let layout = layout_for(spec.field_set());
        if layout.is_known() {
            return layout;
        }
        let message = format!(
            "instruction '{}' has no canonical layout for fields {}",
            spec.name,
            spec.fields_display()
        );
        let diagnostic = match self.unknown_policy {
            UnknownLayoutPolicy::Keep => TableDiagnostic::warning(
                DiagnosticPhase::Classification,
                "classify.unknown-layout",
                message,
            ),
            UnknownLayoutPolicy::Reject => TableDiagnostic::error(
                DiagnosticPhase::Classification,
                "classify.unknown-layout",
                message,
            ),
        };
        sink.push(diagnostic.for_instruction(spec.name.clone()));
        layout
    }
}

impl Default for LayoutClassifier {
    fn default() -> Self {
        Self::new(UnknownLayoutPolicy::Keep)
    }
}
