//! Public entry point: drives load → filter → validate → classify → group → emit.

use std::io::Read;

use crate::config::CompilerConfig;
use crate::emit::{Emitter, Provenance};
use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink, TableDiagnostic};
use crate::isa::error::TableError;
use crate::isa::filter::MnemonicFilter;
use crate::isa::layout::{Layout, LayoutClassifier};
use crate::isa::spec::InstructionSet;
use crate::isa::validator::{Validator, fail_on_errors};
use crate::loader::opcodes::InstructionLoader;
use crate::table::{DecodeTable, Grouper, InstructionEnumeration};

/// Everything one run produces. Immutable once returned.
#[derive(Debug, Clone)]
pub struct CompiledTables {
    pub table: DecodeTable,
    pub enumeration: InstructionEnumeration,
    /// Layout of every surviving instruction, in document order.
    pub layouts: Vec<(String, Layout)>,
    /// Non-fatal diagnostics recorded along the way.
    pub diagnostics: Vec<TableDiagnostic>,
    pub source: String,
}

impl CompiledTables {
    pub fn layout_of(&self, name: &str) -> Option<Layout> {
        self.layouts
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, layout)| *layout)
    }
}

pub struct TableCompiler {
    config: CompilerConfig,
    filter: MnemonicFilter,
}

impl TableCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            filter: MnemonicFilter::system(),
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile_reader<R: Read>(&self, mut reader: R) -> Result<CompiledTables, TableError> {
        let mut src = String::new();
        reader.read_to_string(&mut src)?;
        self.compile_str(&src)
    }

    pub fn compile_str(&self, src: &str) -> Result<CompiledTables, TableError> {
        let set = InstructionLoader::new().load_str(src)?;
        self.compile_set(set, Some(Provenance::of_input(src.as_bytes())))
    }

    /// Runs every stage after loading. Nothing is rendered unless all stages succeed.
    pub fn compile_set(
        &self,
        mut set: InstructionSet,
        provenance: Option<Provenance>,
    ) -> Result<CompiledTables, TableError> {
        let mut sink = DiagnosticSink::new();

        let loaded = set.len();
        set.retain(|spec| self.filter.accepts_spec(spec));
        tracing::debug!(
            excluded = loaded - set.len(),
            remaining = set.len(),
            "filtered system instructions"
        );

        Validator::new(self.config.stray_bits).validate(&mut set, &mut sink)?;

        let classifier = LayoutClassifier::new(self.config.unknown_layout);
        let layouts: Vec<Layout> = set
            .iter()
            .map(|spec| classifier.classify(spec, &mut sink))
            .collect();
        fail_on_errors(DiagnosticPhase::Classification, &mut sink)?;

        let table = Grouper::new(self.config.duplicates)
            .group(set.iter().zip(layouts.iter().copied()), &mut sink)?;
        let enumeration = InstructionEnumeration::from_names(set.iter().map(|spec| &spec.name));

        let source = Emitter::for_kind(self.config.target).emit(
            &table,
            &enumeration,
            provenance.as_ref(),
        )?;

        tracing::info!(
            groups = table.len(),
            instructions = enumeration.len(),
            warnings = sink.len(),
            "decode table compiled"
        );

        let layouts = set
            .iter()
            .zip(layouts)
            .map(|(spec, layout)| (spec.name.clone(), layout))
            .collect();
        Ok(CompiledTables {
            table,
            enumeration,
            layouts,
            diagnostics: sink.into_vec(),
            source,
        })
    }
}

impl Default for TableCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}
