//! Renders the decode table and instruction enumeration as target-language source text.
//!
//! Each output language is a [`TargetLanguage`] strategy: it owns both the identifier escaping
//! rules and the shape of the declarations, so the rest of the pipeline never branches on a
//! keyword list.

mod rust;
mod writer;
mod zig;

pub use rust::Rust;
pub use writer::SourceWriter;
pub use zig::Zig;

use std::borrow::Cow;
use std::fmt::Write as _;

use ahash::AHashMap;
use sha2::{Digest, Sha256};

use crate::config::TargetKind;
use crate::isa::error::TableError;
use crate::table::{DecodeTable, InstructionEnumeration};

pub trait TargetLanguage {
    fn name(&self) -> &'static str;

    fn comment_prefix(&self) -> &'static str;

    /// Maps an instruction name onto a legal identifier, escaping reserved words and characters
    /// outside the identifier grammar. Must be deterministic.
    fn escape_identifier(&self, name: &str) -> String;

    fn write_table(&self, out: &mut SourceWriter, table: &DecodeTable, idents: &IdentifierMap<'_>);

    fn write_enumeration(
        &self,
        out: &mut SourceWriter,
        enumeration: &InstructionEnumeration,
        idents: &IdentifierMap<'_>,
    );
}

impl TargetKind {
    pub fn language(self) -> &'static dyn TargetLanguage {
        match self {
            TargetKind::Zig => &Zig,
            TargetKind::Rust => &Rust,
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Escaped identifiers for every enumerated instruction, checked for collisions up front.
pub struct IdentifierMap<'t> {
    target: &'t dyn TargetLanguage,
    escaped: AHashMap<String, String>,
}

impl<'t> IdentifierMap<'t> {
    pub fn build(
        target: &'t dyn TargetLanguage,
        enumeration: &InstructionEnumeration,
    ) -> Result<Self, TableError> {
        let mut escaped = AHashMap::with_capacity(enumeration.len());
        let mut owners: AHashMap<String, &str> = AHashMap::with_capacity(enumeration.len());
        // Sorted iteration keeps the reported collision stable.
        for (_, name) in enumeration.iter() {
            let ident = target.escape_identifier(name);
            if let Some(previous) = owners.insert(ident.clone(), name) {
                return Err(TableError::IdentifierCollision {
                    identifier: ident,
                    names: vec![previous.to_string(), name.to_string()],
                });
            }
            escaped.insert(name.to_string(), ident);
        }
        Ok(Self { target, escaped })
    }

    pub fn resolve(&self, name: &str) -> Cow<'_, str> {
        match self.escaped.get(name) {
            Some(ident) => Cow::Borrowed(ident.as_str()),
            None => Cow::Owned(self.target.escape_identifier(name)),
        }
    }
}

/// Where the generated text came from; recorded in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provenance {
    pub input_sha256: [u8; 32],
}

impl Provenance {
    pub fn of_input(input: &[u8]) -> Self {
        let digest = Sha256::digest(input);
        let mut input_sha256 = [0u8; 32];
        input_sha256.copy_from_slice(&digest);
        Self { input_sha256 }
    }

    pub fn digest_hex(&self) -> String {
        self.input_sha256
            .iter()
            .fold(String::with_capacity(64), |mut acc, byte| {
                let _ = write!(acc, "{byte:02x}");
                acc
            })
    }
}

pub struct Emitter<'t> {
    target: &'t dyn TargetLanguage,
}

impl Emitter<'static> {
    pub fn for_kind(kind: TargetKind) -> Self {
        Emitter::new(kind.language())
    }
}

impl<'t> Emitter<'t> {
    pub fn new(target: &'t dyn TargetLanguage) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'t dyn TargetLanguage {
        self.target
    }

    pub fn emit(
        &self,
        table: &DecodeTable,
        enumeration: &InstructionEnumeration,
        provenance: Option<&Provenance>,
    ) -> Result<String, TableError> {
        let idents = IdentifierMap::build(self.target, enumeration)?;
        let comment = self.target.comment_prefix();
        let mut out = SourceWriter::new();
        out.line(format!("{comment} Generated by decodegen. Do not edit."));
        if let Some(provenance) = provenance {
            out.line(format!("{comment} input sha256: {}", provenance.digest_hex()));
        }
        out.blank();
        self.target.write_table(&mut out, table, &idents);
        out.blank();
        self.target.write_enumeration(&mut out, enumeration, &idents);
        tracing::debug!(
            target_language = self.target.name(),
            groups = table.len(),
            instructions = enumeration.len(),
            "rendered decode table"
        );
        Ok(out.finish())
    }
}
