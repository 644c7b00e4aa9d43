//! Loads a riscv-opcodes style `instr_dict.json` document into an [`InstructionSet`].
//!
//! The document is an object keyed by instruction name:
//!
//! ```json
//! { "add": { "mask": "0xfe00707f", "match": "0x33", "variable_fields": ["rd", "rs1", "rs2"] } }
//! ```
//!
//! Entries keep document order; repeated names are a parse error rather than a silent overwrite.

use std::fmt;
use std::io::Read;

use ahash::AHashSet;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};

use crate::isa::error::TableError;
use crate::isa::spec::{InstructionSet, InstructionSpec};

use super::literal::parse_word;

#[derive(Default)]
pub struct InstructionLoader;

impl InstructionLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_str(&self, src: &str) -> Result<InstructionSet, TableError> {
        let document: RawDocument = serde_json::from_str(src)?;
        let set: InstructionSet = document
            .entries
            .into_iter()
            .map(|(name, raw)| {
                let mut spec =
                    InstructionSpec::new(name, raw.mask.0, raw.match_value.0, raw.variable_fields)
                        .with_extensions(raw.extension);
                spec.encoding = raw.encoding;
                spec
            })
            .collect();
        tracing::debug!(instructions = set.len(), "loaded instruction description");
        Ok(set)
    }

    /// Reads the whole of `reader` and loads it; the document is never parsed incrementally.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<InstructionSet, TableError> {
        let mut src = String::new();
        reader.read_to_string(&mut src)?;
        self.load_str(&src)
    }
}

struct RawDocument {
    entries: Vec<(String, RawInstruction)>,
}

#[derive(Deserialize)]
struct RawInstruction {
    mask: Word,
    #[serde(rename = "match")]
    match_value: Word,
    variable_fields: Vec<String>,
    #[serde(default)]
    extension: Vec<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// A 32-bit value written either as a JSON integer or as a prefixed literal string.
struct Word(u32);

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping instruction names to encodings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut seen = AHashSet::new();
        while let Some(name) = map.next_key::<String>()? {
            if name.is_empty() {
                return Err(de::Error::custom("instruction name must not be empty"));
            }
            if !seen.insert(name.clone()) {
                return Err(de::Error::custom(format!("duplicate instruction '{name}'")));
            }
            let raw: RawInstruction = map.next_value()?;
            entries.push((name, raw));
        }
        Ok(RawDocument { entries })
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WordVisitor)
    }
}

struct WordVisitor;

impl<'de> Visitor<'de> for WordVisitor {
    type Value = Word;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 32-bit integer or a numeric literal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(Word)
            .map_err(|_| E::custom(format!("value {value:#x} does not fit in 32 bits")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(Word)
            .map_err(|_| E::custom(format!("value {value} is not a 32-bit unsigned word")))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        parse_word(value)
            .map(Word)
            .map_err(|err| E::custom(format!("invalid literal \"{value}\": {err}")))
    }
}
