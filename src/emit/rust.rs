//! Rust rendering: raw identifiers for keywords and a `#[repr]` instruction enum.

use crate::table::{DecodeTable, InstructionEnumeration};

use super::writer::SourceWriter;
use super::{IdentifierMap, TargetLanguage, is_plain_identifier};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW: &[&str] = &["crate", "self", "Self", "super", "_"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Rust;

impl TargetLanguage for Rust {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn comment_prefix(&self) -> &'static str {
        "//"
    }

    fn escape_identifier(&self, name: &str) -> String {
        let mut ident: String = name
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' })
            .collect();
        if !is_plain_identifier(&ident) {
            ident.insert(0, '_');
        }
        if NON_RAW.contains(&ident.as_str()) {
            ident.push('_');
        } else if KEYWORDS.contains(&ident.as_str()) {
            ident.insert_str(0, "r#");
        }
        ident
    }

    fn write_table(&self, out: &mut SourceWriter, table: &DecodeTable, idents: &IdentifierMap<'_>) {
        out.line("pub const ENCODINGS: &[DecodingTable] = &[");
        out.indent(|out| {
            for group in table.groups() {
                out.line("DecodingTable {");
                out.indent(|out| {
                    out.line(format!("mask: 0x{:08x},", group.mask));
                    out.line(format!("layout: Layout::{},", group.layout));
                    out.line("table: &[");
                    out.indent(|out| {
                        for entry in group.entries() {
                            out.line(format!(
                                "InstructionEncoding {{ match_value: 0x{:08x}, instruction: Instruction::{} }},",
                                entry.match_value,
                                idents.resolve(&entry.name)
                            ));
                        }
                    });
                    out.line("],");
                });
                out.line("},");
            }
        });
        out.line("];");
    }

    fn write_enumeration(
        &self,
        out: &mut SourceWriter,
        enumeration: &InstructionEnumeration,
        idents: &IdentifierMap<'_>,
    ) {
        let repr = if enumeration.len() <= usize::from(u16::MAX) {
            "u16"
        } else {
            "u32"
        };
        out.line("#[allow(non_camel_case_types)]");
        out.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        out.line(format!("#[repr({repr})]"));
        out.line("pub enum Instruction {");
        out.indent(|out| {
            for (id, name) in enumeration.iter() {
                out.line(format!("{} = {},", idents.resolve(name), id.get()));
            }
        });
        out.line("}");
    }
}
