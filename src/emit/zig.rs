//! Zig rendering: `@"..."` escaping and the `DecodingTable` / `Instruction` declarations the
//! Zig simulator consumes.

use crate::table::{DecodeTable, InstructionEnumeration};

use super::writer::SourceWriter;
use super::{IdentifierMap, TargetLanguage, is_plain_identifier};

const KEYWORDS: &[&str] = &[
    "addrspace", "align", "allowzero", "and", "anyframe", "anytype", "asm", "async", "await",
    "break", "callconv", "catch", "comptime", "const", "continue", "defer", "else", "enum",
    "errdefer", "error", "export", "extern", "fn", "for", "if", "inline", "linksection",
    "noalias", "noinline", "nosuspend", "opaque", "or", "orelse", "packed", "pub", "resume",
    "return", "struct", "suspend", "switch", "test", "threadlocal", "try", "union",
    "unreachable", "usingnamespace", "var", "volatile", "while",
];

const PRIMITIVES: &[&str] = &[
    "anyerror", "anyopaque", "bool", "comptime_float", "comptime_int", "false", "isize",
    "noreturn", "null", "true", "type", "undefined", "usize", "void", "_",
];

const C_TYPES: &[&str] = &[
    "c_char", "c_short", "c_ushort", "c_int", "c_uint", "c_long", "c_ulong", "c_longlong",
    "c_ulonglong", "c_longdouble",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Zig;

impl Zig {
    fn is_reserved(name: &str) -> bool {
        KEYWORDS.contains(&name)
            || PRIMITIVES.contains(&name)
            || C_TYPES.contains(&name)
            || is_sized_primitive(name)
    }
}

/// `i7`, `u32`, `f64` style names are primitive types in Zig.
fn is_sized_primitive(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some('i' | 'u' | 'f') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit())
        }
        _ => false,
    }
}

impl TargetLanguage for Zig {
    fn name(&self) -> &'static str {
        "zig"
    }

    fn comment_prefix(&self) -> &'static str {
        "//"
    }

    fn escape_identifier(&self, name: &str) -> String {
        if is_plain_identifier(name) && !Self::is_reserved(name) {
            name.to_string()
        } else {
            let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
            format!("@\"{escaped}\"")
        }
    }

    fn write_table(&self, out: &mut SourceWriter, table: &DecodeTable, idents: &IdentifierMap<'_>) {
        out.line("const encodings: []const DecodingTable([]const InstructionEncoding) = &.{");
        out.indent(|out| {
            for group in table.groups() {
                out.line(".{");
                out.indent(|out| {
                    out.line(format!(".mask = 0x{:08x},", group.mask));
                    out.line(format!(".layout = .{},", group.layout));
                    out.line(".table = &.{");
                    out.indent(|out| {
                        for entry in group.entries() {
                            out.line(format!(
                                ".{{ .match = 0x{:08x}, .instruction = .{} }},",
                                entry.match_value,
                                idents.resolve(&entry.name)
                            ));
                        }
                    });
                    out.line("},");
                });
                out.line("},");
            }
        });
        out.line("};");
    }

    fn write_enumeration(
        &self,
        out: &mut SourceWriter,
        enumeration: &InstructionEnumeration,
        idents: &IdentifierMap<'_>,
    ) {
        out.line("const Instruction = enum {");
        out.indent(|out| {
            for (_, name) in enumeration.iter() {
                out.line(format!("{},", idents.resolve(name)));
            }
        });
        out.line("};");
    }
}
