//! Instruction-encoding table compiler.
//!
//! Reads a riscv-opcodes style description of an instruction set and produces a decode table
//! grouped by (mask, layout) and sorted by match value, plus an enumeration of every decodable
//! instruction, rendered as source text for a runtime decoder.

pub mod compiler;
pub mod config;
pub mod emit;
pub mod isa;
pub mod loader;
pub mod table;

pub use compiler::{CompiledTables, TableCompiler};
pub use config::{CompilerConfig, DuplicatePolicy, StrayBitsPolicy, TargetKind, UnknownLayoutPolicy};
pub use isa::{Layout, TableError};
