//! riscv-opcodes JSON loading helpers (literal parsing, document visitor).

pub mod literal;
pub mod loader;

pub use literal::{LiteralError, parse_word};
pub use loader::InstructionLoader;
