//! Input document loading.

pub mod opcodes;
