//! Decode-table construction: grouping by (mask, layout) and the instruction enumeration.

pub mod enumeration;
pub mod group;

pub use enumeration::{InstructionEnumeration, InstructionId};
pub use group::{DecodeTable, GroupEntry, Grouper, MaskGroup};
