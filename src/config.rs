//! Policy knobs for the table compiler. Defaults reproduce the strict behaviour: reject
//! ambiguous tables, reject stray match bits, keep unclassifiable instructions, emit Zig.

use clap::ValueEnum;

/// Output language of the generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetKind {
    #[default]
    Zig,
    Rust,
}

/// What to do when two instructions claim the same (mask, match) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// Fail the run with an ambiguity error.
    #[default]
    Reject,
    /// Keep the instruction that appears first in the document and drop the rest from the table.
    FirstWins,
}

/// What to do with `match` bits that lie outside `mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrayBitsPolicy {
    #[default]
    Reject,
    /// Clear the stray bits and continue with a warning.
    Mask,
}

/// What to do with instructions whose field set has no canonical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UnknownLayoutPolicy {
    /// Carry the instruction forward tagged `Unknown`.
    #[default]
    Keep,
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilerConfig {
    pub target: TargetKind,
    pub duplicates: DuplicatePolicy,
    pub stray_bits: StrayBitsPolicy,
    pub unknown_layout: UnknownLayoutPolicy,
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_stray_bits(mut self, policy: StrayBitsPolicy) -> Self {
        self.stray_bits = policy;
        self
    }

    pub fn with_unknown_layout(mut self, policy: UnknownLayoutPolicy) -> Self {
        self.unknown_layout = policy;
        self
    }
}
