//! Drops instructions the runtime decoder deliberately does not model.

use crate::isa::spec::InstructionSpec;

/// System and side-effecting mnemonics, spelled with `_` separators.
const SYSTEM_MNEMONICS: &[&str] = &[
    "ecall",
    "ebreak",
    "wfi",
    "mret",
    "sret",
    "dret",
    "sfence_vma",
    "fence",
    "fence_i",
    "fence_tso",
    "pause",
    "csrrw",
    "csrrs",
    "csrrc",
    "csrrwi",
    "csrrsi",
    "csrrci",
];

/// Pure accept/reject predicate over instruction names.
#[derive(Debug, Clone, Copy)]
pub struct MnemonicFilter {
    excluded: &'static [&'static str],
}

impl Default for MnemonicFilter {
    fn default() -> Self {
        Self::system()
    }
}

impl MnemonicFilter {
    /// Filter that rejects the environment, fence, and CSR families.
    pub fn system() -> Self {
        Self {
            excluded: SYSTEM_MNEMONICS,
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        !self.excludes(name)
    }

    pub fn excludes(&self, name: &str) -> bool {
        self.excluded
            .iter()
            .any(|candidate| same_mnemonic(candidate, name))
    }

    pub fn accepts_spec(&self, spec: &InstructionSpec) -> bool {
        self.accepts(&spec.name)
    }
}

/// Compares mnemonics treating `.` and `_` as the same separator.
fn same_mnemonic(canonical: &str, name: &str) -> bool {
    canonical.len() == name.len()
        && canonical
            .bytes()
            .zip(name.bytes())
            .all(|(a, b)| a == b || (a == b'_' && b == b'.'))
}
