//! Structural validation of loaded instructions before they are classified and grouped.

use crate::config::StrayBitsPolicy;

use super::diagnostic::{DiagnosticPhase, DiagnosticSink, TableDiagnostic};
use super::error::TableError;
use super::spec::{InstructionSet, InstructionSpec};

/// Widths of `encoding` patterns: full instructions and compressed (`c_*`) ones.
const ENCODING_WIDTHS: [usize; 2] = [32, 16];

pub struct Validator {
    stray_bits: StrayBitsPolicy,
}

impl Validator {
    pub fn new(stray_bits: StrayBitsPolicy) -> Self {
        Self { stray_bits }
    }

    /// Checks every instruction, coercing stray match bits when the policy allows it.
    ///
    /// All error diagnostics for the document are collected before failing.
    pub fn validate(
        &self,
        set: &mut InstructionSet,
        sink: &mut DiagnosticSink,
    ) -> Result<(), TableError> {
        for spec in set.iter_mut() {
            self.validate_match_bits(spec, sink);
            if let Some(encoding) = spec.encoding.as_deref() {
                validate_encoding(spec, encoding, sink);
            }
        }
        fail_on_errors(DiagnosticPhase::Validation, sink)
    }

    fn validate_match_bits(&self, spec: &mut InstructionSpec, sink: &mut DiagnosticSink) {
        let stray = spec.stray_match_bits();
        if stray == 0 {
            return;
        }
        match self.stray_bits {
            StrayBitsPolicy::Reject => sink.push(
                TableDiagnostic::error(
                    DiagnosticPhase::Validation,
                    "validation.stray-match-bits",
                    format!(
                        "match 0x{:08x} of '{}' sets bits 0x{stray:08x} outside mask 0x{:08x}",
                        spec.match_value, spec.name, spec.mask
                    ),
                )
                .for_instruction(spec.name.clone()),
            ),
            StrayBitsPolicy::Mask => {
                let coerced = spec.match_value & spec.mask;
                sink.push(
                    TableDiagnostic::warning(
                        DiagnosticPhase::Validation,
                        "validation.stray-match-bits",
                        format!(
                            "match 0x{:08x} of '{}' masked to 0x{coerced:08x}",
                            spec.match_value, spec.name
                        ),
                    )
                    .for_instruction(spec.name.clone()),
                );
                spec.match_value = coerced;
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(StrayBitsPolicy::Reject)
    }
}

/// Turns any error-level diagnostics in `sink` into a single fatal error for `phase`.
pub(crate) fn fail_on_errors(
    phase: DiagnosticPhase,
    sink: &mut DiagnosticSink,
) -> Result<(), TableError> {
    if !sink.has_errors() {
        return Ok(());
    }
    Err(TableError::Diagnostics {
        phase,
        diagnostics: sink.take_errors(),
    })
}

fn validate_encoding(spec: &InstructionSpec, encoding: &str, sink: &mut DiagnosticSink) {
    match parse_encoding_pattern(encoding) {
        Ok((mask, match_value)) => {
            if mask != spec.mask || match_value != spec.match_value {
                sink.push(
                    TableDiagnostic::error(
                        DiagnosticPhase::Validation,
                        "validation.encoding-mismatch",
                        format!(
                            "encoding of '{}' implies mask 0x{mask:08x} match 0x{match_value:08x}, \
                             declared mask 0x{:08x} match 0x{:08x}",
                            spec.name, spec.mask, spec.match_value
                        ),
                    )
                    .for_instruction(spec.name.clone()),
                );
            }
        }
        Err(reason) => sink.push(
            TableDiagnostic::error(
                DiagnosticPhase::Validation,
                "validation.encoding-malformed",
                format!("encoding of '{}' is malformed: {reason}", spec.name),
            )
            .for_instruction(spec.name.clone()),
        ),
    }
}

/// Derives (mask, match) from a `0`/`1`/`-` pattern written most significant bit first.
///
/// 16-bit patterns describe compressed instructions and land in the low half of the word.
pub fn parse_encoding_pattern(pattern: &str) -> Result<(u32, u32), String> {
    let width = pattern.chars().count();
    if !ENCODING_WIDTHS.contains(&width) {
        return Err(format!("expected 32 or 16 bits, found {width}"));
    }
    let mut mask = 0u32;
    let mut match_value = 0u32;
    for (offset, ch) in pattern.chars().enumerate() {
        let bit = 1u32 << (width - 1 - offset);
        match ch {
            '0' => mask |= bit,
            '1' => {
                mask |= bit;
                match_value |= bit;
            }
            '-' => {}
            other => return Err(format!("unexpected character '{other}' at bit {offset}")),
        }
    }
    Ok((mask, match_value))
}
