//! Helpers for constructing an [`InstructionSet`] programmatically without going through the
//! JSON loader.

use super::error::TableError;
use super::spec::{InstructionSet, InstructionSpec};

/// Convenience wrapper for assembling an instruction set in memory.
#[derive(Default)]
pub struct IsaBuilder {
    set: InstructionSet,
    duplicates: Vec<String>,
}

impl IsaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins an instruction declaration; call [`InstructionBuilder::finish`] to push it.
    pub fn instruction(&mut self, name: impl Into<String>) -> InstructionBuilder<'_> {
        InstructionBuilder {
            builder: self,
            spec: InstructionSpec::new(name, 0, 0, std::iter::empty::<String>()),
        }
    }

    /// Appends an already assembled spec.
    pub fn push(&mut self, spec: InstructionSpec) -> &mut Self {
        if let Err(spec) = self.set.insert(spec) {
            self.duplicates.push(spec.name);
        }
        self
    }

    /// Finishes building; repeated names are reported the way the loader reports them.
    pub fn build(self) -> Result<InstructionSet, TableError> {
        match self.duplicates.first() {
            Some(name) => Err(TableError::parse(format!("duplicate instruction '{name}'"))),
            None => Ok(self.set),
        }
    }
}

pub struct InstructionBuilder<'a> {
    builder: &'a mut IsaBuilder,
    spec: InstructionSpec,
}

impl<'a> InstructionBuilder<'a> {
    pub fn mask(mut self, mask: u32) -> Self {
        self.spec.mask = mask;
        self
    }

    pub fn match_value(mut self, match_value: u32) -> Self {
        self.spec.match_value = match_value;
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = std::mem::take(&mut self.spec.name);
        let spec = InstructionSpec::new(name, self.spec.mask, self.spec.match_value, fields);
        self.spec = InstructionSpec {
            extensions: std::mem::take(&mut self.spec.extensions),
            encoding: self.spec.encoding.take(),
            ..spec
        };
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.spec.extensions.push(extension.into());
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.spec.encoding = Some(encoding.into());
        self
    }

    pub fn finish(self) -> &'a mut IsaBuilder {
        let InstructionBuilder { builder, spec } = self;
        builder.push(spec)
    }
}
