//! Instruction records produced by the loader and consumed by every later stage.

use std::fmt;

use ahash::AHashMap;
use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Fixed-width key over the operand-field vocabulary the layout table understands.
    ///
    /// Names outside the vocabulary set [`FieldSet::NON_CANONICAL`], which no layout accepts.
    #[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone)]
    pub struct FieldSet: u16 {
        const RD            = 1 << 0;
        const RS1           = 1 << 1;
        const RS2           = 1 << 2;
        const IMM           = 1 << 3;
        const IMM12         = 1 << 4;
        const IMM12HI       = 1 << 5;
        const IMM12LO       = 1 << 6;
        const BIMM12HI      = 1 << 7;
        const BIMM12LO      = 1 << 8;
        const IMM20         = 1 << 9;
        const JIMM20        = 1 << 10;
        const NON_CANONICAL = 1 << 15;
    }
}

impl FieldSet {
    pub fn from_field_name(name: &str) -> Option<Self> {
        let flag = match name {
            "rd" => Self::RD,
            "rs1" => Self::RS1,
            "rs2" => Self::RS2,
            "imm" => Self::IMM,
            "imm12" => Self::IMM12,
            "imm12hi" => Self::IMM12HI,
            "imm12lo" => Self::IMM12LO,
            "bimm12hi" => Self::BIMM12HI,
            "bimm12lo" => Self::BIMM12LO,
            "imm20" => Self::IMM20,
            "jimm20" => Self::JIMM20,
            _ => return None,
        };
        Some(flag)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(Self::empty(), |set, name| {
            set | Self::from_field_name(name.as_ref()).unwrap_or(Self::NON_CANONICAL)
        })
    }

    pub fn is_canonical(self) -> bool {
        !self.contains(Self::NON_CANONICAL)
    }
}

/// One decodable instruction as described by the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSpec {
    pub name: String,
    pub mask: u32,
    pub match_value: u32,
    /// Sorted, de-duplicated operand field names.
    pub variable_fields: SmallVec<[String; 4]>,
    pub extensions: SmallVec<[String; 2]>,
    /// Optional `0`/`1`/`-` bit pattern (32 or 16 characters), most significant bit first.
    pub encoding: Option<String>,
}

impl InstructionSpec {
    pub fn new<I, S>(name: impl Into<String>, mask: u32, match_value: u32, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut variable_fields: SmallVec<[String; 4]> =
            fields.into_iter().map(Into::into).collect();
        variable_fields.sort_unstable();
        variable_fields.dedup();
        Self {
            name: name.into(),
            mask,
            match_value,
            variable_fields,
            extensions: SmallVec::new(),
            encoding: None,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn field_set(&self) -> FieldSet {
        FieldSet::from_names(&self.variable_fields)
    }

    /// Bits of `match` that fall outside `mask` and therefore can never be observed.
    pub fn stray_match_bits(&self) -> u32 {
        self.match_value & !self.mask
    }

    pub fn fields_display(&self) -> FieldsDisplay<'_> {
        FieldsDisplay(&self.variable_fields)
    }
}

/// Renders a field list as `{a, b, c}`.
pub struct FieldsDisplay<'a>(&'a [String]);

impl fmt::Display for FieldsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.join(", "))
    }
}

/// Document-ordered collection of instructions with name lookup.
#[derive(Debug, Default, Clone)]
pub struct InstructionSet {
    specs: Vec<InstructionSpec>,
    index: AHashMap<String, usize>,
}

impl InstructionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `spec`, handing it back if the name is already taken.
    pub fn insert(&mut self, spec: InstructionSpec) -> Result<(), InstructionSpec> {
        if self.index.contains_key(&spec.name) {
            return Err(spec);
        }
        self.index.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&InstructionSpec> {
        self.index.get(name).map(|&idx| &self.specs[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionSpec> {
        self.specs.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, InstructionSpec> {
        self.specs.iter_mut()
    }

    /// Keeps only the instructions for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&InstructionSpec) -> bool) {
        self.specs.retain(|spec| keep(spec));
        self.index = self
            .specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| (spec.name.clone(), idx))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a InstructionSpec;
    type IntoIter = std::slice::Iter<'a, InstructionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<InstructionSpec> for InstructionSet {
    /// Later duplicates of a name are dropped; use [`InstructionSet::insert`] to detect them.
    fn from_iter<T: IntoIterator<Item = InstructionSpec>>(iter: T) -> Self {
        let mut set = Self::new();
        for spec in iter {
            let _ = set.insert(spec);
        }
        set
    }
}
