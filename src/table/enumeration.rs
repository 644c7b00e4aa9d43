//! Stable identifiers for every instruction that survives filtering.

use std::num::NonZeroU32;

use ahash::AHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstructionId(NonZeroU32);

impl InstructionId {
    fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .expect("instruction index overflow");
        Self(raw)
    }

    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Sorted instruction names with dense 1-based ids. Ids depend only on the set of names, not on
/// the order they were supplied in.
#[derive(Debug, Default, Clone)]
pub struct InstructionEnumeration {
    names: Vec<String>,
    lookup: AHashMap<String, InstructionId>,
}

impl InstructionEnumeration {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect();
        names.sort_unstable();
        names.dedup();
        let lookup = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), InstructionId::from_index(index)))
            .collect();
        Self { names, lookup }
    }

    pub fn id(&self, name: &str) -> Option<InstructionId> {
        self.lookup.get(name).copied()
    }

    pub fn name(&self, id: InstructionId) -> &str {
        &self.names[id.index()]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstructionId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (InstructionId::from_index(index), name.as_str()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
