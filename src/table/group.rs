//! Partitions classified instructions into (mask, layout) groups sorted by match value.

use ahash::AHashMap;

use crate::config::DuplicatePolicy;
use crate::isa::diagnostic::{DiagnosticPhase, DiagnosticSink, TableDiagnostic};
use crate::isa::error::{MatchConflict, TableError};
use crate::isa::layout::Layout;
use crate::isa::spec::InstructionSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub match_value: u32,
    pub name: String,
}

/// Instructions sharing one mask and one layout, strictly ascending by match value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskGroup {
    pub mask: u32,
    pub layout: Layout,
    entries: Vec<GroupEntry>,
}

impl MaskGroup {
    fn new(mask: u32, layout: Layout) -> Self {
        Self {
            mask,
            layout,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    /// Binary search over the sorted entries for an already-masked word.
    pub fn find(&self, masked: u32) -> Option<&GroupEntry> {
        self.entries
            .binary_search_by_key(&masked, |entry| entry.match_value)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups in the order their (mask, layout) key was first seen in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeTable {
    groups: Vec<MaskGroup>,
}

impl DecodeTable {
    pub fn groups(&self) -> &[MaskGroup] {
        &self.groups
    }

    pub fn group(&self, mask: u32, layout: Layout) -> Option<&MaskGroup> {
        self.groups
            .iter()
            .find(|group| group.mask == mask && group.layout == layout)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .any(|entry| entry.name == name)
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(MaskGroup::len).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

pub struct Grouper {
    duplicates: DuplicatePolicy,
}

impl Grouper {
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates }
    }

    /// Builds the decode table from classified instructions given in document order.
    ///
    /// A (mask, match) pair may be owned by one instruction only, regardless of layout: the
    /// decoder cannot tell two such instructions apart.
    pub fn group<'a, I>(&self, classified: I, sink: &mut DiagnosticSink) -> Result<DecodeTable, TableError>
    where
        I: IntoIterator<Item = (&'a InstructionSpec, Layout)>,
    {
        let mut owners: AHashMap<(u32, u32), usize> = AHashMap::new();
        let mut conflicts: Vec<MatchConflict> = Vec::new();
        let mut conflict_index: AHashMap<(u32, u32), usize> = AHashMap::new();

        let mut index: AHashMap<(u32, Layout), usize> = AHashMap::new();
        let mut groups: Vec<MaskGroup> = Vec::new();
        let mut claimed: Vec<&InstructionSpec> = Vec::new();

        for (spec, layout) in classified {
            let slot = (spec.mask, spec.match_value);
            if let Some(&owner) = owners.get(&slot) {
                let owner_name = &claimed[owner].name;
                match self.duplicates {
                    DuplicatePolicy::Reject => {
                        let conflict_idx = *conflict_index.entry(slot).or_insert_with(|| {
                            conflicts.push(MatchConflict {
                                mask: spec.mask,
                                match_value: spec.match_value,
                                instructions: vec![owner_name.clone()],
                            });
                            conflicts.len() - 1
                        });
                        conflicts[conflict_idx].instructions.push(spec.name.clone());
                    }
                    DuplicatePolicy::FirstWins => sink.push(
                        TableDiagnostic::warning(
                            DiagnosticPhase::Grouping,
                            "grouping.shadowed-match",
                            format!(
                                "'{}' is shadowed by '{}' (mask 0x{:08x} match 0x{:08x}) and is left out of the table",
                                spec.name, owner_name, spec.mask, spec.match_value
                            ),
                        )
                        .for_instruction(spec.name.clone()),
                    ),
                }
                continue;
            }
            owners.insert(slot, claimed.len());
            claimed.push(spec);

            let group_idx = *index.entry((spec.mask, layout)).or_insert_with(|| {
                groups.push(MaskGroup::new(spec.mask, layout));
                groups.len() - 1
            });
            groups[group_idx].entries.push(GroupEntry {
                match_value: spec.match_value,
                name: spec.name.clone(),
            });
        }

        if !conflicts.is_empty() {
            for conflict in &conflicts {
                sink.push(TableDiagnostic::error(
                    DiagnosticPhase::Grouping,
                    "grouping.ambiguous-match",
                    conflict.to_string(),
                ));
            }
            return Err(TableError::Ambiguity { conflicts });
        }

        for group in &mut groups {
            group.entries.sort_by_key(|entry| entry.match_value);
        }
        tracing::debug!(
            groups = groups.len(),
            entries = claimed.len(),
            "grouped decode table"
        );
        Ok(DecodeTable { groups })
    }
}

impl Default for Grouper {
    fn default() -> Self {
        Self::new(DuplicatePolicy::Reject)
    }
}
