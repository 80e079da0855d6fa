//! Global ordinal table and page navigation.
//!
//! Every record's `index` is its 1-based display position. The table stores
//! one [`OrdinalEntry`] per record at slot `index - 1`, so a record's
//! neighbors live at slots `index - 2` and `index`.

use std::collections::HashMap;

use tracing::{debug, instrument};

use dexgen_shared::{DexError, LoadedRecord, OrdinalEntry, Result};

/// Dense, index-ordered lookup over all loaded records.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndex {
    entries: Vec<OrdinalEntry>,
    by_name: HashMap<String, usize>,
}

/// Previous/next pages of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a OrdinalEntry>,
    pub next: Option<&'a OrdinalEntry>,
}

impl GlobalIndex {
    /// Build the table, rejecting sets whose indexes are not exactly `1..=N`
    /// or whose names repeat.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(records: &[LoadedRecord]) -> Result<Self> {
        let total = records.len();
        let mut slots: Vec<Option<OrdinalEntry>> = vec![None; total];
        let mut by_name = HashMap::with_capacity(total);

        for loaded in records {
            let record = &loaded.record;
            let slot = (record.index as usize)
                .checked_sub(1)
                .filter(|slot| *slot < total)
                .ok_or_else(|| {
                    DexError::validation(format!(
                        "{} has index {} outside 1..={total}",
                        record.name, record.index
                    ))
                })?;

            if let Some(existing) = &slots[slot] {
                return Err(DexError::validation(format!(
                    "index {} is shared by {} and {}",
                    record.index, existing.name, record.name
                )));
            }
            if by_name.insert(record.name.clone(), slot).is_some() {
                return Err(DexError::validation(format!(
                    "record name {:?} appears more than once",
                    record.name
                )));
            }

            slots[slot] = Some(OrdinalEntry {
                index: record.index,
                name: record.name.clone(),
                file_key: loaded.file_key.clone(),
            });
        }

        // N records with N distinct indexes in 1..=N fill every slot.
        let entries: Vec<OrdinalEntry> = slots.into_iter().flatten().collect();
        debug!(entries = entries.len(), "ordinal table built");

        Ok(Self { entries, by_name })
    }

    /// All entries in ascending index order.
    pub fn entries(&self) -> &[OrdinalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a 1-based index.
    pub fn get(&self, index: u32) -> Option<&OrdinalEntry> {
        (index as usize)
            .checked_sub(1)
            .and_then(|slot| self.entries.get(slot))
    }

    /// Entry for a record name.
    pub fn by_name(&self, name: &str) -> Option<&OrdinalEntry> {
        self.by_name.get(name).map(|&slot| &self.entries[slot])
    }

    /// Global ordinal of a record name.
    pub fn ordinal_of(&self, name: &str) -> Option<u32> {
        self.by_name(name).map(|entry| entry.index)
    }

    /// Navigation neighbors of the record at a 1-based `index`.
    pub fn neighbors(&self, index: u32) -> Neighbors<'_> {
        let prev = if index > 1 { self.get(index - 1) } else { None };
        let next = self.get(index + 1);
        Neighbors { prev, next }
    }
}
