// src/book/mod.rs

pub mod asm;

#[cfg(test)]
mod tests;

use crate::board::Square;
use crate::constants::{
    BOOK_FLAGS, BOOK_MAGIC, BOOK_VERSION, CHAIN_END, EMPTY_SLOT, ENTRY_SIZE, HEADER_SIZE, SLOT_SIZE,
};
use crate::error::CompileError;
use serde::{Deserialize, Serialize};

/// One recommended move, as the engine stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BookEntry {
    pub hash_hi: u8,
    pub from: Square,
    pub to: Square,
}

/// A book entry together with the full hash that picks its bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookFact {
    pub hash: u16,
    pub entry: BookEntry,
}

impl BookFact {
    pub fn new(hash: u16, from: Square, to: Square) -> Self {
        Self {
            hash,
            entry: BookEntry {
                hash_hi: (hash >> 8) as u8,
                from,
                to,
            },
        }
    }
}

/// Which entry of a bucket the slot points at first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChainOrder {
    /// Chains keep insertion order.
    FirstIsHead,
    /// The newest entry of a bucket is the chain head.
    LastIsHead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedEntry {
    pub entry: BookEntry,
    pub next: u8,
}

/// Hash table of bucket heads plus the flat, chained entry array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledBook {
    slots: Vec<u16>,
    entries: Vec<PackedEntry>,
}

pub fn compile(facts: &[BookFact], table_size: usize, order: ChainOrder) -> Result<CompiledBook, CompileError> {
    if table_size == 0 || table_size > u16::MAX as usize {
        return Err(CompileError::BadTableSize(table_size));
    }
    if facts.len() >= EMPTY_SLOT as usize {
        return Err(CompileError::TooManyEntries(facts.len()));
    }

    let mut buckets: Vec<Vec<BookEntry>> = vec![Vec::new(); table_size];
    for fact in facts {
        buckets[fact.hash as usize % table_size].push(fact.entry);
    }

    let mut slots = vec![EMPTY_SLOT; table_size];
    let mut entries = Vec::with_capacity(facts.len());

    for (slot, mut bucket) in slots.iter_mut().zip(buckets) {
        if bucket.is_empty() {
            continue;
        }
        if order == ChainOrder::LastIsHead {
            bucket.reverse();
        }

        *slot = entries.len() as u16;
        let last = bucket.len() - 1;
        for (i, entry) in bucket.into_iter().enumerate() {
            let next = if i == last {
                CHAIN_END
            } else {
                link_byte(entries.len() + 1)?
            };
            entries.push(PackedEntry { entry, next });
        }
    }

    Ok(CompiledBook { slots, entries })
}

fn link_byte(index: usize) -> Result<u8, CompileError> {
    u8::try_from(index)
        .ok()
        .filter(|b| *b != CHAIN_END)
        .ok_or(CompileError::LinkOverflow { index })
}

impl CompiledBook {
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slots(&self) -> &[u16] {
        &self.slots
    }

    pub fn entries(&self) -> &[PackedEntry] {
        &self.entries
    }

    pub fn byte_size(&self) -> usize {
        HEADER_SIZE + SLOT_SIZE * self.slots.len() + ENTRY_SIZE * self.entries.len()
    }

    pub fn check_budget(&self, budget: usize) -> Result<(), CompileError> {
        let size = self.byte_size();
        if size > budget {
            return Err(CompileError::OverBudget { size, budget });
        }
        Ok(())
    }

    /// Entry indices of one bucket's chain, head first.
    pub fn chain(&self, bucket: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let Some(&head) = self.slots.get(bucket) else {
            return indices;
        };
        if head == EMPTY_SLOT {
            return indices;
        }
        let mut index = head as usize;
        while let Some(packed) = self.entries.get(index) {
            indices.push(index);
            if packed.next == CHAIN_END {
                break;
            }
            index = packed.next as usize;
        }
        indices
    }

    /// Book moves for a position hash, walking the chain the way the
    /// engine does: bucket by `hash % T`, match on the high byte.
    pub fn probe(&self, hash: u16) -> Vec<BookEntry> {
        self.chain(hash as usize % self.slots.len())
            .into_iter()
            .map(|i| self.entries[i].entry)
            .filter(|e| e.hash_hi == (hash >> 8) as u8)
            .collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_size());
        out.extend_from_slice(&BOOK_MAGIC.to_le_bytes());
        out.push(BOOK_VERSION);
        out.extend_from_slice(&(self.entries.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.slots.len() as u16).to_le_bytes());
        out.push(BOOK_FLAGS);

        for slot in &self.slots {
            out.extend_from_slice(&slot.to_le_bytes());
        }
        for packed in &self.entries {
            out.push(packed.entry.hash_hi);
            out.push(packed.entry.from.to_0x88());
            out.push(packed.entry.to.to_0x88());
            out.push(packed.next);
        }
        out
    }
}
