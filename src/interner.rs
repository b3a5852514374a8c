//! Hash-consing string interner
//!
//! Maps byte strings to 16-bit [`StringId`]s. The table has exactly one slot
//! per possible id and uses open addressing with linear probing, so the slot a
//! string lands in *is* its id. String bytes are copied into an append-only
//! arena that never compacts, which keeps the text behind every id valid for
//! the rest of the process.
//!
//! # Algorithm
//!
//! 1. FNV-1a (32-bit) over the bytes.
//! 2. Fold to 16 bits by XOR-ing the high and low halves; this is the first
//!    probe slot.
//! 3. Probe `slot, slot + 1, ...` wrapping at the end of the table:
//!    - empty slot: copy the bytes into the arena and claim the slot,
//!    - occupied by equal bytes: return that slot,
//!    - otherwise keep probing.
//! 4. Arriving back at the first slot means every slot holds some other
//!    string and the table is full.

use crate::constants::{MAX_STRING_BYTES, STRING_TABLE_SLOTS};
use crate::errors::CompileError;
use std::fmt;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Canonical identity of an interned byte string
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringId(u16);

impl StringId {
    pub const fn from_raw(raw: u16) -> Self {
        StringId(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into tables sized to the id space
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId({})", self.0)
    }
}

/// Position of one string inside the arena
#[derive(Debug, Clone, Copy)]
struct StringRef {
    offset: u32,
    len: u32,
}

pub struct StringInterner {
    slots: Box<[Option<StringRef>]>,
    data: Vec<u8>,
    data_capacity: usize,
    count: usize,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::with_capacity(MAX_STRING_BYTES)
    }

    /// Create an interner whose arena holds at most `data_capacity` bytes.
    ///
    /// Arena positions are `u32`, so larger capacities are clamped to
    /// `u32::MAX`.
    pub fn with_capacity(data_capacity: usize) -> Self {
        StringInterner {
            slots: vec![None; STRING_TABLE_SLOTS].into_boxed_slice(),
            data: Vec::new(),
            data_capacity: data_capacity.min(u32::MAX as usize),
            count: 0,
        }
    }

    /// Return the id for `bytes`, inserting it if this is the first time it
    /// has been seen.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<StringId, CompileError> {
        let start = fold_hash(fnv1a(bytes));
        let mut slot = start;
        loop {
            match self.slots[slot as usize] {
                Some(existing) => {
                    if self.bytes_of(existing) == bytes {
                        return Ok(StringId(slot));
                    }
                }
                None => {
                    let string_ref = self.push_bytes(bytes)?;
                    self.slots[slot as usize] = Some(string_ref);
                    self.count += 1;
                    log::trace!(
                        "interned {:?} as {}",
                        String::from_utf8_lossy(bytes),
                        slot
                    );
                    return Ok(StringId(slot));
                }
            }
            slot = slot.wrapping_add(1);
            if slot == start {
                return Err(CompileError::InternerFull {
                    text: String::from_utf8_lossy(bytes).into_owned(),
                });
            }
        }
    }

    /// Convenience wrapper for interning text.
    pub fn intern_str(&mut self, s: &str) -> Result<StringId, CompileError> {
        self.intern(s.as_bytes())
    }

    /// Bytes behind an id issued by this interner.
    ///
    /// # Panics
    /// Panics if `id` was never issued by this interner.
    pub fn lookup(&self, id: StringId) -> &[u8] {
        match self.slots[id.index()] {
            Some(string_ref) => self.bytes_of(string_ref),
            None => panic!("{:?} was not issued by this interner", id),
        }
    }

    /// Text behind an id, with invalid UTF-8 replaced.
    pub fn resolve(&self, id: StringId) -> String {
        String::from_utf8_lossy(self.lookup(id)).into_owned()
    }

    /// Number of distinct strings interned so far
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes used in the arena
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    fn bytes_of(&self, string_ref: StringRef) -> &[u8] {
        let start = string_ref.offset as usize;
        &self.data[start..start + string_ref.len as usize]
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<StringRef, CompileError> {
        let full = || CompileError::Capacity {
            table: "strings_data",
            detail: Some(String::from_utf8_lossy(bytes).into_owned()),
        };
        if self.data.len() + bytes.len() > self.data_capacity {
            return Err(full());
        }
        let string_ref = StringRef {
            offset: u32::try_from(self.data.len()).map_err(|_| full())?,
            len: u32::try_from(bytes.len()).map_err(|_| full())?,
        };
        self.data.extend_from_slice(bytes);
        Ok(string_ref)
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

fn fold_hash(hash: u32) -> u16 {
    ((hash >> 16) ^ (hash & 0xffff)) as u16
}
