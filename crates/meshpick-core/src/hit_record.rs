//! Hit records produced by a hit-test pass.
//!
//! The wire form is a flat `u32` stream of variable-length records, each
//! `[name_count, min_depth, max_depth, name_1, .., name_n]`. Depths are window
//! depths in [0, 1] scaled to the full `u32` range.

use crate::error::{MeshpickError, Result};

/// One hit: the name stack active when the primitive hit, and the depth
/// range of everything hit under that name stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRecord {
    /// Smallest scaled window depth.
    pub min_depth: u32,
    /// Largest scaled window depth.
    pub max_depth: u32,
    /// Name stack, bottom first. Empty when no name was active.
    pub names: Vec<u32>,
}

impl HitRecord {
    /// The most recently pushed name, if any.
    pub fn last_name(&self) -> Option<u32> {
        self.names.last().copied()
    }
}

/// Scales a window depth in [0, 1] to the `u32` range.
pub fn depth_to_u32(depth: f32) -> u32 {
    (f64::from(depth.clamp(0.0, 1.0)) * f64::from(u32::MAX)).round() as u32
}

/// A flat hit record stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitBuffer {
    words: Vec<u32>,
    hits: usize,
}

impl HitBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a raw stream holding `hits` records.
    pub fn from_words(words: Vec<u32>, hits: usize) -> Self {
        Self { words, hits }
    }

    /// Appends a record.
    pub fn push(&mut self, record: &HitRecord) {
        self.words.push(record.names.len() as u32);
        self.words.push(record.min_depth);
        self.words.push(record.max_depth);
        self.words.extend_from_slice(&record.names);
        self.hits += 1;
    }

    /// Number of records in the stream.
    pub fn hit_count(&self) -> usize {
        self.hits
    }

    /// The raw words.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Decodes the stream into records.
    ///
    /// Fails if the stream ends inside a record.
    pub fn records(&self) -> Result<Vec<HitRecord>> {
        let mut records = Vec::with_capacity(self.hits);
        let mut offset = 0;
        for _ in 0..self.hits {
            let header = self
                .words
                .get(offset..offset + 3)
                .ok_or(MeshpickError::TruncatedHitBuffer {
                    offset,
                    len: self.words.len(),
                })?;
            let count = header[0] as usize;
            let names = self
                .words
                .get(offset + 3..offset + 3 + count)
                .ok_or(MeshpickError::TruncatedHitBuffer {
                    offset,
                    len: self.words.len(),
                })?;
            records.push(HitRecord {
                min_depth: header[1],
                max_depth: header[2],
                names: names.to_vec(),
            });
            offset += 3 + count;
        }
        Ok(records)
    }
}
