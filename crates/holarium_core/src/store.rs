//! Fixed-capacity content-addressable pattern store.
//!
//! Records are kept in insertion order, oldest first. At capacity the oldest
//! record is evicted by shifting the rest down one slot; N is small and
//! fixed, so the O(N) shift is acceptable. Lookups scan newest-first so a
//! signature collision resolves to the most recent association.

use crate::clock::Clock;
use holarium_data::{HolographicVector, StoreRecord, MAX_RECORDS};

#[derive(Debug, Default)]
pub struct PatternStore {
    records: Vec<StoreRecord>,
}

impl PatternStore {
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(MAX_RECORDS),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Associates `input` with `output`, stamped with the current tick.
    ///
    /// Always advances the clock by one, even when the insert evicts.
    /// Returns true if the oldest record was evicted to make room.
    pub fn insert(
        &mut self,
        clock: &mut Clock,
        input: HolographicVector,
        output: HolographicVector,
    ) -> bool {
        debug_assert!(input.valid, "invalid vectors must never be stored as keys");
        debug_assert!(output.valid, "invalid vectors must never be stored as values");

        let evicted = if self.records.len() >= MAX_RECORDS {
            self.records.remove(0);
            tracing::warn!(
                capacity = MAX_RECORDS,
                "holographic memory full, evicted oldest record"
            );
            true
        } else {
            false
        };

        self.records.push(StoreRecord {
            input,
            output,
            timestamp: clock.now(),
        });
        clock.advance();
        evicted
    }

    /// Looks up the output vector associated with `signature`, preferring
    /// the most recently inserted match.
    pub fn lookup(&self, signature: u32) -> Option<&HolographicVector> {
        self.records
            .iter()
            .rev()
            .find(|r| r.input.signature == signature)
            .map(|r| &r.output)
    }

    /// Timestamp of the oldest retained record, if any.
    pub fn oldest_timestamp(&self) -> Option<u64> {
        self.records.first().map(|r| r.timestamp)
    }

    /// Clears all records. Called once at startup.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Encodes the bootstrap vocabulary, self-associating each label so
    /// later lookups by signature resolve to the label's own vector.
    pub fn load_vocabulary(&mut self, clock: &mut Clock) {
        tracing::info!("loading initial genome vocabulary");
        for label in holarium_data::VOCABULARY {
            let pattern = crate::codec::generate_label(label);
            self.insert(clock, pattern.clone(), pattern);
            tracing::debug!(label, "loaded vocabulary pattern");
        }
    }
}
