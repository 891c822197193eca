//! Building ledger: the append/retract record of placed floors.
//!
//! The ledger tracks per-floor footprint and score contributions plus the
//! fixed baseline and accumulated recall penalties. Net score is a pure fold
//! recomputed on demand - never cached across mutations.
//!
//! Reversibility is the load-bearing invariant: `retract(floor)` after
//! `place(floor, ...)` restores the exact prior net score.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Per-floor aggregate of one placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorEntry {
    pub floor: u8,
    pub footprint: u64,
    pub score: i64,
}

/// Append/retract ledger of the building so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingLedger {
    baseline: i64,
    penalties_total: i64,
    entries: Vector<FloorEntry>,
}

impl BuildingLedger {
    /// Create a ledger with the fixed baseline offset.
    #[must_use]
    pub fn new(baseline: i64) -> Self {
        Self {
            baseline,
            penalties_total: 0,
            entries: Vector::new(),
        }
    }

    /// The fixed baseline offset.
    #[must_use]
    pub fn baseline(&self) -> i64 {
        self.baseline
    }

    /// Accumulated recall penalties.
    #[must_use]
    pub fn penalties_total(&self) -> i64 {
        self.penalties_total
    }

    /// Record a floor's placement.
    ///
    /// A floor has at most one entry; placing twice without a retract is a
    /// caller bug and panics in debug builds.
    pub fn place(&mut self, floor: u8, footprint: u64, score: i64) {
        debug_assert!(
            self.entry(floor).is_none(),
            "floor {floor} already has a ledger entry"
        );
        self.entries.push_back(FloorEntry {
            floor,
            footprint,
            score,
        });
    }

    /// Remove a floor's entry, exactly reversing its contribution.
    ///
    /// Returns the removed entry, or `None` if the floor had none.
    pub fn retract(&mut self, floor: u8) -> Option<FloorEntry> {
        let pos = self.entries.iter().position(|e| e.floor == floor)?;
        Some(self.entries.remove(pos))
    }

    /// Add a signed recall penalty.
    pub fn add_penalty(&mut self, amount: i64) {
        self.penalties_total += amount;
    }

    /// Look up a floor's entry.
    #[must_use]
    pub fn entry(&self, floor: u8) -> Option<&FloorEntry> {
        self.entries.iter().find(|e| e.floor == floor)
    }

    /// Iterate over all entries in placement order.
    pub fn entries(&self) -> impl Iterator<Item = &FloorEntry> {
        self.entries.iter()
    }

    /// Net score: baseline + penalties + sum of floor scores.
    #[must_use]
    pub fn net_score(&self) -> i64 {
        self.baseline
            + self.penalties_total
            + self.entries.iter().map(|e| e.score).sum::<i64>()
    }

    /// Total placed footprint across all floors.
    #[must_use]
    pub fn total_footprint(&self) -> u64 {
        self.entries.iter().map(|e| e.footprint).sum()
    }
}
