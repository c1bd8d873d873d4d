// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Per-denomination money accounting.
//!
//! # Example
//!
//! ```
//! use vending_machine_rs::{Cents, Denomination, MoneyLedger};
//!
//! let mut ledger = MoneyLedger::empty();
//! ledger.increment(Denomination::TwoDollars);
//! ledger.increment(Denomination::Quarter);
//! assert_eq!(ledger.total_value(), Cents::new(225));
//! ```

use crate::base::Cents;
use crate::denomination::Denomination;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Count of each denomination held for the current transaction, or paid out
/// as change.
///
/// Counts are indexed directly by [`Denomination`] and only ever grow; a
/// ledger is emptied by replacing it with [`MoneyLedger::empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyLedger {
    counts: [u64; Denomination::COUNT],
}

impl MoneyLedger {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a ledger from explicit counts. Denominations not listed stay at
    /// zero; a denomination listed twice keeps the sum of both counts.
    pub fn from_counts(counts: impl IntoIterator<Item = (Denomination, u64)>) -> Self {
        let mut ledger = Self::empty();
        for (denomination, count) in counts {
            ledger.counts[denomination.index()] += count;
        }
        ledger
    }

    pub fn increment(&mut self, denomination: Denomination) {
        self.counts[denomination.index()] += 1;
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts[denomination.index()]
    }

    /// Snapshot of every denomination's count, largest denomination first.
    pub fn counts(&self) -> [(Denomination, u64); Denomination::COUNT] {
        Denomination::DESCENDING.map(|d| (d, self.count(d)))
    }

    /// Sum of `count × value` over all denominations.
    pub fn total_value(&self) -> Cents {
        self.counts()
            .into_iter()
            .map(|(d, count)| d.value() * count)
            .sum()
    }

    /// Number of coins and bills held.
    pub fn unit_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl fmt::Display for MoneyLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (denomination, count)) in self.counts().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{denomination} x {count}")?;
        }
        Ok(())
    }
}

impl Serialize for MoneyLedger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("MoneyLedger", 6)?;
        state.serialize_field("five_dollars", &self.count(Denomination::FiveDollars))?;
        state.serialize_field("two_dollars", &self.count(Denomination::TwoDollars))?;
        state.serialize_field("one_dollar", &self.count(Denomination::OneDollar))?;
        state.serialize_field("quarter", &self.count(Denomination::Quarter))?;
        state.serialize_field("dime", &self.count(Denomination::Dime))?;
        state.serialize_field("total", &self.total_value().to_dollars())?;
        state.end()
    }
}
