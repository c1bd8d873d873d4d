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

//! Core value types for item identifiers and monetary amounts.
//!
//! All money inside the engine is carried as [`Cents`], an integer count of
//! minor currency units. Conversion to and from dollars goes through
//! [`Decimal`] so that no floating point value ever touches an amount.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Unique identifier for an item in the machine's inventory.
///
/// The identifier doubles as the item's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A non-negative amount of money in minor units (cents).
///
/// Wraps a `u64`; negative amounts cannot be represented.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Number of minor units in one major unit.
    const PER_DOLLAR: u32 = 100;

    pub const fn new(cents: u64) -> Self {
        Cents(cents)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Converts a dollar amount into cents.
    ///
    /// Returns `None` for negative amounts, for amounts with a fractional
    /// cent, and for amounts too large to fit.
    pub fn from_dollars(dollars: Decimal) -> Option<Self> {
        if dollars.is_sign_negative() && !dollars.is_zero() {
            return None;
        }
        let scaled = dollars.checked_mul(Decimal::from(Self::PER_DOLLAR))?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_u64().map(Cents)
    }

    /// Exact dollar value with two decimal places.
    pub fn to_dollars(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }

    pub fn checked_sub(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_sub(rhs.0).map(Cents)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_dollars())
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl Mul<u64> for Cents {
    type Output = Cents;

    fn mul(self, rhs: u64) -> Cents {
        Cents(self.0 * rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}
