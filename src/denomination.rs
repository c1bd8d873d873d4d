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

//! Accepted currency units.

use crate::VendingError;
use crate::base::Cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the fixed currency units the machine accepts and pays out.
///
/// Variants are declared from largest to smallest; [`Denomination::index`]
/// follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    FiveDollars,
    TwoDollars,
    OneDollar,
    Quarter,
    Dime,
}

impl Denomination {
    /// Number of accepted denominations.
    pub const COUNT: usize = 5;

    /// All denominations, largest first.
    pub const DESCENDING: [Denomination; Self::COUNT] = [
        Denomination::FiveDollars,
        Denomination::TwoDollars,
        Denomination::OneDollar,
        Denomination::Quarter,
        Denomination::Dime,
    ];

    /// Face value in cents.
    pub const fn value(self) -> Cents {
        Cents::new(match self {
            Denomination::FiveDollars => 500,
            Denomination::TwoDollars => 200,
            Denomination::OneDollar => 100,
            Denomination::Quarter => 25,
            Denomination::Dime => 10,
        })
    }

    /// Position in [`Denomination::DESCENDING`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub fn all_descending() -> impl Iterator<Item = Denomination> {
        Self::DESCENDING.into_iter()
    }

    /// Looks up the denomination with the given face value.
    ///
    /// # Errors
    ///
    /// Returns [`VendingError::UnknownDenomination`] if no denomination has
    /// that value.
    pub fn from_cents(value: Cents) -> Result<Denomination, VendingError> {
        Self::all_descending()
            .find(|d| d.value() == value)
            .ok_or(VendingError::UnknownDenomination(value))
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::FiveDollars => f.write_str("$5"),
            Denomination::TwoDollars => f.write_str("$2"),
            Denomination::OneDollar => f.write_str("$1"),
            Denomination::Quarter => f.write_str("$0.25"),
            Denomination::Dime => f.write_str("$0.10"),
        }
    }
}
