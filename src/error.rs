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

//! Error types for vending machine operations.

use crate::base::{Cents, ItemId};
use thiserror::Error;

/// Vending machine errors.
///
/// A failed operation leaves the machine exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VendingError {
    /// Selected identifier is not stocked by the machine
    #[error("invalid selection: no item '{0}'")]
    InvalidSelection(ItemId),

    /// Purchase attempted before any item was selected
    #[error("no item selected")]
    NoItemSelected,

    /// Selected item has no stock left
    #[error("item '{0}' is out of stock")]
    OutOfStock(ItemId),

    /// Inserted money does not cover the item price
    #[error("insufficient funds: price {price}, inserted {inserted}")]
    InsufficientFunds { price: Cents, inserted: Cents },

    /// Administrative lookup on an unknown identifier
    #[error("item '{0}' not found")]
    ItemNotFound(ItemId),

    /// Amount cannot be paid out with the accepted denominations
    #[error("amount {0} cannot be made from accepted denominations")]
    AmountNotRepresentable(Cents),

    /// Raw value does not match any accepted denomination
    #[error("{0} is not an accepted denomination")]
    UnknownDenomination(Cents),
}
