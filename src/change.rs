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

//! Change-making over the fixed denomination set.
//!
//! Bills and dimes are paid out greedily, largest first. Quarters are the
//! one exception: a plain greedy pass over all five denominations gets stuck
//! on amounts such as 30 cents (one quarter leaves 5 cents that no
//! denomination can cover), so the quarter count is chosen up front.
//!
//! With `q` quarters the remainder `amount - 25q` has to be a multiple of 10
//! to be payable with the other denominations, which fixes the parity of
//! `q`. Four quarters are always worse than one dollar, so only `q` in
//! `0..=3` needs checking. The candidate with the fewest units wins.

use crate::VendingError;
use crate::base::Cents;
use crate::denomination::Denomination;
use crate::ledger::MoneyLedger;

/// Largest number of quarters a minimal breakdown can contain.
const MAX_QUARTERS: u64 = 3;

/// Denominations reduced greedily once the quarter count is fixed.
const GREEDY: [Denomination; 4] = [
    Denomination::FiveDollars,
    Denomination::TwoDollars,
    Denomination::OneDollar,
    Denomination::Dime,
];

/// Breaks `amount` into the fewest units of the accepted denominations.
///
/// The returned ledger's [`total_value`](MoneyLedger::total_value) equals
/// `amount` exactly.
///
/// # Errors
///
/// Returns [`VendingError::AmountNotRepresentable`] when no combination of
/// denominations sums to `amount` (anything that is not a multiple of 5
/// cents, as well as 5 and 15 cents).
///
/// # Example
///
/// ```
/// use vending_machine_rs::{make_change, Cents, Denomination};
///
/// let change = make_change(Cents::new(375)).unwrap();
/// assert_eq!(change.count(Denomination::TwoDollars), 1);
/// assert_eq!(change.count(Denomination::OneDollar), 1);
/// assert_eq!(change.count(Denomination::Quarter), 3);
/// ```
pub fn make_change(amount: Cents) -> Result<MoneyLedger, VendingError> {
    let quarter = Denomination::Quarter.value().get();

    (0..=MAX_QUARTERS)
        .filter_map(|quarters| {
            let remainder = amount.get().checked_sub(quarter * quarters)?;
            let counts = greedy(remainder)?;
            Some(MoneyLedger::from_counts(
                counts.into_iter().chain([(Denomination::Quarter, quarters)]),
            ))
        })
        .min_by_key(MoneyLedger::unit_count)
        .ok_or(VendingError::AmountNotRepresentable(amount))
}

/// Greedy reduction over bills and dimes. `None` if a remainder is left
/// that no denomination fits.
fn greedy(amount: u64) -> Option<[(Denomination, u64); 4]> {
    let mut remaining = amount;
    let mut counts = [(Denomination::Dime, 0u64); 4];

    for (slot, denomination) in counts.iter_mut().zip(GREEDY) {
        let value = denomination.value().get();
        let units = remaining / value;
        remaining -= units * value;
        *slot = (denomination, units);
    }

    (remaining == 0).then_some(counts)
}
