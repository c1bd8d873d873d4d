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

//! Thread-safe handle around a single machine.
//!
//! Every call takes the machine's lock once, so each operation runs to
//! completion before the next one starts. Sequences that must not interleave
//! with other callers (select, insert, purchase) go through
//! [`SharedMachine::transaction`].

use crate::VendingError;
use crate::base::Cents;
use crate::denomination::Denomination;
use crate::inventory::Item;
use crate::ledger::MoneyLedger;
use crate::machine::{Purchase, VendingMachine};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable, lock-protected handle to one [`VendingMachine`].
///
/// Clones share the same machine.
#[derive(Debug, Clone)]
pub struct SharedMachine {
    inner: Arc<Mutex<VendingMachine>>,
}

impl SharedMachine {
    pub fn new(machine: VendingMachine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Runs `f` with exclusive access to the machine.
    ///
    /// # Example
    ///
    /// ```
    /// use vending_machine_rs::{Cents, Denomination, SharedMachine, VendingMachine};
    ///
    /// let mut machine = VendingMachine::new("Unit 1");
    /// machine.add_item("Mars", Cents::new(100), 15);
    /// let shared = SharedMachine::new(machine);
    ///
    /// let purchase = shared.transaction(|m| {
    ///     m.select_item("Mars")?;
    ///     m.insert_money(Denomination::TwoDollars);
    ///     m.purchase_item()
    /// });
    /// assert_eq!(purchase.unwrap().change.total_value(), Cents::new(100));
    /// ```
    pub fn transaction<R>(&self, f: impl FnOnce(&mut VendingMachine) -> R) -> R {
        let mut machine = self.inner.lock();
        f(&mut machine)
    }

    pub fn add_item(&self, id: &str, price: Cents, stock: u32) {
        self.inner.lock().add_item(id, price, stock);
    }

    pub fn item(&self, id: &str) -> Result<Item, VendingError> {
        self.inner.lock().item(id)
    }

    pub fn select_item(&self, id: &str) -> Result<(), VendingError> {
        self.inner.lock().select_item(id)
    }

    pub fn insert_money(&self, denomination: Denomination) {
        self.inner.lock().insert_money(denomination);
    }

    pub fn purchase_item(&self) -> Result<Purchase, VendingError> {
        self.inner.lock().purchase_item()
    }

    pub fn cancel_transaction(&self) -> MoneyLedger {
        self.inner.lock().cancel_transaction()
    }

    pub fn inserted_total(&self) -> Cents {
        self.inner.lock().inserted_total()
    }

    /// Copy of the machine as it is right now.
    pub fn snapshot(&self) -> VendingMachine {
        self.inner.lock().clone()
    }
}
