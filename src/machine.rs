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

//! Vending machine transaction engine.
//!
//! The [`VendingMachine`] sequences a single transaction at a time:
//!
//! ```text
//!   Idle ──select──► ItemSelected ──purchase (ok)──► Idle   (item + change out)
//!    │                    │
//!    │                    └──cancel──► Idle                 (refund out)
//!    └──cancel──► Idle
//! ```
//!
//! Money may be inserted in either state. A completed purchase and a
//! cancellation both leave the machine idle with an empty ledger. Every
//! failed operation leaves the ledger, the selection and the inventory
//! untouched.
//!
//! # Example
//!
//! ```
//! use vending_machine_rs::{Cents, Denomination, VendingMachine};
//!
//! let mut machine = VendingMachine::new("Unit 1");
//! machine.add_item("Snickers", Cents::new(125), 10);
//!
//! machine.insert_money(Denomination::FiveDollars);
//! machine.select_item("Snickers").unwrap();
//! let purchase = machine.purchase_item().unwrap();
//!
//! assert_eq!(purchase.change.total_value(), Cents::new(375));
//! assert_eq!(machine.item("Snickers").unwrap().stock(), 9);
//! ```

use crate::VendingError;
use crate::base::{Cents, ItemId};
use crate::change::make_change;
use crate::denomination::Denomination;
use crate::inventory::{Inventory, Item};
use crate::ledger::MoneyLedger;
use tracing::{debug, info, warn};

/// How a purchase treats inserted money that matches the price exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExactPayment {
    /// Inserted total must strictly exceed the price. Paying the exact price
    /// is reported as insufficient funds.
    #[default]
    Reject,
    /// Inserted total equal to the price completes with no change.
    Accept,
}

impl ExactPayment {
    fn covers(self, inserted: Cents, price: Cents) -> bool {
        match self {
            ExactPayment::Reject => inserted > price,
            ExactPayment::Accept => inserted >= price,
        }
    }
}

/// Construction-time settings for a [`VendingMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Label for the machine, used in logs only.
    pub name: String,
    pub exact_payment: ExactPayment,
}

impl MachineConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exact_payment: ExactPayment::default(),
        }
    }

    pub fn with_exact_payment(mut self, exact_payment: ExactPayment) -> Self {
        self.exact_payment = exact_payment;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new("Unit 1")
    }
}

/// Where the current transaction stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    /// No item selected. Money may already have been inserted.
    Idle,
    /// An item is selected and awaits purchase or cancellation.
    ItemSelected(ItemId),
}

/// Result of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    /// The purchased item's record, with stock already decremented.
    pub item: Item,
    /// Change paid out; empty when the payment was exact.
    pub change: MoneyLedger,
}

/// A single vending machine: its inventory, the money inserted for the
/// current transaction and the current selection.
///
/// # Invariants
///
/// - The selection, when set, names an item present in the inventory.
/// - After a completed purchase or a cancellation the ledger is empty and
///   nothing is selected.
/// - Stock only changes on a completed purchase, by exactly one unit.
///
/// The machine is not synchronized. Callers sharing one machine across
/// threads go through [`SharedMachine`](crate::SharedMachine).
#[derive(Debug, Clone)]
pub struct VendingMachine {
    config: MachineConfig,
    inserted: MoneyLedger,
    selection: Option<ItemId>,
    inventory: Inventory,
}

impl VendingMachine {
    /// Creates an empty machine with default settings and the given label.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(MachineConfig::new(name))
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            config,
            inserted: MoneyLedger::empty(),
            selection: None,
            inventory: Inventory::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    // === Inventory administration ===

    /// Stocks an item, overwriting any existing record with the same id.
    pub fn add_item(&mut self, id: impl Into<ItemId>, price: Cents, stock: u32) {
        self.update_item(Item::new(id, price, stock));
    }

    /// Replaces the whole record for `item`'s id, adding it if absent.
    pub fn update_item(&mut self, item: Item) {
        debug!(
            machine = %self.config.name,
            item = %item.id(),
            price = %item.price(),
            stock = item.stock(),
            "item stocked"
        );
        self.inventory.upsert(item);
    }

    /// Returns a copy of the record for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VendingError::ItemNotFound`] if `id` is unknown.
    pub fn item(&self, id: &str) -> Result<Item, VendingError> {
        self.inventory.get(id)
    }

    /// # Errors
    ///
    /// Returns [`VendingError::ItemNotFound`] if `id` is unknown.
    pub fn item_price(&self, id: &str) -> Result<Cents, VendingError> {
        self.inventory.get(id).map(|item| item.price())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // === Transaction state ===

    pub fn state(&self) -> MachineState {
        match &self.selection {
            Some(id) => MachineState::ItemSelected(id.clone()),
            None => MachineState::Idle,
        }
    }

    pub fn selection(&self) -> Option<&ItemId> {
        self.selection.as_ref()
    }

    /// Money inserted for the current transaction.
    pub fn inserted(&self) -> &MoneyLedger {
        &self.inserted
    }

    pub fn inserted_total(&self) -> Cents {
        self.inserted.total_value()
    }

    // === Transaction operations ===

    /// Selects the item to purchase, replacing any earlier selection.
    /// Money already inserted stays in the machine.
    ///
    /// # Errors
    ///
    /// Returns [`VendingError::InvalidSelection`] if `id` is not stocked;
    /// the previous selection is kept.
    pub fn select_item(&mut self, id: &str) -> Result<(), VendingError> {
        if !self.inventory.contains(id) {
            let error = VendingError::InvalidSelection(ItemId::from(id));
            warn!(machine = %self.config.name, reason = %error, "selection rejected");
            return Err(error);
        }
        debug!(machine = %self.config.name, item = id, "item selected");
        self.selection = Some(ItemId::from(id));
        Ok(())
    }

    /// Accepts one unit of currency. Allowed in any state.
    pub fn insert_money(&mut self, denomination: Denomination) {
        self.inserted.increment(denomination);
        debug!(
            machine = %self.config.name,
            denomination = %denomination,
            total = %self.inserted.total_value(),
            "money inserted"
        );
    }

    /// Buys the selected item with the inserted money.
    ///
    /// On success the item's stock drops by one, the transaction resets and
    /// the purchased item is returned together with the change.
    ///
    /// # Errors
    ///
    /// - [`VendingError::NoItemSelected`] - Nothing is selected.
    /// - [`VendingError::OutOfStock`] - The selected item has no units left.
    /// - [`VendingError::InsufficientFunds`] - Inserted money does not cover
    ///   the price under the configured [`ExactPayment`] rule.
    /// - [`VendingError::AmountNotRepresentable`] - The change cannot be paid
    ///   out in accepted denominations.
    ///
    /// On any error the inserted money and the selection are kept, so the
    /// caller may add funds, select again or cancel.
    pub fn purchase_item(&mut self) -> Result<Purchase, VendingError> {
        let result = self.try_purchase();
        if let Err(error) = &result {
            warn!(
                machine = %self.config.name,
                inserted = %self.inserted.total_value(),
                reason = %error,
                "purchase rejected"
            );
        }
        result
    }

    /// Ends the transaction and hands back everything inserted.
    ///
    /// Always succeeds; with nothing inserted the refund is empty.
    pub fn cancel_transaction(&mut self) -> MoneyLedger {
        let total = self.inserted.total_value();
        // The inserted units always form a valid breakdown of `total`.
        let refund = make_change(total).unwrap_or_else(|_| self.inserted.clone());
        info!(
            machine = %self.config.name,
            refund = %total,
            units = %refund,
            "transaction cancelled"
        );
        self.reset_transaction();
        refund
    }
}

/// Private API
impl VendingMachine {
    fn try_purchase(&mut self) -> Result<Purchase, VendingError> {
        let id = self.selection.as_ref().ok_or(VendingError::NoItemSelected)?;
        let item = self.inventory.get(id.as_str())?;

        if !item.in_stock() {
            return Err(VendingError::OutOfStock(item.id().clone()));
        }

        let inserted = self.inserted.total_value();
        if !self.config.exact_payment.covers(inserted, item.price()) {
            return Err(VendingError::InsufficientFunds {
                price: item.price(),
                inserted,
            });
        }

        // Compute change before touching any state so a failure here leaves
        // the machine unchanged.
        let change_due = inserted
            .checked_sub(item.price())
            .ok_or(VendingError::InsufficientFunds {
                price: item.price(),
                inserted,
            })?;
        let change = make_change(change_due)?;

        self.inventory.decrement_stock(item.id().as_str())?;
        let item = self.inventory.get(item.id().as_str())?;

        info!(
            machine = %self.config.name,
            item = %item.id(),
            price = %item.price(),
            change = %change_due,
            units = %change,
            stock = item.stock(),
            "purchase completed"
        );

        self.reset_transaction();
        Ok(Purchase { item, change })
    }

    fn reset_transaction(&mut self) {
        self.inserted = MoneyLedger::empty();
        self.selection = None;
        self.assert_invariants();
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.selection
                .as_ref()
                .is_none_or(|id| self.inventory.contains(id.as_str())),
            "Invariant violated: selection {:?} is not in the inventory",
            self.selection
        );
    }
}
