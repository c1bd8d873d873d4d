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

//! # Vending Machine
//!
//! This library models a single vending machine: an inventory of items,
//! money inserted for the current transaction, and exact change-making over
//! a fixed set of denominations ($5, $2, $1, $0.25, $0.10).
//!
//! ## Core Components
//!
//! - [`VendingMachine`]: Transaction engine sequencing selection, payment,
//!   purchase and cancellation
//! - [`MoneyLedger`]: Per-denomination count of inserted money or change
//! - [`make_change`]: Minimal-unit breakdown of an amount into denominations
//! - [`Inventory`]: Item records with price and stock
//! - [`VendingError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use vending_machine_rs::{Cents, Denomination, VendingError, VendingMachine};
//!
//! let mut machine = VendingMachine::new("Unit 1");
//! machine.add_item("Mars", Cents::new(100), 15);
//!
//! // Nothing inserted yet
//! machine.select_item("Mars").unwrap();
//! assert!(matches!(
//!     machine.purchase_item(),
//!     Err(VendingError::InsufficientFunds { .. })
//! ));
//!
//! machine.insert_money(Denomination::TwoDollars);
//! machine.insert_money(Denomination::Quarter);
//! let purchase = machine.purchase_item().unwrap();
//! assert_eq!(purchase.change.total_value(), Cents::new(125));
//! ```
//!
//! ## Money
//!
//! Amounts are integer cents ([`Cents`]) everywhere. Dollar values only
//! appear at the edges, converted exactly through `rust_decimal`.
//!
//! ## Thread Safety
//!
//! [`VendingMachine`] is a plain single-threaded state machine. Share one
//! machine between threads through [`SharedMachine`], which serializes every
//! operation behind one lock.

mod base;
mod change;
mod denomination;
pub mod error;
mod inventory;
mod ledger;
mod machine;
mod shared;

pub use base::{Cents, ItemId};
pub use change::make_change;
pub use denomination::Denomination;
pub use error::VendingError;
pub use inventory::{Inventory, Item};
pub use ledger::MoneyLedger;
pub use machine::{ExactPayment, MachineConfig, MachineState, Purchase, VendingMachine};
pub use shared::SharedMachine;
