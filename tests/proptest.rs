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

//! Property-based tests for change-making and the transaction engine.
//!
//! These tests verify invariants that should hold for any amount and any
//! sequence of machine operations.

use proptest::prelude::*;
use vending_machine_rs::{
    Cents, Denomination, MoneyLedger, VendingError, VendingMachine, make_change,
};

// =============================================================================
// Arbitrary Strategies
// =============================================================================

fn arb_denomination() -> impl Strategy<Value = Denomination> {
    prop::sample::select(Denomination::DESCENDING.to_vec())
}

/// Multiple of 10 cents up to $1000.
fn arb_payable_amount() -> impl Strategy<Value = u64> {
    (0u64..=10_000).prop_map(|tens| tens * 10)
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Denomination),
    Select(&'static str),
    Purchase,
    Cancel,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_denomination().prop_map(Op::Insert),
        2 => prop::sample::select(vec!["Snickers", "Mars", "Starburst", "Twix"]).prop_map(Op::Select),
        2 => Just(Op::Purchase),
        1 => Just(Op::Cancel),
    ]
}

fn stocked_machine() -> VendingMachine {
    let mut machine = VendingMachine::new("Unit 1");
    machine.add_item("Snickers", Cents::new(125), 3);
    machine.add_item("Mars", Cents::new(100), 2);
    machine.add_item("Starburst", Cents::new(50), 0);
    machine
}

/// Fewest units summing to every amount up to `max` (in cents), by exhaustive
/// dynamic programming. `None` where no combination exists.
fn min_units_table(max: usize) -> Vec<Option<u64>> {
    let mut table = vec![None; max + 1];
    table[0] = Some(0);
    for amount in 1..=max {
        let best = Denomination::all_descending()
            .filter_map(|d| {
                let value = d.value().get() as usize;
                let rest = amount.checked_sub(value)?;
                table[rest].map(|units| units + 1)
            })
            .min();
        table[amount] = best;
    }
    table
}

// =============================================================================
// Change-Making Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Change always sums to the requested amount.
    #[test]
    fn change_totals_the_amount(amount in arb_payable_amount()) {
        let change = make_change(Cents::new(amount)).unwrap();
        prop_assert_eq!(change.total_value(), Cents::new(amount));
    }

    /// Any amount built from inserted denominations can be paid back.
    #[test]
    fn inserted_totals_are_always_payable(
        denominations in prop::collection::vec(arb_denomination(), 0..40),
    ) {
        let ledger = MoneyLedger::from_counts(denominations.iter().map(|&d| (d, 1)));
        let change = make_change(ledger.total_value()).unwrap();
        prop_assert_eq!(change.total_value(), ledger.total_value());
        prop_assert!(change.unit_count() <= ledger.unit_count());
    }
}

#[test]
fn change_is_minimal_and_complete_up_to_fifty_dollars() {
    const MAX: usize = 5_000;
    let table = min_units_table(MAX);

    for (amount, best) in table.iter().enumerate() {
        let result = make_change(Cents::new(amount as u64));
        match best {
            Some(units) => {
                let change = result.unwrap();
                assert_eq!(change.total_value(), Cents::new(amount as u64));
                assert_eq!(change.unit_count(), *units, "amount {amount}");
            }
            None => assert_eq!(
                result,
                Err(VendingError::AmountNotRepresentable(Cents::new(amount as u64)))
            ),
        }
    }
}

// =============================================================================
// Ledger Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Inserting denominations in any order gives the same total.
    #[test]
    fn insertion_order_independent(
        denominations in prop::collection::vec(arb_denomination(), 1..30),
    ) {
        let expected: Cents = denominations.iter().map(|d| d.value()).sum();

        let mut forward = MoneyLedger::empty();
        for &d in &denominations {
            forward.increment(d);
        }

        let mut backward = MoneyLedger::empty();
        for &d in denominations.iter().rev() {
            backward.increment(d);
        }

        prop_assert_eq!(forward.total_value(), expected);
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.unit_count(), denominations.len() as u64);
    }
}

// =============================================================================
// Engine Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// N purchases of an item with stock S leave max(S - N, 0) units; the
    /// ones past S fail with OutOfStock.
    #[test]
    fn stock_is_conserved(stock in 0u32..20, attempts in 0u32..30) {
        let mut machine = VendingMachine::new("Unit 1");
        machine.add_item("Mars", Cents::new(100), stock);

        for attempt in 0..attempts {
            machine.insert_money(Denomination::TwoDollars);
            machine.select_item("Mars").unwrap();
            let result = machine.purchase_item();
            if attempt < stock {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(VendingError::OutOfStock("Mars".into())));
                machine.cancel_transaction();
            }
        }

        prop_assert_eq!(
            machine.item("Mars").unwrap().stock(),
            stock.saturating_sub(attempts)
        );
    }

    /// A completed purchase or a cancellation always resets the transaction,
    /// whatever came before.
    #[test]
    fn purchase_and_cancel_always_reset(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut machine = stocked_machine();

        for op in ops {
            match op {
                Op::Insert(d) => machine.insert_money(d),
                Op::Select(id) => {
                    let before = machine.selection().cloned();
                    if machine.select_item(id).is_err() {
                        prop_assert_eq!(machine.selection().cloned(), before);
                    }
                }
                Op::Purchase => {
                    let inserted = machine.inserted().clone();
                    let selection = machine.selection().cloned();
                    match machine.purchase_item() {
                        Ok(purchase) => {
                            prop_assert!(machine.inserted().is_empty());
                            prop_assert_eq!(machine.selection(), None);
                            prop_assert_eq!(
                                purchase.change.total_value() + purchase.item.price(),
                                inserted.total_value()
                            );
                        }
                        Err(_) => {
                            prop_assert_eq!(machine.inserted(), &inserted);
                            prop_assert_eq!(machine.selection().cloned(), selection);
                        }
                    }
                }
                Op::Cancel => {
                    let inserted = machine.inserted_total();
                    let refund = machine.cancel_transaction();
                    prop_assert_eq!(refund.total_value(), inserted);
                    prop_assert!(machine.inserted().is_empty());
                    prop_assert_eq!(machine.selection(), None);
                }
            }
        }
    }

    /// Money is never created or destroyed: everything inserted comes back
    /// as change, refunds or the price of items sold.
    #[test]
    fn money_is_conserved(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut machine = stocked_machine();
        let mut inserted = Cents::ZERO;
        let mut paid_out = Cents::ZERO;

        for op in ops {
            match op {
                Op::Insert(d) => {
                    inserted += d.value();
                    machine.insert_money(d);
                }
                Op::Select(id) => {
                    let _ = machine.select_item(id);
                }
                Op::Purchase => {
                    if let Ok(purchase) = machine.purchase_item() {
                        paid_out += purchase.change.total_value() + purchase.item.price();
                    }
                }
                Op::Cancel => paid_out += machine.cancel_transaction().total_value(),
            }
        }

        prop_assert_eq!(inserted, paid_out + machine.inserted_total());
    }
}
