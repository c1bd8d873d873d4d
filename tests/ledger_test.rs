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

//! Money ledger, change-making and inventory public API tests.

use vending_machine_rs::{
    Cents, Denomination, Inventory, Item, ItemId, MoneyLedger, VendingError, make_change,
};

// === MoneyLedger ===

#[test]
fn ledger_total_sums_every_denomination() {
    let mut ledger = MoneyLedger::empty();
    for d in Denomination::all_descending() {
        ledger.increment(d);
    }
    assert_eq!(ledger.total_value(), Cents::new(835));
    assert_eq!(ledger.unit_count(), 5);
}

#[test]
fn ledger_counts_snapshot_is_detached() {
    let mut ledger = MoneyLedger::empty();
    ledger.increment(Denomination::OneDollar);
    let snapshot = ledger.counts();
    ledger.increment(Denomination::OneDollar);

    assert_eq!(snapshot[2], (Denomination::OneDollar, 1));
    assert_eq!(ledger.count(Denomination::OneDollar), 2);
}

#[test]
fn ledger_from_counts_matches_increments() {
    let mut incremented = MoneyLedger::empty();
    incremented.increment(Denomination::Quarter);
    incremented.increment(Denomination::Dime);
    incremented.increment(Denomination::Quarter);

    let built = MoneyLedger::from_counts([(Denomination::Quarter, 2), (Denomination::Dime, 1)]);

    assert_eq!(incremented, built);
}

// === Change-Making ===

#[test]
fn change_examples() {
    let cases: [(u64, &[(Denomination, u64)]); 6] = [
        (0, &[]),
        (10, &[(Denomination::Dime, 1)]),
        (35, &[(Denomination::Quarter, 1), (Denomination::Dime, 1)]),
        (175, &[(Denomination::OneDollar, 1), (Denomination::Quarter, 3)]),
        (400, &[(Denomination::TwoDollars, 2)]),
        (
            880,
            &[
                (Denomination::FiveDollars, 1),
                (Denomination::TwoDollars, 1),
                (Denomination::OneDollar, 1),
                (Denomination::Quarter, 2),
                (Denomination::Dime, 3),
            ],
        ),
    ];

    for (amount, expected) in cases {
        assert_eq!(
            make_change(Cents::new(amount)),
            Ok(MoneyLedger::from_counts(expected.iter().copied())),
            "amount {amount}"
        );
    }
}

#[test]
fn change_for_fifteen_cents_is_not_representable() {
    assert_eq!(
        make_change(Cents::new(15)),
        Err(VendingError::AmountNotRepresentable(Cents::new(15)))
    );
}

// === Inventory ===

#[test]
fn inventory_upsert_replaces_whole_record() {
    let mut inventory = Inventory::new();
    inventory.add("Mars", Cents::new(100), 15);

    let replaced = inventory.upsert(Item::new("Mars", Cents::new(110), 4));

    assert_eq!(replaced.map(|item| item.stock()), Some(15));
    assert_eq!(inventory.get("Mars"), Ok(Item::new("Mars", Cents::new(110), 4)));
}

#[test]
fn inventory_decrement_on_empty_stock_fails() {
    let mut inventory = Inventory::new();
    inventory.add("Twix", Cents::new(100), 0);

    assert_eq!(
        inventory.decrement_stock("Twix"),
        Err(VendingError::OutOfStock(ItemId::from("Twix")))
    );
    assert!(!inventory.get("Twix").unwrap().in_stock());
}
