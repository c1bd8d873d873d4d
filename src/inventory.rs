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

//! Item records and the machine's stock.
//!
//! # Example
//!
//! ```
//! use vending_machine_rs::{Cents, Inventory};
//!
//! let mut inventory = Inventory::new();
//! inventory.add("Snickers", Cents::new(125), 10);
//! inventory.decrement_stock("Snickers").unwrap();
//! assert_eq!(inventory.get("Snickers").unwrap().stock(), 9);
//! ```

use crate::VendingError;
use crate::base::{Cents, ItemId};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

/// A purchasable item: identifier, unit price and units left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    price: Cents,
    stock: u32,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, price: Cents, stock: u32) -> Self {
        Self {
            id: id.into(),
            price,
            stock,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name; the identifier doubles as the name.
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    pub fn price(&self) -> Cents {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Item", 3)?;
        state.serialize_field("item", &self.id)?;
        state.serialize_field("price", &self.price.to_dollars())?;
        state.serialize_field("stock", &self.stock)?;
        state.end()
    }
}

/// Items keyed by identifier, listed in insertion order.
///
/// Overwriting an existing identifier keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
    /// Position of each identifier in `items`.
    index: HashMap<ItemId, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the record for `id`, returning the record it
    /// replaced.
    pub fn add(&mut self, id: impl Into<ItemId>, price: Cents, stock: u32) -> Option<Item> {
        self.upsert(Item::new(id, price, stock))
    }

    /// Inserts or overwrites a whole item record, returning the record it
    /// replaced.
    pub fn upsert(&mut self, item: Item) -> Option<Item> {
        match self.index.get(item.id()) {
            Some(&position) => Some(std::mem::replace(&mut self.items[position], item)),
            None => {
                self.index.insert(item.id().clone(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Returns a copy of the record for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`VendingError::ItemNotFound`] if `id` is unknown.
    pub fn get(&self, id: &str) -> Result<Item, VendingError> {
        self.find(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Takes one unit of `id` out of stock, returning the units left.
    ///
    /// # Errors
    ///
    /// - [`VendingError::ItemNotFound`] if `id` is unknown.
    /// - [`VendingError::OutOfStock`] if the item has no units left; stock
    ///   stays at zero.
    pub fn decrement_stock(&mut self, id: &str) -> Result<u32, VendingError> {
        let position = self.position(id)?;
        let item = &mut self.items[position];
        if item.stock == 0 {
            return Err(VendingError::OutOfStock(item.id.clone()));
        }
        item.stock -= 1;
        Ok(item.stock)
    }

    /// Snapshot of every item in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find(&self, id: &str) -> Result<&Item, VendingError> {
        self.position(id).map(|position| &self.items[position])
    }

    fn position(&self, id: &str) -> Result<usize, VendingError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| VendingError::ItemNotFound(ItemId::from(id)))
    }
}
