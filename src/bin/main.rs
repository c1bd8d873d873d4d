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

use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vending_machine_rs::{
    Cents, Denomination, ExactPayment, MachineConfig, VendingError, VendingMachine,
};

/// Vending Machine - Replay a CSV script of machine operations
///
/// Runs each row against one machine and writes the final inventory to
/// stdout. Purchases, refunds and rejected rows are logged to stderr
/// (set RUST_LOG=info to see them all).
#[derive(Parser, Debug)]
#[command(name = "vending-machine-rs")]
#[command(about = "Replays vending machine operations from a CSV script", long_about = None)]
struct Args {
    /// Path to CSV file with operations
    ///
    /// Expected format: action,item,amount,stock
    /// Example: cargo run -- script.csv > inventory.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Machine label used in log output
    #[arg(long, default_value = "Unit 1")]
    name: String,

    /// Let a payment equal to the price complete with no change
    ///
    /// By default the inserted total must exceed the price.
    #[arg(long)]
    accept_exact_payment: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let exact_payment = if args.accept_exact_payment {
        ExactPayment::Accept
    } else {
        ExactPayment::Reject
    };
    let machine = VendingMachine::with_config(
        MachineConfig::new(args.name).with_exact_payment(exact_payment),
    );

    let machine = match process_script(BufReader::new(file), machine) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("Error processing script: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_inventory(&machine, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Raw CSV record matching the script format.
///
/// Fields: `action, item, amount, stock`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    action: String,
    item: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
    #[serde(deserialize_with = "csv::invalid_option")]
    stock: Option<u32>,
}

/// One machine operation from the script.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add {
        item: String,
        price: Cents,
        stock: u32,
    },
    Insert(Denomination),
    Select(String),
    Purchase,
    Cancel,
}

/// Reasons a script row is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
enum ScriptError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("{action} requires {field}")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },

    #[error("amount {0} is not a whole number of cents")]
    InvalidAmount(Decimal),

    #[error(transparent)]
    Vending(#[from] VendingError),
}

impl CsvRecord {
    /// Converts a CSV record to a machine command.
    fn into_command(self) -> Result<Command, ScriptError> {
        match self.action.to_lowercase().as_str() {
            "add" => {
                let item = self.item.ok_or(ScriptError::MissingField {
                    action: "add",
                    field: "item",
                })?;
                let price = self.amount.ok_or(ScriptError::MissingField {
                    action: "add",
                    field: "amount",
                })?;
                let stock = self.stock.ok_or(ScriptError::MissingField {
                    action: "add",
                    field: "stock",
                })?;
                Ok(Command::Add {
                    item,
                    price: to_cents(price)?,
                    stock,
                })
            }
            "insert" => {
                let amount = self.amount.ok_or(ScriptError::MissingField {
                    action: "insert",
                    field: "amount",
                })?;
                Ok(Command::Insert(Denomination::from_cents(to_cents(amount)?)?))
            }
            "select" => {
                let item = self.item.ok_or(ScriptError::MissingField {
                    action: "select",
                    field: "item",
                })?;
                Ok(Command::Select(item))
            }
            "purchase" => Ok(Command::Purchase),
            "cancel" => Ok(Command::Cancel),
            other => Err(ScriptError::UnknownAction(other.to_owned())),
        }
    }
}

fn to_cents(dollars: Decimal) -> Result<Cents, ScriptError> {
    Cents::from_dollars(dollars).ok_or(ScriptError::InvalidAmount(dollars))
}

/// Applies one command, returning a short description of what happened.
fn apply(machine: &mut VendingMachine, command: Command) -> Result<String, VendingError> {
    match command {
        Command::Add { item, price, stock } => {
            machine.add_item(item.as_str(), price, stock);
            Ok(format!("stocked {item} at {price} x {stock}"))
        }
        Command::Insert(denomination) => {
            machine.insert_money(denomination);
            Ok(format!(
                "inserted {denomination}, total {}",
                machine.inserted_total()
            ))
        }
        Command::Select(item) => {
            machine.select_item(&item)?;
            Ok(format!("selected {item}"))
        }
        Command::Purchase => {
            let purchase = machine.purchase_item()?;
            Ok(format!(
                "purchased {}, change {} ({})",
                purchase.item.id(),
                purchase.change.total_value(),
                purchase.change
            ))
        }
        Command::Cancel => {
            let refund = machine.cancel_transaction();
            Ok(format!("refunded {} ({})", refund.total_value(), refund))
        }
    }
}

/// Replay a CSV script against `machine`.
///
/// Rows are processed in order. Malformed rows, unknown actions and rejected
/// operations are logged and skipped. Only a failing reader stops the run.
///
/// # CSV Format
///
/// Expected columns: `action, item, amount, stock`
/// - `action`: add, insert, select, purchase or cancel
/// - `item`: Item identifier (add, select)
/// - `amount`: Dollars; the price for add, one denomination for insert
/// - `stock`: Units to stock (add)
///
/// # Example
///
/// ```csv
/// action,item,amount,stock
/// add,Snickers,1.25,10
/// insert,,5.00,
/// select,Snickers,,
/// purchase,,,
/// ```
///
/// # Errors
///
/// Returns a CSV error if reading the underlying input fails. Rows that do
/// not parse are skipped, not returned.
fn process_script<R: Read>(
    reader: R,
    mut machine: VendingMachine,
) -> Result<VendingMachine, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for (row, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        let line = row + 2; // 1-indexed, skip header
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                warn!(line, reason = %e, "skipping script row");
                continue;
            }
        };
        let command = match record.into_command() {
            Ok(command) => command,
            Err(e) => {
                warn!(line, reason = %e, "skipping script row");
                continue;
            }
        };

        match apply(&mut machine, command) {
            Ok(outcome) => info!(line, "{outcome}"),
            // The machine already logs why it rejected the operation.
            Err(e) => debug!(line, reason = %e, "operation rejected"),
        }
    }

    Ok(machine)
}

/// Write the machine's inventory to a CSV writer.
///
/// # CSV Format
///
/// Columns: `item, price, stock`
///
/// ```csv
/// item,price,stock
/// Snickers,1.25,9
/// Mars,1.00,14
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_inventory<W: Write>(machine: &VendingMachine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for item in machine.inventory().iter() {
        wtr.serialize(item)?;
    }

    wtr.flush()?;
    Ok(())
}
