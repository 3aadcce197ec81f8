// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::aggregate::round_money;
use crate::dates::{self, DISPLAY_FORMAT};
use crate::models::{Id, TransactionKind};
use crate::resource::Resource;

const UA: &str = concat!("caixa/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()
}

/// Accepts `YYYY-MM-DD` or the `DD/MM/YYYY` form the tables print.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DISPLAY_FORMAT)
        .or_else(|_| dates::from_wire(s))
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: Decimal) -> String {
    format!("R$ {:.2}", round_money(d))
}

pub fn kind_cell(kind: TransactionKind) -> Cell {
    let color = match kind {
        TransactionKind::Income => Color::Green,
        TransactionKind::Expense => Color::Red,
    };
    Cell::new(kind.wire_name()).fg(color)
}

pub fn balance_cell(balance: Decimal) -> Cell {
    let color = if balance >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(fmt_money(balance)).fg(color)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r);
    }
    t
}

/// Looks a record up by id or, failing that, by case-insensitive label.
pub fn find_record<'a, R: Resource>(items: &'a [R], key: &str) -> Result<&'a R> {
    let key = key.trim();
    let by_id = key.parse::<Id>().ok();
    items
        .iter()
        .find(|r| Some(r.id()) == by_id)
        .or_else(|| items.iter().find(|r| r.label().eq_ignore_ascii_case(key)))
        .with_context(|| format!("{} '{}' not found", capitalize(R::KIND.label()), key))
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
