// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly dashboard figures computed from a fetched transaction snapshot.
//!
//! Everything here is a pure function of its inputs: nothing is cached, so
//! switching the selected month is just another call against the same slice.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::dates::YearMonth;
use crate::models::{Categorization, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    #[serde(rename = "receitasMes", serialize_with = "rust_decimal::serde::float::serialize")]
    pub income: Decimal,
    #[serde(rename = "despesasMes", serialize_with = "rust_decimal::serde::float::serialize")]
    pub expense: Decimal,
    #[serde(rename = "balancoMes", serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdownEntry {
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    pub month: YearMonth,
    pub summary: MonthlySummary,
    pub breakdown: Vec<CategoryBreakdownEntry>,
}

/// Two decimal places, midpoint rounded away from zero (10.005 -> 10.01).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Totals and per-category expenses for the transactions dated in `month`.
///
/// Breakdown entries keep the order in which each category was first seen.
/// Expenses without a usable category still count towards the expense total
/// but are left out of the breakdown.
pub fn summarize(transactions: &[Transaction], month: YearMonth) -> MonthReport {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut by_category: Vec<(&str, Decimal)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions.iter().filter(|t| month.contains(t.date)) {
        if t.kind == TransactionKind::Income {
            income += t.amount;
            continue;
        }
        expense += t.amount;
        match t.categorization() {
            Categorization::Named(name) => {
                let slot = *index.entry(name).or_insert_with(|| {
                    by_category.push((name, Decimal::ZERO));
                    by_category.len() - 1
                });
                by_category[slot].1 += t.amount;
            }
            Categorization::Missing => {
                tracing::warn!(
                    transaction = t.id,
                    "expense without category left out of the breakdown"
                );
            }
        }
    }

    MonthReport {
        month,
        summary: MonthlySummary {
            income,
            expense,
            balance: income - expense,
        },
        breakdown: by_category
            .into_iter()
            .map(|(name, total)| CategoryBreakdownEntry {
                name: name.to_string(),
                value: round_money(total),
            })
            .collect(),
    }
}

/// Newest `n` transactions of the whole snapshot, regardless of month.
/// Same-day entries keep their input order.
pub fn most_recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(n).cloned().collect()
}
