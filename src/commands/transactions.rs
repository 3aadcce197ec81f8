// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;

use crate::commands::{confirm_gate, print_notices};
use crate::dates::{self, YearMonth};
use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionKind};
use crate::notice::Outcome;
use crate::resource::TransactionForm;
use crate::utils::{
    find_record, fmt_money, kind_cell, maybe_print_json, parse_date, parse_decimal, pretty_table,
};

pub async fn handle<G: Gateway>(gw: &G, m: &clap::ArgMatches) -> Result<Outcome> {
    let mut ledger = Ledger::new();
    let loaded = ledger.refresh(gw).await;
    if !loaded.is_applied() {
        print_notices(ledger.take_notices());
        return Ok(loaded);
    }

    let outcome = match m.subcommand() {
        Some(("list", sub)) => {
            list(&ledger, sub)?;
            loaded
        }
        Some(("add", sub)) => {
            ledger.begin_edit(None);
            stage(&mut ledger, sub)?;
            ledger.commit(gw).await
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let record = ledger
                .transactions
                .find(id)
                .cloned()
                .with_context(|| format!("Transaction #{} not found", id))?;
            ledger.begin_edit(Some(&record));
            stage(&mut ledger, sub)?;
            ledger.commit(gw).await
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            ledger
                .delete(gw, id, confirm_gate(sub.get_flag("yes")))
                .await
        }
        _ => Outcome::Cancelled,
    };
    print_notices(ledger.take_notices());
    Ok(outcome)
}

/// Resolves the picker values against the fetched accounts and categories
/// and overlays the given flags onto the staged form.
fn stage(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let account_id = sub
        .get_one::<String>("account")
        .map(|key| find_record(ledger.accounts(), key).map(|a| a.id))
        .transpose()?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|key| find_record(ledger.categories(), key).map(|c| c.id))
        .transpose()?;
    let Some(form) = ledger.transactions.form_mut() else {
        return Ok(());
    };
    fill(form, sub)?;
    if account_id.is_some() {
        form.account_id = account_id;
    }
    if category_id.is_some() {
        form.category_id = category_id;
    }
    Ok(())
}

fn fill(form: &mut TransactionForm, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(description) = sub.get_one::<String>("description") {
        form.description = description.clone();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        form.amount = Some(parse_decimal(amount)?);
    }
    if let Some(date) = sub.get_one::<String>("date") {
        form.date = Some(parse_date(date)?);
    }
    if let Some(typ) = sub.get_one::<String>("type") {
        form.kind = Some(typ.parse::<TransactionKind>().map_err(|e| anyhow!(e))?);
    }
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<YearMonth>())
        .transpose()?;
    let data: Vec<&Transaction> = ledger
        .items()
        .iter()
        .filter(|t| month.is_none_or(|m| m.contains(t.date)))
        .collect();
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|t| {
            vec![
                Cell::new(t.id),
                Cell::new(&t.description),
                Cell::new(fmt_money(t.amount)),
                Cell::new(dates::display(t.date)),
                kind_cell(t.kind),
                Cell::new(t.account_name()),
                Cell::new(t.category_name()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Description", "Amount", "Date", "Type", "Account", "Category"],
            rows,
        )
    );
    Ok(())
}
