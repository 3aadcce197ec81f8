// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;

use crate::commands::{confirm_gate, print_notices};
use crate::gateway::Gateway;
use crate::models::{Account, AccountKind};
use crate::notice::Outcome;
use crate::registry::Catalog;
use crate::resource::AccountForm;
use crate::utils::{maybe_print_json, pretty_table};

pub async fn handle<G: Gateway>(gw: &G, m: &clap::ArgMatches) -> Result<Outcome> {
    let mut catalog = Catalog::new();
    let outcome = match m.subcommand() {
        Some(("list", sub)) => {
            let loaded = catalog.refresh(gw).await;
            if loaded.is_applied() {
                list(catalog.accounts.items(), sub.get_flag("json"))?;
            }
            loaded
        }
        Some(("add", sub)) => {
            catalog.begin_edit::<Account>(None);
            if let Some(form) = catalog.accounts.form_mut() {
                fill(form, sub)?;
            }
            catalog.commit::<Account, _>(gw).await
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let loaded = catalog.refresh(gw).await;
            if !loaded.is_applied() {
                print_notices(catalog.take_notices());
                return Ok(loaded);
            }
            let record = catalog
                .accounts
                .find(id)
                .cloned()
                .with_context(|| format!("Account #{} not found", id))?;
            catalog.begin_edit(Some(&record));
            if let Some(form) = catalog.accounts.form_mut() {
                fill(form, sub)?;
            }
            catalog.commit::<Account, _>(gw).await
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let loaded = catalog.refresh(gw).await;
            if !loaded.is_applied() {
                print_notices(catalog.take_notices());
                return Ok(loaded);
            }
            catalog
                .delete::<Account, _, _>(gw, id, confirm_gate(sub.get_flag("yes")))
                .await
        }
        _ => Outcome::Cancelled,
    };
    print_notices(catalog.take_notices());
    Ok(outcome)
}

/// Overlays the flags that were given onto the staged form.
fn fill(form: &mut AccountForm, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(name) = sub.get_one::<String>("name") {
        form.name = name.clone();
    }
    if let Some(typ) = sub.get_one::<String>("type") {
        form.kind = Some(typ.parse::<AccountKind>().map_err(|e| anyhow!(e))?);
    }
    Ok(())
}

fn list(accounts: &[Account], json: bool) -> Result<()> {
    if maybe_print_json(json, &accounts)? {
        return Ok(());
    }
    let rows = accounts
        .iter()
        .map(|a| {
            vec![
                Cell::new(a.id),
                Cell::new(&a.name),
                Cell::new(a.kind.wire_name()),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Name", "Type"], rows));
    Ok(())
}
