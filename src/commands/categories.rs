// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::Cell;

use crate::commands::{confirm_gate, print_notices};
use crate::gateway::Gateway;
use crate::models::Category;
use crate::notice::Outcome;
use crate::registry::Catalog;
use crate::utils::{maybe_print_json, pretty_table};

pub async fn handle<G: Gateway>(gw: &G, m: &clap::ArgMatches) -> Result<Outcome> {
    let mut catalog = Catalog::new();
    let outcome = match m.subcommand() {
        Some(("list", sub)) => {
            let loaded = catalog.refresh(gw).await;
            if loaded.is_applied() {
                let categories = catalog.categories.items();
                if !maybe_print_json(sub.get_flag("json"), &categories)? {
                    let rows = categories
                        .iter()
                        .map(|c| vec![Cell::new(c.id), Cell::new(&c.name)])
                        .collect();
                    println!("{}", pretty_table(&["Id", "Category"], rows));
                }
            }
            loaded
        }
        Some(("add", sub)) => {
            catalog.begin_edit::<Category>(None);
            if let (Some(form), Some(name)) = (
                catalog.categories.form_mut(),
                sub.get_one::<String>("name"),
            ) {
                form.name = name.clone();
            }
            catalog.commit::<Category, _>(gw).await
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let loaded = catalog.refresh(gw).await;
            if !loaded.is_applied() {
                print_notices(catalog.take_notices());
                return Ok(loaded);
            }
            let record = catalog
                .categories
                .find(id)
                .cloned()
                .with_context(|| format!("Category #{} not found", id))?;
            catalog.begin_edit(Some(&record));
            if let (Some(form), Some(name)) = (
                catalog.categories.form_mut(),
                sub.get_one::<String>("name"),
            ) {
                form.name = name.clone();
            }
            catalog.commit::<Category, _>(gw).await
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let loaded = catalog.refresh(gw).await;
            if !loaded.is_applied() {
                print_notices(catalog.take_notices());
                return Ok(loaded);
            }
            catalog
                .delete::<Category, _, _>(gw, id, confirm_gate(sub.get_flag("yes")))
                .await
        }
        _ => Outcome::Cancelled,
    };
    print_notices(catalog.take_notices());
    Ok(outcome)
}
