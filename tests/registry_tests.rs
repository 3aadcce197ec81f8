// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use caixa::error::{FailureKind, ValidationError};
use caixa::models::{Account, AccountKind, Category};
use caixa::notice::{NoticeLevel, Outcome};
use caixa::registry::{Catalog, Registry};
use caixa::resource::{AccountForm, Resource};
use common::MemoryGateway;

fn always(_: &str) -> bool {
    true
}

fn never(_: &str) -> bool {
    false
}

#[tokio::test]
async fn account_without_type_never_reaches_gateway() {
    let gw = MemoryGateway::new();
    let mut catalog = Catalog::new();

    catalog.begin_edit::<Account>(None);
    if let Some(form) = catalog.accounts.form_mut() {
        form.name = "Banco".into();
    }
    let outcome = catalog.commit::<Account, _>(&gw).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Validation));
    assert!(gw.calls().is_empty());
    let notices = catalog.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    // the intent stays open for correction
    assert_eq!(catalog.accounts.form_mut().map(|f| f.name.clone()), Some("Banco".into()));
}

#[test]
fn blank_names_are_rejected() {
    let form = AccountForm {
        name: "   ".into(),
        kind: Some(AccountKind::Asset),
    };
    assert_eq!(Account::validate(&form), Err(ValidationError::Missing("nome")));
}

#[test]
fn account_form_requires_type() {
    let form = AccountForm {
        name: "Banco".into(),
        kind: None,
    };
    assert_eq!(Account::validate(&form), Err(ValidationError::Missing("tipo")));
}

#[tokio::test]
async fn created_account_shows_up_after_refetch() {
    let gw = MemoryGateway::new();
    let mut catalog = Catalog::new();
    assert!(catalog.refresh(&gw).await.is_applied());
    assert!(catalog.accounts.items().is_empty());

    catalog.begin_edit::<Account>(None);
    if let Some(form) = catalog.accounts.form_mut() {
        form.name = "Carteira".into();
        form.kind = Some(AccountKind::Asset);
    }
    let outcome = catalog.commit::<Account, _>(&gw).await;

    assert_eq!(outcome, Outcome::Applied);
    assert!(catalog.accounts.edit().is_none());
    let accounts = catalog.accounts.items();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name, "Carteira");
    assert_eq!(accounts[0].kind, AccountKind::Asset);
    assert_eq!(gw.mutation_calls(), vec!["POST /contas".to_string()]);

    let id = accounts[0].id;
    let outcome = catalog.delete::<Account, _, _>(&gw, id, always).await;
    assert_eq!(outcome, Outcome::Applied);
    assert!(catalog.accounts.items().is_empty());
    assert!(gw.rows("contas").is_empty());
}

#[tokio::test]
async fn editing_sends_update_for_the_same_id() {
    let gw = MemoryGateway::new();
    let id = gw.category("Mercado");
    let mut catalog = Catalog::new();
    let _ = catalog.refresh(&gw).await;

    let record = catalog.categories.find(id).cloned().unwrap();
    catalog.begin_edit(Some(&record));
    let intent = catalog.categories.edit().unwrap();
    assert!(!intent.is_new());
    assert_eq!(intent.form.name, "Mercado");

    if let Some(form) = catalog.categories.form_mut() {
        form.name = "Alimentação".into();
    }
    let outcome = catalog.commit::<Category, _>(&gw).await;

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(gw.mutation_calls(), vec![format!("PUT /categorias/{}", id)]);
    assert_eq!(catalog.categories.items()[0].name, "Alimentação");
    let notices = catalog.take_notices();
    assert!(notices.iter().any(|n| n.message.contains("updated")));
}

#[tokio::test]
async fn failed_delete_keeps_listing_and_reports() {
    let gw = MemoryGateway::new();
    let id = gw.category("Transporte");
    let mut catalog = Catalog::new();
    let _ = catalog.refresh(&gw).await;
    let _ = catalog.take_notices();

    gw.fail_mutations();
    let outcome = catalog.delete::<Category, _, _>(&gw, id, always).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Mutation));
    assert_eq!(catalog.categories.items().len(), 1);
    let notices = catalog.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    // no refetch after a failed mutation
    assert_eq!(gw.calls().last().map(String::as_str), Some(format!("DELETE /categorias/{}", id).as_str()));

    gw.heal();
    assert!(catalog.refresh(&gw).await.is_applied());
    assert_eq!(catalog.categories.find(id).map(|c| c.name.as_str()), Some("Transporte"));
}

#[tokio::test]
async fn rejected_save_keeps_the_intent() {
    let gw = MemoryGateway::new();
    gw.fail_mutations();
    let mut registry: Registry<Category> = Registry::new();

    registry.begin_edit(None);
    if let Some(form) = registry.form_mut() {
        form.name = "Lazer".into();
    }
    let outcome = registry.commit(&gw).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Mutation));
    assert_eq!(registry.edit().map(|e| e.form.name.as_str()), Some("Lazer"));
    assert_eq!(gw.calls(), vec!["POST /categorias".to_string()]);
    assert!(registry.notices()[0].is_error());
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let gw = MemoryGateway::new();
    let id = gw.account("Banco", "ATIVO");
    let mut registry: Registry<Account> = Registry::new();
    let _ = registry.refresh(&gw).await;

    let mut asked = Vec::new();
    let outcome = registry
        .delete(&gw, id, |prompt: &str| {
            asked.push(prompt.to_string());
            never(prompt)
        })
        .await;

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(asked, vec![format!("Delete account 'Banco' (#{})?", id)]);
    assert!(gw.mutation_calls().is_empty());
    assert_eq!(registry.items().len(), 1);
}

#[tokio::test]
async fn submit_without_intent_is_a_no_op() {
    let gw = MemoryGateway::new();
    let mut registry: Registry<Category> = Registry::new();
    assert_eq!(registry.submit(&gw).await, Outcome::Cancelled);
    assert!(gw.calls().is_empty());
}

#[test]
fn opening_a_new_intent_discards_the_old_one() {
    let mut registry: Registry<Category> = Registry::new();
    let existing = Category {
        id: 4,
        name: "Casa".into(),
    };
    registry.begin_edit(Some(&existing));
    if let Some(form) = registry.form_mut() {
        form.name = "Casa e jardim".into();
    }
    registry.begin_edit(None);
    let intent = registry.edit().unwrap();
    assert!(intent.is_new());
    assert!(intent.form.name.is_empty());

    registry.cancel_edit();
    assert!(registry.edit().is_none());
}

#[test]
fn stale_fetch_results_are_dropped() {
    let mut registry: Registry<Category> = Registry::new();
    let first = registry.begin_fetch();
    let second = registry.begin_fetch();

    let late = vec![Category {
        id: 1,
        name: "Old".into(),
    }];
    assert_eq!(registry.finish_fetch(first, Ok(late)), Outcome::Stale);
    assert!(registry.is_loading());
    assert!(registry.items().is_empty());

    let fresh = vec![Category {
        id: 2,
        name: "New".into(),
    }];
    assert_eq!(registry.finish_fetch(second, Ok(fresh)), Outcome::Applied);
    assert!(!registry.is_loading());
    assert_eq!(registry.items()[0].name, "New");
}

#[tokio::test]
async fn failed_fetch_keeps_previous_listing() {
    let gw = MemoryGateway::new();
    gw.category("Casa");
    let mut registry: Registry<Category> = Registry::new();
    let _ = registry.refresh(&gw).await;

    gw.fail_list("categorias");
    let outcome = registry.refresh(&gw).await;
    assert_eq!(outcome, Outcome::Failed(FailureKind::Fetch));
    assert!(!registry.is_loading());
    assert_eq!(registry.items().len(), 1);
    assert!(registry.take_notices()[0].message.starts_with("Could not load category list"));
}

#[tokio::test]
async fn catalog_load_fails_as_a_whole() {
    let gw = MemoryGateway::new();
    gw.account("Banco", "ATIVO");
    gw.fail_list("categorias");
    let mut catalog = Catalog::new();

    let outcome = catalog.refresh(&gw).await;

    assert_eq!(outcome, Outcome::Failed(FailureKind::Fetch));
    assert!(catalog.accounts.items().is_empty());
    assert!(!catalog.accounts.is_loading());
    assert!(!catalog.categories.is_loading());
    assert_eq!(catalog.take_notices().len(), 1);
}

#[test]
fn registers_screen_holds_a_single_intent() {
    let mut catalog = Catalog::new();
    let existing = Account {
        id: 1,
        name: "Banco".into(),
        kind: AccountKind::Asset,
    };
    catalog.begin_edit(Some(&existing));
    assert!(catalog.accounts.edit().is_some());

    catalog.begin_edit::<Category>(None);
    assert!(catalog.accounts.edit().is_none());
    assert!(catalog.categories.edit().is_some_and(|e| e.is_new()));

    catalog.begin_edit::<Account>(None);
    assert!(catalog.categories.edit().is_none());
    assert!(catalog.accounts.edit().is_some());
}
