// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::models::{Account, Category, Id, Transaction};
use crate::notice::{Notice, Outcome};
use crate::registry::{Confirm, Registry};

/// Transactions screen: the transaction registry plus the account and
/// category lists its editor picks from.
#[derive(Debug, Default)]
pub struct Ledger {
    pub transactions: Registry<Transaction>,
    accounts: Vec<Account>,
    categories: Vec<Category>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Transaction] {
        self.transactions.items()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.transactions.is_loading()
    }

    /// Loads all three collections concurrently. The first failure fails the
    /// whole load: one notice, nothing replaced.
    pub async fn refresh<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let ticket = self.transactions.begin_fetch();
        let fetched = tokio::try_join!(
            gw.list::<Transaction>(),
            gw.list::<Account>(),
            gw.list::<Category>()
        );
        match fetched {
            Ok((transactions, accounts, categories)) => {
                let outcome = self.transactions.finish_fetch(ticket, Ok(transactions));
                if outcome.is_applied() {
                    self.accounts = accounts;
                    self.categories = categories;
                }
                outcome
            }
            Err(err) => self.transactions.finish_fetch(ticket, Err(err)),
        }
    }

    pub fn begin_edit(&mut self, record: Option<&Transaction>) {
        self.transactions.begin_edit(record);
    }

    pub fn cancel_edit(&mut self) {
        self.transactions.cancel_edit();
    }

    pub async fn commit<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let outcome = self.transactions.submit(gw).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }

    pub async fn delete<G: Gateway, C: Confirm>(&mut self, gw: &G, id: Id, confirm: C) -> Outcome {
        let outcome = self.transactions.remove(gw, id, confirm).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.transactions.take_notices()
    }
}
