// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! List state plus a single edit intent for one backend collection.
//!
//! Every successful mutation is followed by a full refetch; the listed
//! collection is only ever replaced by what the gateway returned.

use crate::error::{FailureKind, GatewayError};
use crate::gateway::Gateway;
use crate::models::{Account, Category, Id};
use crate::notice::{Notice, Outcome};
use crate::resource::Resource;
use crate::utils::capitalize;

/// Identifies one fetch; only the most recently issued ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(pub(crate) u64);

/// Synchronous yes/no gate shown before a deletion is sent.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone)]
pub struct EditIntent<R: Resource> {
    editing: Option<R>,
    pub form: R::Form,
}

impl<R: Resource> EditIntent<R> {
    /// `None` when creating a new record.
    pub fn editing(&self) -> Option<&R> {
        self.editing.as_ref()
    }

    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }
}

#[derive(Debug)]
pub struct Registry<R: Resource> {
    items: Vec<R>,
    loading: bool,
    fetch_seq: u64,
    edit: Option<EditIntent<R>>,
    notices: Vec<Notice>,
}

impl<R: Resource> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Registry<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            fetch_seq: 0,
            edit: None,
            notices: Vec::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn find(&self, id: Id) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn edit(&self) -> Option<&EditIntent<R>> {
        self.edit.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Form> {
        self.edit.as_mut().map(|e| &mut e.form)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        self.loading = true;
        FetchTicket(self.fetch_seq)
    }

    /// Applies a fetch result unless a newer fetch has been started since.
    /// A failed fetch leaves the previous listing in place.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<R>, GatewayError>,
    ) -> Outcome {
        if ticket.0 != self.fetch_seq {
            tracing::debug!(kind = %R::KIND, ticket = ticket.0, latest = self.fetch_seq, "dropping stale fetch");
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(kind = %R::KIND, count = items.len(), "listing refreshed");
                self.items = items;
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(kind = %R::KIND, error = %err, "fetch failed");
                self.notify(Notice::error(format!(
                    "Could not load {} list: {}",
                    R::KIND,
                    err
                )));
                Outcome::Failed(FailureKind::Fetch)
            }
        }
    }

    /// Ends a fetch that produced nothing to apply, without a notice.
    pub fn abort_fetch(&mut self, ticket: FetchTicket) {
        if ticket.0 == self.fetch_seq {
            self.loading = false;
        }
    }

    pub async fn refresh<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let ticket = self.begin_fetch();
        let result = gw.list::<R>().await;
        self.finish_fetch(ticket, result)
    }

    /// Opens the editor. `None` starts a blank record; any intent already
    /// open is discarded.
    pub fn begin_edit(&mut self, record: Option<&R>) {
        if self.edit.is_some() {
            tracing::debug!(kind = %R::KIND, "discarding open edit intent");
        }
        self.edit = Some(EditIntent {
            form: record.map(R::seed).unwrap_or_default(),
            editing: record.cloned(),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Validates and sends the open intent without refetching. The intent is
    /// kept on any failure so it can be corrected and retried.
    pub async fn submit<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let Some(intent) = self.edit.as_ref() else {
            tracing::debug!(kind = %R::KIND, "submit without an open edit intent");
            return Outcome::Cancelled;
        };

        let input = match R::validate(&intent.form) {
            Ok(input) => input,
            Err(err) => {
                self.notify(Notice::error(format!("Cannot save {}: {}", R::KIND, err)));
                return Outcome::Failed(FailureKind::Validation);
            }
        };

        let result = match intent.editing.as_ref().map(R::id) {
            Some(id) => gw.update::<R>(id, &input).await,
            None => gw.create::<R>(&input).await,
        };

        match result {
            Ok(saved) => {
                let verb = if intent.is_new() { "created" } else { "updated" };
                tracing::info!(kind = %R::KIND, id = saved.id(), "{}", verb);
                self.notify(Notice::success(format!(
                    "{} '{}' {}",
                    capitalize(R::KIND.label()),
                    saved.label(),
                    verb
                )));
                self.edit = None;
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(kind = %R::KIND, error = %err, "save rejected");
                self.notify(Notice::error(format!("Error saving {}: {}", R::KIND, err)));
                Outcome::Failed(FailureKind::Mutation)
            }
        }
    }

    /// Submit, then refetch the collection on success.
    pub async fn commit<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let outcome = self.submit(gw).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }

    /// Asks `confirm` and, if accepted, sends the deletion without
    /// refetching. The listing is untouched either way.
    pub async fn remove<G: Gateway, C: Confirm>(
        &mut self,
        gw: &G,
        id: Id,
        mut confirm: C,
    ) -> Outcome {
        let prompt = match self.find(id) {
            Some(record) => format!("Delete {} '{}' (#{})?", R::KIND, record.label(), id),
            None => format!("Delete {} #{}?", R::KIND, id),
        };
        if !confirm.confirm(&prompt) {
            tracing::debug!(kind = %R::KIND, id, "deletion declined");
            return Outcome::Cancelled;
        }

        match gw.delete::<R>(id).await {
            Ok(()) => {
                tracing::info!(kind = %R::KIND, id, "deleted");
                self.notify(Notice::success(format!(
                    "{} #{} deleted",
                    capitalize(R::KIND.label()),
                    id
                )));
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(kind = %R::KIND, id, error = %err, "delete rejected");
                self.notify(Notice::error(format!(
                    "Error deleting {} #{}: {}",
                    R::KIND,
                    id,
                    err
                )));
                Outcome::Failed(FailureKind::Mutation)
            }
        }
    }

    pub async fn delete<G: Gateway, C: Confirm>(&mut self, gw: &G, id: Id, confirm: C) -> Outcome {
        let outcome = self.remove(gw, id, confirm).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }
}

/// Entity kinds managed on the registers screen.
pub trait CatalogEntry: Resource {
    fn registry(catalog: &mut Catalog) -> &mut Registry<Self>;
}

impl CatalogEntry for Account {
    fn registry(catalog: &mut Catalog) -> &mut Registry<Self> {
        &mut catalog.accounts
    }
}

impl CatalogEntry for Category {
    fn registry(catalog: &mut Catalog) -> &mut Registry<Self> {
        &mut catalog.categories
    }
}

/// Accounts and categories, fetched together. Which collection an action
/// targets is always the explicit type parameter, never a remembered tab.
#[derive(Debug, Default)]
pub struct Catalog {
    pub accounts: Registry<Account>,
    pub categories: Registry<Category>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry<R: CatalogEntry>(&mut self) -> &mut Registry<R> {
        R::registry(self)
    }

    /// Both lists at once; either failing fails the whole load and neither
    /// listing is replaced.
    pub async fn refresh<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let accounts_ticket = self.accounts.begin_fetch();
        let categories_ticket = self.categories.begin_fetch();
        match tokio::try_join!(gw.list::<Account>(), gw.list::<Category>()) {
            Ok((accounts, categories)) => {
                let a = self.accounts.finish_fetch(accounts_ticket, Ok(accounts));
                let c = self.categories.finish_fetch(categories_ticket, Ok(categories));
                if a.is_applied() && c.is_applied() {
                    Outcome::Applied
                } else {
                    Outcome::Stale
                }
            }
            Err(err) => {
                // One notice for the pair.
                self.categories.abort_fetch(categories_ticket);
                self.accounts.finish_fetch(accounts_ticket, Err(err))
            }
        }
    }

    /// Opens the editor for `R`. The screen has a single editor, so an
    /// intent open on the other collection is dropped.
    pub fn begin_edit<R: CatalogEntry>(&mut self, record: Option<&R>) {
        self.accounts.cancel_edit();
        self.categories.cancel_edit();
        self.registry::<R>().begin_edit(record);
    }

    /// Saves the open intent of `R`, then reloads both lists.
    pub async fn commit<R: CatalogEntry, G: Gateway>(&mut self, gw: &G) -> Outcome {
        let outcome = self.registry::<R>().submit(gw).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }

    pub async fn delete<R: CatalogEntry, G: Gateway, C: Confirm>(
        &mut self,
        gw: &G,
        id: Id,
        confirm: C,
    ) -> Outcome {
        let outcome = self.registry::<R>().remove(gw, id, confirm).await;
        if outcome.is_applied() {
            let _ = self.refresh(gw).await;
        }
        outcome
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = self.accounts.take_notices();
        notices.extend(self.categories.take_notices());
        notices
    }
}
