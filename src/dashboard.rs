// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, CategoryBreakdownEntry, MonthReport, MonthlySummary};
use crate::dates::YearMonth;
use crate::error::{FailureKind, GatewayError};
use crate::gateway::Gateway;
use crate::models::Transaction;
use crate::notice::{Notice, Outcome};
use crate::registry::FetchTicket;

/// Fetches the transaction snapshot once and derives the month report and
/// the recent list from it. Changing month never refetches.
///
/// The report covers only the selected month while the recent list spans
/// the whole snapshot.
#[derive(Debug)]
pub struct Dashboard {
    snapshot: Vec<Transaction>,
    report: MonthReport,
    recent: Vec<Transaction>,
    recent_limit: usize,
    loading: bool,
    fetch_seq: u64,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn new(month: YearMonth, recent_limit: usize) -> Self {
        Self {
            snapshot: Vec::new(),
            report: aggregate::summarize(&[], month),
            recent: Vec::new(),
            recent_limit,
            loading: false,
            fetch_seq: 0,
            notices: Vec::new(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.report.month
    }

    pub fn report(&self) -> &MonthReport {
        &self.report
    }

    pub fn summary(&self) -> &MonthlySummary {
        &self.report.summary
    }

    pub fn breakdown(&self) -> &[CategoryBreakdownEntry] {
        &self.report.breakdown
    }

    pub fn recent(&self) -> &[Transaction] {
        &self.recent
    }

    pub fn snapshot(&self) -> &[Transaction] {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_seq += 1;
        self.loading = true;
        FetchTicket(self.fetch_seq)
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Transaction>, GatewayError>,
    ) -> Outcome {
        if ticket.0 != self.fetch_seq {
            tracing::debug!(ticket = ticket.0, latest = self.fetch_seq, "dropping stale dashboard fetch");
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(transactions) => {
                self.snapshot = transactions;
                self.recompute(self.report.month);
                Outcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "dashboard fetch failed");
                self.notices.push(Notice::error(format!(
                    "Could not load dashboard data: {}",
                    err
                )));
                Outcome::Failed(FailureKind::Fetch)
            }
        }
    }

    pub async fn load<G: Gateway>(&mut self, gw: &G) -> Outcome {
        let ticket = self.begin_fetch();
        let result = gw.list::<Transaction>().await;
        self.finish_fetch(ticket, result)
    }

    /// Re-runs the aggregation for `month` against the current snapshot.
    pub fn select_month(&mut self, month: YearMonth) {
        tracing::debug!(%month, "month selected");
        self.recompute(month);
    }

    fn recompute(&mut self, month: YearMonth) {
        self.report = aggregate::summarize(&self.snapshot, month);
        self.recent = aggregate::most_recent(&self.snapshot, self.recent_limit);
    }
}
