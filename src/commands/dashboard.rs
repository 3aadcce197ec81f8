// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::Cell;

use crate::aggregate::MonthReport;
use crate::commands::print_notices;
use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::dates::{self, YearMonth};
use crate::gateway::Gateway;
use crate::models::Transaction;
use crate::notice::Outcome;
use crate::utils::{balance_cell, fmt_money, kind_cell, maybe_print_json, pretty_table};

#[derive(serde::Serialize)]
struct DashboardView<'a> {
    months: Vec<MonthReport>,
    recent: &'a [Transaction],
}

pub async fn handle<G: Gateway>(gw: &G, cfg: &AppConfig, m: &clap::ArgMatches) -> Result<Outcome> {
    let months = match m.get_many::<String>("month") {
        Some(values) => values
            .map(|s| s.parse::<YearMonth>())
            .collect::<Result<Vec<_>>>()?,
        None => vec![YearMonth::current()],
    };
    let recent_limit = m
        .get_one::<usize>("recent")
        .copied()
        .unwrap_or(cfg.recent_limit);

    let mut board = Dashboard::new(months[0], recent_limit);
    let outcome = board.load(gw).await;
    print_notices(board.take_notices());
    if !outcome.is_applied() {
        return Ok(outcome);
    }

    let mut reports = Vec::with_capacity(months.len());
    for month in months {
        board.select_month(month);
        reports.push(board.report().clone());
    }

    let view = DashboardView {
        months: reports,
        recent: board.recent(),
    };
    if maybe_print_json(m.get_flag("json"), &view)? {
        return Ok(outcome);
    }

    for report in &view.months {
        print_month(report);
    }
    println!("Latest transactions (all months)");
    println!("{}", recent_table(view.recent));
    Ok(outcome)
}

fn print_month(report: &MonthReport) {
    let s = &report.summary;
    println!("Dashboard {}", report.month);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                Cell::new(fmt_money(s.income)),
                Cell::new(fmt_money(s.expense)),
                balance_cell(s.balance),
            ]],
        )
    );
    if report.breakdown.is_empty() {
        println!("No expenses recorded in the selected month.");
    } else {
        let rows = report
            .breakdown
            .iter()
            .map(|e| vec![Cell::new(&e.name), Cell::new(fmt_money(e.value))])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
}

fn recent_table(recent: &[Transaction]) -> comfy_table::Table {
    let rows = recent
        .iter()
        .map(|t| {
            vec![
                Cell::new(dates::display(t.date)),
                Cell::new(&t.description),
                Cell::new(t.account_name()),
                Cell::new(fmt_money(t.amount)),
                kind_cell(t.kind),
            ]
        })
        .collect();
    pretty_table(&["Date", "Description", "Account", "Amount", "Type"], rows)
}
