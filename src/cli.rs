// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm without prompting")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn account_cmd() -> Command {
    let name = Arg::new("name").long("name").help("Account name");
    let typ = Arg::new("type")
        .long("type")
        .help("ATIVO, PASSIVO or PATRIMONIO_LIQUIDO");
    Command::new("account")
        .about("Manage accounts")
        .subcommand(Command::new("list").about("List accounts").arg(json_flag()))
        .subcommand(
            Command::new("add")
                .about("Create an account")
                .arg(name.clone())
                .arg(typ.clone()),
        )
        .subcommand(
            Command::new("edit")
                .about("Update an account")
                .arg(id_arg())
                .arg(name)
                .arg(typ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

fn category_cmd() -> Command {
    let name = Arg::new("name").long("name").help("Category name");
    Command::new("category")
        .about("Manage categories")
        .subcommand(Command::new("list").about("List categories").arg(json_flag()))
        .subcommand(Command::new("add").about("Create a category").arg(name.clone()))
        .subcommand(
            Command::new("edit")
                .about("Rename a category")
                .arg(id_arg())
                .arg(name),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

fn tx_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("description").long("description").help("Description"))
        .arg(Arg::new("amount").long("amount").help("Non-negative amount"))
        .arg(
            Arg::new("date")
                .long("date")
                .help("YYYY-MM-DD or DD/MM/YYYY"),
        )
        .arg(Arg::new("type").long("type").help("RECEITA or DESPESA"))
        .arg(Arg::new("account").long("account").help("Account id or name"))
        .arg(
            Arg::new("category")
                .long("category")
                .help("Category id or name"),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Manage transactions")
        .subcommand(
            Command::new("list")
                .about("List transactions")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Only show YYYY-MM"),
                )
                .arg(json_flag()),
        )
        .subcommand(tx_fields(Command::new("add").about("Record a transaction")))
        .subcommand(tx_fields(
            Command::new("edit")
                .about("Update a transaction")
                .arg(id_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(id_arg())
                .arg(yes_flag()),
        )
}

pub fn build_cli() -> Command {
    Command::new("caixa")
        .about("Monthly finance dashboard and bookkeeping client")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Config file (TOML)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .env("CAIXA_BASE_URL")
                .help("Backend API base URL"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("trace, debug, info, warn or error"),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly totals, expenses by category and latest transactions")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .action(ArgAction::Append)
                        .help("YYYY-MM; repeat to compare months (default: current)"),
                )
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .value_parser(value_parser!(usize))
                        .help("How many recent transactions to show"),
                )
                .arg(json_flag()),
        )
        .subcommand(account_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(Command::new("config").about("Show the effective configuration"))
}
