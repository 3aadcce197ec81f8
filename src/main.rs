// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use caixa::{cli, commands, config, gateway::HttpGateway, notice::Outcome};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("caixa={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let matches = cli::build_cli().get_matches();
    let cfg = config::load(&matches)?;
    init_tracing(&cfg.log_level);

    let gw = HttpGateway::new(&cfg)?;
    tracing::debug!(base_url = %cfg.base_url, "gateway ready");

    let outcome = match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&gw, &cfg, sub).await?,
        Some(("account", sub)) => commands::accounts::handle(&gw, sub).await?,
        Some(("category", sub)) => commands::categories::handle(&gw, sub).await?,
        Some(("tx", sub)) => commands::transactions::handle(&gw, sub).await?,
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
            Outcome::Applied
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Outcome::Applied
        }
    };

    Ok(if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
