// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::notice::{Notice, NoticeLevel};

pub mod accounts;
pub mod categories;
pub mod dashboard;
pub mod transactions;

/// Successes go to stdout, errors to stderr.
pub fn print_notices(notices: Vec<Notice>) {
    for n in notices {
        match n.level {
            NoticeLevel::Success => println!("{}", n.message),
            NoticeLevel::Error => eprintln!("error: {}", n.message),
        }
    }
}

/// `--yes` confirms outright. Otherwise asks on a terminal and declines when
/// stdin is not one.
pub fn confirm_gate(yes: bool) -> impl FnMut(&str) -> bool {
    move |prompt: &str| {
        if yes {
            return true;
        }
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            eprintln!("{} (not confirmed; pass --yes)", prompt);
            return false;
        }
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "s" | "sim"
        )
    }
}
