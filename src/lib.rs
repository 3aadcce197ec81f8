// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod models;
pub mod notice;
pub mod registry;
pub mod resource;
pub mod utils;
