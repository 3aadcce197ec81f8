// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend-assigned record key.
pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    #[serde(rename = "ATIVO")]
    Asset,
    #[serde(rename = "PASSIVO")]
    Liability,
    #[serde(rename = "PATRIMONIO_LIQUIDO")]
    Equity,
}

impl AccountKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Asset => "ATIVO",
            Self::Liability => "PASSIVO",
            Self::Equity => "PATRIMONIO_LIQUIDO",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ATIVO" | "ASSET" => Ok(Self::Asset),
            "PASSIVO" | "LIABILITY" => Ok(Self::Liability),
            "PATRIMONIO_LIQUIDO" | "EQUITY" => Ok(Self::Equity),
            other => Err(format!(
                "unknown account type '{}', expected ATIVO, PASSIVO or PATRIMONIO_LIQUIDO",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "RECEITA")]
    Income,
    #[serde(rename = "DESPESA")]
    Expense,
}

impl TransactionKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Income => "RECEITA",
            Self::Expense => "DESPESA",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RECEITA" | "INCOME" => Ok(Self::Income),
            "DESPESA" | "EXPENSE" => Ok(Self::Expense),
            other => Err(format!(
                "unknown transaction type '{}', expected RECEITA or DESPESA",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: AccountKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: String,
}

/// `{id, nome}` object the backend embeds in a transaction listing.
/// Both fields are optional so a drifting payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "data", with = "crate::dates::wire")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "contaId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Id>,
    #[serde(rename = "categoriaId", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    #[serde(rename = "conta", default)]
    pub account: Option<EntityRef>,
    #[serde(rename = "categoria", default)]
    pub category: Option<EntityRef>,
}

/// Whether an expense can be attributed to a named category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorization<'a> {
    Named(&'a str),
    Missing,
}

impl Transaction {
    pub fn categorization(&self) -> Categorization<'_> {
        match self.category.as_ref().and_then(|c| c.name.as_deref()) {
            Some(name) if !name.trim().is_empty() => Categorization::Named(name),
            _ => Categorization::Missing,
        }
    }

    pub fn account_name(&self) -> &str {
        self.account
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or("")
    }

    pub fn category_name(&self) -> &str {
        match self.categorization() {
            Categorization::Named(name) => name,
            Categorization::Missing => "",
        }
    }

    /// Foreign key to the account, taken from `contaId` or the embedded object.
    pub fn account_key(&self) -> Option<Id> {
        self.account_id
            .or_else(|| self.account.as_ref().and_then(|a| a.id))
    }

    pub fn category_key(&self) -> Option<Id> {
        self.category_id
            .or_else(|| self.category.as_ref().and_then(|c| c.id))
    }
}
