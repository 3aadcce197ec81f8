// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Binds each backend collection to the form the user edits and the payload
//! sent on create/update.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::ValidationError;
use crate::models::{Account, AccountKind, Category, Id, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Category,
    Transaction,
}

impl EntityKind {
    /// Collection path on the backend.
    pub fn path(self) -> &'static str {
        match self {
            Self::Account => "contas",
            Self::Category => "categorias",
            Self::Transaction => "lancamentos",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Category => "category",
            Self::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub trait Resource: Clone + fmt::Debug + DeserializeOwned {
    const KIND: EntityKind;

    /// Body of `POST /{path}` and `PUT /{path}/{id}`.
    type Input: Serialize + fmt::Debug;
    /// Staged edit state, blank on create.
    type Form: Default + Clone + fmt::Debug;

    fn id(&self) -> Id;
    fn label(&self) -> &str;
    fn seed(&self) -> Self::Form;
    fn validate(form: &Self::Form) -> Result<Self::Input, ValidationError>;
}

fn required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub name: String,
    pub kind: Option<AccountKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInput {
    pub nome: String,
    pub tipo: AccountKind,
}

impl Resource for Account {
    const KIND: EntityKind = EntityKind::Account;
    type Input = AccountInput;
    type Form = AccountForm;

    fn id(&self) -> Id {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn seed(&self) -> AccountForm {
        AccountForm {
            name: self.name.clone(),
            kind: Some(self.kind),
        }
    }

    fn validate(form: &AccountForm) -> Result<AccountInput, ValidationError> {
        Ok(AccountInput {
            nome: required_text(&form.name, "nome")?,
            tipo: form.kind.ok_or(ValidationError::Missing("tipo"))?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub nome: String,
}

impl Resource for Category {
    const KIND: EntityKind = EntityKind::Category;
    type Input = CategoryInput;
    type Form = CategoryForm;

    fn id(&self) -> Id {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn seed(&self) -> CategoryForm {
        CategoryForm {
            name: self.name.clone(),
        }
    }

    fn validate(form: &CategoryForm) -> Result<CategoryInput, ValidationError> {
        Ok(CategoryInput {
            nome: required_text(&form.name, "nome")?,
        })
    }
}

/// Transaction editor state. The date is held as a calendar value and only
/// turned into the wire string on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub account_id: Option<Id>,
    pub category_id: Option<Id>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub data: String,
    pub tipo: TransactionKind,
    #[serde(rename = "contaId")]
    pub conta_id: Id,
    #[serde(rename = "categoriaId")]
    pub categoria_id: Id,
}

impl Resource for Transaction {
    const KIND: EntityKind = EntityKind::Transaction;
    type Input = TransactionInput;
    type Form = TransactionForm;

    fn id(&self) -> Id {
        self.id
    }

    fn label(&self) -> &str {
        &self.description
    }

    fn seed(&self) -> TransactionForm {
        TransactionForm {
            description: self.description.clone(),
            amount: Some(self.amount),
            date: Some(self.date),
            kind: Some(self.kind),
            account_id: self.account_key(),
            category_id: self.category_key(),
        }
    }

    fn validate(form: &TransactionForm) -> Result<TransactionInput, ValidationError> {
        let descricao = required_text(&form.description, "descricao")?;
        let valor = form.amount.ok_or(ValidationError::Missing("valor"))?;
        if valor < Decimal::ZERO {
            return Err(ValidationError::Invalid {
                field: "valor",
                reason: "must not be negative".into(),
            });
        }
        let date = form.date.ok_or(ValidationError::Missing("data"))?;
        Ok(TransactionInput {
            descricao,
            valor,
            data: dates::to_wire(date),
            tipo: form.kind.ok_or(ValidationError::Missing("tipo"))?,
            conta_id: form.account_id.ok_or(ValidationError::Missing("contaId"))?,
            categoria_id: form.category_id.ok_or(ValidationError::Missing("categoriaId"))?,
        })
    }
}
