// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use caixa::error::GatewayError;
use caixa::gateway::Gateway;
use caixa::models::Id;
use caixa::resource::Resource;
use reqwest::StatusCode;
use serde_json::{Value, json};

/// Backend stand-in: assigns ids, expands `conta`/`categoria` on
/// transactions, and fails on demand.
#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: Id,
    collections: HashMap<&'static str, Vec<Value>>,
    failing_lists: HashSet<&'static str>,
    fail_mutations: bool,
    calls: Vec<String>,
}

fn rejected(message: &str) -> GatewayError {
    GatewayError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}

fn not_found() -> GatewayError {
    GatewayError::Status {
        status: StatusCode::NOT_FOUND,
        message: "not found".to_string(),
    }
}

impl State {
    fn assign_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }

    fn name_of(&self, path: &str, id: &Value) -> Option<Value> {
        self.collections
            .get(path)?
            .iter()
            .find(|row| &row["id"] == id)
            .map(|row| json!({ "id": row["id"], "nome": row["nome"] }))
    }

    fn expand(&self, row: &mut Value) {
        if let Some(conta) = self.name_of("contas", &row["contaId"]) {
            row["conta"] = conta;
        }
        if let Some(categoria) = self.name_of("categorias", &row["categoriaId"]) {
            row["categoria"] = categoria;
        }
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw row as the backend would return it and yields its id.
    pub fn insert(&self, path: &'static str, mut row: Value) -> Id {
        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        row["id"] = json!(id);
        if path == "lancamentos" {
            state.expand(&mut row);
        }
        state.collections.entry(path).or_default().push(row);
        id
    }

    pub fn account(&self, nome: &str, tipo: &str) -> Id {
        self.insert("contas", json!({ "nome": nome, "tipo": tipo }))
    }

    pub fn category(&self, nome: &str) -> Id {
        self.insert("categorias", json!({ "nome": nome }))
    }

    pub fn fail_list(&self, path: &'static str) {
        self.state.lock().unwrap().failing_lists.insert(path);
    }

    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap();
        state.failing_lists.clear();
        state.fail_mutations = false;
    }

    pub fn fail_mutations(&self) {
        self.state.lock().unwrap().fail_mutations = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET"))
            .collect()
    }

    pub fn rows(&self, path: &'static str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(path)
            .cloned()
            .unwrap_or_default()
    }
}

fn decode<R: Resource>(row: Value) -> Result<R, GatewayError> {
    serde_json::from_value(row).map_err(|err| GatewayError::Payload(err.to_string()))
}

impl Gateway for MemoryGateway {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, GatewayError> {
        let path = R::KIND.path();
        let rows = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("GET /{}", path));
            if state.failing_lists.contains(path) {
                return Err(rejected("list unavailable"));
            }
            state.collections.get(path).cloned().unwrap_or_default()
        };
        rows.into_iter().map(decode::<R>).collect()
    }

    async fn create<R: Resource>(&self, input: &R::Input) -> Result<R, GatewayError> {
        let path = R::KIND.path();
        let row = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("POST /{}", path));
            if state.fail_mutations {
                return Err(rejected("create rejected"));
            }
            let mut row = serde_json::to_value(input).unwrap();
            let id = state.assign_id();
            row["id"] = json!(id);
            if path == "lancamentos" {
                state.expand(&mut row);
            }
            state.collections.entry(path).or_default().push(row.clone());
            row
        };
        decode(row)
    }

    async fn update<R: Resource>(&self, id: Id, input: &R::Input) -> Result<R, GatewayError> {
        let path = R::KIND.path();
        let row = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("PUT /{}/{}", path, id));
            if state.fail_mutations {
                return Err(rejected("update rejected"));
            }
            let mut row = serde_json::to_value(input).unwrap();
            row["id"] = json!(id);
            if path == "lancamentos" {
                state.expand(&mut row);
            }
            let slot = state
                .collections
                .get_mut(path)
                .and_then(|rows| rows.iter_mut().find(|r| r["id"] == json!(id)))
                .ok_or_else(not_found)?;
            *slot = row.clone();
            row
        };
        decode(row)
    }

    async fn delete<R: Resource>(&self, id: Id) -> Result<(), GatewayError> {
        let path = R::KIND.path();
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("DELETE /{}/{}", path, id));
        if state.fail_mutations {
            return Err(rejected("delete rejected"));
        }
        let rows = state.collections.entry(path).or_default();
        let before = rows.len();
        rows.retain(|r| r["id"] != json!(id));
        if rows.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
