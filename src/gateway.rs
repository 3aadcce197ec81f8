// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::models::Id;
use crate::resource::Resource;
use crate::utils::http_client;

/// CRUD verbs of the backend, one collection per [`Resource`].
#[allow(async_fn_in_trait)]
pub trait Gateway {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, GatewayError>;
    async fn create<R: Resource>(&self, input: &R::Input) -> Result<R, GatewayError>;
    async fn update<R: Resource>(&self, id: Id, input: &R::Input) -> Result<R, GatewayError>;
    async fn delete<R: Resource>(&self, id: Id) -> Result<(), GatewayError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &AppConfig) -> Result<Self, GatewayError> {
        Url::parse(&config.base_url)
            .map_err(|err| GatewayError::Endpoint(format!("'{}': {}", config.base_url, err)))?;
        Ok(Self {
            client: http_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message.or(body.error),
            Err(_) => None,
        }
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("server error")
                .to_string()
        });
        tracing::warn!(%status, %message, "gateway request rejected");
        Err(GatewayError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, GatewayError> {
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Payload(err.to_string()))
    }
}

impl Gateway for HttpGateway {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, GatewayError> {
        let url = self.url(R::KIND.path());
        tracing::debug!(%url, "GET");
        self.json(self.client.get(url)).await
    }

    async fn create<R: Resource>(&self, input: &R::Input) -> Result<R, GatewayError> {
        let url = self.url(R::KIND.path());
        tracing::debug!(%url, ?input, "POST");
        self.json(self.client.post(url).json(input)).await
    }

    async fn update<R: Resource>(&self, id: Id, input: &R::Input) -> Result<R, GatewayError> {
        let url = self.url(&format!("{}/{}", R::KIND.path(), id));
        tracing::debug!(%url, ?input, "PUT");
        self.json(self.client.put(url).json(input)).await
    }

    async fn delete<R: Resource>(&self, id: Id) -> Result<(), GatewayError> {
        let url = self.url(&format!("{}/{}", R::KIND.path(), id));
        tracing::debug!(%url, "DELETE");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
