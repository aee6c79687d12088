// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementations of the remote surfaces.
//!
//! [`HttpRemote`] talks to the REST API of the remote store. [`HttpSessionRpc`]
//! calls the session functions through a PostgREST-style endpoint
//! (`/rest/v1/rpc/<name>` with `p_`-prefixed parameters).

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use ts_core::{Collection, CollectionData, SessionValidation, TableSession};

use crate::session::SessionRpc;
use crate::sync::{
    collection_path, Method, RemoteApi, RemoteCall, RemoteError, RemoteFuture, RemoteResult,
};

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build HTTP client, using defaults");
            Client::new()
        })
}

fn request_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Request(e.to_string())
}

/// Return the response if its status is a success, else its status and body.
async fn check_status(res: Response) -> RemoteResult<Response> {
    if res.status().is_success() {
        Ok(res)
    } else {
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Err(RemoteError::Status { status, body })
    }
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> RemoteResult<T> {
    let res = check_status(req.send().await.map_err(request_error)?).await?;
    res.json::<T>()
        .await
        .map_err(|e| RemoteError::Decode(e.to_string()))
}

/// REST client for the remote store.
#[derive(Clone)]
pub struct HttpRemote {
    http: Client,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        HttpRemote {
            http: build_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl RemoteApi for HttpRemote {
    fn health(&self) -> RemoteFuture<'_, bool> {
        Box::pin(async move {
            match self.http.get(self.url("/health")).send().await {
                Ok(res) => res.status().is_success(),
                Err(e) => {
                    tracing::debug!(error = %e, "health check failed");
                    false
                }
            }
        })
    }

    fn fetch(&self, collection: Collection) -> RemoteFuture<'_, RemoteResult<CollectionData>> {
        Box::pin(async move {
            let req = self.http.get(self.url(collection_path(collection)));
            let body: Value = send_json(req).await?;
            CollectionData::from_value(collection, body)
                .map_err(|e| RemoteError::Decode(e.to_string()))
        })
    }

    fn call(&self, call: RemoteCall) -> RemoteFuture<'_, RemoteResult<()>> {
        Box::pin(async move {
            let (method, path, body) = call.route();
            let url = self.url(&path);
            let req = match method {
                Method::Get => self.http.get(url),
                Method::Post => self.http.post(url),
                Method::Put => self.http.put(url),
                Method::Patch => self.http.patch(url),
                Method::Delete => self.http.delete(url),
            };
            let req = match body {
                Some(body) => req.json(&body),
                None => req,
            };
            check_status(req.send().await.map_err(request_error)?).await?;
            Ok(())
        })
    }
}

/// Session functions over a PostgREST-style endpoint.
#[derive(Clone)]
pub struct HttpSessionRpc {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpSessionRpc {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        HttpSessionRpc {
            http: build_client(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rpc<T: DeserializeOwned>(&self, function: &str, params: Value) -> RemoteResult<T> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        send_json(self.authed(self.http.post(url)).json(&params)).await
    }
}

impl SessionRpc for HttpSessionRpc {
    fn get_or_create_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<TableSession>> {
        Box::pin(async move {
            self.rpc(
                "get_or_create_session",
                json!({
                    "p_table_number": table,
                    "p_customer_phone": phone,
                    "p_session_token": token,
                }),
            )
            .await
        })
    }

    fn validate_session(
        &self,
        table: u32,
        phone: String,
        token: String,
    ) -> RemoteFuture<'_, RemoteResult<SessionValidation>> {
        Box::pin(async move {
            self.rpc(
                "validate_session",
                json!({
                    "p_table_number": table,
                    "p_customer_phone": phone,
                    "p_session_token": token,
                }),
            )
            .await
        })
    }

    fn close_table_sessions(
        &self,
        table: u32,
        phones: Vec<String>,
    ) -> RemoteFuture<'_, RemoteResult<u64>> {
        Box::pin(async move {
            self.rpc(
                "close_table_sessions",
                json!({
                    "p_table_number": table,
                    "p_customer_phones": phones,
                }),
            )
            .await
        })
    }

    fn count_active_sessions(
        &self,
        table: u32,
        phone: String,
        created_after: DateTime<Utc>,
    ) -> RemoteFuture<'_, RemoteResult<usize>> {
        Box::pin(async move {
            let url = format!("{}/rest/v1/table_sessions", self.base_url);
            let table_filter = format!("eq.{}", table);
            let phone_filter = format!("eq.{}", phone);
            let since_filter = format!(
                "gt.{}",
                created_after.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
            let req = self.authed(self.http.get(url)).query(&[
                ("select", "id"),
                ("table_number", table_filter.as_str()),
                ("customer_phone", phone_filter.as_str()),
                ("status", "eq.active"),
                ("created_at", since_filter.as_str()),
                ("limit", "1"),
            ]);
            let rows: Vec<Value> = send_json(req).await?;
            Ok(rows.len())
        })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
