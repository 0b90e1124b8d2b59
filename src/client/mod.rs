//! HTTP client for the to-do API.
//!
//! Every request goes through [`ApiClient::request`], which attaches the stored
//! bearer token, and [`ApiClient::send`], which logs any failure the same way
//! before handing it back to the caller.

pub mod controller;
pub mod token_store;

use std::fmt;
use std::io;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::json;

use crate::auth::LoginResponse;
use crate::models::Task;

pub use controller::{LoginForm, TodoController, ViewState};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};

#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, bad body...).
    Http(reqwest::Error),
    /// The server answered with a non-success status.
    Status { status: StatusCode, body: String },
    /// The token could not be persisted.
    TokenStore(io::Error),
    /// The controller was asked about a task it has not loaded.
    UnknownTask(i32),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Status { status, body } => write!(f, "server returned {}: {}", status, body),
            ClientError::TokenStore(e) => write!(f, "token store: {}", e),
            ClientError::UnknownTask(id) => write!(f, "task {} is not loaded", id),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Http(error)
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        ClientError::TokenStore(error)
    }
}

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Starts a request and attaches `Authorization: Bearer` when a token is stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request; any transport error or non-2xx status is logged and
    /// returned as a `ClientError`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("API Error: {}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        log::error!("API Error: {} from {}: {}", status, url, body);
        Err(ClientError::Status { status, body })
    }

    /// Logs in and stores the returned token.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let builder = self.request(Method::POST, "/login").json(&json!({
            "username": username,
            "passwordCandidate": password,
        }));
        let login: LoginResponse = self.send(builder).await?.json().await?;
        self.tokens.save(&login.token)?;
        log::debug!("token saved, expires at {}", login.expiration);
        Ok(login)
    }

    /// Forgets the stored token.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.tokens.clear()?;
        Ok(())
    }

    pub async fn get_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let tasks = self
            .send(self.request(Method::GET, "/items"))
            .await?
            .json()
            .await?;
        Ok(tasks)
    }

    pub async fn add_task(&self, name: &str) -> Result<Task, ClientError> {
        let builder = self
            .request(Method::POST, "/items")
            .json(&json!({ "name": name, "isComplete": false }));
        let task = self.send(builder).await?.json().await?;
        Ok(task)
    }

    pub async fn set_completed(
        &self,
        id: i32,
        is_complete: bool,
        name: &str,
    ) -> Result<(), ClientError> {
        let builder = self
            .request(Method::PUT, &format!("/items/{}", id))
            .json(&json!({ "id": id, "isComplete": is_complete, "name": name }));
        self.send(builder).await?;
        Ok(())
    }

    pub async fn delete_task(&self, id: i32) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &format!("/items/{}", id)))
            .await?;
        Ok(())
    }
}
