//! Row-store gateway speaking the Baserow-style HTTP API.
//!
//! Three logical tables (sessions, contacts, results), each addressed by
//! numeric row id, with `POST` create, `PATCH` update, and `GET` filtered
//! listing. Every request carries the bearer token header and asks the
//! store for human-readable field names.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::repository::{ContactStore, ResultStore, SessionStore, StorageError, Store};

mod contact_repo;
mod result_repo;
mod session_repo;
mod wire;

const DEFAULT_BASE_URL: &str = "https://baserowapp.goxmit.com/api";

/// One fixed timeout for every remote call; expiry is an ordinary failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BaserowInitError {
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Connection settings for the remote row store.
#[derive(Debug, Clone)]
pub struct BaserowConfig {
    pub base_url: String,
    pub token: String,
    pub sessions_table: String,
    pub contacts_table: String,
    pub results_table: String,
}

impl BaserowConfig {
    /// Read the configuration from the environment.
    ///
    /// `BASEROW_BASE_URL` is optional; the token and the three table ids
    /// are required and their absence is fatal at startup.
    ///
    /// # Errors
    ///
    /// Returns `BaserowInitError::MissingEnv` naming the first missing
    /// variable.
    pub fn from_env() -> Result<Self, BaserowInitError> {
        let require = |name: &'static str| {
            std::env::var(name).map_err(|_| BaserowInitError::MissingEnv { name })
        };
        Ok(Self {
            base_url: std::env::var("BASEROW_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            token: require("BASEROW_TOKEN")?,
            sessions_table: require("BASEROW_SESSIONS_TABLE")?,
            contacts_table: require("BASEROW_CONTACTS_TABLE")?,
            results_table: require("BASEROW_RESULTS_TABLE")?,
        })
    }
}

/// Store adapter backed by the remote row store.
#[derive(Clone)]
pub struct BaserowStore {
    http: Client,
    config: BaserowConfig,
}

impl BaserowStore {
    /// Build the adapter and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `BaserowInitError::Http` if the client cannot be constructed.
    pub fn connect(config: BaserowConfig) -> Result<Self, BaserowInitError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &BaserowConfig {
        &self.config
    }

    fn rows_url(&self, table: &str) -> String {
        format!(
            "{}/database/rows/table/{table}/",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn row_url(&self, table: &str, row_id: i64) -> String {
        format!("{}{row_id}/", self.rows_url(table))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Token {}", self.config.token))
            .query(&[("user_field_names", "true")])
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, StorageError> {
        let response = request
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    pub(crate) async fn create_row<P: Serialize + Sync>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<i64, StorageError> {
        let response = self
            .send(self.request(Method::POST, self.rows_url(table)).json(payload))
            .await?;
        let row: wire::CreatedRow = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(row.id)
    }

    pub(crate) async fn update_row<P: Serialize + Sync>(
        &self,
        table: &str,
        row_id: i64,
        payload: &P,
    ) -> Result<(), StorageError> {
        self.send(
            self.request(Method::PATCH, self.row_url(table, row_id))
                .json(payload),
        )
        .await?;
        Ok(())
    }

    /// First row id matching an exact equality filter, if any.
    pub(crate) async fn first_matching_row(
        &self,
        table: &str,
        filter: &str,
        value: &str,
    ) -> Result<Option<i64>, StorageError> {
        let response = self
            .send(
                self.request(Method::GET, self.rows_url(table))
                    .query(&[(filter, value), ("size", "1")]),
            )
            .await?;
        let list: wire::RowList = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(list.results.first().map(|row| row.id))
    }

    /// Connectivity check: list the contacts table with a page size of one
    /// and report how many rows the store holds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the store is unreachable or rejects the
    /// token.
    pub async fn ping(&self) -> Result<i64, StorageError> {
        let response = self
            .send(
                self.request(Method::GET, self.rows_url(&self.config.contacts_table))
                    .query(&[("size", "1")]),
            )
            .await?;
        let list: wire::RowList = response
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(list.count)
    }
}

impl Store {
    /// Build a `Store` backed by the remote row store.
    ///
    /// # Errors
    ///
    /// Returns `BaserowInitError` if the HTTP client cannot be built.
    pub fn baserow(config: BaserowConfig) -> Result<Self, BaserowInitError> {
        let repo = BaserowStore::connect(config)?;
        let sessions: Arc<dyn SessionStore> = Arc::new(repo.clone());
        let contacts: Arc<dyn ContactStore> = Arc::new(repo.clone());
        let results: Arc<dyn ResultStore> = Arc::new(repo);
        Ok(Self {
            sessions,
            contacts,
            results,
        })
    }
}
