//! HTTP client for the console API.
//!
//! # Design
//! - One client per app boot; the credential is swapped in place on sign-in/out.
//! - Writes report the HTTP status instead of failing on 4xx, so callers can
//!   tell an existing binding from a transport failure.

use crate::core::auth::AccessToken;
use crate::core::binding::{Candidate, CandidateLookup, LookupError, LookupTarget};
use crate::core::endpoints::{
    Endpoint, build_url, role_candidates, search_candidates, user_candidates,
};
use async_trait::async_trait;
use gloo_net::http::Request;
use nacos_console_api_models::{NamespaceEntry, Page, PageQuery, RestResult, RoleEntry, UserEntry};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Failure talking to the console API.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// The request never produced a response, or the body was unreadable.
    #[error("request failed: {0}")]
    Transport(#[from] gloo_net::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The server reported a failure inside a `RestResult` envelope.
    #[error("server rejected request: {message}")]
    Rejected {
        /// Server message.
        message: String,
    },
}

#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    credential: RefCell<Option<AccessToken>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credential: RefCell::new(None),
        }
    }

    pub(crate) fn set_credential(&self, credential: Option<AccessToken>) {
        *self.credential.borrow_mut() = credential;
    }

    fn url(&self, endpoint: &Endpoint<'_>) -> String {
        build_url(&self.base_url, endpoint, self.credential.borrow().as_ref())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint<'_>) -> Result<T, ApiError> {
        let response = Request::get(&self.url(endpoint)).send().await?;
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Issue a write and hand back the HTTP status.
    pub(crate) async fn post_status(&self, endpoint: &Endpoint<'_>) -> Result<u16, ApiError> {
        let response = Request::post(&self.url(endpoint)).send().await?;
        let status = response.status();
        tracing::debug!(path = endpoint.path(), status, "write completed");
        Ok(status)
    }

    pub(crate) async fn fetch_users(&self, page: PageQuery) -> Result<Page<UserEntry>, ApiError> {
        self.get_json(&Endpoint::Users(page)).await
    }

    pub(crate) async fn fetch_roles(&self, page: PageQuery) -> Result<Page<RoleEntry>, ApiError> {
        self.get_json(&Endpoint::Roles(page)).await
    }

    pub(crate) async fn search(
        &self,
        target: LookupTarget,
        query: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.get_json(&Endpoint::search(target, query)).await
    }

    pub(crate) async fn fetch_namespaces(&self) -> Result<Vec<NamespaceEntry>, ApiError> {
        let envelope: RestResult<Vec<NamespaceEntry>> =
            self.get_json(&Endpoint::Namespaces).await?;
        if envelope.code != 200 {
            return Err(ApiError::Rejected {
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(envelope.data.unwrap_or_default())
    }
}

/// [`CandidateLookup`] backed by the console API.
pub(crate) struct ApiLookup {
    client: Rc<ApiClient>,
    target: LookupTarget,
}

impl ApiLookup {
    pub(crate) const fn new(client: Rc<ApiClient>, target: LookupTarget) -> Self {
        Self { client, target }
    }
}

fn lookup_error(err: &ApiError) -> LookupError {
    LookupError {
        detail: err.to_string(),
    }
}

#[async_trait(?Send)]
impl CandidateLookup for ApiLookup {
    async fn first_page(&self, page: PageQuery) -> Result<Vec<Candidate>, LookupError> {
        match self.target {
            LookupTarget::Users => self
                .client
                .fetch_users(page)
                .await
                .map(user_candidates)
                .map_err(|err| lookup_error(&err)),
            LookupTarget::Roles => self
                .client
                .fetch_roles(page)
                .await
                .map(role_candidates)
                .map_err(|err| lookup_error(&err)),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        self.client
            .search(self.target, query)
            .await
            .map(search_candidates)
            .map_err(|err| lookup_error(&err))
    }
}
