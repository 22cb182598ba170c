//! REST
//!
//! Access to the `workouts` collection of the remote document store. The store is the only
//! source of truth for workout entries, nothing is persisted locally.

use std::time::Duration;

use liftlog_domain as domain;
use log::{debug, warn};
use reqwest::{Client, Url, header};
use serde_json::Value;

use crate::document::{Document, Documents, NewDocument};

const COLLECTION: &str = "workouts";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl Request {
    fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            body: None,
        }
    }

    fn post(path: &str, body: &impl serde::Serialize) -> Result<Self, domain::StorageError> {
        Ok(Self {
            method: Method::Post,
            path: path.to_string(),
            body: Some(
                serde_json::to_string(body).map_err(|err| Box::new(err) as domain::BoxError)?,
            ),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError>;
}

pub struct ReqwestSendRequest {
    base_url: Url,
    client: Client,
}

impl ReqwestSendRequest {
    pub fn new(base_url: &str) -> Result<Self, domain::StorageError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| Box::new(err) as domain::BoxError)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|err| Box::new(err) as domain::BoxError)?;
        Ok(Self { base_url, client })
    }
}

impl SendRequest for ReqwestSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|err| Box::new(err) as domain::BoxError)?;
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let builder = match request.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };
        let response = builder.send().await.map_err(|err| {
            debug!("request failed: {err}");
            domain::StorageError::NoConnection
        })?;
        let status = response.status();
        Ok(Response {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: response
                .text()
                .await
                .map_err(|_| domain::StorageError::NoConnection)?,
        })
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<ReqwestSendRequest> {
    pub fn new(base_url: &str) -> Result<Self, domain::StorageError> {
        Ok(Self {
            sender: ReqwestSendRequest::new(base_url)?,
        })
    }
}

impl<S: SendRequest> REST<S> {
    async fn fetch(&self, request: Request) -> Result<Response, domain::StorageError> {
        let method = request.method;
        let response = self.sender.send_request(request).await?;
        if response.ok() {
            Ok(response)
        } else {
            debug!("{method} {COLLECTION} returned {}", response.status);
            Err(domain::StorageError::Rejected(
                format!("{} {}", response.status, response.status_text)
                    .trim_end()
                    .to_string(),
            ))
        }
    }
}

impl<S: SendRequest> domain::EntryRepository for REST<S> {
    async fn read_entries(&self) -> Result<Vec<domain::WorkoutEntry>, domain::ReadError> {
        let response = self.fetch(Request::get(COLLECTION)).await?;
        let documents: Documents = serde_json::from_str(&response.body)
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        Ok(Vec::<Value>::from(documents)
            .into_iter()
            .filter_map(|value| {
                match serde_json::from_value::<Document>(value)
                    .map_err(|err| err.to_string())
                    .and_then(|document| {
                        domain::WorkoutEntry::try_from(document).map_err(|err| err.to_string())
                    }) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        warn!("skipped document: {err}");
                        None
                    }
                }
            })
            .collect())
    }

    async fn create_entry(&self, entry: domain::NewEntry) -> Result<(), domain::CreateError> {
        self.fetch(Request::post(COLLECTION, &NewDocument::from(entry))?)
            .await?;
        Ok(())
    }
}
