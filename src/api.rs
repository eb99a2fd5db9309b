//! Content API client and payload classification.
//!
//! The API is a spreadsheet web app: `GET {base}?sheet=Blogs` and
//! `GET {base}?sheet=Projects`. A successful call returns a JSON array of row
//! objects; the app reports its own failures as `{"error": true, "message": …}`
//! with a 2xx status. Non-2xx is a failure regardless of body.
//!
//! [`ContentApi`] is the seam controllers depend on; [`HttpContentApi`] is the
//! `reqwest` implementation. [`fetch_records`] wraps one fetch plus payload
//! classification and record decoding, mapping every page-level failure into a
//! [`LoadError`].

use crate::records::{RecordKind, decode_all};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Network response error: {status} - {reason}. Response: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// The body arrived but is not a record array.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    /// The API flagged `error: true`.
    #[error("{0}")]
    Reported(String),
    #[error("unexpected data format")]
    UnexpectedShape,
}

/// Page-level failure while loading a sheet.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("API URL configuration error")]
    Configuration,
    #[error(transparent)]
    Network(#[from] ApiError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl LoadError {
    /// The message shown in place of a listing, e.g. `noun = "blog posts"`.
    pub fn page_message(&self, noun: &str) -> String {
        match self {
            LoadError::Configuration => {
                format!("API URL configuration error. Cannot load {noun}.")
            }
            LoadError::Network(e) => format!("Failed to load {noun}. {e}."),
            LoadError::Payload(PayloadError::Reported(message)) => {
                format!("Error loading {noun}: {message}")
            }
            LoadError::Payload(PayloadError::UnexpectedShape) => {
                format!("Could not load {noun} due to unexpected data format.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Blogs,
    Projects,
}

impl Sheet {
    pub fn name(self) -> &'static str {
        match self {
            Sheet::Blogs => "Blogs",
            Sheet::Projects => "Projects",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait ContentApi {
    /// Fetch one sheet and return the decoded JSON body of a 2xx response.
    fn fetch_sheet(&self, sheet: Sheet) -> Result<Value, ApiError>;
}

/// Blocking HTTP client for the content API.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpContentApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim();
        let base_url = Url::parse(trimmed).map_err(|source| ApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        })
    }

    /// `{base}?sheet={name}`, keeping any query the base already has.
    pub fn sheet_url(&self, sheet: Sheet) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("sheet", sheet.name());
        url
    }
}

impl ContentApi for HttpContentApi {
    fn fetch_sheet(&self, sheet: Sheet) -> Result<Value, ApiError> {
        let url = self.sheet_url(sheet);
        tracing::info!("fetching {sheet} from {url}");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(sheet, response.text());
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Body of a non-success response. A body that cannot be read is logged and
/// reported as empty so the status still reaches the page.
fn error_body<E: std::fmt::Display>(sheet: Sheet, body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| {
        tracing::warn!("could not read {sheet} error response body: {e}");
        String::new()
    })
}

/// Split a response body into its record array or a payload failure.
pub fn classify_payload(body: Value) -> Result<Vec<Value>, PayloadError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(ref map) if map.get("error").is_some_and(is_truthy) => {
            let message = match map.get("message") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => "unknown error".to_string(),
                Some(other) => other.to_string(),
            };
            Err(PayloadError::Reported(message))
        }
        _ => Err(PayloadError::UnexpectedShape),
    }
}

/// Fetch one sheet and decode its rows.
///
/// `api` is `None` when no base URL is configured; that is reported as
/// [`LoadError::Configuration`] without any request.
pub fn fetch_records<T: DeserializeOwned>(
    api: Option<&dyn ContentApi>,
    sheet: Sheet,
    kind: RecordKind,
) -> Result<Vec<T>, LoadError> {
    let api = api.ok_or(LoadError::Configuration)?;
    let body = api.fetch_sheet(sheet)?;
    let items = classify_payload(body)?;
    Ok(decode_all(items, kind))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
