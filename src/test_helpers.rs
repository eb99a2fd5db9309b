//! Shared test utilities.
//!
//! Record builders, a recording stub [`ContentApi`], and skeleton documents
//! for each page.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let config = SiteConfig::default();
//! let mut doc = listing_doc(&config);
//! let api = StubApi::ok(json!([{"slug": "a", "title": "A", "summary": "s"}]));
//! ListingController::new(&config).load(&mut doc, Some(&api));
//! assert_eq!(api.requests(), vec![Sheet::Blogs]);
//! ```

use std::cell::RefCell;

use serde_json::Value;

use crate::api::{ApiError, ContentApi, Sheet};
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::generate::{Page, skeleton};
use crate::records::{PostRecord, ProjectRecord};

// =========================================================================
// Record builders
// =========================================================================

/// A valid post: `slug`, title `"Title {slug}"`, summary `"Summary {slug}"`.
pub fn post(slug: &str) -> PostRecord {
    PostRecord {
        slug: Some(slug.to_string()),
        title: Some(format!("Title {slug}")),
        summary: Some(format!("Summary {slug}")),
        ..Default::default()
    }
}

/// A valid project with only `id` and `title` set.
pub fn project(id: &str, title: &str) -> ProjectRecord {
    ProjectRecord {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        ..Default::default()
    }
}

// =========================================================================
// Stub content API
// =========================================================================

enum Reply {
    Body(Value),
    Status(u16, String),
}

/// Answers every sheet with the same reply and records what was asked.
pub struct StubApi {
    reply: Reply,
    requests: RefCell<Vec<Sheet>>,
}

impl StubApi {
    /// 2xx with `body`.
    pub fn ok(body: Value) -> Self {
        Self {
            reply: Reply::Body(body),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Non-2xx with an empty body.
    pub fn status(status: u16, reason: &str) -> Self {
        Self {
            reply: Reply::Status(status, reason.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Sheets fetched so far, in order.
    pub fn requests(&self) -> Vec<Sheet> {
        self.requests.borrow().clone()
    }
}

impl ContentApi for StubApi {
    fn fetch_sheet(&self, sheet: Sheet) -> Result<Value, ApiError> {
        self.requests.borrow_mut().push(sheet);
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status, reason) => Err(ApiError::Status {
                status: *status,
                reason: reason.clone(),
                body: String::new(),
            }),
        }
    }
}

// =========================================================================
// Documents
// =========================================================================

pub fn listing_doc(config: &SiteConfig) -> Document {
    skeleton(Page::Listing, config)
}

pub fn detail_doc(config: &SiteConfig) -> Document {
    skeleton(Page::Detail, config)
}

pub fn projects_doc(config: &SiteConfig) -> Document {
    skeleton(Page::Projects, config)
}
