//! Single post page controller.
//!
//! The post to show comes from the page query (`?slug=...`). A missing API URL
//! is reported first. A missing or empty slug settles the page as not-found
//! without any request; otherwise the
//! whole `Blogs` sheet is fetched and the first row whose trimmed slug matches
//! is rendered. Every outcome writes exactly one heading and one content body,
//! and removes the loading indicator.

use crate::api::{ContentApi, LoadError, PayloadError, Sheet, fetch_records};
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::records::{PostRecord, RecordKind};
use crate::render::{self, CardContext};
use maud::Markup;
use url::form_urlencoded;

const NOT_FOUND: &str = "Post Not Found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    /// The post with this slug is on the page.
    Rendered(String),
    /// No post matched; `None` when the query carried no slug at all.
    NotFound(Option<String>),
    Error {
        heading: &'static str,
        message: String,
    },
}

/// The `slug` query parameter, decoded. Empty values count as absent.
pub fn slug_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "slug")
        .map(|(_, value)| value.into_owned())
        .filter(|slug| !slug.trim().is_empty())
}

pub struct DetailController<'c> {
    config: &'c SiteConfig,
    state: DetailState,
}

impl<'c> DetailController<'c> {
    pub fn new(config: &'c SiteConfig) -> Self {
        Self {
            config,
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Resolve the post named by `query` and render it into `doc`.
    pub fn load(
        &mut self,
        doc: &mut Document,
        query: &str,
        api: Option<&dyn ContentApi>,
    ) -> &DetailState {
        self.state = DetailState::Loading;
        let Some(api) = api else {
            let (heading, message) = failure_text(&LoadError::Configuration);
            tracing::error!("{message}");
            self.show_failure(doc, heading, render::error_message(&message));
            self.state = DetailState::Error { heading, message };
            return &self.state;
        };
        let Some(slug) = slug_from_query(query) else {
            tracing::debug!("no slug in query {query:?}");
            self.show_failure(
                doc,
                NOT_FOUND,
                render::error_message("Blog post identifier (slug) not found in URL."),
            );
            self.state = DetailState::NotFound(None);
            return &self.state;
        };

        match fetch_records::<PostRecord>(Some(api), Sheet::Blogs, RecordKind::Post) {
            Err(e) => {
                let (heading, message) = failure_text(&e);
                tracing::error!("could not load post {slug:?}: {e}");
                self.show_failure(doc, heading, render::error_message(&message));
                self.state = DetailState::Error { heading, message };
            }
            Ok(posts) => {
                let wanted = slug.trim();
                match posts.iter().find(|p| p.trimmed_slug() == Some(wanted)) {
                    Some(post) => {
                        self.show_post(doc, post);
                        self.state = DetailState::Rendered(wanted.to_string());
                    }
                    None => {
                        tracing::debug!("no post with slug {wanted:?} among {}", posts.len());
                        self.show_failure(doc, NOT_FOUND, render::post_not_found(&slug));
                        self.state = DetailState::NotFound(Some(slug));
                    }
                }
            }
        }
        &self.state
    }

    fn show_post(&self, doc: &mut Document, post: &PostRecord) {
        let ids = &self.config.elements;
        let view = render::post_detail_view(
            post,
            &CardContext::from_config(self.config),
            &self.config.author,
        );

        doc.remove(&ids.post_loading);
        doc.set_title(&view.document_title);
        doc.with(&ids.post_title, |el| el.set_text(&view.title));
        doc.with(&ids.post_date, |el| el.set_text(&view.date));

        // Both hooks are needed to show an image.
        if doc.contains(&ids.post_image) && doc.contains(&ids.post_image_container) {
            match &view.image {
                Some(image) => {
                    doc.with(&ids.post_image, |el| {
                        el.set_attribute("src", &image.src);
                        el.set_attribute("alt", &image.alt);
                        el.set_attribute("onerror", &image.fallback);
                        el.show();
                    });
                    doc.with(&ids.post_image_container, |el| el.show());
                }
                None => {
                    doc.with(&ids.post_image, |el| el.hide());
                    doc.with(&ids.post_image_container, |el| el.hide());
                }
            }
        }

        doc.with(&ids.post_content, |el| el.replace_content(view.content));
    }

    fn show_failure(&self, doc: &mut Document, heading: &str, body: Markup) {
        let ids = &self.config.elements;
        doc.remove(&ids.post_loading);
        doc.with(&ids.post_title, |el| el.set_text(heading));
        doc.with(&ids.post_content, |el| el.replace_content(body));
        doc.with(&ids.post_image_container, |el| el.hide());
    }
}

fn failure_text(error: &LoadError) -> (&'static str, String) {
    match error {
        LoadError::Configuration => (
            "Configuration Error",
            "API URL configuration error.".to_string(),
        ),
        LoadError::Network(e) => (
            "Error Loading Post",
            format!("Failed to load this blog post. {e}."),
        ),
        LoadError::Payload(PayloadError::Reported(message)) => (
            "Error Loading Post",
            format!("Error loading post data: {message}"),
        ),
        LoadError::Payload(PayloadError::UnexpectedShape) => (
            "Data Error",
            "Invalid data format received from API.".to_string(),
        ),
    }
}
