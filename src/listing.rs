//! Blog listing controller.
//!
//! ```text
//!              fetch ok, ≥1 post            select_category
//! Loading ──────────────────────────► Loaded ───────────────► Filtered(sel)
//!    │                                                          │    ▲
//!    │ config / network / payload error                         └────┘
//!    ▼                                                     select_category
//!  Error
//! ```
//!
//! `load` issues exactly one fetch. Category selections never refetch: they
//! filter the in-memory [`PostIndex`], replace the container contents, and move
//! the single `active` class to the selected button. Selecting the same
//! category twice produces the same document.

use crate::api::{ContentApi, Sheet, fetch_records};
use crate::config::SiteConfig;
use crate::dom::Document;
use crate::index::{CategorySelector, PostIndex};
use crate::records::{PostRecord, RecordKind};
use crate::render::{self, CardContext, RenderReport};

const NO_POSTS: &str = "No blog posts available at this moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    /// Initial render done: newest posts shown, no category selected.
    Loaded,
    Filtered(CategorySelector),
    Error(String),
}

pub struct ListingController<'c> {
    config: &'c SiteConfig,
    index: PostIndex,
    state: ListingState,
    report: RenderReport,
}

impl<'c> ListingController<'c> {
    pub fn new(config: &'c SiteConfig) -> Self {
        Self {
            config,
            index: PostIndex::default(),
            state: ListingState::Loading,
            report: RenderReport::default(),
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn index(&self) -> &PostIndex {
        &self.index
    }

    /// Records that passed or failed the render gate on the latest render.
    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    /// Fetch the `Blogs` sheet and render the initial listing.
    pub fn load(&mut self, doc: &mut Document, api: Option<&dyn ContentApi>) -> &ListingState {
        let config = self.config;
        let ids = &config.elements;
        self.state = ListingState::Loading;

        let result = fetch_records::<PostRecord>(api, Sheet::Blogs, RecordKind::Post);
        doc.remove(&ids.posts_loading);

        match result {
            Err(e) => {
                let message = e.page_message("blog posts");
                tracing::error!("{message}");
                doc.with(&ids.posts_container, |el| {
                    el.replace_content(render::error_message(&message))
                });
                self.state = ListingState::Error(message);
            }
            Ok(records) if records.is_empty() => {
                doc.with(&ids.posts_container, |el| {
                    el.replace_content(render::notice(NO_POSTS))
                });
                self.state = ListingState::Loaded;
            }
            Ok(records) => {
                self.index = PostIndex::new(records);
                tracing::debug!(
                    "indexed {} posts in {} categories",
                    self.index.len(),
                    self.index.categories().len()
                );
                self.render_buttons(doc, None);
                let initial: Vec<&PostRecord> =
                    self.index.recent(config.listing.limit()).iter().collect();
                self.report = render_posts(config, doc, initial);
                self.state = ListingState::Loaded;
            }
        }
        &self.state
    }

    /// Show only posts matching `selector` and mark its button active.
    ///
    /// Ignored until the listing has loaded at least one post.
    pub fn select_category(&mut self, doc: &mut Document, selector: CategorySelector) {
        let ready = matches!(self.state, ListingState::Loaded | ListingState::Filtered(_));
        if !ready || self.index.is_empty() {
            tracing::debug!("ignoring category selection in state {:?}", self.state);
            return;
        }
        let posts = self.index.filter(&selector);
        self.report = render_posts(self.config, doc, posts);
        self.render_buttons(doc, Some(&selector));
        self.state = ListingState::Filtered(selector);
    }

    /// Select by a button's `data-category` value. Returns whether it matched.
    pub fn select_category_slug(&mut self, doc: &mut Document, slug: &str) -> bool {
        match self.index.selector_for_slug(slug) {
            Some(selector) => {
                self.select_category(doc, selector);
                true
            }
            None => {
                tracing::debug!("no category button with slug {slug:?}");
                false
            }
        }
    }

    /// Select by a typed category name, falling back to a button slug.
    /// Returns whether it matched.
    pub fn select_category_named(&mut self, doc: &mut Document, text: &str) -> bool {
        match self.index.selector_for_name_or_slug(text) {
            Some(selector) => {
                self.select_category(doc, selector);
                true
            }
            None => {
                tracing::debug!("no category named {text:?}");
                false
            }
        }
    }

    fn render_buttons(&self, doc: &mut Document, active: Option<&CategorySelector>) {
        let label = self.config.locale.strings().all_categories;
        let categories = self.index.categories();
        doc.with(&self.config.elements.category_filters, |el| {
            el.replace_content(render::render_category_buttons(categories, active, label))
        });
    }
}

fn render_posts(config: &SiteConfig, doc: &mut Document, posts: Vec<&PostRecord>) -> RenderReport {
    let Some(container) = doc.get_mut(&config.elements.posts_container) else {
        return RenderReport::default();
    };
    if posts.is_empty() {
        container.replace_content(render::notice(config.locale.strings().no_posts_in_category));
        return RenderReport::default();
    }
    let batch = render::render_post_cards(posts, &CardContext::from_config(config));
    container.replace_content(batch.markup);
    batch.report
}
