//! Card and detail rendering.
//!
//! Pure functions from records to [`maud::Markup`]. Nothing here touches the
//! document; controllers decide where the fragments go.
//!
//! ## Render Gate
//!
//! Batch renderers validate each record first. A record missing its identity
//! fields (`slug`/`title`/`summary` for posts, `id`/`title` for projects) is
//! skipped with a `warn!` diagnostic and listed in [`RenderReport::skipped`]; the
//! rest of the batch renders normally.
//!
//! ## Escaping
//!
//! Maud escapes every interpolation. The exceptions are the operator-authored
//! HTML fields, which pass through [`trusted_markup`].

use crate::config::{ImagesConfig, SiteConfig};
use crate::dom::trusted_markup;
use crate::image_url;
use crate::index::{ALL_SLUG, Category, CategorySelector};
use crate::locale::Locale;
use crate::records::{PostRecord, ProjectRecord, RecordError, ValidPost, ValidProject};
use maud::{Markup, html};

/// Everything card rendering needs from the site configuration.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub locale: Locale,
    pub detail_page: &'a str,
    pub images: &'a ImagesConfig,
}

impl<'a> CardContext<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            locale: config.locale,
            detail_page: &config.pages.detail,
            images: &config.images,
        }
    }
}

/// Identity of one rendered card, for CLI summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub id: String,
    pub title: String,
}

/// Which records made it through the render gate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<CardSummary>,
    pub skipped: Vec<RecordError>,
}

/// The outcome of rendering a list of records.
#[derive(Debug, Clone)]
pub struct CardBatch {
    pub markup: Markup,
    pub report: RenderReport,
}

impl CardBatch {
    fn collect<T>(
        records: impl IntoIterator<Item = T>,
        mut render: impl FnMut(T) -> Result<(CardSummary, Markup), RecordError>,
    ) -> Self {
        let mut cards = Vec::new();
        let mut report = RenderReport::default();
        for record in records {
            match render(record) {
                Ok((summary, card)) => {
                    report.rendered.push(summary);
                    cards.push(card);
                }
                Err(e) => {
                    tracing::warn!("skipping {e}");
                    report.skipped.push(e);
                }
            }
        }
        Self {
            markup: html! { @for card in &cards { (card) } },
            report,
        }
    }
}

/// Detail page link for a (trimmed) post slug.
pub fn post_link(detail_page: &str, slug: &str) -> String {
    format!("{}?slug={}", detail_page, urlencoding::encode(slug.trim()))
}

/// `onerror` handler swapping a broken image for the placeholder.
fn image_fallback(placeholder: &str) -> String {
    format!(
        "this.onerror=null; this.src='{placeholder}'; this.alt='Image could not be loaded';"
    )
}

fn card_image(resolved: Option<String>, alt: &str, placeholder: &str, placeholder_alt: &str) -> Markup {
    html! {
        div.card-image-container {
            @match resolved {
                Some(src) => {
                    img src=(src) alt=(alt) loading="lazy" onerror=(image_fallback(placeholder));
                }
                None => {
                    img src=(placeholder) alt=(placeholder_alt) loading="lazy";
                }
            }
        }
    }
}

fn post_date_line(record: &PostRecord, locale: Locale) -> Markup {
    let strings = locale.strings();
    html! {
        @match record.published() {
            Some(date) => { p.date { (strings.published) (locale.format_long_date(&date)) } }
            None => { p.date { (strings.published_unknown) (strings.unknown) } }
        }
    }
}

pub fn render_post_card(post: &ValidPost<'_>, ctx: &CardContext<'_>) -> Markup {
    let link = post_link(ctx.detail_page, post.slug);
    let image = image_url::resolve_opt(post.record.image_url.as_deref(), &ctx.images.local_prefix);
    html! {
        div.blog-card {
            (card_image(image, post.title, &ctx.images.post_placeholder, "Placeholder Blog Image"))
            div.card-content {
                h3 { a href=(link) { (trusted_markup(post.title)) } }
                (post_date_line(post.record, ctx.locale))
                p.summary { (trusted_markup(post.summary)) }
                div.card-footer-links {
                    a href=(link) { (ctx.locale.strings().read_more) }
                }
            }
        }
    }
}

pub fn render_project_card(project: &ValidProject<'_>, ctx: &CardContext<'_>) -> Markup {
    let record = project.record;
    let live = record.live_link();
    let repo = record.repo_link();
    let title_href = live.or(repo).unwrap_or("#");
    let description = record.description.as_deref().filter(|d| !d.trim().is_empty());
    let tags: Vec<&str> = record.tags().collect();
    let image = image_url::resolve_opt(record.image_url.as_deref(), &ctx.images.local_prefix);
    html! {
        div.project-card {
            (card_image(image, project.title, &ctx.images.project_placeholder, "Placeholder Project Image"))
            div.card-content {
                h3 {
                    a href=(title_href) target="_blank" rel="noopener noreferrer" {
                        (trusted_markup(project.title))
                    }
                }
                p.description {
                    @match description {
                        Some(d) => { (trusted_markup(d)) }
                        None => { "No description available." }
                    }
                }
                @if !tags.is_empty() {
                    div.tags {
                        @for tag in &tags { span { (tag) } }
                    }
                }
                @if live.is_some() || repo.is_some() {
                    div.card-footer-links {
                        @if let Some(href) = live {
                            a.btn.btn-sm.btn-primary href=(href) target="_blank" rel="noopener noreferrer" { "Live Demo" }
                        }
                        @if let Some(href) = repo {
                            a.btn.btn-sm.btn-secondary href=(href) target="_blank" rel="noopener noreferrer" { "View Code" }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_post_cards<'a>(
    posts: impl IntoIterator<Item = &'a PostRecord>,
    ctx: &CardContext<'_>,
) -> CardBatch {
    CardBatch::collect(posts, |record| {
        let post = record.validate()?;
        let summary = CardSummary {
            id: post.slug.to_string(),
            title: post.title.to_string(),
        };
        Ok((summary, render_post_card(&post, ctx)))
    })
}

pub fn render_project_cards<'a>(
    projects: impl IntoIterator<Item = &'a ProjectRecord>,
    ctx: &CardContext<'_>,
) -> CardBatch {
    CardBatch::collect(projects, |record| {
        let project = record.validate()?;
        let summary = CardSummary {
            id: project.id.to_string(),
            title: project.title.to_string(),
        };
        Ok((summary, render_project_card(&project, ctx)))
    })
}

/// The static "all" button followed by one button per category.
///
/// At most one button carries `active`: the one matching `active`.
pub fn render_category_buttons(
    categories: &[Category],
    active: Option<&CategorySelector>,
    all_label: &str,
) -> Markup {
    let all_active = active == Some(&CategorySelector::All);
    html! {
        button.category-filter-btn.active[all_active] type="button" data-category=(ALL_SLUG) {
            (all_label)
        }
        @for category in categories {
            button.category-filter-btn.active[active.is_some_and(|s| s.selects(category))] type="button" data-category=(category.slug) {
                (category.name)
            }
        }
    }
}

/// A plain informational notice.
pub fn notice(text: &str) -> Markup {
    html! { p { (text) } }
}

/// A page-level error message.
pub fn error_message(text: &str) -> Markup {
    html! { p.error-message { (text) } }
}

/// Detail lookup miss, naming the requested slug.
pub fn post_not_found(slug: &str) -> Markup {
    html! {
        p.error-message {
            "Sorry, the blog post with slug \"" strong { (slug) } "\" could not be found."
        }
    }
}

/// Featured image of a post detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedImage {
    pub src: String,
    pub alt: String,
    /// `onerror` handler falling back to the placeholder.
    pub fallback: String,
}

/// Everything the detail page shows for one post.
#[derive(Debug, Clone)]
pub struct PostDetailView {
    pub document_title: String,
    pub title: String,
    pub date: String,
    pub image: Option<FeaturedImage>,
    pub content: Markup,
}

pub fn post_detail_view(post: &PostRecord, ctx: &CardContext<'_>, author: &str) -> PostDetailView {
    let strings = ctx.locale.strings();
    let title = post.title.as_deref().filter(|t| !t.trim().is_empty());
    if post.date_published.is_some() && post.published().is_none() {
        tracing::warn!(
            "could not parse date {:?} for post {:?}",
            post.date_published,
            post.title
        );
    }
    let image = image_url::resolve_opt(post.image_url.as_deref(), &ctx.images.local_prefix).map(|src| {
        FeaturedImage {
            src,
            alt: title.unwrap_or("Blog post featured image").to_string(),
            fallback: image_fallback(&ctx.images.post_placeholder),
        }
    });
    let content = match post.content.as_deref().filter(|c| !c.is_empty()) {
        Some(body) => html! { (trusted_markup(body)) },
        None => notice(strings.no_content),
    };
    PostDetailView {
        document_title: format!("{} - {}", title.unwrap_or("Blog Post"), author),
        title: title.unwrap_or(strings.title_unavailable).to_string(),
        date: ctx.locale.format_date_or_unknown(post.published().as_ref()),
        image,
        content,
    }
}
