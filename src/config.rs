//! Site configuration module.
//!
//! Three layers, lowest first: [`defaults_layer`], the site's `config.toml`
//! ([`file_layer`]), and command-line flags ([`CliOverrides`]). Each is a TOML
//! table merged over the one below with [`merge_toml`]; the result is
//! deserialized and validated once.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! api_base_url = ""          # Content API base URL (required to fetch)
//! locale = "bn-BD"           # Reader-facing strings: "bn-BD" or "en-US"
//! author = "Your Name"       # Suffix of the post page <title>
//!
//! [pages]
//! listing = "blog.html"      # Blog listing page
//! detail = "blog-post.html"  # Single post page, receives ?slug=
//! projects = "index.html"    # Page hosting the project cards
//! stylesheet = "css/style.css"
//!
//! [images]
//! local_prefix = "images/"   # Folder for bare image filenames
//! post_placeholder = "images/placeholder-blog.png"
//! project_placeholder = "images/placeholder-project.png"
//!
//! [listing]
//! initial_limit = 9          # Posts shown before a category is picked; 0 = all
//!
//! [chrome]
//! scroll_threshold = 50      # px of scroll before the header turns sticky
//! scroll_buffer = 15         # px kept above anchor targets
//!
//! [[nav]]
//! label = "Home"
//! href = "index.html"
//! ```
//!
//! ## Missing API URL
//!
//! An empty `api_base_url` is not a validation error: pages
//! still render, and each controller reports the configuration problem in the
//! page itself without attempting a fetch.
//!
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL of the spreadsheet content API.
    pub api_base_url: String,
    /// Locale for reader-facing strings and dates.
    pub locale: Locale,
    /// Site owner, appended to post page titles.
    pub author: String,
    /// Page file names.
    pub pages: PagesConfig,
    /// Image resolution settings.
    pub images: ImagesConfig,
    /// Blog listing settings.
    pub listing: ListingConfig,
    /// Header and scrolling behaviour.
    pub chrome: ChromeConfig,
    /// Element ids the controllers hook into.
    pub elements: ElementsConfig,
    /// Main navigation entries.
    pub nav: Vec<NavLink>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            locale: Locale::default(),
            author: "Your Name".to_string(),
            pages: PagesConfig::default(),
            images: ImagesConfig::default(),
            listing: ListingConfig::default(),
            chrome: ChromeConfig::default(),
            elements: ElementsConfig::default(),
            nav: vec![
                NavLink::new("Home", "index.html"),
                NavLink::new("Projects", "index.html#projects"),
                NavLink::new("Blog", "blog.html"),
            ],
        }
    }
}

impl SiteConfig {
    /// Trimmed API base URL, `None` when unset.
    pub fn api_base_url(&self) -> Option<&str> {
        Some(self.api_base_url.trim()).filter(|u| !u.is_empty())
    }

    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pages = [
            ("pages.listing", &self.pages.listing),
            ("pages.detail", &self.pages.detail),
            ("pages.projects", &self.pages.projects),
        ];
        for (key, value) in pages {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if let Some((key, _)) = self.elements.ids().into_iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "elements.{key} must not be empty"
            )));
        }
        if self.nav.iter().any(|link| link.href.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "nav entries need a non-empty href".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub listing: String,
    pub detail: String,
    pub projects: String,
    /// Stylesheet linked from every page head. Empty = none.
    pub stylesheet: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            listing: "blog.html".to_string(),
            detail: "blog-post.html".to_string(),
            projects: "index.html".to_string(),
            stylesheet: "css/style.css".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Folder that bare image filenames are relative to.
    pub local_prefix: String,
    pub post_placeholder: String,
    pub project_placeholder: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            local_prefix: "images/".to_string(),
            post_placeholder: "images/placeholder-blog.png".to_string(),
            project_placeholder: "images/placeholder-project.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Number of newest posts shown on first render. `0` shows all.
    pub initial_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { initial_limit: 9 }
    }
}

impl ListingConfig {
    pub fn limit(&self) -> Option<usize> {
        Some(self.initial_limit).filter(|n| *n > 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeConfig {
    /// Vertical scroll (px) past which the header gets `sticky-header`.
    pub scroll_threshold: u32,
    /// Gap (px) kept between the header and a smooth-scroll target.
    pub scroll_buffer: u32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50,
            scroll_buffer: 15,
        }
    }
}

/// Element ids controllers look up in the [`Document`](crate::dom::Document).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementsConfig {
    pub posts_container: String,
    pub posts_loading: String,
    pub category_filters: String,
    pub projects_container: String,
    pub projects_loading: String,
    pub post_title: String,
    pub post_date: String,
    pub post_image: String,
    pub post_image_container: String,
    pub post_content: String,
    pub post_loading: String,
    pub menu_toggle: String,
    pub main_nav: String,
    pub header: String,
    pub current_year: String,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            posts_container: "blog-posts-container".to_string(),
            posts_loading: "blog-loading".to_string(),
            category_filters: "category-filter-container".to_string(),
            projects_container: "projects-container".to_string(),
            projects_loading: "projects-loading".to_string(),
            post_title: "blog-post-title".to_string(),
            post_date: "blog-post-date-published".to_string(),
            post_image: "blog-post-image".to_string(),
            post_image_container: "post-featured-image-container".to_string(),
            post_content: "blog-post-content".to_string(),
            post_loading: "blog-post-loading".to_string(),
            menu_toggle: "mobile-menu-toggle".to_string(),
            main_nav: "main-nav".to_string(),
            header: "main-header".to_string(),
            current_year: "current-year".to_string(),
        }
    }
}

impl ElementsConfig {
    fn ids(&self) -> [(&'static str, &str); 15] {
        [
            ("posts_container", &self.posts_container),
            ("posts_loading", &self.posts_loading),
            ("category_filters", &self.category_filters),
            ("projects_container", &self.projects_container),
            ("projects_loading", &self.projects_loading),
            ("post_title", &self.post_title),
            ("post_date", &self.post_date),
            ("post_image", &self.post_image),
            ("post_image_container", &self.post_image_container),
            ("post_content", &self.post_content),
            ("post_loading", &self.post_loading),
            ("menu_toggle", &self.menu_toggle),
            ("main_nav", &self.main_nav),
            ("header", &self.header),
            ("current_year", &self.current_year),
        ]
    }
}

/// One main-navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Bottom layer: `SiteConfig::default()` as a TOML table.
pub fn defaults_layer() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config: {e}")))
}

/// Lay `overlay` over `base`. Tables merge per key; anything else in
/// `overlay` (nav arrays too) replaces the `base` value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Middle layer: the site's `config.toml`, if `dir` has one.
pub fn file_layer(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Settings given as command-line flags. They win over `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
}

impl CliOverrides {
    /// Top layer, or `None` when no flag was given.
    pub fn layer(&self) -> Option<toml::Value> {
        let url = self.api_base_url.as_ref()?;
        let mut table = toml::map::Map::new();
        table.insert("api_base_url".into(), toml::Value::String(url.clone()));
        Some(toml::Value::Table(table))
    }
}

/// Stack `layers` over `base` in order, then deserialize and validate.
pub fn resolve_layers(
    base: toml::Value,
    layers: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<SiteConfig, ConfigError> {
    let merged = layers.into_iter().flatten().fold(base, merge_toml);
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Site config for `dir`: defaults, then `config.toml`.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    load_config_with(dir, &CliOverrides::default())
}

/// Site config for `dir`: defaults, then `config.toml`, then CLI flags.
pub fn load_config_with(dir: &Path, cli: &CliOverrides) -> Result<SiteConfig, ConfigError> {
    resolve_layers(defaults_layer()?, [file_layer(dir)?, cli.layer()])
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sheetfolio Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Base URL of the spreadsheet content API. Pages request
# `{api_base_url}?sheet=Blogs` and `{api_base_url}?sheet=Projects`.
# Left empty, every page renders a configuration error instead of content.
api_base_url = ""

# Reader-facing strings and date format: "bn-BD" or "en-US".
locale = "bn-BD"

# Appended to the post page title: "<post title> - <author>".
author = "Your Name"

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
[pages]
# Blog listing page (also the nav entry highlighted on post pages).
listing = "blog.html"
# Single post page. Cards link to "<detail>?slug=<slug>".
detail = "blog-post.html"
# Page hosting the project cards.
projects = "index.html"
# Stylesheet linked from every page. Empty to omit.
stylesheet = "css/style.css"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Folder that bare image filenames in the sheet are relative to.
local_prefix = "images/"
# Shown when a record has no usable image, or the image fails to load.
post_placeholder = "images/placeholder-blog.png"
project_placeholder = "images/placeholder-project.png"

# ---------------------------------------------------------------------------
# Blog listing
# ---------------------------------------------------------------------------
[listing]
# Newest posts shown before a category is selected. 0 shows every post.
initial_limit = 9

# ---------------------------------------------------------------------------
# Header and scrolling
# ---------------------------------------------------------------------------
[chrome]
# Pixels of vertical scroll before the header gets the sticky-header class.
scroll_threshold = 50
# Pixels kept between the header and an in-page anchor target.
scroll_buffer = 15

# ---------------------------------------------------------------------------
# Element ids
# ---------------------------------------------------------------------------
[elements]
posts_container = "blog-posts-container"
posts_loading = "blog-loading"
category_filters = "category-filter-container"
projects_container = "projects-container"
projects_loading = "projects-loading"
post_title = "blog-post-title"
post_date = "blog-post-date-published"
post_image = "blog-post-image"
post_image_container = "post-featured-image-container"
post_content = "blog-post-content"
post_loading = "blog-post-loading"
menu_toggle = "mobile-menu-toggle"
main_nav = "main-nav"
header = "main-header"
current_year = "current-year"

# ---------------------------------------------------------------------------
# Navigation (replaces the whole list when set)
# ---------------------------------------------------------------------------
[[nav]]
label = "Home"
href = "index.html"

[[nav]]
label = "Projects"
href = "index.html#projects"

[[nav]]
label = "Blog"
href = "blog.html"
"##
}
