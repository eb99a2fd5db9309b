//! Page chrome shared by every page: mobile menu, nav highlighting, smooth
//! scroll offsets, sticky header and the footer year.
//!
//! Browser events map onto methods: a click on the menu button is
//! [`PageChrome::toggle_menu`], a click on a nav link is
//! [`PageChrome::nav_link_activated`], a scroll is [`PageChrome::on_scroll`].
//! Geometry the document model does not carry (element offsets, header
//! height) is passed in by the caller.

use crate::config::SiteConfig;
use crate::dom::Document;
use chrono::Datelike;
use url::Url;

const ACTIVE: &str = "active";
const STICKY: &str = "sticky-header";
const NAV_LINK: &str = "nav-link";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Static,
    Sticky,
}

pub struct PageChrome<'c> {
    config: &'c SiteConfig,
    menu: MenuState,
    header: HeaderState,
    /// Toggle button and nav panel both exist.
    menu_hooks: bool,
}

impl<'c> PageChrome<'c> {
    /// Wire up the chrome of a freshly built page at `current_path`.
    pub fn install(
        doc: &mut Document,
        config: &'c SiteConfig,
        current_path: &str,
        year: i32,
    ) -> Self {
        let ids = &config.elements;
        let menu_hooks = doc.contains(&ids.menu_toggle) && doc.contains(&ids.main_nav);
        if !doc.contains(&ids.menu_toggle) {
            tracing::error!("mobile menu toggle button (#{}) not found", ids.menu_toggle);
        }
        if !doc.contains(&ids.main_nav) {
            tracing::error!("main navigation element (#{}) not found", ids.main_nav);
        }

        highlight_nav(doc, config, current_path);
        doc.with(&ids.current_year, |el| el.set_text(&year.to_string()));

        let mut chrome = Self {
            config,
            menu: MenuState::Closed,
            header: HeaderState::Static,
            menu_hooks,
        };
        chrome.on_scroll(doc, 0.0);
        chrome
    }

    /// [`install`](Self::install) with the current local year.
    pub fn install_now(doc: &mut Document, config: &'c SiteConfig, current_path: &str) -> Self {
        Self::install(doc, config, current_path, chrono::Local::now().year())
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn header(&self) -> HeaderState {
        self.header
    }

    /// Open a closed menu or close an open one.
    pub fn toggle_menu(&mut self, doc: &mut Document) -> MenuState {
        if !self.menu_hooks {
            return self.menu;
        }
        let ids = &self.config.elements;
        let mut open = false;
        doc.with(&ids.main_nav, |nav| open = nav.toggle_class(ACTIVE));
        doc.with(&ids.menu_toggle, |button| {
            if open {
                button.add_class(ACTIVE);
            } else {
                button.remove_class(ACTIVE);
            }
            button.set_attribute("aria-expanded", if open { "true" } else { "false" });
        });
        self.menu = if open { MenuState::Open } else { MenuState::Closed };
        tracing::debug!("menu {:?}", self.menu);
        self.menu
    }

    /// A nav link was followed: close the menu if it is open.
    pub fn nav_link_activated(&mut self, doc: &mut Document) {
        if self.menu == MenuState::Open {
            self.toggle_menu(doc);
        }
    }

    /// Re-evaluate the sticky header at vertical offset `page_y`.
    pub fn on_scroll(&mut self, doc: &mut Document, page_y: f64) -> HeaderState {
        let ids = &self.config.elements;
        if !doc.contains(&ids.header) {
            return self.header;
        }
        let sticky = page_y > f64::from(self.config.chrome.scroll_threshold);
        doc.with(&ids.header, |header| {
            if sticky {
                header.add_class(STICKY);
            } else {
                header.remove_class(STICKY);
            }
        });
        self.header = if sticky {
            HeaderState::Sticky
        } else {
            HeaderState::Static
        };
        self.header
    }

    /// Where a click on `href` should scroll to, if anywhere.
    ///
    /// Only same-page anchors (`#id`) whose target exists scroll. The target
    /// lands `scroll_buffer` pixels below the header; a page without a header
    /// counts it as zero height.
    pub fn scroll_target(
        &self,
        doc: &Document,
        href: &str,
        element_top: f64,
        page_y: f64,
        header_height: f64,
    ) -> Option<f64> {
        let target = href.strip_prefix('#')?;
        if !doc.contains(target) {
            return None;
        }
        let header = if doc.contains(&self.config.elements.header) {
            header_height
        } else {
            0.0
        };
        Some(element_top + page_y - header - f64::from(self.config.chrome.scroll_buffer))
    }
}

/// Mark the nav links pointing at `current_path` as active.
fn highlight_nav(doc: &mut Document, config: &SiteConfig, current_path: &str) {
    let listing = &config.pages.listing;
    let detail = &config.pages.detail;
    for (id, link) in doc.elements_with_class_mut(NAV_LINK) {
        link.remove_class(ACTIVE);
        let Some(href) = link.attribute("href") else {
            continue;
        };
        if is_nav_link_active(current_path, href, listing, detail) {
            tracing::debug!("nav link #{id} is active");
            link.add_class(ACTIVE);
        }
    }
}

/// Strip one trailing and one leading slash.
fn clean_path(path: &str) -> &str {
    let path = path.strip_suffix('/').unwrap_or(path);
    path.strip_prefix('/').unwrap_or(path)
}

/// Whether a nav link to `href` belongs to the page at `current_path`.
///
/// `href` is resolved against the site root, so `index.html#projects` and
/// `/index.html` both name `index.html`. The root and `index.html` are the
/// same page, and any detail page highlights the listing link.
pub fn is_nav_link_active(current_path: &str, href: &str, listing: &str, detail: &str) -> bool {
    let Ok(base) = Url::parse("http://localhost/") else {
        return false;
    };
    let Ok(link) = base.join(href) else {
        return false;
    };
    let current = clean_path(current_path);
    let target = clean_path(link.path());

    current == target
        || (target == "index.html" && current.is_empty())
        || (target.is_empty() && current == "index.html")
        || (current.starts_with(clean_path(detail)) && target.contains(clean_path(listing)))
}
