//! Page shells.
//!
//! Each page starts as a skeleton [`Document`]: the element hooks its
//! controllers expect, in their initial state (loading indicators present,
//! containers empty, menu closed). After the controllers have run, the
//! document is rendered back into a complete HTML page.
//!
//! ## Layout
//!
//! ```text
//! header#main-header
//! ├── button#mobile-menu-toggle
//! └── nav#main-nav
//!     └── a.nav-link#nav-link-{i}     one per [[nav]] entry
//! main
//! └── page section                    listing / detail / projects hooks
//! footer
//! └── span#current-year
//! ```
//!
//! An element a controller removed (a loading indicator, say) is simply
//! absent from the output.

use crate::config::{PagesConfig, SiteConfig};
use crate::dom::{Document, Element};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three pages the site is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Listing,
    Detail,
    Projects,
}

impl Page {
    /// `<title>` before any controller runs.
    pub fn default_title(self) -> &'static str {
        match self {
            Page::Listing => "Blog",
            Page::Detail => "Blog Post",
            Page::Projects => "Projects",
        }
    }

    pub fn file_name(self, pages: &PagesConfig) -> &str {
        match self {
            Page::Listing => &pages.listing,
            Page::Detail => &pages.detail,
            Page::Projects => &pages.projects,
        }
    }

    fn body_class(self) -> &'static str {
        match self {
            Page::Listing => "page-blog",
            Page::Detail => "page-blog-post",
            Page::Projects => "page-projects",
        }
    }
}

/// Element id of the `index`th navigation link.
pub fn nav_link_id(index: usize) -> String {
    format!("nav-link-{index}")
}

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

// ============================================================================
// Skeletons
// ============================================================================

/// The initial document for `page`, with chrome and page hooks in place.
pub fn skeleton(page: Page, config: &SiteConfig) -> Document {
    let ids = &config.elements;
    let mut doc = Document::new(page.default_title())
        .with_element(&ids.header, Element::new("header").with_class("site-header"))
        .with_element(
            &ids.menu_toggle,
            Element::new("button")
                .with_class("menu-toggle")
                .with_attribute("type", "button")
                .with_attribute("aria-controls", &ids.main_nav)
                .with_attribute("aria-expanded", "false")
                .with_attribute("aria-label", "Toggle navigation")
                .with_text("☰"),
        )
        .with_element(&ids.main_nav, Element::new("nav").with_class("main-nav"))
        .with_element(&ids.current_year, Element::new("span"));

    for (i, link) in config.nav.iter().enumerate() {
        doc.insert(
            &nav_link_id(i),
            Element::new("a")
                .with_class("nav-link")
                .with_attribute("href", &link.href)
                .with_text(&link.label),
        );
    }

    match page {
        Page::Listing => {
            doc.insert(&ids.posts_loading, loading("Loading blog posts..."));
            doc.insert(
                &ids.category_filters,
                Element::new("div").with_class("category-filters"),
            );
            doc.insert(&ids.posts_container, Element::new("div").with_class("blog-grid"));
        }
        Page::Projects => {
            doc.insert(&ids.projects_loading, loading("Loading projects..."));
            doc.insert(
                &ids.projects_container,
                Element::new("div").with_class("projects-grid"),
            );
        }
        Page::Detail => {
            doc.insert(&ids.post_loading, loading("Loading post..."));
            doc.insert(&ids.post_title, Element::new("h1").with_class("post-title"));
            doc.insert(&ids.post_date, Element::new("span").with_class("post-date"));
            doc.insert(
                &ids.post_image_container,
                Element::new("div").with_class("featured-image"),
            );
            doc.insert(&ids.post_image, Element::new("img").with_attribute("alt", ""));
            doc.insert(&ids.post_content, Element::new("div").with_class("post-content"));
        }
    }
    doc
}

fn loading(text: &str) -> Element {
    Element::new("p").with_class("loading-indicator").with_text(text)
}

// ============================================================================
// HTML Components
// ============================================================================

fn escape(value: &str) -> String {
    html! { (value) }.into_string()
}

/// Serialize one hook, nesting `children` after its own content.
///
/// Missing ids render as nothing.
fn render_element(doc: &Document, id: &str, children: Option<Markup>) -> Markup {
    let Some(el) = doc.get(id) else {
        return html! {};
    };
    let mut out = format!("<{} id=\"{}\"", el.tag(), escape(id));
    if let Some(classes) = el.class_attr() {
        out.push_str(&format!(" class=\"{}\"", escape(&classes)));
    }
    for (name, value) in el.attributes() {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    if el.is_hidden() {
        out.push_str(" hidden");
    }
    out.push('>');
    if VOID_TAGS.contains(&el.tag()) {
        return PreEscaped(out);
    }
    out.push_str(el.content());
    if let Some(children) = children {
        out.push_str(&children.into_string());
    }
    out.push_str(&format!("</{}>", el.tag()));
    PreEscaped(out)
}

/// Renders the base HTML document structure
fn base_document(doc: &Document, config: &SiteConfig, body_class: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.locale.tag()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (doc.title()) }
                link rel="stylesheet" href=(config.pages.stylesheet);
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

fn site_header(doc: &Document, config: &SiteConfig) -> Markup {
    let ids = &config.elements;
    let links = html! {
        ul.nav-links {
            @for i in 0..config.nav.len() {
                li { (render_element(doc, &nav_link_id(i), None)) }
            }
        }
    };
    let inner = html! {
        div.container {
            a.logo href=(config.pages.projects) { (config.author) }
            (render_element(doc, &ids.menu_toggle, None))
            (render_element(doc, &ids.main_nav, Some(links)))
        }
    };
    render_element(doc, &ids.header, Some(inner))
}

fn site_footer(doc: &Document, config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            p {
                "© " (render_element(doc, &config.elements.current_year, None)) " " (config.author)
            }
        }
    }
}

fn page_section(doc: &Document, page: Page, config: &SiteConfig) -> Markup {
    let ids = &config.elements;
    match page {
        Page::Listing => html! {
            section.blog-section {
                (render_element(doc, &ids.category_filters, None))
                (render_element(doc, &ids.posts_loading, None))
                (render_element(doc, &ids.posts_container, None))
            }
        },
        Page::Projects => html! {
            section.projects-section id="projects" {
                h2 { "Projects" }
                (render_element(doc, &ids.projects_loading, None))
                (render_element(doc, &ids.projects_container, None))
            }
        },
        Page::Detail => {
            let image = render_element(doc, &ids.post_image, None);
            html! {
                article.blog-post {
                    (render_element(doc, &ids.post_loading, None))
                    (render_element(doc, &ids.post_title, None))
                    p.post-meta { (render_element(doc, &ids.post_date, None)) }
                    (render_element(doc, &ids.post_image_container, Some(image)))
                    (render_element(doc, &ids.post_content, None))
                }
            }
        }
    }
}

/// The complete HTML page for `doc`.
pub fn render_page(doc: &Document, page: Page, config: &SiteConfig) -> Markup {
    let content = html! {
        (site_header(doc, config))
        main { (page_section(doc, page, config)) }
        (site_footer(doc, config))
    };
    base_document(doc, config, page.body_class(), content)
}

/// Write a rendered page, creating parent directories as needed.
pub fn write_page(path: &Path, page: &Markup) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &page.0)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
