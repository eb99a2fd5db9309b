//! End-to-end tests: the HTTP client against a local mock of the content API,
//! driving each page from skeleton to written HTML.

use mockito::{Matcher, Mock, Server, ServerGuard};
use sheetfolio::api::{ContentApi, HttpContentApi};
use sheetfolio::chrome::PageChrome;
use sheetfolio::config::{SiteConfig, load_config};
use sheetfolio::detail::{DetailController, DetailState};
use sheetfolio::generate::{Page, render_page, skeleton, write_page};
use sheetfolio::index::CategorySelector;
use sheetfolio::listing::{ListingController, ListingState};
use sheetfolio::projects::{ProjectsController, ProjectsState};
use std::fs;
use tempfile::TempDir;

const BLOGS: &str = include_str!("fixtures/blogs.json");
const PROJECTS: &str = include_str!("fixtures/projects.json");

/// Serve `body` for `GET /exec?sheet={sheet}`, expecting `hits` requests.
fn sheet_mock(
    server: &mut ServerGuard,
    sheet: &str,
    status: usize,
    body: &str,
    hits: usize,
) -> Mock {
    server
        .mock("GET", "/exec")
        .match_query(Matcher::UrlEncoded("sheet".into(), sheet.into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(hits)
        .create()
}

fn client(server: &ServerGuard) -> HttpContentApi {
    HttpContentApi::new(&format!("{}/exec", server.url())).unwrap()
}

fn content<'d>(doc: &'d sheetfolio::dom::Document, id: &str) -> &'d str {
    doc.get(id).unwrap().content()
}

#[test]
fn blog_listing_page() {
    let mut server = Server::new();
    let mock = sheet_mock(&mut server, "Blogs", 200, BLOGS, 1);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Listing, &config);
    PageChrome::install(&mut doc, &config, "/blog.html", 2024);
    let mut listing = ListingController::new(&config);
    assert_eq!(listing.load(&mut doc, Some(&api as &dyn ContentApi)), &ListingState::Loaded);

    let cards = content(&doc, "blog-posts-container");
    assert_eq!(cards.matches(r#"class="blog-card""#).count(), 2);
    assert!(cards.find("Newer post").unwrap() < cards.find("Older post").unwrap());
    assert!(cards.contains("https://drive.google.com/uc?export=view&amp;id=FILE123"));
    assert!(cards.contains("Fresh thoughts on <b>Rust</b>."));
    assert!(!cards.contains("This row has no title."));
    assert_eq!(listing.report().skipped.len(), 1);

    // Selection filters the in-memory index; no second request.
    listing.select_category(&mut doc, CategorySelector::Named("Rust".into()));
    let cards = content(&doc, "blog-posts-container");
    assert_eq!(cards.matches(r#"class="blog-card""#).count(), 1);
    assert!(cards.contains("Newer post"));
    mock.assert();

    let out = TempDir::new().unwrap();
    let path = out.path().join("site/blog.html");
    write_page(&path, &render_page(&doc, Page::Listing, &config)).unwrap();
    let html = fs::read_to_string(&path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!html.contains(r#"id="blog-loading""#));
    assert!(html.contains(r#"data-category="rust""#));
    assert!(html.contains(r#"<span id="current-year">2024</span>"#));
}

#[test]
fn reported_error_is_shown_in_place() {
    let mut server = Server::new();
    let _mock = sheet_mock(&mut server, "Blogs", 200, r#"{"error": true, "message": "boom"}"#, 1);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Listing, &config);
    let mut listing = ListingController::new(&config);
    listing.load(&mut doc, Some(&api as &dyn ContentApi));

    let region = content(&doc, "blog-posts-container");
    assert!(region.contains(r#"class="error-message""#));
    assert!(region.contains("boom"));
    assert!(!region.contains("blog-card"));
    assert!(doc.get("blog-loading").is_none());
}

#[test]
fn http_status_reaches_the_page() {
    let mut server = Server::new();
    let _mock = sheet_mock(&mut server, "Projects", 500, "Internal failure", 1);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Projects, &config);
    let mut projects = ProjectsController::new(&config);
    projects.load(&mut doc, Some(&api as &dyn ContentApi));

    match projects.state() {
        ProjectsState::Error(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("Internal failure"), "{message}");
        }
        other => panic!("expected an error, got {other:?}"),
    }
    assert!(content(&doc, "projects-container").contains("Failed to load projects."));
}

#[test]
fn detail_without_slug_makes_no_request() {
    let mut server = Server::new();
    let mock = sheet_mock(&mut server, "Blogs", 200, BLOGS, 0);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Detail, &config);
    let mut detail = DetailController::new(&config);
    assert_eq!(
        detail.load(&mut doc, "", Some(&api as &dyn ContentApi)),
        &DetailState::NotFound(None)
    );
    assert_eq!(content(&doc, "blog-post-title"), "Post Not Found");
    mock.assert();
}

#[test]
fn detail_page_for_slug() {
    let mut server = Server::new();
    let _mock = sheet_mock(&mut server, "Blogs", 200, BLOGS, 1);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Detail, &config);
    PageChrome::install(&mut doc, &config, "/blog-post.html", 2024);
    let mut detail = DetailController::new(&config);
    detail.load(&mut doc, "?slug=newer-post", Some(&api as &dyn ContentApi));

    assert_eq!(detail.state(), &DetailState::Rendered("newer-post".into()));
    assert_eq!(doc.title(), "Newer post - Your Name");
    assert_eq!(content(&doc, "blog-post-content"), "<p>Written in 2024.</p>");
    assert_eq!(
        doc.get("blog-post-image").unwrap().attribute("src"),
        Some("https://drive.google.com/uc?export=view&id=FILE123")
    );

    let html = render_page(&doc, Page::Detail, &config).into_string();
    assert!(html.contains("<title>Newer post - Your Name</title>"));
    assert!(html.contains(r#"class="active nav-link" href="blog.html""#));
}

#[test]
fn projects_page() {
    let mut server = Server::new();
    let _mock = sheet_mock(&mut server, "Projects", 200, PROJECTS, 1);
    let api = client(&server);
    let config = SiteConfig::default();

    let mut doc = skeleton(Page::Projects, &config);
    let mut projects = ProjectsController::new(&config);
    projects.load(&mut doc, Some(&api as &dyn ContentApi));

    let cards = content(&doc, "projects-container");
    assert_eq!(cards.matches(r#"class="project-card""#).count(), 2);
    assert!(cards.contains(r#"src="images/renderer.png""#));
    assert!(cards.contains("<span>Rust</span><span>HTML</span>"));
    assert!(cards.contains("Live Demo"));
    let ids: Vec<_> = projects.report().rendered.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(projects.report().skipped.len(), 1);
}

#[test]
fn config_file_drives_locale_and_endpoint() {
    let mut server = Server::new();
    let _mock = sheet_mock(&mut server, "Blogs", 200, BLOGS, 1);

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!(
            "api_base_url = \"{}/exec\"\nlocale = \"en-US\"\n\n[listing]\ninitial_limit = 2\n",
            server.url()
        ),
    )
    .unwrap();
    let config = load_config(dir.path()).unwrap();
    let api = HttpContentApi::new(config.api_base_url().unwrap()).unwrap();

    let mut doc = skeleton(Page::Listing, &config);
    let mut listing = ListingController::new(&config);
    listing.load(&mut doc, Some(&api as &dyn ContentApi));

    let cards = content(&doc, "blog-posts-container");
    assert_eq!(cards.matches(r#"class="blog-card""#).count(), 1);
    assert!(cards.contains("Published: January 1, 2024"));
    assert!(cards.contains("Read more →"));
}

#[test]
fn missing_endpoint_is_configuration_error() {
    let config = SiteConfig::default();
    assert!(config.api_base_url().is_none());

    let mut doc = skeleton(Page::Listing, &config);
    let mut listing = ListingController::new(&config);
    listing.load(&mut doc, None);
    assert!(content(&doc, "blog-posts-container").contains("API URL configuration error"));
}
