use clap::{Parser, Subcommand};
use sheetfolio::api::{ContentApi, HttpContentApi, Sheet, fetch_records};
use sheetfolio::chrome::PageChrome;
use sheetfolio::config::{self, SiteConfig};
use sheetfolio::detail::DetailController;
use sheetfolio::dom::Document;
use sheetfolio::generate::{self, Page};
use sheetfolio::listing::{ListingController, ListingState};
use sheetfolio::output;
use sheetfolio::projects::ProjectsController;
use sheetfolio::records::{PostRecord, ProjectRecord, RecordKind};
use sheetfolio::render::{self, CardContext};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("SHEETFOLIO_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("SHEETFOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "sheetfolio")]
#[command(about = "Render a spreadsheet-backed portfolio and blog")]
#[command(long_about = "\
Render a spreadsheet-backed portfolio and blog

Content lives in a spreadsheet published as a web app. Each page command
fetches one sheet, renders it into the page's element hooks, and writes the
finished HTML page.

Sheets:

  Blogs      slug, title, summary, content, category, datePublished, imageUrl
  Projects   id, title, description, tags, imageUrl, liveUrl, repoUrl

Pages:

  blog       listing of the newest posts with category filter buttons
  post       one post, looked up by slug
  projects   project cards in sheet order

Run 'sheetfolio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Content API base URL (overrides config.toml)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Write the page here instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the blog listing page
    Blog {
        /// Show only this category (name or button slug; "all" for every post)
        #[arg(long)]
        category: Option<String>,
    },
    /// Render a single post page
    Post {
        /// Slug of the post to show
        #[arg(long)]
        slug: String,
    },
    /// Render the project cards page
    Projects,
    /// Fetch both sheets and report which records would render
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let overrides = config::CliOverrides {
        api_base_url: cli.api_base_url,
    };
    let site = config::load_config_with(&cli.config, &overrides)?;
    let client = site.api_base_url().map(HttpContentApi::new).transpose()?;
    let api = client.as_ref().map(|c| c as &dyn ContentApi);

    match cli.command {
        Command::Blog { category } => {
            let mut doc = page_document(Page::Listing, &site);
            let mut listing = ListingController::new(&site);
            listing.load(&mut doc, api);
            if let Some(name) = category {
                let selected = listing.select_category_named(&mut doc, &name);
                if !selected && *listing.state() == ListingState::Loaded {
                    return Err(format!("no category named {name:?}").into());
                }
            }
            if let Some(path) = emit(&doc, Page::Listing, &site, cli.output.as_deref())? {
                output::print_report("Blog posts", "Slug", listing.report());
                println!();
                println!("{}", output::format_written(path, listing.report()));
            }
        }
        Command::Post { slug } => {
            let mut doc = page_document(Page::Detail, &site);
            let mut detail = DetailController::new(&site);
            let query = format!("slug={}", urlencoding::encode(&slug));
            detail.load(&mut doc, &query, api);
            if let Some(path) = emit(&doc, Page::Detail, &site, cli.output.as_deref())? {
                output::print_detail(detail.state());
                println!();
                println!("Wrote {}", path.display());
            }
        }
        Command::Projects => {
            let mut doc = page_document(Page::Projects, &site);
            let mut projects = ProjectsController::new(&site);
            projects.load(&mut doc, api);
            if let Some(path) = emit(&doc, Page::Projects, &site, cli.output.as_deref())? {
                output::print_report("Projects", "Id", projects.report());
                println!();
                println!("{}", output::format_written(path, projects.report()));
            }
        }
        Command::Check => check(&site, api),
        // Printed before the config was loaded
        Command::GenConfig => {}
    }

    Ok(())
}

/// Skeleton for `page` with its chrome installed.
fn page_document(page: Page, site: &SiteConfig) -> Document {
    let mut doc = generate::skeleton(page, site);
    let path = format!("/{}", page.file_name(&site.pages));
    PageChrome::install_now(&mut doc, site, &path);
    doc
}

/// Write the finished page to `output`, or to stdout when there is none.
///
/// Returns the path written, if any.
fn emit<'a>(
    doc: &Document,
    page: Page,
    site: &SiteConfig,
    output: Option<&'a Path>,
) -> Result<Option<&'a Path>, generate::GenerateError> {
    let markup = generate::render_page(doc, page, site);
    match output {
        Some(path) => {
            generate::write_page(path, &markup)?;
            Ok(Some(path))
        }
        None => {
            println!("{}", markup.into_string());
            Ok(None)
        }
    }
}

fn check(site: &SiteConfig, api: Option<&dyn ContentApi>) {
    let ctx = CardContext::from_config(site);

    match fetch_records::<PostRecord>(api, Sheet::Blogs, RecordKind::Post) {
        Ok(posts) => {
            let report = render::render_post_cards(&posts, &ctx).report;
            output::print_sheet_status(Sheet::Blogs, Ok((posts.len(), &report)));
        }
        Err(e) => {
            let message = e.page_message("blog posts");
            output::print_sheet_status(Sheet::Blogs, Err(&message));
        }
    }

    match fetch_records::<ProjectRecord>(api, Sheet::Projects, RecordKind::Project) {
        Ok(projects) => {
            let report = render::render_project_cards(&projects, &ctx).report;
            output::print_sheet_status(Sheet::Projects, Ok((projects.len(), &report)));
        }
        Err(e) => {
            let message = e.page_message("projects");
            output::print_sheet_status(Sheet::Projects, Err(&message));
        }
    }
}
