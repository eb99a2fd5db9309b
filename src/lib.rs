//! # Sheetfolio
//!
//! Renders a personal portfolio and blog whose content lives in a spreadsheet.
//! A spreadsheet web app serves each sheet as JSON (`?sheet=Blogs`,
//! `?sheet=Projects`); this crate fetches it, filters and sorts the records,
//! and renders them into a page's element hooks.
//!
//! # Architecture: Controllers Over a Document
//!
//! Every page follows the same three steps:
//!
//! ```text
//! 1. Skeleton   generate::skeleton    →  Document   (element hooks by id)
//! 2. Load       *Controller::load     →  Document   (one fetch, one render)
//! 3. Page       generate::render_page →  HTML
//! ```
//!
//! Controllers own their state as explicit enums and receive the document by
//! `&mut`, plus an `Option<&dyn ContentApi>`. `None` means no API URL is
//! configured, which every controller reports in place of its content without
//! making a request.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `ContentApi` seam, `reqwest` client, payload classification, page-level load errors |
//! | [`records`] | Lenient row decoding and the render gate (`validate`) |
//! | [`index`] | Date sort, category extraction and filtering over post records |
//! | [`image_url`] | Drive share links, absolute URLs and local image names to `src` values |
//! | [`locale`] | Bengali and English reader-facing strings and long-form dates |
//! | [`render`] | Maud fragments: cards, filter buttons, notices, detail view |
//! | [`dom`] | The element-hook document controllers mutate; the one trusted-markup point |
//! | [`listing`] | Blog listing controller with category selection |
//! | [`projects`] | Project cards controller |
//! | [`detail`] | Single post controller, slug lookup from the page query |
//! | [`chrome`] | Mobile menu, nav highlighting, smooth scroll, sticky header, footer year |
//! | [`generate`] | Page skeletons and full HTML pages |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Records Validate at the Render Gate
//!
//! Spreadsheet cells arrive as whatever type the sheet holds. Rows decode
//! leniently into all-optional records and are only checked when a card is
//! about to render; a row missing its identity fields is skipped with a
//! warning while its siblings render normally.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Interpolation is
//! escaped by default. The record fields that carry operator-authored HTML go
//! through [`dom::trusted_markup`] and nowhere else.
//!
//! ## Blocking Fetches
//!
//! A page makes at most one request and renders synchronously once it
//! returns, so the client is `reqwest::blocking` and there is no async
//! runtime.

pub mod api;
pub mod chrome;
pub mod config;
pub mod detail;
pub mod dom;
pub mod generate;
pub mod image_url;
pub mod index;
pub mod listing;
pub mod locale;
pub mod output;
pub mod projects;
pub mod records;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
