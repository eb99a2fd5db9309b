//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every rendered record is shown by its positional index and plain-text
//! title, with its identity (slug or project id) as an indented context line.
//! Records that failed the render gate follow under `Skipped`, one reason per
//! line.
//!
//! # Output Format
//!
//! ## Page commands
//!
//! ```text
//! Blog posts
//! 001 Hello world
//!     Slug: hello-world
//! 002 Second post
//!     Slug: second-post
//! Skipped
//!     blog post record is missing title
//!
//! Wrote dist/blog.html (2 rendered, 1 skipped)
//! ```
//!
//! ## Check
//!
//! ```text
//! Blogs: 12 records, 11 renderable, 1 skipped
//! Projects: Failed to load projects. Network response error: 500 - Internal Server Error. Response: .
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::api::Sheet;
use crate::detail::DetailState;
use crate::render::RenderReport;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate to `max` characters, appending `...` if truncated.
fn truncate_title(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Render reports
// ============================================================================

/// Format the records a page rendered and the ones it skipped.
///
/// `id_label` names the identity line (`Slug`, `Id`).
pub fn format_report(heading: &str, id_label: &str, report: &RenderReport) -> Vec<String> {
    let mut lines = vec![heading.to_string()];
    if report.rendered.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, card) in report.rendered.iter().enumerate() {
        let title = strip_html_tags(&card.title);
        lines.push(format!(
            "{} {}",
            format_index(i + 1),
            truncate_title(title.trim(), 60)
        ));
        lines.push(format!("    {}: {}", id_label, card.id));
    }
    if !report.skipped.is_empty() {
        lines.push("Skipped".to_string());
        for reason in &report.skipped {
            lines.push(format!("    {}", reason));
        }
    }
    lines
}

pub fn print_report(heading: &str, id_label: &str, report: &RenderReport) {
    print_lines(format_report(heading, id_label, report));
}

/// Format the outcome of a detail page load.
pub fn format_detail(state: &DetailState) -> Vec<String> {
    match state {
        DetailState::Rendered(slug) => vec![format!("Post {}", slug)],
        DetailState::NotFound(None) => vec!["Post not found: no slug given".to_string()],
        DetailState::NotFound(Some(slug)) => vec![format!("Post not found: {}", slug)],
        DetailState::Error { heading, message } => vec![
            heading.to_string(),
            format!("    {}", strip_html_tags(message)),
        ],
        DetailState::Loading => vec!["Post still loading".to_string()],
    }
}

pub fn print_detail(state: &DetailState) {
    print_lines(format_detail(state));
}

/// Final line of a page command that wrote to a file.
pub fn format_written(path: &Path, report: &RenderReport) -> String {
    format!(
        "Wrote {} ({} rendered, {} skipped)",
        path.display(),
        report.rendered.len(),
        report.skipped.len()
    )
}

// ============================================================================
// Check
// ============================================================================

/// One `check` line: record counts for a sheet, or why it failed to load.
pub fn format_sheet_status(
    sheet: Sheet,
    outcome: Result<(usize, &RenderReport), &str>,
) -> Vec<String> {
    match outcome {
        Ok((records, report)) => {
            let mut lines = vec![format!(
                "{}: {} records, {} renderable, {} skipped",
                sheet,
                records,
                report.rendered.len(),
                report.skipped.len()
            )];
            lines.extend(report.skipped.iter().map(|reason| format!("    {}", reason)));
            lines
        }
        Err(message) => vec![format!("{}: {}", sheet, message)],
    }
}

pub fn print_sheet_status(sheet: Sheet, outcome: Result<(usize, &RenderReport), &str>) {
    print_lines(format_sheet_status(sheet, outcome));
}

// ============================================================================
// Tests
// ============================================================================
