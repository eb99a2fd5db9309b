//! Image reference resolution.
//!
//! Spreadsheet cells hold image references in three shapes. This module turns
//! each into something an `<img src>` can load:
//!
//! | Cell value | Result |
//! |------------|--------|
//! | `https://drive.google.com/file/d/ABC/view` | `https://drive.google.com/uc?export=view&id=ABC` |
//! | `https://cdn.example.com/a.png` | unchanged |
//! | `cover.png` | `{local_prefix}/cover.png` |
//! | empty / whitespace | empty string; the caller substitutes a placeholder |

use regex::Regex;
use std::sync::LazyLock;

static DRIVE_FILE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"drive\.google\.com/file/d/([a-zA-Z0-9_-]+)").expect("drive pattern must compile")
});

/// Resolve a raw image reference against the local image folder.
pub fn resolve(raw: &str, local_prefix: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(id) = DRIVE_FILE_ID.captures(trimmed).and_then(|c| c.get(1)) {
        return format!("https://drive.google.com/uc?export=view&id={}", id.as_str());
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    format!("{}/{}", local_prefix.trim_end_matches('/'), trimmed)
}

/// Like [`resolve`], but `None` when there is nothing to show.
pub fn resolve_opt(raw: Option<&str>, local_prefix: &str) -> Option<String> {
    raw.map(|r| resolve(r, local_prefix)).filter(|u| !u.is_empty())
}
