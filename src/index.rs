//! In-memory post index: date ordering and category filtering.
//!
//! Built once per page load from the fetched `Blogs` sheet. The index holds
//! every decoded record, sorted newest first, together with the derived
//! category set. Validation waits for the render gate.
//!
//! ## Ordering
//!
//! Posts are ordered by `datePublished`, newest first. Unparseable or missing
//! dates are "older than everything": they sort after every dated post, and
//! keep their relative sheet order among themselves (the sort is stable).
//!
//! ## Categories
//!
//! A post's `category` cell is a comma-separated list. Tokens are trimmed and
//! empty tokens dropped, so `"A,, B ,"` means `["A", "B"]`. Category identity
//! is the exact trimmed string (case-sensitive); each category also gets a
//! lowercase-hyphenated slug for `data-category` attributes. Slugs are unique
//! within an index: when two names fold to the same slug (`"Rust"`, `"rust"`)
//! or a name folds to `"all"`, later ones get a `-2`, `-3`, ... suffix.

use crate::records::PostRecord;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;

/// The slug of the static "show everything" filter button.
pub const ALL_SLUG: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Named(String),
}

impl CategorySelector {
    /// Whether this selector picks `category`. Compares exact names.
    pub fn selects(&self, category: &Category) -> bool {
        matches!(self, CategorySelector::Named(name) if *name == category.name)
    }

    pub fn matches(&self, post: &PostRecord) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Named(name) => post.categories().any(|c| c == name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Exact trimmed name as written in the sheet.
    pub name: String,
    pub slug: String,
}


/// `"Web Dev"` → `"web-dev"`.
pub fn category_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Order posts newest first; undated posts go last in their original order.
pub fn sort_by_date_descending(records: &[PostRecord]) -> Vec<PostRecord> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &PostRecord)> =
        records.iter().map(|r| (r.published(), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_published(a.as_ref(), b.as_ref()));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

fn compare_published(a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.cmp(a),
    }
}

/// Unique category tokens across `records`, in first-seen order, each with a
/// slug no other category (or the "all" button) shares.
pub fn unique_categories(records: &[PostRecord]) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut taken: HashSet<String> = HashSet::from([ALL_SLUG.to_string()]);
    records
        .iter()
        .flat_map(|r| r.categories())
        .filter(|name| seen.insert(*name))
        .map(|name| {
            let base = category_slug(name);
            let mut slug = base.clone();
            let mut n = 2;
            while !taken.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            Category {
                name: name.to_string(),
                slug,
            }
        })
        .collect()
}

pub fn filter_by_category<'a>(
    records: &'a [PostRecord],
    selector: &CategorySelector,
) -> Vec<&'a PostRecord> {
    records.iter().filter(|r| selector.matches(r)).collect()
}

/// Sorted posts plus their category set.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<PostRecord>,
    categories: Vec<Category>,
}

impl PostIndex {
    pub fn new(records: Vec<PostRecord>) -> Self {
        let posts = sort_by_date_descending(&records);
        let categories = unique_categories(&posts);
        Self { posts, categories }
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The newest `limit` posts, or all of them when `limit` is `None`.
    pub fn recent(&self, limit: Option<usize>) -> &[PostRecord] {
        match limit {
            Some(n) => &self.posts[..n.min(self.posts.len())],
            None => &self.posts,
        }
    }

    pub fn filter(&self, selector: &CategorySelector) -> Vec<&PostRecord> {
        filter_by_category(&self.posts, selector)
    }

    /// Map a button's `data-category` slug back to its selector.
    pub fn selector_for_slug(&self, slug: &str) -> Option<CategorySelector> {
        if slug == ALL_SLUG {
            return Some(CategorySelector::All);
        }
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| CategorySelector::Named(c.name.clone()))
    }

    /// Resolve a user-typed category: an exact name first, then a slug.
    pub fn selector_for_name_or_slug(&self, text: &str) -> Option<CategorySelector> {
        self.categories
            .iter()
            .find(|c| c.name == text)
            .map(|c| CategorySelector::Named(c.name.clone()))
            .or_else(|| self.selector_for_slug(text))
            .or_else(|| self.selector_for_slug(&category_slug(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::post;

    fn dated(slug: &str, date: Option<&str>) -> PostRecord {
        PostRecord {
            date_published: date.map(str::to_string),
            ..post(slug)
        }
    }

    fn categorized(slug: &str, category: Option<&str>) -> PostRecord {
        PostRecord {
            category: category.map(str::to_string),
            ..post(slug)
        }
    }

    fn slugs(records: &[PostRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.slug.as_deref()).collect()
    }

    #[test]
    fn sort_newest_first() {
        let sorted = sort_by_date_descending(&[
            dated("old", Some("2022-05-01")),
            dated("new", Some("2024-01-01")),
            dated("mid", Some("2023-01-01")),
        ]);
        assert_eq!(slugs(&sorted), vec!["new", "mid", "old"]);
    }

    #[test]
    fn sort_puts_unparseable_last_from_either_side() {
        let sorted = sort_by_date_descending(&[
            dated("bad", Some("not a date")),
            dated("a", Some("2020-01-01")),
            dated("missing", None),
            dated("b", Some("2021-01-01")),
        ]);
        assert_eq!(slugs(&sorted), vec!["b", "a", "bad", "missing"]);
    }

    #[test]
    fn sort_is_stable_for_ties_and_unparseable() {
        let sorted = sort_by_date_descending(&[
            dated("x1", None),
            dated("same1", Some("2024-02-02")),
            dated("x2", Some("??")),
            dated("same2", Some("2024-02-02")),
            dated("x3", None),
        ]);
        assert_eq!(slugs(&sorted), vec!["same1", "same2", "x1", "x2", "x3"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let input = vec![dated("a", Some("2020-01-01")), dated("b", Some("2024-01-01"))];
        let _ = sort_by_date_descending(&input);
        assert_eq!(slugs(&input), vec!["a", "b"]);
    }

    #[test]
    fn unique_categories_dedups_and_drops_empty() {
        let cats = unique_categories(&[
            categorized("1", Some("A,, B ,")),
            categorized("2", Some("B, Web Dev")),
            categorized("3", Some("   ")),
            categorized("4", None),
            categorized("5", Some("a")),
        ]);
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Web Dev", "a"]);
        assert_eq!(cats[2].slug, "web-dev");
    }

    #[test]
    fn filter_all_returns_everything_in_order() {
        let records = vec![
            categorized("1", Some("A")),
            categorized("2", None),
            categorized("3", Some("B")),
        ];
        let all = filter_by_category(&records, &CategorySelector::All);
        assert_eq!(all.len(), 3);
        assert!(all.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn filter_named_matches_exact_trimmed_token() {
        let records = vec![
            categorized("1", Some("Rust, Web")),
            categorized("2", None),
            categorized("3", Some("rust")),
            categorized("4", Some(" Rust ")),
            categorized("5", Some("Rustacean")),
        ];
        let hits = filter_by_category(&records, &CategorySelector::Named("Rust".into()));
        let hit_slugs: Vec<_> = hits.iter().filter_map(|r| r.slug.as_deref()).collect();
        assert_eq!(hit_slugs, vec!["1", "4"]);
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        assert!(sort_by_date_descending(&[]).is_empty());
        assert!(unique_categories(&[]).is_empty());
        assert!(filter_by_category(&[], &CategorySelector::All).is_empty());
        assert!(filter_by_category(&[], &CategorySelector::Named("x".into())).is_empty());
    }

    #[test]
    fn index_recent_bounds_the_slice() {
        let index = PostIndex::new((0..12).map(|i| post(&format!("p{i}"))).collect());
        assert_eq!(index.recent(Some(9)).len(), 9);
        assert_eq!(index.recent(Some(50)).len(), 12);
        assert_eq!(index.recent(None).len(), 12);
    }

    #[test]
    fn selector_for_slug_maps_buttons_back() {
        let index = PostIndex::new(vec![categorized("1", Some("Web Dev"))]);
        assert_eq!(index.selector_for_slug("all"), Some(CategorySelector::All));
        assert_eq!(
            index.selector_for_slug("web-dev"),
            Some(CategorySelector::Named("Web Dev".into()))
        );
        assert_eq!(index.selector_for_slug("nope"), None);
    }

    #[test]
    fn category_slug_folds_case_and_whitespace() {
        assert_eq!(category_slug("Machine  Learning"), "machine-learning");
    }

    #[test]
    fn case_variant_categories_get_distinct_slugs() {
        let cats = unique_categories(&[
            categorized("1", Some("Rust, All")),
            categorized("2", Some("rust")),
            categorized("3", Some("RUST")),
        ]);
        let pairs: Vec<_> = cats.iter().map(|c| (c.name.as_str(), c.slug.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("Rust", "rust"), ("All", "all-2"), ("rust", "rust-2"), ("RUST", "rust-3")]
        );
    }

    #[test]
    fn case_variant_categories_resolve_separately() {
        let index = PostIndex::new(vec![
            categorized("1", Some("Rust")),
            categorized("2", Some("rust")),
        ]);
        let named = |n: &str| Some(CategorySelector::Named(n.into()));
        assert_eq!(index.selector_for_slug("rust"), named("Rust"));
        assert_eq!(index.selector_for_slug("rust-2"), named("rust"));
        assert_eq!(index.selector_for_name_or_slug("rust"), named("rust"));
        assert_eq!(index.selector_for_name_or_slug("Rust"), named("Rust"));
        assert_eq!(index.selector_for_name_or_slug("rust-2"), named("rust"));
        assert_eq!(index.selector_for_name_or_slug("all"), Some(CategorySelector::All));
        assert_eq!(index.selector_for_name_or_slug("go"), None);
    }

    #[test]
    fn selector_selects_by_exact_name() {
        let rust = Category {
            name: "Rust".into(),
            slug: "rust".into(),
        };
        assert!(CategorySelector::Named("Rust".into()).selects(&rust));
        assert!(!CategorySelector::Named("rust".into()).selects(&rust));
        assert!(!CategorySelector::All.selects(&rust));
    }
}
