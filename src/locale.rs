//! Fixed locale strings and long-form date formatting.
//!
//! The site ships with Bengali (`bn-BD`) reader-facing strings; `en-US` is the
//! alternative. Error messages aimed at the site operator stay in English in
//! both locales.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "bn-BD")]
    BnBd,
    #[serde(rename = "en-US")]
    EnUs,
}

/// Reader-facing strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    /// Prefix of the listing card date line.
    pub published: &'static str,
    /// Prefix of the date line when the date is unknown.
    pub published_unknown: &'static str,
    pub unknown: &'static str,
    pub read_more: &'static str,
    pub all_categories: &'static str,
    pub no_posts_in_category: &'static str,
    pub no_content: &'static str,
    pub title_unavailable: &'static str,
}

const BN_BD: UiStrings = UiStrings {
    published: "প্রকাশিত: ",
    published_unknown: "প্রকাশের তারিখ: ",
    unknown: "অজানা",
    read_more: "বিস্তারিত পড়ুন →",
    all_categories: "সকল",
    no_posts_in_category: "এই ক্যাটাগরিতে কোনো পোস্ট পাওয়া যায়নি।",
    no_content: "এই পোস্টের জন্য কোনো কনটেন্ট উপলব্ধ নেই।",
    title_unavailable: "শিরোনাম উপলব্ধ নেই",
};

const EN_US: UiStrings = UiStrings {
    published: "Published: ",
    published_unknown: "Published: ",
    unknown: "Unknown",
    read_more: "Read more →",
    all_categories: "All",
    no_posts_in_category: "No posts found in this category.",
    no_content: "No content is available for this post.",
    title_unavailable: "Title unavailable",
};

const BN_MONTHS: [&str; 12] = [
    "জানুয়ারী",
    "ফেব্রুয়ারী",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const BN_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

impl Locale {
    pub fn strings(self) -> &'static UiStrings {
        match self {
            Locale::BnBd => &BN_BD,
            Locale::EnUs => &EN_US,
        }
    }

    /// BCP 47 tag, used for the `<html lang>` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::BnBd => "bn-BD",
            Locale::EnUs => "en-US",
        }
    }

    /// Long-form date: `৫ জানুয়ারী, ২০২৪` / `January 5, 2024`.
    pub fn format_long_date(self, date: &DateTime<Utc>) -> String {
        let month = date.month0() as usize;
        match self {
            Locale::BnBd => format!(
                "{} {}, {}",
                bengali_digits(date.day()),
                BN_MONTHS[month],
                bengali_digits(date.year())
            ),
            Locale::EnUs => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
        }
    }

    /// The formatted date, or the locale's "unknown" string.
    pub fn format_date_or_unknown(self, date: Option<&DateTime<Utc>>) -> String {
        match date {
            Some(d) => self.format_long_date(d),
            None => self.strings().unknown.to_string(),
        }
    }
}

fn bengali_digits(n: impl ToString) -> String {
    n.to_string()
        .chars()
        .map(|c| c.to_digit(10).map_or(c, |d| BN_DIGITS[d as usize]))
        .collect()
}
