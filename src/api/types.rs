//! Wire and domain types for the review service.
//!
//! `ReviewRecord` mirrors the JSON the service sends, with every field it may
//! omit left optional. `Review` is what the rest of the app works with: the
//! product name is always present once a record has been converted.

use std::sync::OnceLock;

use chrono::{DateTime, Local, Locale, NaiveDateTime, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Product name shown when neither the caller nor the service supplied one.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Maximum number of characters of review text shown in the list view.
pub const LIST_PREVIEW_CHARS: usize = 150;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    /// Unrecognized labels from the service land here too.
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😞",
            Sentiment::Neutral => "😐",
        }
    }
}

/// Which subset of reviews the list shows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SentimentFilter {
    #[default]
    All,
    Positive,
    Negative,
    Neutral,
}

impl SentimentFilter {
    pub const ALL: [SentimentFilter; 4] = [
        SentimentFilter::All,
        SentimentFilter::Positive,
        SentimentFilter::Negative,
        SentimentFilter::Neutral,
    ];

    /// The sentiment to request from the service, `None` for "all".
    pub fn sentiment(&self) -> Option<Sentiment> {
        match self {
            SentimentFilter::All => None,
            SentimentFilter::Positive => Some(Sentiment::Positive),
            SentimentFilter::Negative => Some(Sentiment::Negative),
            SentimentFilter::Neutral => Some(Sentiment::Neutral),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentFilter::All => "All",
            SentimentFilter::Positive => "Positive",
            SentimentFilter::Negative => "Negative",
            SentimentFilter::Neutral => "Neutral",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next filter, wrapping from Neutral back to All.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Request body for `POST /analyze-review`. The product name is never sent.
#[derive(Serialize, Debug)]
pub struct AnalyzeRequest<'a> {
    pub review_text: &'a str,
}

/// A review as the service serializes it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    pub review_text: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub key_points: Option<String>,
}

/// An analyzed review, immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Option<i64>,
    pub product_name: String,
    pub review_text: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub created_at: Option<NaiveDateTime>,
    pub key_points: Option<String>,
}

impl Review {
    /// Converts a wire record, preferring `caller_name` over the service's
    /// product name. Blank names count as absent.
    pub fn from_record(record: ReviewRecord, caller_name: Option<&str>) -> Self {
        let product_name = non_blank(caller_name)
            .or_else(|| non_blank(record.product_name.as_deref()))
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string();

        Self {
            id: record.id,
            product_name,
            review_text: record.review_text,
            sentiment: record.sentiment,
            sentiment_score: record.sentiment_score,
            created_at: record.created_at.as_deref().and_then(parse_timestamp),
            key_points: record.key_points,
        }
    }

    /// Score with one decimal, e.g. `87.5%`.
    pub fn score_percent(&self) -> String {
        format!("{:.1}%", self.sentiment_score * 100.0)
    }

    /// Score rounded to a whole percent, e.g. `88%`.
    pub fn score_percent_rounded(&self) -> String {
        format!("{:.0}%", self.sentiment_score * 100.0)
    }

    /// Review text cut to [`LIST_PREVIEW_CHARS`] characters, with `...` when cut.
    pub fn preview(&self) -> String {
        truncate_chars(&self.review_text, LIST_PREVIEW_CHARS)
    }

    /// Non-blank key point lines, untrimmed.
    pub fn key_point_lines(&self) -> Vec<&str> {
        self.key_points
            .as_deref()
            .map(|points| {
                points
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Creation date in the user's locale (`LC_ALL`, `LC_TIME`, `LANG`),
    /// empty when unknown.
    pub fn date_label(&self) -> String {
        self.date_label_in(system_locale())
    }

    pub fn date_label_in(&self, locale: Locale) -> String {
        self.created_at
            .map(|ts| ts.date().format_localized("%x", locale).to_string())
            .unwrap_or_default()
    }
}

/// Blank names count as absent. Kept names are returned as typed.
fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

/// Parses the service's ISO-8601 timestamps into local wall-clock time.
/// Naive values are taken as local already.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_timestamp_in(raw, &Local)
}

/// Like [`parse_timestamp`], with offsets converted into `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Locale for date labels, read once from the environment.
pub fn system_locale() -> Locale {
    static LOCALE: OnceLock<Locale> = OnceLock::new();
    *LOCALE.get_or_init(|| locale_from_env(|key| std::env::var(key).ok()))
}

/// Resolves a chrono locale from POSIX locale variables, in their usual
/// precedence. `de_DE.UTF-8@euro` resolves as `de_DE`. Unknown or unset
/// values fall back to POSIX.
pub fn locale_from_env(env: impl Fn(&str) -> Option<String>) -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|key| env(*key))
        .find(|value| !value.is_empty())
        .and_then(|value| {
            let name = value.split(['.', '@']).next().unwrap_or_default();
            Locale::try_from(name).ok()
        })
        .unwrap_or(Locale::POSIX)
}

/// Truncate to `max` characters (not bytes), appending "..." if anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
