use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::Article;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 3;

/// Where the recency window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutoffBoundary {
    /// Exactly `lookback_days * 24h` before now. Independent of time zones.
    #[default]
    Rolling,
    /// Midnight UTC of the date `lookback_days` before now, the same day that is
    /// sent upstream as `start_date`.
    StartOfDayUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyFilter {
    pub lookback_days: i64,
    pub boundary: CutoffBoundary,
}

impl Default for RecencyFilter {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            boundary: CutoffBoundary::default(),
        }
    }
}

impl RecencyFilter {
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let rolling = now - Duration::days(self.lookback_days);
        match self.boundary {
            CutoffBoundary::Rolling => rolling,
            CutoffBoundary::StartOfDayUtc => rolling
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc())
                .unwrap_or(rolling),
        }
    }

    /// `YYYY-MM-DD` of the first day in the window, in UTC.
    pub fn start_date(&self, now: DateTime<Utc>) -> String {
        (now - Duration::days(self.lookback_days))
            .format("%Y-%m-%d")
            .to_string()
    }

    /// True when the article has a parseable timestamp on or after the cutoff.
    pub fn includes(&self, article: &Article, now: DateTime<Utc>) -> bool {
        article
            .published_at
            .as_deref()
            .and_then(parse_published)
            .is_some_and(|published| published >= self.cutoff(now))
    }

    pub fn apply(&self, articles: Vec<Article>, now: DateTime<Utc>) -> Vec<Article> {
        articles
            .into_iter()
            .filter(|article| self.includes(article, now))
            .collect()
    }
}

/// Parse the timestamp formats seen from news providers.
///
/// Offsets are honoured; naive date-times and bare dates are taken as UTC.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Currents: "2024-01-01 12:00:00 +0000"
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
