use std::fmt::{Display, Write};

use chrono::{Local, TimeZone};
use crossterm::style::Stylize;
use devnews_core::{
    find_topic, parse_published, AppViewModel, ArticleRowView, Segment, StatusLine,
    DEFAULT_LOOKBACK_DAYS, TOPICS,
};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

/// Render the whole screen for `view`, timestamps in local time.
pub fn render(view: &AppViewModel, options: RenderOptions) -> String {
    render_in(view, options, &Local)
}

pub fn render_in<Tz>(view: &AppViewModel, options: RenderOptions, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint(APP_TITLE, options, |text| text.bold()));
    let _ = writeln!(out, "{}", query_line(view));
    let _ = writeln!(out, "{}", status_line(&view.status, options));

    for (index, row) in view.articles.iter().enumerate() {
        out.push('\n');
        write_row(&mut out, index + 1, row, options, tz);
    }
    out
}

pub fn topic_list() -> String {
    let width = TOPICS.iter().map(|topic| topic.label.len()).max().unwrap_or(0);
    TOPICS
        .iter()
        .map(|topic| format!("  {:width$}  {}", topic.label, topic.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn query_line(view: &AppViewModel) -> String {
    let topic = find_topic(&view.topic)
        .map(|topic| topic.label)
        .unwrap_or(view.topic.as_str());
    let keyword = if view.keyword.trim().is_empty() {
        "-"
    } else {
        view.keyword.as_str()
    };
    let recent = if view.recent_only { "on" } else { "off" };
    format!(
        "Topic: {topic} | Keyword: {keyword} | Last {DEFAULT_LOOKBACK_DAYS} days: {recent}"
    )
}

fn status_line(status: &StatusLine, options: RenderOptions) -> String {
    match status {
        StatusLine::Idle => STATUS_IDLE.to_string(),
        StatusLine::Loading => paint(STATUS_LOADING, options, |text| text.dark_grey()),
        StatusLine::Error(message) => {
            paint(&format!("Error: {message}"), options, |text| text.red().bold())
        }
        StatusLine::Empty => STATUS_EMPTY.to_string(),
        StatusLine::Found { count, recent_days } => {
            let noun = if *count == 1 { "article" } else { "articles" };
            let found = format!("Found {count} {noun}");
            match recent_days {
                Some(days) => {
                    let badge = format!("[last {days} days]");
                    format!("{found} {}", paint(&badge, options, |text| text.green()))
                }
                None => found,
            }
        }
    }
}

fn write_row<Tz>(
    out: &mut String,
    number: usize,
    row: &ArticleRowView,
    options: RenderOptions,
    tz: &Tz,
) where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let _ = writeln!(out, "{number:>3}. {}", segments(&row.title, options));
    if let Some(description) = &row.description {
        let _ = writeln!(out, "     {}", segments(description, options));
    }
    let metadata = metadata_line(row, tz);
    let _ = writeln!(out, "     {}", paint(&metadata, options, |text| text.dark_grey()));
    let _ = writeln!(out, "     {}", paint(&row.url, options, |text| text.blue().underlined()));
    if let Some(image_url) = &row.image_url {
        let _ = writeln!(out, "     Image: {image_url}");
    }
}

/// `source • author • published`; the author part is dropped when absent.
pub fn metadata_line<Tz>(row: &ArticleRowView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut parts = vec![row.source_name.clone()];
    if let Some(author) = row.author.as_deref().filter(|author| !author.trim().is_empty()) {
        parts.push(author.to_string());
    }
    if let Some(published) = row.published_at.as_deref() {
        parts.push(format_published(published, tz));
    }
    parts.join(META_SEPARATOR)
}

/// Timestamp in `tz`, or the raw text when it does not parse.
pub fn format_published<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_published(raw) {
        Some(instant) => instant
            .with_timezone(tz)
            .format(PUBLISHED_FORMAT)
            .to_string(),
        None => raw.to_string(),
    }
}

fn segments(segments: &[Segment], options: RenderOptions) -> String {
    let mut out = String::new();
    for segment in segments {
        if !segment.matched {
            out.push_str(&segment.text);
        } else if options.color {
            let _ = write!(out, "{}", segment.text.as_str().black().on_yellow().bold());
        } else {
            out.push_str(MATCH_OPEN);
            out.push_str(&segment.text);
            out.push_str(MATCH_CLOSE);
        }
    }
    out
}

fn paint<F, S>(text: &str, options: RenderOptions, style: F) -> String
where
    F: FnOnce(String) -> S,
    S: Display,
{
    if options.color {
        style(text.to_string()).to_string()
    } else {
        text.to_string()
    }
}
