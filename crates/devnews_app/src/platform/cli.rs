use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use devnews_core::{find_topic, CutoffBoundary, RecencyFilter, Topic};
use url::Url;

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000/api/news";
pub const DEFAULT_LOG_FILE: &str = "devnews.log";

/// Search developer news through the Dev News Hub proxy.
#[derive(Debug, Parser)]
#[command(name = "devnews", version, about)]
pub struct Cli {
    /// News route of the proxy.
    #[arg(long, env = "DEVNEWS_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    pub proxy_url: Url,

    /// Topic value or label, e.g. `rust` or "Web Development".
    #[arg(long, value_parser = parse_topic)]
    pub topic: Option<&'static Topic>,

    /// Free-text keyword added to the topic.
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// Only keep articles from the last few days.
    #[arg(long)]
    pub recent: bool,

    /// Where the recency window starts.
    #[arg(long, value_enum, default_value_t = Cutoff::Rolling)]
    pub cutoff: Cutoff,

    /// Keep a prompt open for further searches.
    #[arg(short, long)]
    pub interactive: bool,

    /// Disable colors and mark matches with brackets instead.
    #[arg(long)]
    pub no_color: bool,

    /// Also write log lines to the terminal.
    #[arg(long)]
    pub log_terminal: bool,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Cutoff {
    /// Exactly the lookback period before now.
    Rolling,
    /// Midnight UTC of the first day in the window.
    UtcDay,
}

impl Cli {
    pub fn recency(&self) -> RecencyFilter {
        let boundary = match self.cutoff {
            Cutoff::Rolling => CutoffBoundary::Rolling,
            Cutoff::UtcDay => CutoffBoundary::StartOfDayUtc,
        };
        RecencyFilter {
            boundary,
            ..RecencyFilter::default()
        }
    }
}

fn parse_topic(raw: &str) -> Result<&'static Topic, String> {
    find_topic(raw).ok_or_else(|| {
        format!("unknown topic {raw:?}; run `topics` in interactive mode to list them")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["devnews"]).unwrap();
        assert_eq!(cli.topic, None);
        assert_eq!(cli.keyword, "");
        assert!(!cli.recent);
        assert!(!cli.interactive);
        assert_eq!(cli.recency(), RecencyFilter::default());
        assert_eq!(cli.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn topic_accepts_label() {
        let cli = Cli::try_parse_from(["devnews", "--topic", "web development", "--recent"]).unwrap();
        assert_eq!(cli.topic.map(|topic| topic.label), Some("Web Development"));
        assert!(cli.recent);
    }

    #[test]
    fn cutoff_selects_boundary() {
        let cli = Cli::try_parse_from(["devnews", "--recent", "--cutoff", "utc-day"]).unwrap();
        assert_eq!(cli.recency().boundary, CutoffBoundary::StartOfDayUtc);
        assert!(Cli::try_parse_from(["devnews", "--cutoff", "weekly"]).is_err());
    }

    #[test]
    fn rejects_unknown_topic_and_bad_url() {
        assert!(Cli::try_parse_from(["devnews", "--topic", "cobol"]).is_err());
        assert!(Cli::try_parse_from(["devnews", "--proxy-url", "not a url"]).is_err());
    }
}
