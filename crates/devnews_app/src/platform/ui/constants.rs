pub const APP_TITLE: &str = "Dev News Hub";
pub const PROMPT: &str = "> ";

pub const STATUS_IDLE: &str = "Type `search` or press Enter to load articles.";
pub const STATUS_LOADING: &str = "Loading articles...";
pub const STATUS_EMPTY: &str = "No articles found. Try another keyword.";

pub const META_SEPARATOR: &str = " • ";
pub const PUBLISHED_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Match markers used when colors are off.
pub const MATCH_OPEN: &str = "[";
pub const MATCH_CLOSE: &str = "]";

pub const HELP: &str = "\
Commands:
  topic <value|label>   pick a topic (no argument: All Tech)
  topics                list topics
  keyword <text>        set the keyword (no argument clears it)
  recent on|off         only keep articles from the last days
  search, <Enter>       run the search
  help                  show this text
  quit                  leave";
