use regex::RegexBuilder;

/// A run of display text, flagged when it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: false,
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: true,
        }
    }
}

/// Split `text` around case-insensitive occurrences of `term`.
///
/// The term is matched literally, so regex metacharacters are harmless. Matched
/// runs keep the casing found in `text`. The term is used as typed, surrounding
/// whitespace included. A blank term yields the text as a single unmatched segment.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    if term.trim().is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::matched(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}
