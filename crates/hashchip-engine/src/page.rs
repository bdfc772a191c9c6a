//! Which pages the labeller runs on.

use glob::{MatchOptions, Pattern};

/// `*` crosses `/`, and case matters as it does in URLs.
const URL_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A URL pattern where `*` matches any run of characters, including none.
/// Every other character matches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePattern {
    source: String,
    glob: Pattern,
}

impl PagePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let glob = compile(&source);
        Self { source, glob }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, url: &str) -> bool {
        self.glob.matches_with(url, URL_MATCH)
    }
}

/// Escapes everything between the stars and folds runs of `*` into one, so
/// `?` and `[...]` stay literal and no `**` component rules apply.
fn compile(source: &str) -> Pattern {
    let escaped = source
        .split('*')
        .map(Pattern::escape)
        .collect::<Vec<_>>()
        .join("*");

    let mut folded = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        if !(c == '*' && folded.ends_with('*')) {
            folded.push(c);
        }
    }

    Pattern::new(&folded).expect("escaped literals joined by single stars always compile")
}

/// Set of page patterns; a URL is accepted if any pattern matches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatcher {
    patterns: Vec<PagePattern>,
}

impl Default for PageMatcher {
    /// The Google Tasks full-screen embed, with and without an account
    /// segment (`/u/1/...`-style) in the path.
    fn default() -> Self {
        Self::new([
            "https://tasks.google.com/embed/fullscreen*",
            "https://tasks.google.com/*/embed/fullscreen*",
        ])
    }
}

impl PageMatcher {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(PagePattern::new).collect() }
    }

    /// Accepts every URL.
    pub fn any() -> Self {
        Self::new(["*"])
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(PagePattern::new(pattern));
        self
    }

    pub fn patterns(&self) -> &[PagePattern] {
        &self.patterns
    }

    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob_match(pattern: &str, url: &str) -> bool {
        PagePattern::new(pattern).matches(url)
    }

    #[test]
    fn default_accepts_tasks_embed() {
        let m = PageMatcher::default();
        assert!(m.matches("https://tasks.google.com/embed/fullscreen"));
        assert!(m.matches("https://tasks.google.com/embed/fullscreen?origin=calendar"));
        assert!(m.matches("https://tasks.google.com/u/1/embed/fullscreen?hl=en"));
    }

    #[test]
    fn default_rejects_other_pages() {
        let m = PageMatcher::default();
        assert!(!m.matches("https://tasks.google.com/"));
        assert!(!m.matches("http://tasks.google.com/embed/fullscreen"));
        assert!(!m.matches("https://calendar.google.com/embed/fullscreen"));
        assert!(!m.matches(""));
    }

    #[test]
    fn star_matches_empty() {
        assert!(glob_match("a*b", "ab"));
        assert!(glob_match("*", ""));
        assert!(glob_match("**", "x"));
    }

    #[test]
    fn star_backtracks() {
        assert!(glob_match("a*b*c", "aXbYbZc"));
        assert!(!glob_match("a*b*c", "aXbYbZ"));
        assert!(glob_match("*.com/*", "x.com.evil.com/p"));
    }

    #[test]
    fn literal_must_match_fully() {
        assert!(glob_match("abc", "abc"));
        assert!(!glob_match("abc", "abcd"));
        assert!(!glob_match("abcd", "abc"));
    }

    #[test]
    fn glob_metacharacters_are_literal() {
        assert!(glob_match("https://x/?a=[1]*", "https://x/?a=[1]&b=2"));
        assert!(!glob_match("https://x/?a=[1]*", "https://x/Za=1"));
        assert!(glob_match("a]b", "a]b"));
        assert!(glob_match("x/**/y", "x/p/q/y"));
        assert!(glob_match("a***b", "a/b"));
    }

    #[test]
    fn case_matters() {
        assert!(!glob_match("https://tasks.google.com/*", "https://Tasks.google.com/x"));
    }

    #[test]
    fn any_and_extra_patterns() {
        assert!(PageMatcher::any().matches("file:///tmp/notes.txt"));
        let m = PageMatcher::new(Vec::<String>::new()).with_pattern("https://example.com/*");
        assert!(m.matches("https://example.com/tasks"));
        assert_eq!(m.patterns().len(), 1);
    }
}
