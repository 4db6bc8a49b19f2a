use crate::locate::sentence::SentenceLocator;
use crate::models::KeywordSet;

/// Bright yellow.
pub const ANSI_HIGHLIGHT: &str = "\x1b[93m";
pub const ANSI_RESET: &str = "\x1b[0m";

/// Wraps keyword occurrences in a pair of markers.
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::ansi()
    }
}

impl Highlighter {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Terminal highlighting with ANSI colour codes.
    #[must_use]
    pub fn ansi() -> Self {
        Self::new(ANSI_HIGHLIGHT, ANSI_RESET)
    }

    /// Character spans `[start, end)` to emphasize, sorted by start.
    ///
    /// Longer keywords claim text first; an occurrence overlapping an
    /// already claimed span is dropped.
    #[must_use]
    pub fn spans(sentence: &str, keywords: &KeywordSet) -> Vec<(usize, usize)> {
        let locator = SentenceLocator::new(sentence);
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        for keyword in keywords.by_length_desc() {
            let len = keyword.chars().count();
            for start in locator.occurrences(keyword) {
                let end = start + len;
                if claimed.iter().all(|&(s, e)| end <= s || e <= start) {
                    claimed.push((start, end));
                }
            }
        }

        claimed.sort_unstable();
        claimed
    }

    /// Return `sentence` with every keyword occurrence wrapped in markers.
    #[must_use]
    pub fn highlight(&self, sentence: &str, keywords: &KeywordSet) -> String {
        let spans = Self::spans(sentence, keywords);
        if spans.is_empty() {
            return sentence.to_string();
        }

        let mut out = String::with_capacity(sentence.len() + spans.len() * 12);
        let mut spans = spans.into_iter().peekable();
        for (i, c) in sentence.chars().enumerate() {
            if spans.peek().is_some_and(|&(s, _)| s == i) {
                out.push_str(&self.open);
            }
            out.push(c);
            if let Some(&(_, e)) = spans.peek() {
                if e == i + 1 {
                    out.push_str(&self.close);
                    spans.next();
                }
            }
        }
        out
    }
}

/// Highlight keywords in `sentence` with ANSI colours.
#[must_use]
pub fn highlight(sentence: &str, keywords: &KeywordSet) -> String {
    Highlighter::ansi().highlight(sentence, keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brackets() -> Highlighter {
        Highlighter::new("[", "]")
    }

    fn kws(words: &[&str]) -> KeywordSet {
        words.iter().collect()
    }

    #[test]
    fn wraps_every_occurrence() {
        let out = brackets().highlight("服务器和服务器", &kws(&["服务器"]));
        assert_eq!(out, "[服务器]和[服务器]");
    }

    #[test]
    fn longest_keyword_wins_overlap() {
        let out = brackets().highlight("采购计算机设备若干", &kws(&["计算机", "计算机设备"]));
        assert_eq!(out, "采购[计算机设备]若干");
    }

    #[test]
    fn case_insensitive_keeps_original_text() {
        let out = brackets().highlight("Linux SERVER and server", &kws(&["Server"]));
        assert_eq!(out, "Linux [SERVER] and [server]");
    }

    #[test]
    fn adjacent_matches_each_wrapped() {
        let out = brackets().highlight("abab", &kws(&["ab"]));
        assert_eq!(out, "[ab][ab]");
    }

    #[test]
    fn no_match_returns_input() {
        assert_eq!(brackets().highlight("无关内容", &kws(&["关键词"])), "无关内容");
    }

    #[test]
    fn ansi_default_markers() {
        let out = highlight("a server", &kws(&["server"]));
        assert_eq!(out, format!("a {ANSI_HIGHLIGHT}server{ANSI_RESET}"));
    }
}
